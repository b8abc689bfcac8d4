use crate::terrain::TerrainMap;

/// Snapshot bytes at or below this value are drawn as bare terrain.
pub const VISIBLE_THRESHOLD: u8 = 10;

/// Render the terrain as one glyph per cell, one line per row.
pub fn render_terrain(map: &TerrainMap) -> String {
    render_with(map, |i| map.cells()[i].glyph())
}

/// Render the terrain with a quantized fluid snapshot drawn on top.
///
/// Cells whose byte is missing or at most [`VISIBLE_THRESHOLD`] show terrain.
pub fn render_overlay(map: &TerrainMap, snapshot: &[u8]) -> String {
    render_with(map, |i| match snapshot.get(i) {
        Some(&b) if b > VISIBLE_THRESHOLD => fluid_glyph(b),
        _ => map.cells()[i].glyph(),
    })
}

fn fluid_glyph(byte: u8) -> char {
    match byte {
        0..=85 => ':',
        86..=170 => '*',
        _ => '@',
    }
}

fn render_with(map: &TerrainMap, glyph: impl Fn(usize) -> char) -> String {
    let width = map.width();
    let mut out = String::with_capacity((width + 1) * map.height());
    for row in 0..map.height() {
        if row > 0 {
            out.push('\n');
        }
        out.extend((row * width..(row + 1) * width).map(&glyph));
    }
    out
}
