use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rf_core::CellKind;
use rf_core::protocol::TerrainSync;
use rf_core::render::render_terrain;

pub fn run(width: usize, height: usize, seed: u64, json: bool) -> Result<(), String> {
    let map = super::build_terrain(width, height, seed)?;

    if json {
        let sync = TerrainSync::from_map(&map);
        let out = serde_json::to_string(&sync)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} {}",
        "Terrain".bold(),
        format!("({width}x{height}, seed={seed})").dimmed()
    );
    println!();
    println!("{}", render_terrain(&map));
    println!();

    let histogram = map.histogram();
    let total = map.len() as f64;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Glyph", "Cells", "Share"]);
    for kind in CellKind::ALL {
        let count = histogram[kind.code() as usize];
        table.add_row(vec![
            kind.to_string(),
            kind.glyph().to_string(),
            count.to_string(),
            format!("{:.1}%", count as f64 / total * 100.0),
        ]);
    }
    println!("{table}");

    Ok(())
}
