use std::path::Path;

pub fn run(
    width: usize,
    height: usize,
    seed: u64,
    ticks: u64,
    rle: bool,
    output: &Path,
    initial_charge: f32,
) -> Result<(), String> {
    let (mut sim, config) = super::build_simulation(width, height, seed, true, initial_charge)?;
    super::drive(&mut sim, &config, ticks)?;

    let snapshot = sim.export_snapshot();
    let bytes = if rle {
        snapshot.to_rle()
    } else {
        snapshot.into_bytes()
    };
    log::debug!("writing {} snapshot bytes", bytes.len());
    std::fs::write(output, &bytes)
        .map_err(|e| format!("cannot write to {}: {e}", output.display()))?;

    println!(
        "  Wrote {} snapshot ({} bytes, tick {}) to {}",
        if rle { "rle" } else { "raw" },
        bytes.len(),
        sim.current_tick(),
        output.display()
    );
    Ok(())
}
