use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rf_core::protocol::MSG_FLUID_PATCH;
use rf_core::render::render_overlay;
use rf_simulation::{FieldProbe, ProbeSample};

pub fn run(
    width: usize,
    height: usize,
    seed: u64,
    ticks: u64,
    disabled: bool,
    verbose: bool,
    initial_charge: f32,
) -> Result<(), String> {
    let (mut sim, config) =
        super::build_simulation(width, height, seed, !disabled, initial_charge)?;
    sim.add_system(FieldProbe::every((ticks / 10).max(1)));

    let broadcasts = super::drive(&mut sim, &config, ticks)?;

    println!(
        "  {} {}",
        "Simulation".bold(),
        format!(
            "({width}x{height}, {ticks} ticks at {} Hz, seed={seed})",
            config.tick_rate_hz
        )
        .dimmed()
    );
    let state = if sim.solver().is_enabled() {
        "enabled".green()
    } else {
        "disabled".yellow()
    };
    println!(
        "  Fluid {state}, {} broadcasts at {} Hz",
        broadcasts.len(),
        config.broadcast_rate_hz
    );
    println!();

    if verbose {
        println!("  {}", "Broadcasts".bold().underline());
        println!();
        for broadcast in &broadcasts {
            let label = format!("[tick {:>4}]", broadcast.tick).dimmed();
            println!(
                "  {label} {MSG_FLUID_PATCH}: {} occupied, {} bytes raw, {} bytes rle",
                broadcast.snapshot.occupied(),
                broadcast.snapshot.len(),
                broadcast.snapshot.to_rle().len()
            );
        }
        if broadcasts.is_empty() {
            println!("  {}", "(no broadcasts)".dimmed());
        }
        println!();
    }

    println!("  {}", "Field Summary".bold().underline());
    println!();

    let samples = sim
        .get_system::<FieldProbe>()
        .map(|probe| probe.samples().to_vec())
        .unwrap_or_default();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Tick", "Total mass", "Wet cells", "Peak level"]);
    for sample in &samples {
        table.add_row(sample_row(sample));
    }
    println!("{table}");
    println!();

    let snapshot = sim.export_snapshot();
    println!(
        "  Final snapshot: {} of {} cells occupied, {} bytes rle",
        snapshot.occupied(),
        snapshot.len(),
        snapshot.to_rle().len()
    );

    if verbose {
        println!();
        println!("{}", render_overlay(sim.terrain(), snapshot.as_bytes()));
    }

    Ok(())
}

fn sample_row(sample: &ProbeSample) -> Vec<String> {
    vec![
        sample.tick.to_string(),
        format!("{:.2}", sample.total_mass),
        sample.wet_cells.to_string(),
        format!("{:.3}", sample.max_level),
    ]
}
