//! CLI frontend for the ruinflow terrain generator and fluid simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ruinflow",
    about = "ruinflow: city-ruin terrain and the sludge that floods it",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// World size and seed shared by every command.
#[derive(Args, Clone, Copy)]
struct WorldArgs {
    /// Grid width in cells
    #[arg(long, default_value = "100")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "100")]
    height: usize,

    /// RNG seed for terrain generation and the solver
    #[arg(short, long, default_value = "42")]
    seed: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a terrain map and print it
    Generate {
        #[command(flatten)]
        world: WorldArgs,

        /// Print the world config and category bytes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the fluid solver and summarise the field
    Simulate {
        #[command(flatten)]
        world: WorldArgs,

        /// Number of solver ticks to run
        #[arg(short, long, default_value = "100")]
        ticks: u64,

        /// Start with the solver disabled
        #[arg(long)]
        disabled: bool,

        /// Print every broadcast snapshot
        #[arg(short, long)]
        verbose: bool,

        /// Fluid placed at the emitter before the first tick
        #[arg(long, default_value = "0")]
        initial_charge: f32,
    },

    /// Run the fluid solver and write the final snapshot to a file
    Snapshot {
        #[command(flatten)]
        world: WorldArgs,

        /// Number of solver ticks to run
        #[arg(short, long, default_value = "100")]
        ticks: u64,

        /// Run-length encode the snapshot
        #[arg(long)]
        rle: bool,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Fluid placed at the emitter before the first tick
        #[arg(long, default_value = "0")]
        initial_charge: f32,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { world, json } => {
            commands::generate::run(world.width, world.height, world.seed, json)
        }
        Commands::Simulate {
            world,
            ticks,
            disabled,
            verbose,
            initial_charge,
        } => commands::simulate::run(
            world.width,
            world.height,
            world.seed,
            ticks,
            disabled,
            verbose,
            initial_charge,
        ),
        Commands::Snapshot {
            world,
            ticks,
            rle,
            output,
            initial_charge,
        } => commands::snapshot::run(
            world.width,
            world.height,
            world.seed,
            ticks,
            rle,
            &output,
            initial_charge,
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
