//! Tilestep headless runner.
//!
//! Loads a JSON level, runs a fixed number of simulation steps with scripted
//! input and reports where everything ended up.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- assets/levels/demo.json --steps 240 --hold-right --jump-every 60
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use tilestep::error::SimError;
use tilestep::level::{load_level, spawn_level};
use tilestep::resources::input::Button;
use tilestep::resources::simconfig::SimConfig;
use tilestep::simulation::Simulation;

/// Tilestep: tile-world entity simulation
#[derive(Parser)]
#[command(version, about = "Runs a tile level headless and reports entity state.")]
struct Cli {
    /// Level JSON file.
    level: PathBuf,

    /// INI configuration file. Defaults are used when it is missing.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of steps to simulate.
    #[arg(long, default_value_t = 120)]
    steps: u32,

    /// Horizontal factor per step (1.0 is one nominal frame).
    #[arg(long, default_value_t = 1.0)]
    dt: f32,

    /// Hold the left button for the whole run.
    #[arg(long)]
    hold_left: bool,

    /// Hold the right button for the whole run.
    #[arg(long)]
    hold_right: bool,

    /// Press jump every N steps (0 disables).
    #[arg(long, default_value_t = 0)]
    jump_every: u32,

    /// Write the final entity snapshot as JSON to this path.
    #[arg(long, value_name = "PATH")]
    dump: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let mut config = SimConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        info!("Using default config: {e}");
    }

    let tilemap = load_level(&cli.level)?;
    let mut sim = Simulation::new(config);
    let spawned = spawn_level(&mut sim, &tilemap)?;
    if spawned.player.is_none() {
        info!("Level has no player; input flags are ignored");
    }

    {
        let mut input = sim.input_mut();
        if cli.hold_left {
            input.press(Button::Left);
        }
        if cli.hold_right {
            input.press(Button::Right);
        }
    }

    for step in 1..=cli.steps {
        if cli.jump_every > 0 && step % cli.jump_every == 0 {
            let mut input = sim.input_mut();
            input.release(Button::JumpPrimary);
            input.press(Button::JumpPrimary);
        }
        sim.step(cli.dt);
    }

    let snapshot = sim.snapshot();
    for entity in &snapshot {
        info!(
            "entity {} at ({:.1}, {:.1}) tile ({}, {}) facing {} rot {:.1} grounded {}",
            entity.entity,
            entity.x,
            entity.y,
            entity.tile_x,
            entity.tile_y,
            entity.direction,
            entity.rot,
            entity.on_ground
        );
    }

    if let Some(path) = &cli.dump {
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)?;
        info!("Wrote snapshot to {}", path.display());
    }
    Ok(())
}
