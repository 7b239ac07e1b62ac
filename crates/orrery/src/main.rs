//! Real-time solar system viewer.
//!
//! Run with: `cargo run -p orrery -- [--width N] [--time-scale X] [--config DIR]`

use std::process::ExitCode;

use clap::Parser;
use orrery_app::PlatformDirs;
use orrery_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve_and_create(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize platform directories: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (mut config, config_error) = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    if let Some(e) = config_error {
        error!("Using default config: {e}");
    }
    info!(
        "Window: {}x{} | textures: {}px | time scale: {}",
        config.window.width,
        config.window.height,
        config.render.texture_resolution,
        config.simulation.time_scale
    );
    info!("Config directory: {}", dirs.config_dir.display());

    match orrery_app::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
