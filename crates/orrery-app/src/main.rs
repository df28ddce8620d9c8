//! The binary entry point for the orrery application.

use clap::Parser;
use orrery_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(Config::default_dir);
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_dir.display());
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&config));
    tracing::info!("Starting orrery (config: {})", config_dir.display());

    orrery_app::run_with_config(config);
}
