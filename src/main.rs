//! Main entry point for sheetdiff CLI

use clap::Parser;
use sheetdiff::cli::Cli;
use sheetdiff::commands::{execute_command, resolve_config};

fn main() {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Set up verbose logging if requested
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Execute the command
    if let Err(e) = execute_command(cli.command, config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
