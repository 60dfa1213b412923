// KML Preprocessor - KML to GeoJSON conversion pipeline
// Copyright (c) 2025 KML Preprocessor Contributors
// Licensed under the MIT License

use clap::Parser;
use kml_preprocessor::cli::{Cli, Commands};
use kml_preprocessor::config::load_config_or_default;
use kml_preprocessor::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Commands report a broken config file themselves; logging falls back to defaults
    let config = load_config_or_default(&cli.config).unwrap_or_default();
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(config.application.log_level.as_str());

    let guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "KML Preprocessor - KML to GeoJSON conversion pipeline"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Flush buffered log lines before exiting
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Convert(args) => args.execute(&cli.config).await,
        Commands::Check(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
