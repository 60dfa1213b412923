//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the preprocessor using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// KML Preprocessor - KML to GeoJSON conversion pipeline
#[derive(Parser, Debug)]
#[command(name = "kml-preprocessor")]
#[command(version, about, long_about = None)]
#[command(author = "KML Preprocessor Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults apply when it does not exist)
    #[arg(
        short,
        long,
        default_value = "kml-preprocessor.toml",
        env = "KMLPRE_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "KMLPRE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a KML file into per-layer GeoJSON files
    Convert(commands::convert::ConvertArgs),

    /// Report whether a file would be accepted for conversion
    Check(commands::check::CheckArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from(["kml-preprocessor", "convert", "in.kml", "out"]);
        assert_eq!(cli.config, "kml-preprocessor.toml");
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.input, PathBuf::from("in.kml"));
                assert_eq!(args.output_dir, PathBuf::from("out"));
                assert_eq!(args.max_layers, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_convert_overrides() {
        let cli = Cli::parse_from([
            "kml-preprocessor",
            "convert",
            "in.kml",
            "out",
            "--max-layers",
            "3",
            "--index-size",
            "1024",
            "--mapnik-index",
            "/opt/bin/mapnik-index",
        ]);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.max_layers, Some(3));
                assert_eq!(args.index_size, Some(1024));
                assert_eq!(args.mapnik_index.as_deref(), Some("/opt/bin/mapnik-index"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["kml-preprocessor", "--config", "custom.toml", "check", "a.kml"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["kml-preprocessor", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["kml-preprocessor", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["kml-preprocessor", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }

    #[test]
    fn test_cli_convert_requires_output_dir() {
        assert!(Cli::try_parse_from(["kml-preprocessor", "convert", "in.kml"]).is_err());
    }
}
