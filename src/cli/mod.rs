//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for tfsynth using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// tfsynth - export New Relic synthetic monitors as Terraform
#[derive(Parser, Debug)]
#[command(name = "tfsynth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tfsynth.toml", env = "TFSYNTH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TFSYNTH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export synthetic monitors to Terraform files
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["tfsynth", "export"]);
        assert_eq!(cli.config, "tfsynth.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["tfsynth", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["tfsynth", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["tfsynth", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_export_overrides() {
        let cli = Cli::parse_from([
            "tfsynth",
            "export",
            "--dry-run",
            "--output-directory",
            "out",
            "--monitor-id",
            "g1,g2",
            "--monitor-id",
            "g3",
            "--parallel-workers",
            "4",
        ]);

        let Commands::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert!(args.dry_run);
        assert_eq!(args.output_directory.as_deref(), Some("out"));
        assert_eq!(args.monitor_id, vec!["g1", "g2", "g3"]);
        assert_eq!(args.parallel_workers, Some(4));
    }
}
