//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for surgedash using clap's derive macros.

use clap::{Parser, Subcommand};

/// Surgedash - campaign analytics API for TikTok postings
#[derive(Parser)]
#[command(name = "surgedash")]
#[command(version)]
#[command(about = "Campaign analytics API for TikTok postings", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Print view/like/comment/share totals
    Kpis {
        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        end: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print per-campaign rollups
    Campaigns {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print cumulative views and engagement for the last N days
    Trends {
        /// Window size in days
        #[arg(long, short = 'd')]
        days: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (file + environment)
    Show,
}

impl Commands {
    /// 是否需要以服务器模式运行
    pub fn is_server(&self) -> bool {
        matches!(self, Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_config_flag() {
        let cli = Cli::try_parse_from(["surgedash", "kpis", "--start", "2024-01-01", "-c", "x.toml"])
            .unwrap();
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
        match cli.command {
            Some(Commands::Kpis { start, end, json }) => {
                assert_eq!(start.as_deref(), Some("2024-01-01"));
                assert!(end.is_none());
                assert!(!json);
            }
            _ => panic!("expected kpis command"),
        }
    }

    #[test]
    fn test_no_command_defaults_to_none() {
        let cli = Cli::try_parse_from(["surgedash"]).unwrap();
        assert!(cli.command.is_none());
    }
}
