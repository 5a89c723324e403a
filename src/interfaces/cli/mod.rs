//! CLI interface module
//!
//! 命令行报表：直接连接数据库，复用与 HTTP 端点相同的服务层。

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::storage::{SeaOrmStorage, StorageFactory};
use commands::{config_generate, config_show, print_campaigns, print_kpis, print_trends};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    fn label(&self) -> &'static str {
        match self {
            CliError::StorageError(_) => "Storage error:",
            CliError::ParseError(_) => "Parse error:",
            CliError::CommandError(_) => "Command error:",
        }
    }

    fn detail(&self) -> &str {
        match self {
            CliError::StorageError(msg)
            | CliError::ParseError(msg)
            | CliError::CommandError(msg) => msg,
        }
    }

    /// 进程退出码：参数错误 2，数据库 3，其余 1
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ParseError(_) => 2,
            CliError::StorageError(_) => 3,
            CliError::CommandError(_) => 1,
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        let label = match self {
            CliError::ParseError(_) => self.label().yellow().bold(),
            _ => self.label().red().bold(),
        };
        format!("{} {}", label, self.detail().white())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label(), self.detail())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::DashboardError> for CliError {
    fn from(err: crate::errors::DashboardError) -> Self {
        use crate::errors::DashboardError;
        match err {
            DashboardError::DateParse(msg) => CliError::ParseError(msg),
            other => CliError::StorageError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::CommandError(format!("Failed to serialize output: {}", err))
    }
}

async fn open_storage() -> Result<Arc<SeaOrmStorage>, CliError> {
    StorageFactory::create()
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        // config 子命令不需要数据库连接
        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => {
                config_generate(output_path, force).await
            }
            ConfigCommands::Show => config_show(),
        },

        Commands::Kpis { start, end, json } => {
            let storage = open_storage().await?;
            print_kpis(storage, start, end, json).await
        }

        Commands::Campaigns { json } => {
            let storage = open_storage().await?;
            print_campaigns(storage, json).await
        }

        Commands::Trends { days, json } => {
            let storage = open_storage().await?;
            print_trends(storage, days, json).await
        }

        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by the server runtime".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DashboardError;

    #[test]
    fn test_dashboard_errors_map_to_cli_errors() {
        let parse: CliError = DashboardError::date_parse("2024-13-01").into();
        assert!(matches!(parse, CliError::ParseError(_)));
        assert_eq!(parse.exit_code(), 2);

        let storage: CliError = DashboardError::database_connection("refused").into();
        assert!(matches!(storage, CliError::StorageError(_)));
        assert_eq!(storage.exit_code(), 3);
    }

    #[test]
    fn test_display_has_label() {
        let err = CliError::CommandError("boom".to_string());
        assert_eq!(err.to_string(), "Command error: boom");
        assert_eq!(err.exit_code(), 1);
    }
}
