//! Logging system initialization
//!
//! This module provides functions to initialize the tracing/logging system
//! based on application configuration.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const DEFAULT_LOG_FILE: &str = "surgedash.log";

/// 日志输出目标
enum LogTarget {
    Stdout,
    Rolling { dir: String, prefix: String },
    File(String),
}

fn log_target(config: &LoggingConfig) -> LogTarget {
    match config.file.as_deref() {
        Some(file) if !file.is_empty() && config.enable_rotation => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| ".".to_string());
            let filename = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or(DEFAULT_LOG_FILE);
            LogTarget::Rolling {
                dir,
                prefix: filename.trim_end_matches(".log").to_string(),
            }
        }
        Some(file) if !file.is_empty() => LogTarget::File(file.to_string()),
        _ => LogTarget::Stdout,
    }
}

/// 构建日志过滤器：`RUST_LOG` 优先，否则使用配置中的级别
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize logging system based on configuration
///
/// The returned `WorkerGuard` must be kept alive for the duration of the
/// program so that buffered non-blocking writes are flushed.
pub fn init_logging(
    config: &LoggingConfig,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let target = log_target(config);
    let use_ansi = matches!(target, LogTarget::Stdout);

    let writer: Box<dyn std::io::Write + Send + Sync> = match target {
        LogTarget::Rolling { dir, prefix } => Box::new(
            rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .max_log_files(config.max_backups.max(1) as usize)
                .build(&dir)
                .context("Failed to create rolling log appender")?,
        ),
        LogTarget::File(file) => Box::new(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&file)
                .with_context(|| format!("Failed to open log file {}", file))?,
        ),
        LogTarget::Stdout => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(build_filter(&config.level))
        .with_level(true)
        .with_ansi(use_ansi);

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging(file: Option<&str>, rotation: bool) -> LoggingConfig {
        LoggingConfig {
            level: "info".into(),
            format: "text".into(),
            file: file.map(str::to_string),
            max_backups: 5,
            enable_rotation: rotation,
        }
    }

    #[test]
    fn test_log_target_defaults_to_stdout() {
        assert!(matches!(log_target(&logging(None, true)), LogTarget::Stdout));
        assert!(matches!(log_target(&logging(Some(""), true)), LogTarget::Stdout));
    }

    #[test]
    fn test_log_target_rolling_splits_dir_and_prefix() {
        match log_target(&logging(Some("logs/app.log"), true)) {
            LogTarget::Rolling { dir, prefix } => {
                assert_eq!(dir, "logs");
                assert_eq!(prefix, "app");
            }
            _ => panic!("expected rolling target"),
        }
        match log_target(&logging(Some("app.log"), true)) {
            LogTarget::Rolling { dir, .. } => assert_eq!(dir, "."),
            _ => panic!("expected rolling target"),
        }
    }

    #[test]
    fn test_log_target_plain_file_without_rotation() {
        assert!(matches!(
            log_target(&logging(Some("app.log"), false)),
            LogTarget::File(ref f) if f == "app.log"
        ));
    }
}
