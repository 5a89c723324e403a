//! Panic hook
//!
//! 崩溃报告追加写入日志目录下的 `crash.log`（未配置日志文件时写到当前目录）。
//! 服务模式在终端输出带 backtrace 的彩色报告，CLI 模式只输出一行。

use chrono::{DateTime, Utc};
use std::backtrace::Backtrace;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::panic;
use std::path::{Path, PathBuf};

use crate::config::LoggingConfig;

const CRASH_LOG_NAME: &str = "crash.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Server,
    Cli,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunMode::Server => "server",
            RunMode::Cli => "cli",
        })
    }
}

/// `logging.file` 所在目录下的 crash.log
pub fn crash_log_path(logging: &LoggingConfig) -> PathBuf {
    logging
        .file
        .as_deref()
        .filter(|f| !f.is_empty())
        .and_then(|f| Path::new(f).parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(CRASH_LOG_NAME))
        .unwrap_or_else(|| PathBuf::from(CRASH_LOG_NAME))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

struct CrashReport {
    at: DateTime<Utc>,
    mode: RunMode,
    thread: String,
    message: String,
    location: String,
    backtrace: String,
}

impl fmt::Display for CrashReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- surgedash {} crash ({}) at {} ---",
            env!("CARGO_PKG_VERSION"),
            self.mode,
            self.at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f, "thread:   {}", self.thread)?;
        writeln!(f, "message:  {}", self.message)?;
        writeln!(f, "location: {}", self.location)?;
        writeln!(f, "backtrace:\n{}", self.backtrace)
    }
}

pub fn install_panic_hook(mode: RunMode, crash_log: PathBuf) {
    panic::set_hook(Box::new(move |info| {
        let report = CrashReport {
            at: Utc::now(),
            mode,
            thread: std::thread::current()
                .name()
                .unwrap_or("<unnamed>")
                .to_string(),
            message: panic_message(info.payload()),
            location: info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
                .unwrap_or_else(|| "unknown".to_string()),
            backtrace: format!("{:?}", Backtrace::force_capture()),
        };

        if let Err(e) = append_report(&crash_log, &report) {
            eprintln!("Failed to write {}: {}", crash_log.display(), e);
        }

        match mode {
            RunMode::Server => {
                tracing::error!(
                    panic.location = %report.location,
                    panic.thread = %report.thread,
                    "panic: {}",
                    report.message
                );
                print_server_report(&report, &crash_log);
            }
            RunMode::Cli => {
                eprintln!(
                    "surgedash crashed: {} (details in {})",
                    report.message,
                    crash_log.display()
                );
            }
        }
    }));
}

fn print_server_report(report: &CrashReport, crash_log: &Path) {
    use colored::Colorize;

    eprintln!("{}", "== PANIC ==".red().bold());
    eprintln!("{} {}", "thread:".yellow(), report.thread);
    eprintln!("{} {}", "reason:".yellow(), report.message.white().bold());
    eprintln!("{} {}", "at:".yellow(), report.location);
    eprintln!("{}", report.backtrace.dimmed());
    eprintln!(
        "{}",
        format!("report appended to {}", crash_log.display()).cyan()
    );
}

fn append_report(path: &Path, report: &CrashReport) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", report)
}
