//! Graceful shutdown
//!
//! 容器里跑仪表盘时收到的通常是 SIGTERM，本地调试是 Ctrl+C，两者都会触发关闭。

use sea_orm::DatabaseConnection;
use std::fmt;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// 关闭连接池的等待上限
const POOL_CLOSE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
    /// 信号监听本身失败
    ListenerFailed,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => write!(f, "SIGINT"),
            Self::Terminate => write!(f, "SIGTERM"),
            Self::ListenerFailed => write!(f, "signal listener failure"),
        }
    }
}

async fn wait_for_interrupt() -> ShutdownReason {
    match tokio::signal::ctrl_c().await {
        Ok(()) => ShutdownReason::Interrupt,
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}", e);
            ShutdownReason::ListenerFailed
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> ShutdownReason {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            return wait_for_interrupt().await;
        }
    };

    tokio::select! {
        reason = wait_for_interrupt() => reason,
        _ = term.recv() => ShutdownReason::Terminate,
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> ShutdownReason {
    wait_for_interrupt().await
}

/// 关闭数据库连接池，超时只记录不阻塞退出
pub async fn close_pool(db: &DatabaseConnection) {
    match timeout(POOL_CLOSE_TIMEOUT, db.clone().close()).await {
        Ok(Ok(())) => info!("Database connection pool closed"),
        Ok(Err(e)) => error!("Failed to close database connection pool: {}", e),
        Err(_) => error!(
            "Closing the database pool timed out after {:?}",
            POOL_CLOSE_TIMEOUT
        ),
    }
}

/// 等待退出信号后关闭连接池，返回触发原因
pub async fn listen_for_shutdown(db: &DatabaseConnection) -> ShutdownReason {
    let reason = wait_for_signal().await;
    info!("Received {}, closing dashboard connections", reason);
    close_pool(db).await;
    reason
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        assert_eq!(ShutdownReason::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownReason::Terminate.to_string(), "SIGTERM");
    }
}
