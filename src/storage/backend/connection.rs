use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityName};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::errors::{DashboardError, Result};
use migration::entities::{account, client, posting};
use migration::{Migrator, MigratorTrait};

/// 仪表盘查询依赖的三张表
fn required_tables() -> [&'static str; 3] {
    [
        client::Entity.table_name(),
        account::Entity.table_name(),
        posting::Entity.table_name(),
    ]
}

/// 允许直接写文件路径（surgedash.db、:memory:）
pub(crate) fn sqlite_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite://{}", database_url)
    }
}

/// 连接 SQLite；文件不存在时创建
pub async fn connect_sqlite(
    database_url: &str,
    config: &DatabaseConfig,
) -> Result<DatabaseConnection> {
    use sea_orm::SqlxSqliteConnector;
    use sea_orm::sqlx::SqlitePool;
    use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
    use std::str::FromStr;

    let opt = SqliteConnectOptions::from_str(&sqlite_url(database_url))
        .map_err(|e| DashboardError::database_config(format!("SQLite URL 解析失败: {}", e)))?
        .create_if_missing(true)
        // 读多写少：WAL 让上游写入不阻塞仪表盘查询
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(config.timeout.clamp(1, 30)))
        .pragma("temp_store", "memory");

    let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
        DashboardError::database_connection(format!("无法连接到 SQLite 数据库: {}", e))
    })?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// 连接 MySQL / PostgreSQL
pub async fn connect_generic(
    database_url: &str,
    backend_name: &str,
    config: &DatabaseConfig,
) -> Result<DatabaseConnection> {
    let timeout = Duration::from_secs(config.timeout);

    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(config.pool_size)
        .min_connections(config.pool_size.min(2))
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(false);

    Database::connect(opt).await.map_err(|e| {
        DashboardError::database_connection(format!(
            "无法连接到 {} 数据库: {}",
            backend_name.to_uppercase(),
            e
        ))
    })
}

/// 建表或检查表是否存在
///
/// `run_migrations = false` 时不改动库结构，只确认仪表盘需要的表都在。
pub async fn prepare_schema(db: &DatabaseConnection, config: &DatabaseConfig) -> Result<()> {
    if config.run_migrations {
        Migrator::up(db, None)
            .await
            .map_err(|e| DashboardError::database_operation(format!("迁移失败: {}", e)))?;
        info!("Database migrations completed");
        return Ok(());
    }

    let backend = db.get_database_backend();
    for table in required_tables() {
        let check_sql = format!("SELECT 1 FROM {} WHERE 1 = 0", table);
        db.execute_unprepared(&check_sql).await.map_err(|e| {
            DashboardError::database_config(format!(
                "表 {} 不可用（run_migrations 已关闭）: {}",
                table, e
            ))
        })?;
    }
    warn!("Skipping migrations on {:?}; existing schema accepted", backend);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url() {
        assert_eq!(sqlite_url("surgedash.db"), "sqlite://surgedash.db");
        assert_eq!(sqlite_url(":memory:"), "sqlite://:memory:");
        assert_eq!(sqlite_url("sqlite://data.db?mode=rwc"), "sqlite://data.db?mode=rwc");
        assert_eq!(sqlite_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[test]
    fn test_required_tables_match_entities() {
        assert_eq!(required_tables(), ["clients", "accounts", "tiktok_posting"]);
    }
}
