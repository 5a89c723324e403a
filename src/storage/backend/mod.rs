//! SeaORM storage backend
//!
//! This module provides read access to the dashboard tables using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
pub mod converters;
mod query;
pub mod retry;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::warn;

use crate::errors::{DashboardError, Result};
use crate::utils::dates;

pub use connection::{connect_generic, connect_sqlite, prepare_schema};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(DashboardError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 规范化 backend 名称
pub fn normalize_backend_name(backend: &str) -> String {
    match backend {
        "mariadb" => "mysql".to_string(),
        other => other.to_string(),
    }
}

/// surge_date 上的闭区间，两端都可省略
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// 无边界时任何日期（包括缺失）都满足；有边界时缺失日期不满足
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// 账号过滤条件（POST /accounts/filtered 的请求体）
///
/// 空字符串与缺省等价；数值字段既接受数字也接受数字字符串。
#[derive(Default, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AccountFilter {
    #[serde(deserialize_with = "lenient::string")]
    pub platform: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub account_status: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub posting_status: Option<String>,
    #[serde(deserialize_with = "lenient::integer")]
    pub min_followers: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub max_followers: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub min_views: Option<i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub max_views: Option<i64>,
    /// 大小写不敏感的子串匹配
    #[serde(deserialize_with = "lenient::string")]
    pub username: Option<String>,
}

/// 发布记录过滤条件
#[derive(Default, Clone, Debug)]
pub struct PostFilter {
    pub range: DateRange,
    pub account_id: Option<String>,
    pub client_id: Option<i64>,
    pub video_category: Option<String>,
    /// 模糊匹配 video_id 或 post_caption（大小写不敏感）
    pub search: Option<String>,
    /// 只返回关联了客户的记录
    pub only_with_client: bool,
}

impl PostFilter {
    pub fn in_range(range: DateRange) -> Self {
        Self {
            range,
            ..Default::default()
        }
    }

    pub fn by_account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: Some(account_id.into()),
            ..Default::default()
        }
    }

    pub fn by_client(client_id: i64) -> Self {
        Self {
            client_id: Some(client_id),
            ..Default::default()
        }
    }
}

/// 过滤请求体的宽松反序列化
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        let parsed = match value {
            Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Some(Value::String(s)) => crate::utils::parse_leading_int(&s),
            _ => None,
        };
        // 0 与缺省等价
        Ok(parsed.filter(|v| *v != 0))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// 重试配置
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(DashboardError::database_config(
                "DATABASE_URL 未设置".to_string(),
            ));
        }

        let config = crate::config::get_config();
        let db_config = &config.database;
        let retry_config = retry::RetryConfig::from(db_config);

        let backend_name = normalize_backend_name(backend_name);

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url, db_config).await?
        } else {
            connect_generic(database_url, &backend_name, db_config).await?
        };
        prepare_schema(&db, db_config).await?;

        let storage = SeaOrmStorage {
            db,
            backend_name,
            retry_config,
        };

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn get_backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接（测试数据写入等需要直接访问数据库的场景）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 健康检查：执行一次轻量查询
    pub async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| DashboardError::database_connection(e.to_string()))
    }
}

/// 文本日期列上的区间条件所用的边界值
pub(crate) fn range_bounds(range: &DateRange) -> (Option<String>, Option<String>) {
    (
        range.start.map(dates::date_key),
        range.end.map(dates::next_day_key),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("sqlite://data.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("surgedash.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mariadb://u:p@localhost/db").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://localhost/db").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("ftp://nope").is_err());
    }

    #[test]
    fn test_date_range_contains() {
        let open = DateRange::default();
        assert!(open.contains(None));
        assert!(open.contains(Some(d(2020, 1, 1))));

        let range = DateRange::between(d(2024, 1, 1), d(2024, 1, 31));
        assert!(range.contains(Some(d(2024, 1, 1))));
        assert!(range.contains(Some(d(2024, 1, 31))));
        assert!(!range.contains(Some(d(2024, 2, 1))));
        assert!(!range.contains(None));

        let from = DateRange::new(Some(d(2024, 1, 10)), None);
        assert!(from.contains(Some(d(2030, 1, 1))));
        assert!(!from.contains(Some(d(2024, 1, 9))));
    }

    #[test]
    fn test_range_bounds_use_next_day_for_end() {
        let (start, end) = range_bounds(&DateRange::between(d(2024, 1, 1), d(2024, 1, 31)));
        assert_eq!(start.as_deref(), Some("2024-01-01"));
        assert_eq!(end.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn test_account_filter_is_lenient() {
        let filter: AccountFilter = serde_json::from_str(
            r#"{
                "platform": "tiktok",
                "account_status": "",
                "min_followers": "1000",
                "max_followers": 5000,
                "min_views": "abc",
                "username": "Surge"
            }"#,
        )
        .unwrap();
        assert_eq!(filter.platform.as_deref(), Some("tiktok"));
        assert_eq!(filter.account_status, None);
        assert_eq!(filter.min_followers, Some(1000));
        assert_eq!(filter.max_followers, Some(5000));
        assert_eq!(filter.min_views, None);
        assert_eq!(filter.max_views, None);
        assert_eq!(filter.username.as_deref(), Some("Surge"));
    }

    #[test]
    fn test_account_filter_empty_body() {
        let filter: AccountFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.platform.is_none());
        assert!(filter.min_followers.is_none());
    }
}
