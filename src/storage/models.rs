use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};
use ts_rs::TS;

/// TypeScript 类型输出路径（仪表盘前端使用）
pub const TS_EXPORT_PATH: &str = "../dashboard/src/types.generated.ts";

/// 账号所属平台
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TS,
    EnumString,
    AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[strum(ascii_case_insensitive)]
pub enum Platform {
    #[serde(rename = "tiktok")]
    #[strum(serialize = "tiktok")]
    TikTok,
    #[serde(rename = "instagram")]
    #[strum(serialize = "instagram")]
    Instagram,
    #[serde(rename = "facebook")]
    #[strum(serialize = "facebook")]
    Facebook,
    #[serde(rename = "X", alias = "x")]
    #[strum(serialize = "X")]
    X,
    #[serde(rename = "youtube")]
    #[strum(serialize = "youtube")]
    YouTube,
}

impl Platform {
    /// 展示名：首字母大写，其余保持原样（`Tiktok`、`Youtube`、`X`）
    pub fn display_name(&self) -> String {
        let raw = self.as_ref();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// 社交账号
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct Account {
    pub account_id: String,
    pub platform: Platform,
    pub username: String,
    pub account_niche: Option<String>,
    pub display_name: Option<String>,
    pub profile_url: Option<String>,
    pub pfp_url: Option<String>,
    pub bio: Option<String>,
    pub account_status: Option<String>,
    pub posting_status: Option<String>,
    pub post_to_feed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub followers_count: Option<i64>,
    pub media_count: Option<i64>,
    pub profile_views: Option<i64>,
    pub reach_count: Option<i64>,
    pub views_count_total: Option<i64>,
    pub likes_count_total: Option<i64>,
    pub comments_count_total: Option<i64>,
    pub shares_count_total: Option<i64>,
}

/// 单次指标快照对应的发布记录
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct Posting {
    pub post_id: String,
    pub video_id: Option<String>,
    pub account_id: String,
    pub client_id: Option<i64>,
    /// 指标快照日期（趋势聚合的时间轴）
    pub surge_date: Option<NaiveDate>,
    /// 计划发布日期（仅用于每日发帖统计）
    pub scheduled_date: Option<NaiveDate>,
    pub video_category: Option<String>,
    pub posted_link: Option<String>,
    pub post_caption: Option<String>,
    pub views: Option<i64>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub shares: Option<i64>,
}

/// 计数字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Views,
    Likes,
    Comments,
    Shares,
}

/// null 与负数都按 0 处理
fn counter(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

impl Posting {
    pub fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Views => counter(self.views),
            Metric::Likes => counter(self.likes),
            Metric::Comments => counter(self.comments),
            Metric::Shares => counter(self.shares),
        }
    }

    pub fn views_or_zero(&self) -> u64 {
        self.metric(Metric::Views)
    }

    /// likes + comments + shares
    pub fn engagement(&self) -> u64 {
        self.metric(Metric::Likes) + self.metric(Metric::Comments) + self.metric(Metric::Shares)
    }
}

/// 客户 / 活动
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct Client {
    pub client_id: i64,
    pub created_at: DateTime<Utc>,
    pub campaign: Option<String>,
    pub status: Option<String>,
}

/// 关联展开后的发布记录（posting + account + client）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PostingRecord {
    #[serde(flatten)]
    #[ts(flatten)]
    pub posting: Posting,
    pub accounts: Option<Account>,
    pub clients: Option<Client>,
}

impl AsRef<Posting> for PostingRecord {
    fn as_ref(&self) -> &Posting {
        &self.posting
    }
}

impl AsRef<Posting> for Posting {
    fn as_ref(&self) -> &Posting {
        self
    }
}

/// 三张表的行数，健康检查与启动日志使用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DatasetCounts {
    pub clients: u64,
    pub accounts: u64,
    pub postings: u64,
}

impl DatasetCounts {
    pub fn is_empty(&self) -> bool {
        self.clients == 0 && self.accounts == 0 && self.postings == 0
    }
}
