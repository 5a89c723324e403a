//! Dashboard API 类型定义
//!
//! 请求参数与响应 DTO。聚合结果在 [`crate::analytics`] 中是内部类型，
//! 这里负责转换成前端使用的 JSON 形状（日期标签、驼峰字段名、四位小数）。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::analytics;
use crate::storage::models::{Account, DatasetCounts, Platform, PostingRecord, TS_EXPORT_PATH};
use crate::utils::dates::{date_key, display_label};

// ============ 请求参数 ============

/// `?days=N`，原样保留字符串，由 handler 宽松解析
#[derive(Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DaysQuery {
    pub days: Option<String>,
}

/// `?limit=N`
#[derive(Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct KpiQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct TopPostsQuery {
    pub limit: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct PostsFilterQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub account_id: Option<String>,
    pub client_id: Option<String>,
    pub video_category: Option<String>,
    pub search: Option<String>,
}

// ============ 时间序列 ============

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DailyCountResponse {
    /// 展示用日期标签，如 `Jan 5`
    pub date: String,
    pub count: u64,
}

impl From<analytics::DailyCount> for DailyCountResponse {
    fn from(point: analytics::DailyCount) -> Self {
        Self {
            date: display_label(point.date),
            count: point.count,
        }
    }
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ViewsPoint {
    pub date: String,
    pub views: u64,
}

impl From<analytics::SeriesPoint> for ViewsPoint {
    fn from(point: analytics::SeriesPoint) -> Self {
        Self {
            date: display_label(point.date),
            views: point.value,
        }
    }
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRatePoint {
    pub date: String,
    /// 小数形式（0.1 = 10%），保留四位
    pub engagement_rate: f64,
}

impl From<analytics::EngagementPoint> for EngagementRatePoint {
    fn from(point: analytics::EngagementPoint) -> Self {
        Self {
            date: display_label(point.date),
            engagement_rate: analytics::round_rate(point.rate),
        }
    }
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DailyTrendPoint {
    pub date: String,
    /// 截至当天的累计浏览量
    pub views: u64,
    pub engagement: f64,
}

impl From<analytics::DailyTrend> for DailyTrendPoint {
    fn from(point: analytics::DailyTrend) -> Self {
        Self {
            date: display_label(point.date),
            views: point.views,
            engagement: point.engagement,
        }
    }
}

// ============ 排行 / 分布 ============

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct TopAccount {
    pub username: String,
    pub platform: Platform,
    pub engagement: u64,
}

impl From<analytics::AccountEngagement> for TopAccount {
    fn from(item: analytics::AccountEngagement) -> Self {
        Self {
            username: item.username,
            platform: item.platform,
            engagement: item.engagement,
        }
    }
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct CategoryPerformance {
    pub category: String,
    pub views: u64,
}

impl From<analytics::CategoryViews> for CategoryPerformance {
    fn from(item: analytics::CategoryViews) -> Self {
        Self {
            category: item.category,
            views: item.views,
        }
    }
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PlatformSlice {
    pub name: String,
    pub value: u64,
}

impl From<analytics::PlatformSlice> for PlatformSlice {
    fn from(item: analytics::PlatformSlice) -> Self {
        Self {
            name: item.name,
            value: item.value,
        }
    }
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatsResponse {
    pub platform: Platform,
    pub count: u64,
    pub total_followers: u64,
    pub total_views: u64,
    pub total_likes: u64,
}

impl From<analytics::PlatformStats> for PlatformStatsResponse {
    fn from(item: analytics::PlatformStats) -> Self {
        Self {
            platform: item.platform,
            count: item.count,
            total_followers: item.total_followers,
            total_views: item.total_views,
            total_likes: item.total_likes,
        }
    }
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct CampaignComparisonItem {
    /// 艺人名（campaign 名称最后一个 " - " 之后的部分）
    pub campaign: String,
    pub views: u64,
}

impl From<analytics::CampaignComparison> for CampaignComparisonItem {
    fn from(item: analytics::CampaignComparison) -> Self {
        Self {
            campaign: item.campaign,
            views: item.views,
        }
    }
}

// ============ Campaign ============

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct TopPostSummary {
    pub post_id: String,
    pub views: u64,
    pub posted_link: Option<String>,
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DateSpanResponse {
    /// YYYY-MM-DD
    pub earliest: String,
    pub latest: String,
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct CampaignStatsResponse {
    pub client_id: i64,
    pub campaign: String,
    pub status: String,
    pub post_count: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub avg_engagement: f64,
    pub top_post: Option<TopPostSummary>,
    pub date_range: Option<DateSpanResponse>,
}

impl From<analytics::CampaignStats> for CampaignStatsResponse {
    fn from(stats: analytics::CampaignStats) -> Self {
        Self {
            client_id: stats.client_id,
            campaign: stats.campaign,
            status: stats.status,
            post_count: stats.post_count,
            total_views: stats.total_views,
            total_likes: stats.total_likes,
            total_comments: stats.total_comments,
            total_shares: stats.total_shares,
            avg_engagement: stats.avg_engagement,
            top_post: stats.top_post.map(|top| TopPostSummary {
                post_id: top.post_id,
                views: top.views,
                posted_link: top.posted_link,
            }),
            date_range: stats.date_range.map(|span| DateSpanResponse {
                earliest: date_key(span.earliest),
                latest: date_key(span.latest),
            }),
        }
    }
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct CampaignDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub stats: CampaignStatsResponse,
    pub posts: Vec<PostingRecord>,
}

impl From<analytics::CampaignDetail> for CampaignDetailResponse {
    fn from(detail: analytics::CampaignDetail) -> Self {
        Self {
            stats: detail.stats.into(),
            posts: detail.posts,
        }
    }
}

// ============ KPI / 账号 ============

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct KpiResponse {
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
}

impl From<analytics::Kpis> for KpiResponse {
    fn from(kpis: analytics::Kpis) -> Self {
        Self {
            total_views: kpis.total_views,
            total_likes: kpis.total_likes,
            total_comments: kpis.total_comments,
            total_shares: kpis.total_shares,
        }
    }
}

/// 账号原始字段 + 发帖汇总（snake_case，与表字段一致）
#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct AccountWithStatsResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub account: Account,
    pub post_count: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
}

impl From<analytics::AccountWithStats> for AccountWithStatsResponse {
    fn from(item: analytics::AccountWithStats) -> Self {
        Self {
            account: item.account,
            post_count: item.post_count,
            total_views: item.total_views,
            total_likes: item.total_likes,
            total_comments: item.total_comments,
            total_shares: item.total_shares,
        }
    }
}

// ============ 健康检查 / 错误 ============

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    /// 存储可达时附带各表行数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    /// 运行秒数
    pub uptime: u64,
    pub storage: HealthStorageCheck,
    pub response_time_ms: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ErrorResponse {
    pub error: String,
}

/// 把一组聚合结果转换成响应 DTO
pub fn convert_all<T, R: From<T>>(items: Vec<T>) -> Vec<R> {
    items.into_iter().map(R::from).collect()
}
