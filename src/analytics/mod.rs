//! 聚合函数
//!
//! 纯函数，输入是已经从存储层取出的记录，不做任何 I/O。
//! 服务层负责取数并组合这些函数，HTTP / CLI 层负责展示格式。

pub mod accounts;
pub mod campaign;
pub mod distribution;
pub mod engagement;
pub mod kpi;
pub mod ranking;
pub mod time_series;
pub mod trends;

pub use accounts::{AccountEngagement, AccountWithStats, accounts_with_stats, top_accounts};
pub use campaign::{
    CampaignComparison, CampaignDetail, CampaignStats, DateSpan, TopPost, campaign_comparison,
    campaign_detail, campaign_rollup, comparison_label,
};
pub use distribution::{
    CategoryViews, PlatformSlice, PlatformStats, category_performance, category_views,
    platform_distribution, platform_stats,
};
pub use engagement::{EngagementPoint, engagement_rate_by_date, post_engagement_rate, round_rate};
pub use kpi::{Kpis, kpis};
pub use ranking::top_n;
pub use time_series::{DailyCount, DateWindow, SeriesPoint, cumulative, daily_post_counts, views_by_date};
pub use trends::{DailyTrend, merge_daily_trends};
