//! Analytics service layer
//!
//! 时间序列、排行、分布、KPI。每个方法取一次数（或并发取多次），
//! 再交给 [`crate::analytics`] 中的纯函数聚合。

use std::sync::Arc;

use tracing::debug;

use crate::analytics::{
    self, AccountEngagement, CategoryViews, DailyCount, DailyTrend, DateWindow, EngagementPoint,
    Kpis, PlatformSlice, PlatformStats, SeriesPoint,
};
use crate::errors::Result;
use crate::storage::models::{Metric, PostingRecord};
use crate::storage::{DateRange, PostFilter, SeaOrmStorage};

/// Analytics 服务
pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 每日发帖数（scheduled_date），补零
    pub async fn daily_post_counts(&self, window: DateWindow) -> Result<Vec<DailyCount>> {
        let dates = self
            .storage
            .load_scheduled_dates(&window.as_range())
            .await?;
        debug!(
            "daily_post_counts: {} scheduled dates in {}..={}",
            dates.len(),
            window.start,
            window.end
        );
        Ok(analytics::daily_post_counts(&dates, &window))
    }

    /// 每日浏览量（surge_date），不补零
    pub async fn views_over_time(&self, window: DateWindow) -> Result<Vec<SeriesPoint>> {
        let postings = self
            .storage
            .load_postings(&PostFilter::in_range(window.as_range()))
            .await?;
        Ok(analytics::views_by_date(&postings, &window))
    }

    /// 每日平均互动率
    pub async fn engagement_rate(&self, window: DateWindow) -> Result<Vec<EngagementPoint>> {
        let postings = self
            .storage
            .load_postings(&PostFilter::in_range(window.as_range()))
            .await?;
        Ok(analytics::engagement_rate_by_date(&postings, &window))
    }

    /// 累计浏览量 + 互动率，两条序列并发查询
    pub async fn daily_trends(&self, window: DateWindow) -> Result<Vec<DailyTrend>> {
        let (views, engagement) = tokio::try_join!(
            self.views_over_time(window),
            self.engagement_rate(window)
        )?;
        Ok(analytics::merge_daily_trends(&views, &engagement))
    }

    pub async fn kpis(&self, range: DateRange) -> Result<Kpis> {
        let postings = self
            .storage
            .load_postings(&PostFilter::in_range(range))
            .await?;
        Ok(analytics::kpis(&postings, &range))
    }

    /// 按浏览量倒序的热门帖子
    pub async fn top_posts(&self, limit: usize, range: DateRange) -> Result<Vec<PostingRecord>> {
        let records = self
            .storage
            .load_posting_records(&PostFilter::in_range(range))
            .await?;
        Ok(analytics::top_n(&records, Metric::Views, &range, limit))
    }

    /// 按互动总量倒序的账号
    pub async fn top_accounts(&self, limit: usize) -> Result<Vec<AccountEngagement>> {
        let filter = PostFilter::default();
        let (accounts, postings) = tokio::try_join!(
            self.storage.load_accounts(),
            self.storage.load_postings(&filter)
        )?;
        let stats = analytics::accounts_with_stats(accounts, &postings);
        Ok(analytics::top_accounts(&stats, limit))
    }

    pub async fn category_performance(&self) -> Result<Vec<CategoryViews>> {
        let postings = self.storage.load_postings(&PostFilter::default()).await?;
        Ok(analytics::category_performance(&postings))
    }

    pub async fn platform_distribution(&self) -> Result<Vec<PlatformSlice>> {
        let accounts = self.storage.load_accounts().await?;
        Ok(analytics::platform_distribution(&accounts))
    }

    pub async fn platform_stats(&self) -> Result<Vec<PlatformStats>> {
        let accounts = self.storage.load_accounts().await?;
        Ok(analytics::platform_stats(&accounts))
    }
}
