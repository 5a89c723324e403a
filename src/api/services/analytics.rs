//! 图表端点 `/analytics`

use actix_web::{Responder, web};
use std::sync::Arc;
use tracing::trace;

use crate::analytics::DateWindow;
use crate::config::get_config;
use crate::services::{AnalyticsService, CampaignService};

use super::helpers::{api_result, parse_days, parse_limit};
use super::types::{
    CampaignComparisonItem, CategoryPerformance, DailyTrendPoint, DaysQuery, LimitQuery,
    PlatformSlice, PlatformStatsResponse, TopAccount, convert_all,
};

/// GET /analytics/daily-trends?days=
///
/// 累计浏览量与当日互动率合并成一条序列。
pub async fn get_daily_trends(
    query: web::Query<DaysQuery>,
    analytics: web::Data<Arc<AnalyticsService>>,
) -> impl Responder {
    let config = get_config();
    let days = parse_days(query.days.as_deref(), &config.analytics);
    trace!("API: daily trends for {} days", days);

    let result = analytics
        .daily_trends(DateWindow::last_days(days))
        .await
        .map(convert_all::<_, DailyTrendPoint>);
    api_result(result, "Failed to fetch daily trends")
}

/// GET /analytics/top-accounts?limit=
pub async fn get_top_accounts(
    query: web::Query<LimitQuery>,
    analytics: web::Data<Arc<AnalyticsService>>,
) -> impl Responder {
    let config = get_config();
    let limit = parse_limit(
        query.limit.as_deref(),
        config.analytics.default_top_accounts,
        &config.analytics,
    );

    let result = analytics
        .top_accounts(limit)
        .await
        .map(convert_all::<_, TopAccount>);
    api_result(result, "Failed to fetch top accounts")
}

/// GET /analytics/category-performance
pub async fn get_category_performance(
    analytics: web::Data<Arc<AnalyticsService>>,
) -> impl Responder {
    let result = analytics
        .category_performance()
        .await
        .map(convert_all::<_, CategoryPerformance>);
    api_result(result, "Failed to fetch category performance")
}

/// GET /analytics/platform-distribution
pub async fn get_platform_distribution(
    analytics: web::Data<Arc<AnalyticsService>>,
) -> impl Responder {
    let result = analytics
        .platform_distribution()
        .await
        .map(convert_all::<_, PlatformSlice>);
    api_result(result, "Failed to fetch platform distribution")
}

/// GET /analytics/platform-stats
pub async fn get_platform_stats(analytics: web::Data<Arc<AnalyticsService>>) -> impl Responder {
    let result = analytics
        .platform_stats()
        .await
        .map(convert_all::<_, PlatformStatsResponse>);
    api_result(result, "Failed to fetch platform stats")
}

/// GET /analytics/campaign-comparison
pub async fn get_campaign_comparison(
    campaigns: web::Data<Arc<CampaignService>>,
) -> impl Responder {
    let result = campaigns
        .campaign_comparison()
        .await
        .map(convert_all::<_, CampaignComparisonItem>);
    api_result(result, "Failed to fetch campaign comparison")
}

/// 图表路由 `/analytics`
pub fn analytics_routes() -> actix_web::Scope {
    web::scope("/analytics")
        .route("/daily-trends", web::get().to(get_daily_trends))
        .route("/top-accounts", web::get().to(get_top_accounts))
        .route(
            "/category-performance",
            web::get().to(get_category_performance),
        )
        .route(
            "/platform-distribution",
            web::get().to(get_platform_distribution),
        )
        .route("/platform-stats", web::get().to(get_platform_stats))
        .route(
            "/campaign-comparison",
            web::get().to(get_campaign_comparison),
        )
}
