//! 帖子相关端点 `/posts`

use actix_web::{Responder, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::analytics::DateWindow;
use crate::config::get_config;
use crate::services::{AnalyticsService, CatalogService};
use crate::storage::{DateRange, PostFilter};
use crate::utils::dates::parse_date_param;
use crate::utils::parse_leading_int;

use super::helpers::{api_result, parse_days, parse_limit};
use super::types::{
    DailyCountResponse, DaysQuery, EngagementRatePoint, PostsFilterQuery, TopPostsQuery,
    ViewsPoint, convert_all,
};

fn window_from(query: &DaysQuery) -> DateWindow {
    let config = get_config();
    DateWindow::last_days(parse_days(query.days.as_deref(), &config.analytics))
}

/// GET /posts/all
pub async fn get_all_posts(catalog: web::Data<Arc<CatalogService>>) -> impl Responder {
    trace!("API: request to list all posts");
    let result = catalog.posts(&PostFilter::default()).await;
    if let Ok(posts) = &result {
        info!("API: returning {} posts", posts.len());
    }
    api_result(result, "Failed to fetch posts")
}

/// `clientId` 按整数前缀解析；无法解析或为 0 时不按客户过滤
fn client_filter(raw: Option<&str>) -> Option<i64> {
    raw.and_then(parse_leading_int).filter(|id| *id != 0)
}

/// GET /posts/filtered
pub async fn get_filtered_posts(
    query: web::Query<PostsFilterQuery>,
    catalog: web::Data<Arc<CatalogService>>,
) -> impl Responder {
    trace!("API: filtered posts query: {:?}", query);

    let filter = PostFilter {
        range: DateRange::new(
            parse_date_param(query.start_date.as_deref()),
            parse_date_param(query.end_date.as_deref()),
        ),
        account_id: non_empty(query.account_id.as_deref()).map(str::to_string),
        client_id: client_filter(query.client_id.as_deref()),
        video_category: non_empty(query.video_category.as_deref()).map(str::to_string),
        search: non_empty(query.search.as_deref()).map(str::to_string),
        only_with_client: false,
    };

    api_result(catalog.posts(&filter).await, "Failed to fetch posts")
}

/// GET /posts/by-account/{id}
pub async fn get_posts_by_account(
    path: web::Path<String>,
    catalog: web::Data<Arc<CatalogService>>,
) -> impl Responder {
    let account_id = path.into_inner();
    trace!("API: request posts for account {}", account_id);
    api_result(
        catalog.posts_by_account(&account_id).await,
        "Failed to fetch posts",
    )
}

/// GET /posts/top?limit=&startDate=&endDate=
pub async fn get_top_posts(
    query: web::Query<TopPostsQuery>,
    analytics: web::Data<Arc<AnalyticsService>>,
) -> impl Responder {
    let config = get_config();
    let limit = parse_limit(
        query.limit.as_deref(),
        config.analytics.default_top_posts,
        &config.analytics,
    );
    let range = DateRange::new(
        parse_date_param(query.start_date.as_deref()),
        parse_date_param(query.end_date.as_deref()),
    );
    trace!("API: top posts limit={} range={:?}", limit, range);

    api_result(
        analytics.top_posts(limit, range).await,
        "Failed to fetch top posts",
    )
}

/// GET /posts/daily-breakdown?days=
pub async fn get_daily_breakdown(
    query: web::Query<DaysQuery>,
    analytics: web::Data<Arc<AnalyticsService>>,
) -> impl Responder {
    let window = window_from(&query);
    let result = analytics
        .daily_post_counts(window)
        .await
        .map(convert_all::<_, DailyCountResponse>);
    api_result(result, "Failed to fetch daily breakdown")
}

/// GET /posts/views-over-time?days=
pub async fn get_views_over_time(
    query: web::Query<DaysQuery>,
    analytics: web::Data<Arc<AnalyticsService>>,
) -> impl Responder {
    let window = window_from(&query);
    let result = analytics
        .views_over_time(window)
        .await
        .map(convert_all::<_, ViewsPoint>);
    api_result(result, "Failed to fetch views over time")
}

/// GET /posts/engagement-rate?days=
pub async fn get_engagement_rate(
    query: web::Query<DaysQuery>,
    analytics: web::Data<Arc<AnalyticsService>>,
) -> impl Responder {
    let window = window_from(&query);
    let result = analytics
        .engagement_rate(window)
        .await
        .map(convert_all::<_, EngagementRatePoint>);
    api_result(result, "Failed to fetch engagement rate")
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.trim().is_empty())
}

/// 帖子路由 `/posts`
///
/// 固定路径必须在 `/by-account/{id}` 之前注册。
pub fn posts_routes() -> actix_web::Scope {
    web::scope("/posts")
        .route("/all", web::get().to(get_all_posts))
        .route("/filtered", web::get().to(get_filtered_posts))
        .route("/top", web::get().to(get_top_posts))
        .route("/daily-breakdown", web::get().to(get_daily_breakdown))
        .route("/views-over-time", web::get().to(get_views_over_time))
        .route("/engagement-rate", web::get().to(get_engagement_rate))
        .route("/by-account/{id}", web::get().to(get_posts_by_account))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_filter_coerces_like_other_params() {
        assert_eq!(client_filter(Some("3")), Some(3));
        assert_eq!(client_filter(Some("12abc")), Some(12));
        assert_eq!(client_filter(Some("abc")), None);
        assert_eq!(client_filter(Some("")), None);
        assert_eq!(client_filter(Some("0")), None);
        assert_eq!(client_filter(None), None);
    }
}
