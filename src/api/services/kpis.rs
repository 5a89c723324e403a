use actix_web::{Responder, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::AnalyticsService;
use crate::storage::DateRange;
use crate::utils::dates::parse_date_param;

use super::helpers::api_result;
use super::types::{KpiQuery, KpiResponse};

/// GET /kpis?startDate=&endDate=
///
/// 两端日期都可省略，无法解析的日期视为未提供。
pub async fn get_kpis(
    query: web::Query<KpiQuery>,
    analytics: web::Data<Arc<AnalyticsService>>,
) -> impl Responder {
    let range = DateRange::new(
        parse_date_param(query.start_date.as_deref()),
        parse_date_param(query.end_date.as_deref()),
    );
    trace!("API: kpis for {:?}", range);

    let result = analytics.kpis(range).await.map(KpiResponse::from);
    api_result(result, "Failed to fetch KPIs")
}
