//! Campaign 端点 `/campaigns`

use actix_web::{Responder, web};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::errors::DashboardError;
use crate::services::CampaignService;
use crate::utils::parse_leading_int;

use super::helpers::api_result;
use super::types::{CampaignDetailResponse, CampaignStatsResponse, convert_all};

/// GET /campaigns/stats
pub async fn get_campaign_stats(campaigns: web::Data<Arc<CampaignService>>) -> impl Responder {
    trace!("API: request campaign stats");
    let result = campaigns
        .campaign_stats()
        .await
        .map(convert_all::<_, CampaignStatsResponse>);
    api_result(result, "Failed to fetch campaign stats")
}

/// GET /campaigns/{clientId}
///
/// 非数字 ID 与不存在的客户一样返回 404。
pub async fn get_campaign(
    path: web::Path<String>,
    campaigns: web::Data<Arc<CampaignService>>,
) -> impl Responder {
    let raw_id = path.into_inner();
    let result = match parse_leading_int(&raw_id) {
        Some(client_id) => campaigns
            .campaign_detail(client_id)
            .await
            .map(CampaignDetailResponse::from),
        None => {
            debug!("API: non-numeric campaign id {:?}", raw_id);
            Err(DashboardError::not_found("Campaign not found"))
        }
    };
    api_result(result, "Failed to fetch campaign")
}

/// Campaign 路由 `/campaigns`
pub fn campaigns_routes() -> actix_web::Scope {
    web::scope("/campaigns")
        .route("/stats", web::get().to(get_campaign_stats))
        .route("/{client_id}", web::get().to(get_campaign))
}
