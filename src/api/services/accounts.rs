//! 账号相关端点 `/accounts`

use actix_web::{Responder, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::services::CatalogService;
use crate::storage::AccountFilter;

use super::helpers::{api_result, json_config};
use super::types::{AccountWithStatsResponse, convert_all};

/// GET /accounts/all
pub async fn get_all_accounts(catalog: web::Data<Arc<CatalogService>>) -> impl Responder {
    trace!("API: request to list all accounts");
    let result = catalog.accounts().await;
    if let Ok(accounts) = &result {
        info!("API: returning {} accounts", accounts.len());
    }
    api_result(result, "Failed to fetch accounts")
}

/// GET /accounts/with-stats
pub async fn get_accounts_with_stats(catalog: web::Data<Arc<CatalogService>>) -> impl Responder {
    let result = catalog
        .accounts_with_stats()
        .await
        .map(convert_all::<_, AccountWithStatsResponse>);
    api_result(result, "Failed to fetch accounts")
}

/// GET /accounts/{id}
pub async fn get_account(
    path: web::Path<String>,
    catalog: web::Data<Arc<CatalogService>>,
) -> impl Responder {
    let account_id = path.into_inner();
    trace!("API: request account {}", account_id);
    api_result(catalog.account(&account_id).await, "Failed to fetch account")
}

/// POST /accounts/filtered
pub async fn post_filtered_accounts(
    filter: web::Json<AccountFilter>,
    catalog: web::Data<Arc<CatalogService>>,
) -> impl Responder {
    trace!("API: filtered accounts: {:?}", filter);
    api_result(
        catalog.accounts_filtered(&filter).await,
        "Failed to fetch accounts",
    )
}

/// 账号路由 `/accounts`
///
/// `/{id}` 是通配，必须最后注册。
pub fn accounts_routes() -> actix_web::Scope {
    web::scope("/accounts")
        .route("/all", web::get().to(get_all_accounts))
        .route("/with-stats", web::get().to(get_accounts_with_stats))
        .service(
            web::resource("/filtered")
                .app_data(json_config("Failed to fetch accounts"))
                .route(web::post().to(post_filtered_accounts)),
        )
        .route("/{id}", web::get().to(get_account))
}
