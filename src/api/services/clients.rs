use actix_web::{Responder, web};
use std::sync::Arc;

use crate::services::CatalogService;

use super::helpers::api_result;

/// GET /clients/all
pub async fn get_all_clients(catalog: web::Data<Arc<CatalogService>>) -> impl Responder {
    api_result(catalog.clients().await, "Failed to fetch clients")
}

pub fn clients_routes() -> actix_web::Scope {
    web::scope("/clients").route("/all", web::get().to(get_all_clients))
}
