//! Dashboard API 路由配置
//!
//! 所有端点挂在 `server.api_prefix` 之下（默认 `/api`）：
//! - /accounts, /posts, /analytics, /campaigns, /clients
//! - /kpis
//! - /health

use actix_web::web;

use super::accounts::accounts_routes;
use super::analytics::analytics_routes;
use super::campaigns::campaigns_routes;
use super::clients::clients_routes;
use super::health::health_routes;
use super::kpis::get_kpis;
use super::posts::posts_routes;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts_routes())
        .service(posts_routes())
        .service(analytics_routes())
        .service(campaigns_routes())
        .service(clients_routes())
        .service(health_routes())
        .route("/kpis", web::get().to(get_kpis));
}
