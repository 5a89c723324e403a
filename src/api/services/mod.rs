//! Dashboard API 端点
//!
//! handler 只负责解析参数、调用服务层、把结果转换成响应 DTO。

pub mod accounts;
pub mod analytics;
pub mod campaigns;
pub mod clients;
pub mod health;
pub mod helpers;
pub mod kpis;
pub mod posts;
pub mod routes;
pub mod types;

pub use health::{AppStartTime, health_routes};
pub use helpers::{api_result, error_json};
pub use routes::configure_routes;
pub use types::*;
