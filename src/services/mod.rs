//! Service layer
//!
//! 取数 + 调用聚合函数，HTTP API 和 CLI 共用。

mod analytics_service;
mod campaign_service;
mod catalog_service;

pub use analytics_service::*;
pub use campaign_service::*;
pub use catalog_service::*;
