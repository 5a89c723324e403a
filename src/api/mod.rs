//! HTTP 层：中间件与 JSON 端点

pub mod middleware;
pub mod services;
