//! HTTP timing middleware
//!
//! 按端点分组（`posts`、`analytics`、`kpis` ...）记录状态码与耗时。
//! 聚合接口会整表扫描，超过 `server.slow_request_ms` 的请求以 warn 输出，
//! 便于发现需要加索引或缩小窗口的查询。

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct TimingMiddleware {
    api_prefix: Rc<str>,
    slow_threshold: Duration,
}

impl TimingMiddleware {
    pub fn new(api_prefix: &str, slow_request_ms: u64) -> Self {
        Self {
            api_prefix: Rc::from(api_prefix.trim_end_matches('/')),
            slow_threshold: Duration::from_millis(slow_request_ms),
        }
    }
}

/// API 前缀之后的第一段路径；不在前缀下的请求归为 `other`
fn endpoint_area<'a>(path: &'a str, api_prefix: &str) -> &'a str {
    path.strip_prefix(api_prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .and_then(|rest| rest.split('/').next())
        .filter(|area| !area.is_empty())
        .unwrap_or("other")
}

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService {
            service: Rc::new(service),
            api_prefix: self.api_prefix.clone(),
            slow_threshold: self.slow_threshold,
        }))
    }
}

pub struct TimingService<S> {
    service: Rc<S>,
    api_prefix: Rc<str>,
    slow_threshold: Duration,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let slow_threshold = self.slow_threshold;
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();
        let area = endpoint_area(&path, &self.api_prefix).to_string();

        Box::pin(async move {
            let result = srv.call(req).await;
            let elapsed = started.elapsed();
            let status = result
                .as_ref()
                .map(|response| response.status().as_u16())
                .unwrap_or(500);

            if elapsed >= slow_threshold {
                warn!(
                    area = %area,
                    status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Slow dashboard query: {} {}",
                    method,
                    path
                );
            } else {
                debug!(area = %area, status, "{} {} in {:?}", method, path, elapsed);
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[::core::prelude::v1::test]
    fn test_endpoint_area() {
        assert_eq!(endpoint_area("/api/posts/top", "/api"), "posts");
        assert_eq!(endpoint_area("/api/kpis", "/api"), "kpis");
        assert_eq!(endpoint_area("/api/campaigns/3", "/api"), "campaigns");
        assert_eq!(endpoint_area("/api", "/api"), "other");
        assert_eq!(endpoint_area("/favicon.ico", "/api"), "other");
        assert_eq!(endpoint_area("/v1/analytics/daily-trends", "/v1"), "analytics");
    }

    #[actix_web::test]
    async fn test_middleware_passes_response_through() {
        let app = test::init_service(
            App::new()
                .wrap(TimingMiddleware::new("/api/", 2000))
                .route(
                    "/api/kpis",
                    web::get().to(|| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/kpis").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
