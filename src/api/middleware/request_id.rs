//! Request ID middleware
//!
//! 仪表盘前端与反向代理可能已经带上 `X-Request-ID`；合法时沿用，否则生成 UUID v4。
//! ID 进入 tracing span 和响应头，handler 通过 [`RequestId`] 提取器读取。

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{Instrument, info_span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_INCOMING_ID_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// 从上游请求头取 ID：去掉首尾空白，空值、超长或含非可见字符时丢弃
    fn from_header(value: Option<&HeaderValue>) -> Option<Self> {
        value
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_INCOMING_ID_LEN)
            .filter(|v| v.chars().all(|c| c.is_ascii_graphic()))
            .map(|v| Self(v.to_string()))
    }

    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// 没有经过中间件的请求（例如单元测试）返回 `-`
    pub fn of(req: &HttpRequest) -> String {
        req.extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "-".to_string())
    }
}

impl FromRequest for RequestId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::generate);
        ready(Ok(id))
    }
}

#[derive(Clone, Default)]
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestIdService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
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

        let id = RequestId::from_header(req.headers().get(REQUEST_ID_HEADER))
            .unwrap_or_else(RequestId::generate);
        let header_value = HeaderValue::from_str(&id.0).ok();
        let span = info_span!(
            "request",
            request_id = %id.0,
            method = %req.method(),
            path = %req.path(),
        );
        req.extensions_mut().insert(id);

        Box::pin(
            async move {
                let mut response = srv.call(req).await?;
                if let Some(value) = header_value {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                }
                Ok(response)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    async fn echo(id: RequestId) -> HttpResponse {
        HttpResponse::Ok().body(id.0)
    }

    #[::core::prelude::v1::test]
    fn test_from_header_rejects_unusable_ids() {
        let ok = HeaderValue::from_static("  abc-123 ");
        assert_eq!(
            RequestId::from_header(Some(&ok)),
            Some(RequestId("abc-123".to_string()))
        );

        let spaced = HeaderValue::from_static("two words");
        assert_eq!(RequestId::from_header(Some(&spaced)), None);

        let long = HeaderValue::from_str(&"x".repeat(MAX_INCOMING_ID_LEN + 1)).unwrap();
        assert_eq!(RequestId::from_header(Some(&long)), None);
        assert_eq!(RequestId::from_header(None), None);
    }

    #[actix_web::test]
    async fn test_incoming_id_is_reused_and_echoed() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/kpis", web::get().to(echo)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/kpis")
            .insert_header((REQUEST_ID_HEADER, "dash-42"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "dash-42");
        let body = test::read_body(resp).await;
        assert_eq!(&body[..], b"dash-42");
    }

    #[actix_web::test]
    async fn test_missing_id_is_generated() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/kpis", web::get().to(echo)),
        )
        .await;

        let req = test::TestRequest::get().uri("/kpis").to_request();
        let resp = test::call_service(&app, req).await;
        let header = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(Uuid::parse_str(&header).is_ok());
    }
}
