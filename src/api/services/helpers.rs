//! Dashboard API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error::JsonPayloadError, web};
use serde::Serialize;
use tracing::{error, warn};

use crate::api::middleware::RequestId;
use crate::config::AnalyticsConfig;
use crate::errors::DashboardError;
use crate::utils::parse_leading_int;

use super::types::ErrorResponse;

/// 构建 `{"error": "..."}` 响应
pub fn error_json(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorResponse {
            error: message.into(),
        })
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时 200 + JSON。NotFound（只有单个活动查询会产生）原样返回 404；
/// 其余错误记日志后返回 500 和端点自己的通用消息，内部细节不外泄。
pub fn api_result<T: Serialize>(
    result: Result<T, DashboardError>,
    failure_msg: &str,
) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(data),
        Err(e) if e.http_status() != StatusCode::INTERNAL_SERVER_ERROR => {
            warn!("{}: {}", failure_msg, e);
            error_json(e.http_status(), e.message())
        }
        Err(e) => {
            error!("{}: {}", failure_msg, e.format_simple());
            error_json(StatusCode::INTERNAL_SERVER_ERROR, failure_msg)
        }
    }
}

/// 解析 `days` 参数
///
/// 缺省、非数字或负数回退到默认值，超过上限则截断。
pub fn parse_days(raw: Option<&str>, config: &AnalyticsConfig) -> u32 {
    match raw.and_then(parse_leading_int) {
        Some(days) if days >= 0 => days.min(i64::from(config.max_days)) as u32,
        _ => config.default_days,
    }
}

/// 解析 `limit` 参数，规则同 [`parse_days`]；0 表示返回空列表
pub fn parse_limit(raw: Option<&str>, default: usize, config: &AnalyticsConfig) -> usize {
    match raw.and_then(parse_leading_int) {
        Some(limit) if limit >= 0 => (limit as u64).min(config.max_limit as u64) as usize,
        _ => default.min(config.max_limit),
    }
}

/// JSON 请求体解析失败与查询失败走同一条路径：500 + 端点的通用消息
pub fn json_config(failure_msg: &'static str) -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(move |err, req| json_error_handler(err, req, failure_msg))
}

fn json_error_handler(
    err: JsonPayloadError,
    req: &HttpRequest,
    failure_msg: &str,
) -> actix_web::Error {
    error!(
        request_id = %RequestId::of(req),
        "{}: unreadable JSON body for {}: {}",
        failure_msg,
        req.path(),
        err
    );
    let response = error_json(StatusCode::INTERNAL_SERVER_ERROR, failure_msg);
    actix_web::error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analytics_config() -> AnalyticsConfig {
        AnalyticsConfig {
            default_days: 30,
            default_top_posts: 20,
            default_top_accounts: 10,
            max_limit: 500,
            max_days: 3650,
        }
    }

    #[test]
    fn test_parse_days() {
        let config = analytics_config();
        assert_eq!(parse_days(None, &config), 30);
        assert_eq!(parse_days(Some("7"), &config), 7);
        assert_eq!(parse_days(Some("14d"), &config), 14);
        assert_eq!(parse_days(Some("abc"), &config), 30);
        assert_eq!(parse_days(Some("-5"), &config), 30);
        assert_eq!(parse_days(Some("0"), &config), 0);
        assert_eq!(parse_days(Some("999999"), &config), 3650);
    }

    #[test]
    fn test_parse_limit() {
        let config = analytics_config();
        assert_eq!(parse_limit(None, 20, &config), 20);
        assert_eq!(parse_limit(Some("5"), 20, &config), 5);
        assert_eq!(parse_limit(Some("0"), 20, &config), 0);
        assert_eq!(parse_limit(Some("x"), 10, &config), 10);
        assert_eq!(parse_limit(Some("100000"), 20, &config), 500);
    }

    #[actix_web::test]
    async fn test_api_result_hides_internal_errors() {
        let response = api_result::<Vec<u8>>(
            Err(DashboardError::database_operation("table missing")),
            "Failed to fetch KPIs",
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.error, "Failed to fetch KPIs");
    }

    #[actix_web::test]
    async fn test_unreadable_json_body_is_a_generic_500() {
        use actix_web::{App, HttpResponse, test};

        let app = test::init_service(
            App::new().service(
                web::resource("/accounts/filtered")
                    .app_data(json_config("Failed to fetch accounts"))
                    .route(web::post().to(|_: web::Json<serde_json::Value>| async {
                        HttpResponse::Ok().finish()
                    })),
            ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/accounts/filtered")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let parsed: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(parsed.error, "Failed to fetch accounts");
    }

    #[actix_web::test]
    async fn test_api_result_passes_not_found_through() {
        let response = api_result::<Vec<u8>>(
            Err(DashboardError::not_found("Campaign not found")),
            "Failed to fetch campaign",
        );
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.error, "Campaign not found");
    }
}
