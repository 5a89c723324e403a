//! `/health` 与 `/health/live`
//!
//! 直接访问 storage，不经过业务服务层。

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, trace};

use crate::storage::SeaOrmStorage;

use super::types::{HealthResponse, HealthStorageCheck};

const STORAGE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: DateTime<Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: Utc::now(),
        }
    }

    pub fn uptime_seconds(&self, now: DateTime<Utc>) -> u64 {
        (now - self.start_datetime).num_seconds().max(0) as u64
    }
}

/// ping 之后统计行数；任一步失败或超时都视为 unhealthy
async fn check_storage(storage: &SeaOrmStorage) -> HealthStorageCheck {
    let backend = storage.get_backend_name().to_string();
    let check = async {
        storage.ping().await?;
        storage.dataset_counts().await
    };

    match tokio::time::timeout(STORAGE_CHECK_TIMEOUT, check).await {
        Ok(Ok(counts)) => {
            if counts.is_empty() {
                debug!("Storage reachable but all dashboard tables are empty");
            }
            HealthStorageCheck {
                status: "healthy".to_string(),
                backend,
                dataset: Some(counts),
                error: None,
            }
        }
        Ok(Err(e)) => {
            error!("Storage health check failed: {}", e);
            HealthStorageCheck {
                status: "unhealthy".to_string(),
                backend,
                dataset: None,
                error: Some(format!("database error: {}", e.message())),
            }
        }
        Err(_) => {
            error!(
                "Storage health check timed out after {:?}",
                STORAGE_CHECK_TIMEOUT
            );
            HealthStorageCheck {
                status: "unhealthy".to_string(),
                backend,
                dataset: None,
                error: Some("timeout".to_string()),
            }
        }
    }
}

pub async fn health_check(
    storage: web::Data<Arc<SeaOrmStorage>>,
    app_start_time: web::Data<AppStartTime>,
) -> impl Responder {
    let started = Instant::now();
    let storage_check = check_storage(&storage).await;
    let healthy = storage_check.status == "healthy";

    let now = Utc::now();
    let health = HealthResponse {
        status: storage_check.status.clone(),
        timestamp: now.to_rfc3339(),
        uptime: app_start_time.uptime_seconds(now),
        storage: storage_check,
        response_time_ms: started.elapsed().as_millis() as u32,
    };
    debug!(
        status = %health.status,
        uptime = health.uptime,
        "Health check finished in {:?}",
        started.elapsed()
    );

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(health)
}

// 活跃性检查，不访问存储
pub async fn liveness_check() -> impl Responder {
    trace!("Liveness check");
    HttpResponse::NoContent().finish()
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(health_check))
        .route("", web::head().to(health_check))
        .route("/live", web::get().to(liveness_check))
        .route("/live", web::head().to(liveness_check))
}
