use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::services::{AnalyticsService, CampaignService, CatalogService};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub analytics_service: Arc<AnalyticsService>,
    pub campaign_service: Arc<CampaignService>,
    pub catalog_service: Arc<CatalogService>,
}

impl StartupContext {
    /// 基于已有存储构建服务（测试中直接使用临时数据库）
    pub fn from_storage(storage: Arc<SeaOrmStorage>) -> Self {
        Self {
            analytics_service: Arc::new(AnalyticsService::new(storage.clone())),
            campaign_service: Arc::new(CampaignService::new(storage.clone())),
            catalog_service: Arc::new(CatalogService::new(storage.clone())),
            storage,
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储连接、迁移与服务层
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.get_backend_name());

    storage
        .ping()
        .await
        .context("Storage backend is not reachable")?;

    let counts = storage
        .dataset_counts()
        .await
        .context("Failed to count dashboard tables")?;
    if counts.is_empty() {
        warn!("Dashboard tables are empty; every endpoint will return zeroed data");
    } else {
        info!(
            "Loaded dataset: {} clients, {} accounts, {} postings",
            counts.clients, counts.accounts, counts.postings
        );
    }

    check_component_enabled();

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext::from_storage(storage))
}

fn check_component_enabled() {
    let config = crate::config::get_config();

    if config.cors.enabled && config.cors.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Set allowed_origins explicitly or use '[\"*\"]' for any origin."
        );
    }

    if config.analytics.max_limit == 0 {
        warn!("analytics.max_limit is 0, every top-N endpoint will return an empty list");
    }

    info!(
        "Dashboard API available at: {}",
        if config.server.api_prefix.is_empty() {
            "/"
        } else {
            config.server.api_prefix.as_str()
        }
    );
}
