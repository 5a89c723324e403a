use std::sync::Arc;

use tracing::debug;

use crate::analytics::{self, CampaignComparison, CampaignDetail, CampaignStats};
use crate::errors::{DashboardError, Result};
use crate::storage::{PostFilter, SeaOrmStorage};

/// Campaign（客户）汇总服务
pub struct CampaignService {
    storage: Arc<SeaOrmStorage>,
}

impl CampaignService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 所有关联了客户的帖子，按客户汇总
    pub async fn campaign_stats(&self) -> Result<Vec<CampaignStats>> {
        let filter = PostFilter {
            only_with_client: true,
            ..Default::default()
        };
        let records = self.storage.load_posting_records(&filter).await?;
        let stats = analytics::campaign_rollup(&records);
        debug!(
            "campaign_stats: {} campaigns from {} postings",
            stats.len(),
            records.len()
        );
        Ok(stats)
    }

    /// 单个 campaign 详情；没有帖子的客户视为不存在
    pub async fn campaign_detail(&self, client_id: i64) -> Result<CampaignDetail> {
        let records = self
            .storage
            .load_posting_records(&PostFilter::by_client(client_id))
            .await?;
        analytics::campaign_detail(&records, client_id)
            .ok_or_else(|| DashboardError::not_found("Campaign not found"))
    }

    pub async fn campaign_comparison(&self) -> Result<Vec<CampaignComparison>> {
        let stats = self.campaign_stats().await?;
        Ok(analytics::campaign_comparison(&stats))
    }
}
