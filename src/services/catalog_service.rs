//! 原始记录查询（账号、帖子、客户）

use std::sync::Arc;

use crate::analytics::{self, AccountWithStats};
use crate::errors::{DashboardError, Result};
use crate::storage::models::{Account, Client, PostingRecord};
use crate::storage::{AccountFilter, PostFilter, SeaOrmStorage};

pub struct CatalogService {
    storage: Arc<SeaOrmStorage>,
}

impl CatalogService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn accounts(&self) -> Result<Vec<Account>> {
        self.storage.load_accounts().await
    }

    /// 单个账号；不存在时按查询失败处理（端点返回 500）
    pub async fn account(&self, account_id: &str) -> Result<Account> {
        self.storage
            .get_account(account_id)
            .await?
            .ok_or_else(|| {
                DashboardError::database_operation(format!(
                    "no row returned for account {}",
                    account_id
                ))
            })
    }

    pub async fn accounts_filtered(&self, filter: &AccountFilter) -> Result<Vec<Account>> {
        self.storage.load_accounts_filtered(filter).await
    }

    pub async fn accounts_with_stats(&self) -> Result<Vec<AccountWithStats>> {
        let filter = PostFilter::default();
        let (accounts, postings) = tokio::try_join!(
            self.storage.load_accounts(),
            self.storage.load_postings(&filter)
        )?;
        Ok(analytics::accounts_with_stats(accounts, &postings))
    }

    pub async fn clients(&self) -> Result<Vec<Client>> {
        self.storage.load_clients().await
    }

    pub async fn posts(&self, filter: &PostFilter) -> Result<Vec<PostingRecord>> {
        self.storage.load_posting_records(filter).await
    }

    pub async fn posts_by_account(&self, account_id: &str) -> Result<Vec<PostingRecord>> {
        self.storage
            .load_posting_records(&PostFilter::by_account(account_id))
            .await
    }
}
