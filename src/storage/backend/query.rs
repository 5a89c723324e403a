//! Query operations for SeaOrmStorage
//!
//! 所有操作都是只读的；数据由上游写入。

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, Func},
};
use tracing::{debug, error};

use super::converters::{
    account_or_skip, model_to_account, model_to_client, model_to_posting, stored_date,
};
use super::{AccountFilter, DateRange, PostFilter, SeaOrmStorage, range_bounds, retry};
use crate::errors::Result;
use crate::storage::models::{Account, Client, DatasetCounts, Posting, PostingRecord};

use migration::entities::{account, client, posting};

/// `LOWER(column) LIKE '%needle%'`
fn contains_ignore_case<C: ColumnTrait>(column: C, needle: &str) -> Expr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", needle.to_lowercase()))
}

/// surge_date 文本列上的区间条件
fn surge_range_condition(range: &DateRange) -> Condition {
    let (start, end_exclusive) = range_bounds(range);
    let mut condition = Condition::all();
    if let Some(start) = start {
        condition = condition.add(posting::Column::SurgeDate.gte(start));
    }
    if let Some(end) = end_exclusive {
        condition = condition.add(posting::Column::SurgeDate.lt(end));
    }
    condition
}

fn account_condition(filter: &AccountFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(ref platform) = filter.platform {
        condition = condition.add(account::Column::Platform.eq(platform.as_str()));
    }
    if let Some(ref status) = filter.account_status {
        condition = condition.add(account::Column::AccountStatus.eq(status.as_str()));
    }
    if let Some(ref status) = filter.posting_status {
        condition = condition.add(account::Column::PostingStatus.eq(status.as_str()));
    }
    if let Some(min) = filter.min_followers {
        condition = condition.add(account::Column::FollowersCount.gte(min));
    }
    if let Some(max) = filter.max_followers {
        condition = condition.add(account::Column::FollowersCount.lte(max));
    }
    if let Some(min) = filter.min_views {
        condition = condition.add(account::Column::ViewsCountTotal.gte(min));
    }
    if let Some(max) = filter.max_views {
        condition = condition.add(account::Column::ViewsCountTotal.lte(max));
    }
    if let Some(ref username) = filter.username {
        condition = condition.add(contains_ignore_case(account::Column::Username, username));
    }

    condition
}

fn posting_condition(filter: &PostFilter) -> Condition {
    let mut condition = surge_range_condition(&filter.range);

    if let Some(ref account_id) = filter.account_id {
        condition = condition.add(posting::Column::AccountId.eq(account_id.as_str()));
    }
    if let Some(client_id) = filter.client_id {
        condition = condition.add(posting::Column::ClientId.eq(client_id));
    }
    if let Some(ref category) = filter.video_category {
        condition = condition.add(posting::Column::VideoCategory.eq(category.as_str()));
    }
    if let Some(ref search) = filter.search {
        condition = condition.add(
            Condition::any()
                .add(contains_ignore_case(posting::Column::VideoId, search))
                .add(contains_ignore_case(posting::Column::PostCaption, search)),
        );
    }
    if filter.only_with_client {
        condition = condition.add(posting::Column::ClientId.is_not_null());
    }

    condition
}

impl SeaOrmStorage {
    /// clients / accounts / postings 各自的行数
    pub async fn dataset_counts(&self) -> Result<DatasetCounts> {
        let db = &self.db;

        let (clients, accounts, postings) =
            retry::with_retry("dataset_counts", self.retry_config, || async {
                tokio::try_join!(
                    client::Entity::find().count(db),
                    account::Entity::find().count(db),
                    posting::Entity::find().count(db),
                )
            })
            .await?;

        Ok(DatasetCounts {
            clients,
            accounts,
            postings,
        })
    }

    /// 所有账号，按 created_at 倒序
    pub async fn load_accounts(&self) -> Result<Vec<Account>> {
        self.load_accounts_filtered(&AccountFilter::default()).await
    }

    /// 按条件过滤账号，按 created_at 倒序
    pub async fn load_accounts_filtered(&self, filter: &AccountFilter) -> Result<Vec<Account>> {
        let db = &self.db;
        let condition = account_condition(filter);

        let models = retry::with_retry("load_accounts", self.retry_config, || async {
            account::Entity::find()
                .filter(condition.clone())
                .order_by_desc(account::Column::CreatedAt)
                .all(db)
                .await
        })
        .await
        .inspect_err(|e| error!("加载账号失败（重试后仍失败）: {}", e))?;

        debug!("Loaded {} accounts", models.len());
        Ok(models.into_iter().filter_map(account_or_skip).collect())
    }

    pub async fn get_account(&self, account_id: &str) -> Result<Option<Account>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("get_account({})", account_id),
            self.retry_config,
            || async { account::Entity::find_by_id(account_id).one(db).await },
        )
        .await?;

        model.map(model_to_account).transpose()
    }

    /// 所有客户，按 created_at 倒序
    pub async fn load_clients(&self) -> Result<Vec<Client>> {
        let db = &self.db;

        let models = retry::with_retry("load_clients", self.retry_config, || async {
            client::Entity::find()
                .order_by_desc(client::Column::CreatedAt)
                .all(db)
                .await
        })
        .await?;

        Ok(models.into_iter().map(model_to_client).collect())
    }

    /// 按 id 批量加载客户
    async fn load_clients_by_id(&self, ids: Vec<i64>) -> Result<HashMap<i64, Client>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let db = &self.db;
        let models = retry::with_retry("load_clients_by_id", self.retry_config, || async {
            client::Entity::find()
                .filter(client::Column::ClientId.is_in(ids.clone()))
                .all(db)
                .await
        })
        .await?;

        Ok(models
            .into_iter()
            .map(|m| (m.client_id, model_to_client(m)))
            .collect())
    }

    /// 不展开关联的发布记录，按 surge_date 倒序
    pub async fn load_postings(&self, filter: &PostFilter) -> Result<Vec<Posting>> {
        let db = &self.db;
        let condition = posting_condition(filter);

        let models = retry::with_retry("load_postings", self.retry_config, || async {
            posting::Entity::find()
                .filter(condition.clone())
                .order_by_desc(posting::Column::SurgeDate)
                .all(db)
                .await
        })
        .await
        .inspect_err(|e| error!("加载发布记录失败（重试后仍失败）: {}", e))?;

        debug!("Loaded {} postings", models.len());
        Ok(models.into_iter().map(model_to_posting).collect())
    }

    /// 展开 account / client 关联的发布记录，按 surge_date 倒序
    pub async fn load_posting_records(&self, filter: &PostFilter) -> Result<Vec<PostingRecord>> {
        let db = &self.db;
        let condition = posting_condition(filter);

        let rows = retry::with_retry("load_posting_records", self.retry_config, || async {
            posting::Entity::find()
                .find_also_related(account::Entity)
                .filter(condition.clone())
                .order_by_desc(posting::Column::SurgeDate)
                .all(db)
                .await
        })
        .await
        .inspect_err(|e| error!("加载发布记录失败（重试后仍失败）: {}", e))?;

        let client_ids: Vec<i64> = rows
            .iter()
            .filter_map(|(p, _)| p.client_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let clients = self.load_clients_by_id(client_ids).await?;

        let mut records = Vec::with_capacity(rows.len());
        for (posting_model, account_model) in rows {
            let posting = model_to_posting(posting_model);
            let accounts = account_model.and_then(account_or_skip);
            let clients = posting
                .client_id
                .and_then(|id| clients.get(&id).cloned());
            records.push(PostingRecord {
                posting,
                accounts,
                clients,
            });
        }

        debug!("Loaded {} joined posting records", records.len());
        Ok(records)
    }

    /// 窗口内所有非空 scheduled_date（规范化后）
    pub async fn load_scheduled_dates(&self, range: &DateRange) -> Result<Vec<NaiveDate>> {
        let db = &self.db;
        let (start, end_exclusive) = range_bounds(range);

        let mut condition = Condition::all().add(posting::Column::ScheduledDate.is_not_null());
        if let Some(start) = start {
            condition = condition.add(posting::Column::ScheduledDate.gte(start));
        }
        if let Some(end) = end_exclusive {
            condition = condition.add(posting::Column::ScheduledDate.lt(end));
        }

        let rows = retry::with_retry("load_scheduled_dates", self.retry_config, || async {
            posting::Entity::find()
                .select_only()
                .column(posting::Column::PostId)
                .column(posting::Column::ScheduledDate)
                .filter(condition.clone())
                .into_tuple::<(String, Option<String>)>()
                .all(db)
                .await
        })
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(post_id, raw)| stored_date(&post_id, "scheduled_date", raw.as_deref()))
            .collect())
    }
}
