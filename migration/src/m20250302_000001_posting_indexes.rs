//! tiktok_posting / accounts 查询索引
//!
//! - surge_date: 趋势、KPI、热门帖子的时间范围过滤
//! - scheduled_date: 每日发帖统计
//! - account_id / client_id: 按账号、按活动查询
//! - accounts.created_at: 账号列表排序

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const POSTING_INDEXES: &[(&str, TiktokPosting)] = &[
    ("idx_posting_surge_date", TiktokPosting::SurgeDate),
    ("idx_posting_scheduled_date", TiktokPosting::ScheduledDate),
    ("idx_posting_account_id", TiktokPosting::AccountId),
    ("idx_posting_client_id", TiktokPosting::ClientId),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, column) in POSTING_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(*name)
                        .table(TiktokPosting::Table)
                        .col(*column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_accounts_created_at")
                    .table(Accounts::Table)
                    .col(Accounts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_accounts_created_at").to_owned())
            .await?;

        for (name, _) in POSTING_INDEXES {
            manager
                .drop_index(Index::drop().name(*name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum TiktokPosting {
    Table,
    SurgeDate,
    ScheduledDate,
    AccountId,
    ClientId,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    CreatedAt,
}
