//! 初始表结构
//!
//! 创建 clients、accounts、tiktok_posting 三张表。
//! 数据由外部采集流程写入，本服务只读。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 clients 表
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::ClientId)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Clients::Campaign).string().null())
                    .col(ColumnDef::new(Clients::Status).string_len(32).null())
                    .to_owned(),
            )
            .await?;

        // 创建 accounts 表
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::AccountId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Platform).string_len(16).not_null())
                    .col(ColumnDef::new(Accounts::Username).string().not_null())
                    .col(ColumnDef::new(Accounts::AccountNiche).string().null())
                    .col(ColumnDef::new(Accounts::DisplayName).string().null())
                    .col(ColumnDef::new(Accounts::ProfileUrl).text().null())
                    .col(ColumnDef::new(Accounts::PfpUrl).text().null())
                    .col(ColumnDef::new(Accounts::Bio).text().null())
                    .col(ColumnDef::new(Accounts::AccountStatus).string_len(32).null())
                    .col(ColumnDef::new(Accounts::PostingStatus).string_len(32).null())
                    .col(
                        ColumnDef::new(Accounts::PostToFeed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::FollowersCount).big_integer().null())
                    .col(ColumnDef::new(Accounts::MediaCount).big_integer().null())
                    .col(ColumnDef::new(Accounts::ProfileViews).big_integer().null())
                    .col(ColumnDef::new(Accounts::ReachCount).big_integer().null())
                    .col(ColumnDef::new(Accounts::ViewsCountTotal).big_integer().null())
                    .col(ColumnDef::new(Accounts::LikesCountTotal).big_integer().null())
                    .col(
                        ColumnDef::new(Accounts::CommentsCountTotal)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Accounts::SharesCountTotal).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 创建 tiktok_posting 表
        manager
            .create_table(
                Table::create()
                    .table(TiktokPosting::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TiktokPosting::PostId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TiktokPosting::VideoId).string().null())
                    .col(ColumnDef::new(TiktokPosting::AccountId).string().not_null())
                    .col(ColumnDef::new(TiktokPosting::ClientId).big_integer().null())
                    .col(ColumnDef::new(TiktokPosting::SurgeDate).string_len(40).null())
                    .col(
                        ColumnDef::new(TiktokPosting::ScheduledDate)
                            .string_len(40)
                            .null(),
                    )
                    .col(ColumnDef::new(TiktokPosting::VideoCategory).string().null())
                    .col(ColumnDef::new(TiktokPosting::PostedLink).text().null())
                    .col(ColumnDef::new(TiktokPosting::PostCaption).text().null())
                    .col(ColumnDef::new(TiktokPosting::Views).big_integer().null())
                    .col(ColumnDef::new(TiktokPosting::Likes).big_integer().null())
                    .col(ColumnDef::new(TiktokPosting::Comments).big_integer().null())
                    .col(ColumnDef::new(TiktokPosting::Shares).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posting_account")
                            .from(TiktokPosting::Table, TiktokPosting::AccountId)
                            .to(Accounts::Table, Accounts::AccountId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posting_client")
                            .from(TiktokPosting::Table, TiktokPosting::ClientId)
                            .to(Clients::Table, Clients::ClientId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TiktokPosting::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    ClientId,
    CreatedAt,
    Campaign,
    Status,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    AccountId,
    Platform,
    Username,
    AccountNiche,
    DisplayName,
    ProfileUrl,
    PfpUrl,
    Bio,
    AccountStatus,
    PostingStatus,
    PostToFeed,
    CreatedAt,
    UpdatedAt,
    FollowersCount,
    MediaCount,
    ProfileViews,
    ReachCount,
    ViewsCountTotal,
    LikesCountTotal,
    CommentsCountTotal,
    SharesCountTotal,
}

#[derive(DeriveIden)]
enum TiktokPosting {
    Table,
    PostId,
    VideoId,
    AccountId,
    ClientId,
    SurgeDate,
    ScheduledDate,
    VideoCategory,
    PostedLink,
    PostCaption,
    Views,
    Likes,
    Comments,
    Shares,
}
