//! TikTok 发布记录实体（tiktok_posting 表）
//!
//! `surge_date` / `scheduled_date` 按上游写入的原样保存为文本，
//! 可能是 `YYYY-MM-DD`，也可能带时间部分，由存储层统一规范化。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tiktok_posting")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: String,
    pub video_id: Option<String>,
    pub account_id: String,
    pub client_id: Option<i64>,
    pub surge_date: Option<String>,
    pub scheduled_date: Option<String>,
    pub video_category: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub posted_link: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub post_caption: Option<String>,
    pub views: Option<i64>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub shares: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::AccountId"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::ClientId"
    )]
    Client,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
