//! 社交账号实体（accounts 表）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: String,
    pub platform: String,
    pub username: String,
    pub account_niche: Option<String>,
    pub display_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub profile_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub pfp_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub account_status: Option<String>,
    pub posting_status: Option<String>,
    pub post_to_feed: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub followers_count: Option<i64>,
    pub media_count: Option<i64>,
    pub profile_views: Option<i64>,
    pub reach_count: Option<i64>,
    pub views_count_total: Option<i64>,
    pub likes_count_total: Option<i64>,
    pub comments_count_total: Option<i64>,
    pub shares_count_total: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::posting::Entity")]
    Posting,
}

impl Related<super::posting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posting.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
