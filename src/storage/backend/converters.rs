use std::str::FromStr;

use chrono::NaiveDate;
use tracing::warn;

use crate::errors::{DashboardError, Result};
use crate::storage::models::{Account, Client, Platform, Posting};
use crate::utils::dates::normalize_date;
use migration::entities::{account, client, posting};

/// 将 accounts 行转换为 Account；平台无法识别时返回 Serialization 错误
pub fn model_to_account(model: account::Model) -> Result<Account> {
    let platform = Platform::from_str(model.platform.trim()).map_err(|_| {
        DashboardError::serialization(format!(
            "account {} has unknown platform '{}'",
            model.account_id, model.platform
        ))
    })?;

    Ok(Account {
        account_id: model.account_id,
        platform,
        username: model.username,
        account_niche: model.account_niche,
        display_name: model.display_name,
        profile_url: model.profile_url,
        pfp_url: model.pfp_url,
        bio: model.bio,
        account_status: model.account_status,
        posting_status: model.posting_status,
        post_to_feed: model.post_to_feed,
        created_at: model.created_at,
        updated_at: model.updated_at,
        followers_count: model.followers_count,
        media_count: model.media_count,
        profile_views: model.profile_views,
        reach_count: model.reach_count,
        views_count_total: model.views_count_total,
        likes_count_total: model.likes_count_total,
        comments_count_total: model.comments_count_total,
        shares_count_total: model.shares_count_total,
    })
}

pub fn model_to_client(model: client::Model) -> Client {
    Client {
        client_id: model.client_id,
        created_at: model.created_at,
        campaign: model.campaign,
        status: model.status,
    }
}


/// 列表查询用：平台无法识别的账号记 warn 后跳过
pub fn account_or_skip(model: account::Model) -> Option<Account> {
    model_to_account(model)
        .inspect_err(|e| warn!("Skipping account row: {}", e.message()))
        .ok()
}

/// 将 tiktok_posting 行转换为 Posting，日期在这里规范化
pub fn model_to_posting(model: posting::Model) -> Posting {
    let surge_date = stored_date(&model.post_id, "surge_date", model.surge_date.as_deref());
    let scheduled_date = stored_date(
        &model.post_id,
        "scheduled_date",
        model.scheduled_date.as_deref(),
    );

    Posting {
        post_id: model.post_id,
        video_id: model.video_id,
        account_id: model.account_id,
        client_id: model.client_id,
        surge_date,
        scheduled_date,
        video_category: model.video_category,
        posted_link: model.posted_link,
        post_caption: model.post_caption,
        views: model.views,
        likes: model.likes,
        comments: model.comments,
        shares: model.shares,
    }
}

/// 解析库中的日期文本，无法解析时按缺失处理
pub fn stored_date(post_id: &str, column: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = normalize_date(raw);
    if parsed.is_none() {
        warn!(
            "posting {} has unparseable {} '{}', treating as absent",
            post_id, column, raw
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account_model(platform: &str) -> account::Model {
        account::Model {
            account_id: "acc-1".to_string(),
            platform: platform.to_string(),
            username: "surge.music".to_string(),
            account_niche: Some("music".to_string()),
            display_name: None,
            profile_url: None,
            pfp_url: None,
            bio: None,
            account_status: Some("active".to_string()),
            posting_status: None,
            post_to_feed: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            followers_count: Some(1200),
            media_count: None,
            profile_views: None,
            reach_count: None,
            views_count_total: Some(50_000),
            likes_count_total: None,
            comments_count_total: None,
            shares_count_total: None,
        }
    }

    fn posting_model(surge: Option<&str>, scheduled: Option<&str>) -> posting::Model {
        posting::Model {
            post_id: "p-1".to_string(),
            video_id: Some("v-1".to_string()),
            account_id: "acc-1".to_string(),
            client_id: Some(3),
            surge_date: surge.map(str::to_string),
            scheduled_date: scheduled.map(str::to_string),
            video_category: Some("dance".to_string()),
            posted_link: None,
            post_caption: None,
            views: Some(100),
            likes: None,
            comments: Some(2),
            shares: None,
        }
    }

    #[test]
    fn test_model_to_account_parses_platform() {
        let account = model_to_account(account_model("tiktok")).unwrap();
        assert_eq!(account.platform, Platform::TikTok);
        assert_eq!(account.followers_count, Some(1200));

        let x = model_to_account(account_model("X")).unwrap();
        assert_eq!(x.platform, Platform::X);
    }

    #[test]
    fn test_model_to_account_rejects_unknown_platform() {
        let err = model_to_account(account_model("friendster")).unwrap_err();
        assert!(err.message().contains("friendster"));
    }

    #[test]
    fn test_account_or_skip_drops_unknown_platform() {
        assert!(account_or_skip(account_model("friendster")).is_none());
        let kept = account_or_skip(account_model("Instagram")).unwrap();
        assert_eq!(kept.platform, Platform::Instagram);
    }

    #[test]
    fn test_model_to_posting_normalizes_dates() {
        let post = model_to_posting(posting_model(
            Some("2024-03-02T18:30:00Z"),
            Some("2024-03-01"),
        ));
        assert_eq!(post.surge_date, NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(post.scheduled_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(post.client_id, Some(3));
    }

    #[test]
    fn test_unparseable_dates_become_absent() {
        let post = model_to_posting(posting_model(Some("last tuesday"), Some("")));
        assert_eq!(post.surge_date, None);
        assert_eq!(post.scheduled_date, None);
    }
}
