//! 分类 / 平台分布

use std::collections::HashMap;

use crate::storage::models::{Account, Platform, Posting};

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryViews {
    pub category: String,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSlice {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformStats {
    pub platform: Platform,
    pub count: u64,
    pub total_followers: u64,
    pub total_views: u64,
    pub total_likes: u64,
}

fn non_negative(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

/// 每个分类的浏览量之和，按首次出现的顺序
pub fn category_views<P: AsRef<Posting>>(records: &[P]) -> Vec<CategoryViews> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<CategoryViews> = Vec::new();

    for post in records.iter().map(AsRef::as_ref) {
        let category = post
            .video_category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);
        let idx = *index.entry(category.to_string()).or_insert_with(|| {
            out.push(CategoryViews {
                category: category.to_string(),
                views: 0,
            });
            out.len() - 1
        });
        out[idx].views += post.views_or_zero();
    }
    out
}

/// 分类表现，按浏览量倒序
pub fn category_performance<P: AsRef<Posting>>(records: &[P]) -> Vec<CategoryViews> {
    let mut out = category_views(records);
    out.sort_by(|a, b| b.views.cmp(&a.views));
    out
}

/// 各平台账号数
pub fn platform_distribution(accounts: &[Account]) -> Vec<PlatformSlice> {
    platform_stats(accounts)
        .into_iter()
        .map(|s| PlatformSlice {
            name: s.platform.display_name(),
            value: s.count,
        })
        .collect()
}

/// 各平台账号数与生命周期计数之和，按首次出现的顺序
pub fn platform_stats(accounts: &[Account]) -> Vec<PlatformStats> {
    let mut index: HashMap<Platform, usize> = HashMap::new();
    let mut out: Vec<PlatformStats> = Vec::new();

    for account in accounts {
        let idx = *index.entry(account.platform).or_insert_with(|| {
            out.push(PlatformStats {
                platform: account.platform,
                count: 0,
                total_followers: 0,
                total_views: 0,
                total_likes: 0,
            });
            out.len() - 1
        });
        let stats = &mut out[idx];
        stats.count += 1;
        stats.total_followers += non_negative(account.followers_count);
        stats.total_views += non_negative(account.views_count_total);
        stats.total_likes += non_negative(account.likes_count_total);
    }
    out
}
