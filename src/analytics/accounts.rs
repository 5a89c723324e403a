//! 账号维度汇总

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::storage::models::{Account, Metric, Platform, Posting};

/// 账号及其帖子的汇总计数
#[derive(Debug, Clone)]
pub struct AccountWithStats {
    pub account: Account,
    pub post_count: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
}

impl AccountWithStats {
    /// likes + comments + shares
    pub fn engagement(&self) -> u64 {
        self.total_likes + self.total_comments + self.total_shares
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEngagement {
    pub username: String,
    pub platform: Platform,
    pub engagement: u64,
}

#[derive(Default, Clone, Copy)]
struct Totals {
    posts: u64,
    views: u64,
    likes: u64,
    comments: u64,
    shares: u64,
}

/// 为每个账号附加帖子汇总；没有帖子的账号各项为 0。保持账号输入顺序
pub fn accounts_with_stats<P: AsRef<Posting>>(
    accounts: Vec<Account>,
    postings: &[P],
) -> Vec<AccountWithStats> {
    let mut totals: HashMap<&str, Totals> = HashMap::new();
    for post in postings.iter().map(AsRef::as_ref) {
        let t = totals.entry(post.account_id.as_str()).or_default();
        t.posts += 1;
        t.views += post.metric(Metric::Views);
        t.likes += post.metric(Metric::Likes);
        t.comments += post.metric(Metric::Comments);
        t.shares += post.metric(Metric::Shares);
    }

    accounts
        .into_iter()
        .map(|account| {
            let t = totals
                .get(account.account_id.as_str())
                .copied()
                .unwrap_or_default();
            AccountWithStats {
                account,
                post_count: t.posts,
                total_views: t.views,
                total_likes: t.likes,
                total_comments: t.comments,
                total_shares: t.shares,
            }
        })
        .collect()
}

/// 按互动总量倒序取前 limit 个账号
pub fn top_accounts(stats: &[AccountWithStats], limit: usize) -> Vec<AccountEngagement> {
    let mut ranked: Vec<AccountEngagement> = stats
        .iter()
        .map(|s| AccountEngagement {
            username: s.account.username.clone(),
            platform: s.account.platform,
            engagement: s.engagement(),
        })
        .collect();
    ranked.sort_by_key(|a| Reverse(a.engagement));
    ranked.truncate(limit);
    ranked
}
