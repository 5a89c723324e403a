//! 按客户（campaign）汇总
//!
//! 注意这里的平均互动是 ratio-of-sums：(Σlikes + Σcomments + Σshares) / 帖子数，
//! 与 [`super::engagement`] 的 mean-of-ratios 不同。

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::storage::models::{Metric, PostingRecord};

/// 观看量最高的帖子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopPost {
    pub post_id: String,
    pub views: u64,
    pub posted_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DateSpan {
    fn extend(span: Option<DateSpan>, date: NaiveDate) -> DateSpan {
        match span {
            None => DateSpan {
                earliest: date,
                latest: date,
            },
            Some(s) => DateSpan {
                earliest: s.earliest.min(date),
                latest: s.latest.max(date),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignStats {
    pub client_id: i64,
    pub campaign: String,
    pub status: String,
    pub post_count: u64,
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub avg_engagement: f64,
    pub top_post: Option<TopPost>,
    pub date_range: Option<DateSpan>,
}

impl CampaignStats {
    fn new(client_id: i64, campaign: Option<&str>, status: Option<&str>) -> Self {
        Self {
            client_id,
            campaign: campaign
                .map(str::to_string)
                .unwrap_or_else(|| format!("Client {}", client_id)),
            status: status.unwrap_or("unknown").to_string(),
            post_count: 0,
            total_views: 0,
            total_likes: 0,
            total_comments: 0,
            total_shares: 0,
            avg_engagement: 0.0,
            top_post: None,
            date_range: None,
        }
    }

    fn absorb(&mut self, record: &PostingRecord) {
        let post = &record.posting;
        let views = post.views_or_zero();

        self.post_count += 1;
        self.total_views += views;
        self.total_likes += post.metric(Metric::Likes);
        self.total_comments += post.metric(Metric::Comments);
        self.total_shares += post.metric(Metric::Shares);

        // 严格大于：并列时保留先出现的
        if self.top_post.as_ref().is_none_or(|top| views > top.views) {
            self.top_post = Some(TopPost {
                post_id: post.post_id.clone(),
                views,
                posted_link: post.posted_link.clone(),
            });
        }

        if let Some(date) = post.surge_date {
            self.date_range = Some(DateSpan::extend(self.date_range, date));
        }
    }

    fn finish(&mut self) {
        self.avg_engagement = if self.post_count > 0 {
            (self.total_likes + self.total_comments + self.total_shares) as f64
                / self.post_count as f64
        } else {
            0.0
        };
    }
}

/// 单个 campaign 的汇总及其全部帖子
#[derive(Debug, Clone)]
pub struct CampaignDetail {
    pub stats: CampaignStats,
    pub posts: Vec<PostingRecord>,
}

/// 按客户汇总；没有关联客户（或客户行不存在）的记录被忽略，输出保持客户首次出现的顺序
pub fn campaign_rollup(records: &[PostingRecord]) -> Vec<CampaignStats> {
    let mut order: HashMap<i64, usize> = HashMap::new();
    let mut stats: Vec<CampaignStats> = Vec::new();

    for record in records {
        let (Some(client_id), Some(client)) = (record.posting.client_id, record.clients.as_ref())
        else {
            continue;
        };

        let idx = *order.entry(client_id).or_insert_with(|| {
            stats.push(CampaignStats::new(
                client_id,
                client.campaign.as_deref(),
                client.status.as_deref(),
            ));
            stats.len() - 1
        });
        stats[idx].absorb(record);
    }

    for s in &mut stats {
        s.finish();
    }
    stats
}

/// 单个 campaign 的详情；客户不存在或没有帖子时返回 None
pub fn campaign_detail(records: &[PostingRecord], client_id: i64) -> Option<CampaignDetail> {
    let posts: Vec<PostingRecord> = records
        .iter()
        .filter(|r| r.posting.client_id == Some(client_id))
        .cloned()
        .collect();

    let stats = campaign_rollup(&posts).into_iter().next()?;
    Some(CampaignDetail { stats, posts })
}

/// campaign 对比图的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignComparison {
    pub campaign: String,
    pub views: u64,
}

/// 取最后一个 " - " 之后的部分作为标签（通常是艺人名）
pub fn comparison_label(name: &str) -> String {
    match name.rfind(" - ") {
        Some(idx) => name[idx + 3..].trim().to_string(),
        None => name.to_string(),
    }
}

/// 按总浏览量倒序
pub fn campaign_comparison(stats: &[CampaignStats]) -> Vec<CampaignComparison> {
    let mut items: Vec<CampaignComparison> = stats
        .iter()
        .map(|s| CampaignComparison {
            campaign: comparison_label(&s.campaign),
            views: s.total_views,
        })
        .collect();
    items.sort_by(|a, b| b.views.cmp(&a.views));
    items
}
