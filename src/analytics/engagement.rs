//! 每日互动率
//!
//! 单条记录的互动率 = (likes + comments + shares) / views，views 为空或 0 的记录不参与。
//! 同一天的值取各条记录互动率的算术平均（mean of ratios）。

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::time_series::DateWindow;
use crate::storage::models::Posting;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// 单条记录的互动率；views 缺失或不为正时没有定义
pub fn post_engagement_rate(post: &Posting) -> Option<f64> {
    match post.views {
        Some(views) if views > 0 => Some(post.engagement() as f64 / views as f64),
        _ => None,
    }
}

pub fn engagement_rate_by_date<P: AsRef<Posting>>(
    records: &[P],
    window: &DateWindow,
) -> Vec<EngagementPoint> {
    // date -> (Σrate, n)
    let mut buckets: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    for post in records.iter().map(AsRef::as_ref) {
        let Some(date) = post.surge_date.filter(|d| window.contains(*d)) else {
            continue;
        };
        let Some(rate) = post_engagement_rate(post) else {
            continue;
        };
        let bucket = buckets.entry(date).or_insert((0.0, 0));
        bucket.0 += rate;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, (sum, n))| EngagementPoint {
            date,
            rate: sum / f64::from(n),
        })
        .collect()
}

/// 保留 4 位小数
pub fn round_rate(rate: f64) -> f64 {
    (rate * 10_000.0).round() / 10_000.0
}
