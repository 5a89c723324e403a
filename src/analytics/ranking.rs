//! Top-N 排序

use std::cmp::Reverse;

use crate::storage::DateRange;
use crate::storage::models::{Metric, Posting};

/// 按指标倒序取前 n 条
///
/// 有日期边界时先按 surge_date 过滤（缺失日期的记录被丢弃）。
/// 排序是稳定的，值相同的记录保持输入顺序；空值按 0 处理。
pub fn top_n<P>(records: &[P], metric: Metric, range: &DateRange, n: usize) -> Vec<P>
where
    P: AsRef<Posting> + Clone,
{
    let mut candidates: Vec<&P> = records
        .iter()
        .filter(|r| range.contains(r.as_ref().surge_date))
        .collect();

    candidates.sort_by_key(|r| Reverse(r.as_ref().metric(metric)));
    candidates.into_iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 1, day)
    }

    fn post(id: &str, views: Option<i64>, date: Option<NaiveDate>) -> Posting {
        Posting {
            post_id: id.to_string(),
            views,
            surge_date: date,
            ..Default::default()
        }
    }

    fn ids(posts: &[Posting]) -> Vec<&str> {
        posts.iter().map(|p| p.post_id.as_str()).collect()
    }

    #[test]
    fn test_top_n_descending_with_null_as_zero() {
        let records = vec![
            post("a", Some(10), d(1)),
            post("b", None, d(2)),
            post("c", Some(30), d(3)),
            post("d", Some(20), None),
        ];

        let top = top_n(&records, Metric::Views, &DateRange::default(), 3);
        assert_eq!(ids(&top), vec!["c", "d", "a"]);

        let all = top_n(&records, Metric::Views, &DateRange::default(), 10);
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].views_or_zero() >= w[1].views_or_zero()));
    }

    #[test]
    fn test_top_n_is_stable_for_ties() {
        let records = vec![
            post("first", Some(5), d(1)),
            post("second", Some(5), d(1)),
            post("third", Some(5), d(1)),
        ];
        let top = top_n(&records, Metric::Views, &DateRange::default(), 2);
        assert_eq!(ids(&top), vec!["first", "second"]);
    }

    #[test]
    fn test_top_n_with_range_drops_undated_records() {
        let records = vec![
            post("in", Some(1), d(10)),
            post("out", Some(100), d(25)),
            post("undated", Some(1000), None),
        ];
        let range = DateRange::new(d(5), d(20));
        let top = top_n(&records, Metric::Views, &range, 10);
        assert_eq!(ids(&top), vec!["in"]);
    }

    #[test]
    fn test_top_n_zero_limit() {
        let records = vec![post("a", Some(1), d(1))];
        assert!(top_n(&records, Metric::Views, &DateRange::default(), 0).is_empty());
    }
}
