use crate::storage::DateRange;
use crate::storage::models::{Metric, Posting};

/// 汇总计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kpis {
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
}

/// 区间内所有记录的计数之和；没有边界时缺失日期的记录也计入
pub fn kpis<P: AsRef<Posting>>(records: &[P], range: &DateRange) -> Kpis {
    records
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| range.contains(p.surge_date))
        .fold(Kpis::default(), |mut acc, p| {
            acc.total_views += p.metric(Metric::Views);
            acc.total_likes += p.metric(Metric::Likes);
            acc.total_comments += p.metric(Metric::Comments);
            acc.total_shares += p.metric(Metric::Shares);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(date: Option<u32>, views: Option<i64>) -> Posting {
        Posting {
            surge_date: date.and_then(|d| NaiveDate::from_ymd_opt(2024, 1, d)),
            views,
            likes: Some(1),
            comments: None,
            shares: Some(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_kpis_sum_with_nulls_as_zero() {
        let records = vec![post(Some(1), Some(10)), post(None, None), post(Some(3), Some(5))];
        let totals = kpis(&records, &DateRange::default());
        assert_eq!(
            totals,
            Kpis {
                total_views: 15,
                total_likes: 3,
                total_comments: 0,
                total_shares: 6,
            }
        );
    }

    #[test]
    fn test_kpis_respect_range() {
        let records = vec![post(Some(1), Some(10)), post(None, Some(100)), post(Some(3), Some(5))];
        let range = DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 2), None);
        let totals = kpis(&records, &range);
        assert_eq!(totals.total_views, 5);
        assert_eq!(totals.total_likes, 1);
    }

    #[test]
    fn test_kpis_empty() {
        assert_eq!(kpis::<Posting>(&[], &DateRange::default()), Kpis::default());
    }
}
