//! 每日趋势：累计浏览量 + 互动率

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::engagement::EngagementPoint;
use super::time_series::{SeriesPoint, cumulative};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTrend {
    pub date: NaiveDate,
    /// 截至当天的累计浏览量
    pub views: u64,
    pub engagement: f64,
}

/// 按日期合并两条序列，浏览量替换为累计值
///
/// 只有浏览量的日期互动率为 0，只有互动率的日期当天浏览量按 0 计。
pub fn merge_daily_trends(views: &[SeriesPoint], engagement: &[EngagementPoint]) -> Vec<DailyTrend> {
    let mut merged: BTreeMap<NaiveDate, (u64, f64)> = BTreeMap::new();
    for point in views {
        merged.insert(point.date, (point.value, 0.0));
    }
    for point in engagement {
        merged.entry(point.date).or_insert((0, 0.0)).1 = point.rate;
    }

    let daily: Vec<SeriesPoint> = merged
        .iter()
        .map(|(date, (v, _))| SeriesPoint {
            date: *date,
            value: *v,
        })
        .collect();

    cumulative(&daily)
        .into_iter()
        .zip(merged.values())
        .map(|(point, (_, rate))| DailyTrend {
            date: point.date,
            views: point.value,
            engagement: *rate,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_merge_fills_missing_engagement_and_accumulates() {
        let views = vec![
            SeriesPoint { date: d(1), value: 100 },
            SeriesPoint { date: d(2), value: 50 },
            SeriesPoint { date: d(4), value: 10 },
        ];
        let engagement = vec![
            EngagementPoint { date: d(2), rate: 0.25 },
            EngagementPoint { date: d(4), rate: 0.5 },
        ];

        let trends = merge_daily_trends(&views, &engagement);

        assert_eq!(
            trends,
            vec![
                DailyTrend { date: d(1), views: 100, engagement: 0.0 },
                DailyTrend { date: d(2), views: 150, engagement: 0.25 },
                DailyTrend { date: d(4), views: 160, engagement: 0.5 },
            ]
        );
    }

    #[test]
    fn test_merge_engagement_only_dates_and_unsorted_input() {
        let views = vec![
            SeriesPoint { date: d(5), value: 5 },
            SeriesPoint { date: d(1), value: 1 },
        ];
        let engagement = vec![EngagementPoint { date: d(3), rate: 0.1 }];

        let trends = merge_daily_trends(&views, &engagement);

        let dates: Vec<NaiveDate> = trends.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![d(1), d(3), d(5)]);
        let totals: Vec<u64> = trends.iter().map(|t| t.views).collect();
        assert_eq!(totals, vec![1, 1, 6]);
        assert_eq!(trends[1].engagement, 0.1);
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_daily_trends(&[], &[]).is_empty());
    }
}
