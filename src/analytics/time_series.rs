//! 按日历日分桶的时间序列
//!
//! 输入是已经取出并规范化过日期的记录，输出按日期升序排列。
//! 这里只产出 `NaiveDate`，展示格式由 HTTP 层决定。

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::storage::DateRange;
use crate::storage::models::Posting;
use crate::utils::dates::today_utc;

/// 闭区间日期窗口 `[end - days, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// 起点越过 chrono 可表示的最早日期时停在 `NaiveDate::MIN`
    pub fn ending_at(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// 以当前 UTC 日期为终点
    pub fn last_days(days: u32) -> Self {
        Self::ending_at(today_utc(), days)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// 窗口内的每一天（升序，含两端）
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// 作为存储层的 surge_date 过滤条件
    pub fn as_range(&self) -> DateRange {
        DateRange::between(self.start, self.end)
    }
}

/// 某一天的聚合值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: u64,
}

/// 某一天的发帖数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// 每日发帖数（按 scheduled_date），窗口内每天一个点，没有发帖的日期补 0
pub fn daily_post_counts(dates: &[NaiveDate], window: &DateWindow) -> Vec<DailyCount> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for date in dates.iter().filter(|d| window.contains(**d)) {
        *counts.entry(*date).or_insert(0) += 1;
    }

    window
        .days()
        .map(|date| DailyCount {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// 每日浏览量（按 surge_date），只输出有记录的日期
pub fn views_by_date<P: AsRef<Posting>>(records: &[P], window: &DateWindow) -> Vec<SeriesPoint> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for post in records.iter().map(AsRef::as_ref) {
        let Some(date) = post.surge_date.filter(|d| window.contains(*d)) else {
            continue;
        };
        *totals.entry(date).or_insert(0) += post.views_or_zero();
    }

    totals
        .into_iter()
        .map(|(date, value)| SeriesPoint { date, value })
        .collect()
}

/// 累计和：`out[i] = in[0] + ... + in[i]`，保持输入顺序
pub fn cumulative(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    points
        .iter()
        .scan(0u64, |running, point| {
            *running = running.saturating_add(point.value);
            Some(SeriesPoint {
                date: point.date,
                value: *running,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn post(surge: Option<NaiveDate>, views: Option<i64>) -> Posting {
        Posting {
            post_id: format!("p-{:?}-{:?}", surge, views),
            surge_date: surge,
            views,
            ..Default::default()
        }
    }

    #[test]
    fn test_window_is_inclusive() {
        let window = DateWindow::ending_at(d(2024, 1, 31), 30);
        assert_eq!(window.start, d(2024, 1, 1));
        assert_eq!(window.len(), 31);
        assert!(window.contains(d(2024, 1, 1)));
        assert!(window.contains(d(2024, 1, 31)));
        assert!(!window.contains(d(2024, 2, 1)));
        assert_eq!(window.days().count(), 31);
    }

    #[test]
    fn test_huge_window_saturates_instead_of_panicking() {
        let window = DateWindow::ending_at(d(2024, 1, 31), u32::MAX);
        assert_eq!(window.start, NaiveDate::MIN);
        assert_eq!(window.end, d(2024, 1, 31));
        assert!(window.contains(d(1900, 1, 1)));

        let window = DateWindow::ending_at(d(2024, 1, 31), 200_000_000);
        assert_eq!(window.start, NaiveDate::MIN);
    }

    #[test]
    fn test_daily_post_counts_zero_fills() {
        let window = DateWindow::ending_at(d(2024, 1, 31), 30);
        let dates = vec![d(2024, 1, 1), d(2024, 1, 1), d(2024, 1, 15), d(2023, 12, 31)];

        let counts = daily_post_counts(&dates, &window);

        assert_eq!(counts.len(), 31);
        assert_eq!(counts[0], DailyCount { date: d(2024, 1, 1), count: 2 });
        assert_eq!(counts[14].count, 1);
        assert_eq!(counts.iter().map(|c| c.count).sum::<u64>(), 3);
        assert!(counts.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_daily_post_counts_with_zero_days() {
        let window = DateWindow::ending_at(d(2024, 5, 5), 0);
        let counts = daily_post_counts(&[d(2024, 5, 5)], &window);
        assert_eq!(counts, vec![DailyCount { date: d(2024, 5, 5), count: 1 }]);
    }

    #[test]
    fn test_views_by_date_sums_and_skips_empty_days() {
        let window = DateWindow::ending_at(d(2024, 1, 31), 30);
        let records = vec![
            post(Some(d(2024, 1, 3)), Some(100)),
            post(Some(d(2024, 1, 3)), None),
            post(Some(d(2024, 1, 1)), Some(50)),
            post(None, Some(999)),
            post(Some(d(2023, 6, 1)), Some(7)),
        ];

        let series = views_by_date(&records, &window);

        assert_eq!(
            series,
            vec![
                SeriesPoint { date: d(2024, 1, 1), value: 50 },
                SeriesPoint { date: d(2024, 1, 3), value: 100 },
            ]
        );
    }

    #[test]
    fn test_views_by_date_keeps_days_with_only_null_views() {
        let window = DateWindow::ending_at(d(2024, 1, 31), 30);
        let series = views_by_date(&[post(Some(d(2024, 1, 9)), None)], &window);
        assert_eq!(series, vec![SeriesPoint { date: d(2024, 1, 9), value: 0 }]);
    }

    #[test]
    fn test_cumulative_running_total() {
        let points = vec![
            SeriesPoint { date: d(2024, 1, 1), value: 10 },
            SeriesPoint { date: d(2024, 1, 2), value: 0 },
            SeriesPoint { date: d(2024, 1, 3), value: 5 },
        ];
        let out = cumulative(&points);
        let values: Vec<u64> = out.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10, 10, 15]);
        assert_eq!(out.last().unwrap().value, points.iter().map(|p| p.value).sum::<u64>());
        assert!(cumulative(&[]).is_empty());
    }

    #[test]
    fn test_cumulative_does_not_sort() {
        let points = vec![
            SeriesPoint { date: d(2024, 1, 5), value: 1 },
            SeriesPoint { date: d(2024, 1, 1), value: 2 },
        ];
        let out = cumulative(&points);
        assert_eq!(out[0].date, d(2024, 1, 5));
        assert_eq!(out[1].value, 3);
    }
}
