//! Aggregation property tests
//!
//! Exercises the pure aggregation functions through the public API with
//! hand-built records; no database involved.

use chrono::{NaiveDate, Utc};

use surgedash::analytics::{
    DateWindow, SeriesPoint, campaign_comparison, campaign_rollup, cumulative, daily_post_counts,
    engagement_rate_by_date, merge_daily_trends, top_n, views_by_date,
};
use surgedash::storage::{Client, DateRange, Metric, Posting, PostingRecord};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn post(id: &str, date: Option<NaiveDate>, views: Option<i64>, likes: i64) -> Posting {
    Posting {
        post_id: id.to_string(),
        account_id: "acc".to_string(),
        surge_date: date,
        views,
        likes: Some(likes),
        comments: Some(0),
        shares: Some(0),
        ..Default::default()
    }
}

fn campaign_record(client_id: i64, campaign: &str, views: i64, likes: i64) -> PostingRecord {
    let id = format!("c{}-{}", client_id, views);
    let mut posting = post(&id, Some(d(2024, 1, 1)), Some(views), likes);
    posting.client_id = Some(client_id);
    PostingRecord {
        posting,
        accounts: None,
        clients: Some(Client {
            client_id,
            created_at: Utc::now(),
            campaign: Some(campaign.to_string()),
            status: Some("active".to_string()),
        }),
    }
}

#[test]
fn test_daily_breakdown_has_one_point_per_day() {
    let today = d(2024, 3, 10);
    let dates = vec![
        d(2024, 3, 10),
        d(2024, 3, 8),
        d(2024, 3, 8),
        d(2024, 2, 1),
        d(2024, 3, 11),
    ];

    for days in [0u32, 1, 2, 7, 30, 90] {
        let window = DateWindow::ending_at(today, days);
        let counts = daily_post_counts(&dates, &window);

        assert_eq!(counts.len(), days as usize + 1, "days={}", days);
        assert_eq!(counts.first().unwrap().date, window.start);
        assert_eq!(counts.last().unwrap().date, today);
        for pair in counts.windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }

        let expected = dates.iter().filter(|date| window.contains(**date)).count() as u64;
        let total: u64 = counts.iter().map(|c| c.count).sum();
        assert_eq!(total, expected, "days={}", days);
    }
}

#[test]
fn test_cumulative_is_prefix_sum_and_non_decreasing() {
    let values = [3u64, 0, 7, 1, 0, 12];
    let points: Vec<SeriesPoint> = values
        .iter()
        .enumerate()
        .map(|(i, v)| SeriesPoint {
            date: d(2024, 1, i as u32 + 1),
            value: *v,
        })
        .collect();

    let out = cumulative(&points);
    assert_eq!(out.len(), values.len());
    for (i, point) in out.iter().enumerate() {
        assert_eq!(point.value, values[..=i].iter().sum::<u64>());
        assert_eq!(point.date, points[i].date);
    }
    assert!(out.windows(2).all(|w| w[0].value <= w[1].value));
}

#[test]
fn test_engagement_is_mean_of_ratios() {
    let window = DateWindow::ending_at(d(2024, 1, 5), 10);
    let records = vec![
        post("a", Some(d(2024, 1, 5)), Some(10), 5),
        post("b", Some(d(2024, 1, 5)), Some(100), 10),
        post("zero", Some(d(2024, 1, 5)), Some(0), 50),
        post("null", Some(d(2024, 1, 5)), None, 50),
    ];

    let points = engagement_rate_by_date(&records, &window);
    assert_eq!(points.len(), 1);
    // (0.5 + 0.1) / 2，而不是 15 / 110
    assert!((points[0].rate - 0.3).abs() < 1e-12);
}

#[test]
fn test_campaign_average_differs_from_per_post_average() {
    let records = vec![
        campaign_record(1, "Push - Artist A", 10, 5),
        campaign_record(1, "Push - Artist A", 100, 10),
    ];

    let stats = campaign_rollup(&records);
    assert_eq!(stats.len(), 1);
    // (5 + 10) / 2 posts
    assert!((stats[0].avg_engagement - 7.5).abs() < 1e-12);

    let window = DateWindow::ending_at(d(2024, 1, 1), 0);
    let per_post = engagement_rate_by_date(&records, &window);
    assert!((per_post[0].rate - stats[0].avg_engagement).abs() > 1.0);
}

#[test]
fn test_top_n_treats_null_views_as_zero() {
    let records = vec![
        post("five-a", None, Some(5), 0),
        post("null", None, None, 0),
        post("twenty", None, Some(20), 0),
        post("five-b", None, Some(5), 0),
    ];

    let top = top_n(&records, Metric::Views, &DateRange::default(), 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].post_id, "twenty");
    assert!(top[1].post_id.starts_with("five"));

    let all = top_n(&records, Metric::Views, &DateRange::default(), 10);
    assert_eq!(all.len(), 4);
    assert_eq!(all[3].post_id, "null");
}

#[test]
fn test_views_over_time_skips_missing_dates_without_zero_fill() {
    let window = DateWindow::ending_at(d(2024, 1, 3), 2);
    let records = vec![
        post("p1", Some(d(2024, 1, 1)), Some(100), 0),
        post("p2", Some(d(2024, 1, 2)), Some(50), 0),
        post("p3", None, Some(999), 0),
    ];

    let views = views_by_date(&records, &window);
    assert_eq!(
        views,
        vec![
            SeriesPoint {
                date: d(2024, 1, 1),
                value: 100
            },
            SeriesPoint {
                date: d(2024, 1, 2),
                value: 50
            },
        ]
    );

    let running: Vec<u64> = cumulative(&views).iter().map(|p| p.value).collect();
    assert_eq!(running, vec![100, 150]);

    let trends = merge_daily_trends(&views, &engagement_rate_by_date(&records, &window));
    assert_eq!(trends.len(), 2);
    assert_eq!(trends[1].views, 150);
}

#[test]
fn test_campaign_comparison_orders_by_views() {
    let mut records = vec![
        campaign_record(1, "Tour - Artist A", 400, 1),
        campaign_record(1, "Tour - Artist A", 300, 1),
        campaign_record(1, "Tour - Artist A", 300, 1),
        campaign_record(2, "Label - Artist B", 500, 1),
    ];

    let comparison = campaign_comparison(&campaign_rollup(&records));
    assert_eq!(comparison[0].campaign, "Artist A");
    assert_eq!(comparison[0].views, 1000);
    assert_eq!(comparison[1].campaign, "Artist B");

    records.push(campaign_record(2, "Label - Artist B", 600, 1));
    let comparison = campaign_comparison(&campaign_rollup(&records));
    assert_eq!(comparison[0].campaign, "Artist B");
    assert_eq!(comparison[0].views, 1100);
}
