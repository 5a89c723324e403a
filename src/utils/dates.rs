//! 日期处理工具
//!
//! 上游写入的 surge_date / scheduled_date 有两种形态：纯日期 `2024-01-01`
//! 和带时间的 `2024-01-01T10:00:00Z` / `2024-01-01 10:00:00`。
//! 所有日期在存储层边界统一规范化为 `NaiveDate`，聚合函数只看日历日。

use chrono::{DateTime, Duration, NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 将原始日期字符串规范化为日历日
///
/// 取 `T` 或空格之前的部分按 `YYYY-MM-DD` 解析，解析失败返回 `None`。
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);

    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

/// 解析查询参数中的日期（`startDate` / `endDate`）
///
/// 支持 RFC3339 和 YYYY-MM-DD，空字符串视为未提供。
pub fn parse_date_param(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .or_else(|| normalize_date(raw))
}

/// 日期的规范文本形式，用于数据库中的文本比较
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 次日的规范文本形式
///
/// 文本列上做 `< next_day` 比较可以同时覆盖纯日期和带时间的值。
pub fn next_day_key(date: NaiveDate) -> String {
    date_key(date + Duration::days(1))
}

/// 当前 UTC 日期
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// 图表展示用的短标签，例如 `Jan 1`
pub fn display_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_plain_and_timestamped_dates_normalize_identically() {
        let expected = Some(d(2024, 1, 1));
        assert_eq!(normalize_date("2024-01-01"), expected);
        assert_eq!(normalize_date("2024-01-01T10:00:00Z"), expected);
        assert_eq!(normalize_date("2024-01-01T23:59:59.123+00:00"), expected);
        assert_eq!(normalize_date("2024-01-01 10:00:00"), expected);
        assert_eq!(normalize_date("  2024-01-01  "), expected);
    }

    #[test]
    fn test_invalid_dates_are_absent() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("not-a-date"), None);
        assert_eq!(normalize_date("2024-13-01"), None);
    }

    #[test]
    fn test_parse_date_param() {
        assert_eq!(parse_date_param(None), None);
        assert_eq!(parse_date_param(Some("")), None);
        assert_eq!(parse_date_param(Some("2024-06-30")), Some(d(2024, 6, 30)));
        assert_eq!(
            parse_date_param(Some("2024-06-30T22:00:00Z")),
            Some(d(2024, 6, 30))
        );
        assert_eq!(parse_date_param(Some("garbage")), None);
    }

    #[test]
    fn test_keys_and_labels() {
        assert_eq!(date_key(d(2024, 3, 5)), "2024-03-05");
        assert_eq!(next_day_key(d(2024, 2, 29)), "2024-03-01");
        assert_eq!(display_label(d(2024, 1, 1)), "Jan 1");
        assert_eq!(display_label(d(2024, 12, 25)), "Dec 25");
    }
}
