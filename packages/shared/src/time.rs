//! Time-related utilities for rendering server timestamps.
//!
//! The server serializes `createdAt` as an ISO-8601 instant in UTC
//! (`2024-05-01T10:15:30.123Z`); it is shown in the local time zone.
//! Date-times without an offset (`2024-05-01T10:15:30.123456`, or
//! `2024-05-01T10:15` with the seconds omitted) are taken as local time.

use chrono::{DateTime, Local, NaiveDateTime};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a server `createdAt` value into a naive local date-time.
pub fn parse_created_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Format a server `createdAt` value as a wall-clock time (`HH:MM:SS`).
///
/// Returns an empty string when the value is missing or unparseable, the
/// same way the message view leaves the time blank.
pub fn format_clock_time(created_at: Option<&str>) -> String {
    created_at
        .and_then(parse_created_at)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_created_at_with_fraction() {
        // テスト項目: 小数秒付きのローカル日時が解析される
        // given (前提条件):
        let value = "2024-05-01T10:15:30.123456";

        // when (操作):
        let result = parse_created_at(value);

        // then (期待する結果):
        let dt = result.expect("should parse");
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-01 10:15:30");
    }

    #[test]
    fn test_parse_created_at_without_seconds() {
        // テスト項目: 秒が省略された日時が解析される
        // given (前提条件):
        let value = "2024-05-01T10:15";

        // when (操作):
        let result = parse_created_at(value);

        // then (期待する結果):
        let dt = result.expect("should parse");
        assert_eq!(dt.format("%H:%M:%S").to_string(), "10:15:00");
    }

    #[test]
    fn test_parse_created_at_rejects_garbage() {
        // テスト項目: 不正な文字列は None になる
        // given (前提条件):
        let value = "yesterday";

        // when (操作):
        let result = parse_created_at(value);

        // then (期待する結果):
        assert!(result.is_none());
    }

    #[test]
    fn test_format_clock_time() {
        // テスト項目: 時刻が HH:MM:SS 形式で表示される
        // given (前提条件):
        let value = Some("2023-01-01T09:05:07");

        // when (操作):
        let result = format_clock_time(value);

        // then (期待する結果):
        assert_eq!(result, "09:05:07");
    }

    #[test]
    fn test_format_clock_time_missing_value_is_blank() {
        // テスト項目: createdAt がない場合は空文字になる
        // given (前提条件):

        // when (操作):
        let missing = format_clock_time(None);
        let empty = format_clock_time(Some(""));

        // then (期待する結果):
        assert_eq!(missing, "");
        assert_eq!(empty, "");
    }

    #[test]
    fn test_format_clock_time_from_utc_instant() {
        // テスト項目: 末尾が Z の UTC 時刻がローカル時刻で表示される
        // given (前提条件):
        let value = "2024-05-01T10:15:30.123Z";

        // when (操作):
        let result = format_clock_time(Some(value));

        // then (期待する結果):
        let expected = DateTime::parse_from_rfc3339(value)
            .unwrap()
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string();
        assert_eq!(result, expected);
        assert!(result.ends_with(":30"));
    }

    #[test]
    fn test_parse_created_at_accepts_rfc3339() {
        // テスト項目: RFC 3339 形式も受け付ける
        // given (前提条件):
        let value = "2023-01-01T00:00:00+09:00";

        // when (操作):
        let result = parse_created_at(value);

        // then (期待する結果):
        assert!(result.is_some());
    }
}
