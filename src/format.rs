//! Display Formatting
//!
//! Text helpers shared by the panels.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use wasm_bindgen::JsValue;

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{} 秒", seconds);
    }
    let minutes = seconds / 60;
    let rem = seconds % 60;
    if minutes < 60 {
        return format!("{} 分钟 {} 秒", minutes, rem);
    }
    format!("{} 小时 {} 分钟", minutes / 60, minutes % 60)
}

pub fn format_speed(bytes_per_sec: Option<f64>) -> String {
    match bytes_per_sec {
        None => "-".to_string(),
        Some(b) if b < 1024.0 => format!("{} B/s", b.round()),
        Some(b) if b < 1024.0 * 1024.0 => format!("{:.1} KB/s", b / 1024.0),
        Some(b) => format!("{:.1} MB/s", b / (1024.0 * 1024.0)),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    value.map(|v| format!("{:.0}%", v)).unwrap_or_else(|| "-".to_string())
}

/// Clipboard preview text, cut at `max` characters
pub fn truncate_preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut)
}

/// Offset east of UTC, in seconds, from the JS `getTimezoneOffset` value
fn offset_from_js(js_offset_minutes: f64) -> Option<FixedOffset> {
    FixedOffset::east_opt((-js_offset_minutes * 60.0).round() as i32)
}

/// Parse a `datetime-local` input value into unix seconds. `offset_at`
/// gives the JS timezone offset in effect at a unix-ms moment.
pub fn parse_datetime_local(value: &str, offset_at: impl Fn(f64) -> f64) -> Option<f64> {
    let value = value.trim();
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    // The offset belongs to the target moment; two passes settle it
    let mut ts = naive.and_utc().timestamp() as f64;
    for _ in 0..2 {
        let offset = offset_from_js(offset_at(ts * 1000.0))?;
        ts = offset.from_local_datetime(&naive).single()?.timestamp() as f64;
    }
    Some(ts)
}

/// Local wall-clock label for a unix timestamp
pub fn format_due(ts: f64, offset_at: impl Fn(f64) -> f64) -> String {
    if !ts.is_finite() {
        return String::new();
    }
    let Some(offset) = offset_from_js(offset_at(ts * 1000.0)) else {
        return String::new();
    };
    DateTime::from_timestamp(ts as i64, 0)
        .map(|utc| utc.with_timezone(&offset).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Browser timezone offset at `unix_ms`, in minutes (JS sign convention)
pub fn local_offset_at(unix_ms: f64) -> f64 {
    js_sys::Date::new(&JsValue::from_f64(unix_ms)).get_timezone_offset()
}

pub fn favor_label(favor: i64) -> String {
    format!("好感 {}", favor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(1499), "24:59");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42 秒");
        assert_eq!(format_duration(125), "2 分钟 5 秒");
        assert_eq!(format_duration(7260), "2 小时 1 分钟");
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(None), "-");
        assert_eq!(format_speed(Some(512.0)), "512 B/s");
        assert_eq!(format_speed(Some(2048.0)), "2.0 KB/s");
        assert_eq!(format_speed(Some(3.5 * 1024.0 * 1024.0)), "3.5 MB/s");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_preview("短文本", 80), "短文本");
        let long = "剪".repeat(100);
        let preview = truncate_preview(&long, 80);
        assert_eq!(preview.chars().count(), 83);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_datetime_local_round_trip() {
        // UTC+8 is -480 in JS
        let ts = parse_datetime_local("2026-10-19T14:30", |_| -480.0).unwrap();
        assert_eq!(ts, 1_792_391_400.0);
        assert_eq!(format_due(ts, |_| -480.0), "2026-10-19 14:30");
        assert_eq!(format_due(ts, |_| 0.0), "2026-10-19 06:30");
    }

    /// Central European zone: summer time from 2026-03-29 01:00 UTC
    fn berlin(unix_ms: f64) -> f64 {
        if unix_ms >= 1_774_746_000_000.0 {
            -120.0
        } else {
            -60.0
        }
    }

    #[test]
    fn test_due_time_uses_offset_of_target_date() {
        // Picked in winter for a summer morning
        let summer = parse_datetime_local("2026-07-01T09:00", berlin).unwrap();
        assert_eq!(summer, 1_782_889_200.0);
        assert_eq!(format_due(summer, berlin), "2026-07-01 09:00");

        let winter = parse_datetime_local("2026-01-15T09:00", berlin).unwrap();
        assert_eq!(winter, 1_768_464_000.0);
        assert_eq!(format_due(winter, berlin), "2026-01-15 09:00");
    }

    #[test]
    fn test_bad_datetime_is_none() {
        assert_eq!(parse_datetime_local("", |_| 0.0), None);
        assert_eq!(parse_datetime_local("tomorrow", |_| 0.0), None);
    }
}
