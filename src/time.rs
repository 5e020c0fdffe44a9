//! Date Helpers
//!
//! Backend dates arrive as RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM`, or plain dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse any of the accepted date shapes as UTC
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// `Mar 4, 2024`
pub fn format_date(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// `Mar 4, 2024 · 10:30`
pub fn format_date_time(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|dt| dt.format("%b %-d, %Y · %H:%M").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Coarse "x ago" label relative to `now`
pub fn relative(value: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(then) = value.and_then(parse_timestamp) else {
        return String::new();
    };
    let seconds = (now - then).num_seconds();
    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 7 * 86_400 => format!("{}d ago", s / 86_400),
        _ => then.format("%b %-d").to_string(),
    }
}

/// `true` when the value parses and lies before `now`
pub fn is_past(value: Option<&str>, now: DateTime<Utc>) -> bool {
    value.and_then(parse_timestamp).is_some_and(|dt| dt < now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(parse_timestamp("2024-03-04T10:30:00.000Z"), Some(at(2024, 3, 4, 10, 30)));
        assert_eq!(parse_timestamp("2024-03-04T10:30"), Some(at(2024, 3, 4, 10, 30)));
        assert_eq!(parse_timestamp("2024-03-04"), Some(at(2024, 3, 4, 0, 0)));
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_date(Some("2024-03-04")), "Mar 4, 2024");
        assert_eq!(format_date_time(Some("2024-03-04T09:05")), "Mar 4, 2024 · 09:05");
        assert_eq!(format_date(None), "—");
    }

    #[test]
    fn test_relative() {
        let now = at(2024, 3, 4, 12, 0);
        assert_eq!(relative(Some("2024-03-04T11:59:30Z"), now), "just now");
        assert_eq!(relative(Some("2024-03-04T11:15:00Z"), now), "45m ago");
        assert_eq!(relative(Some("2024-03-04T07:00:00Z"), now), "5h ago");
        assert_eq!(relative(Some("2024-03-01T12:00:00Z"), now), "3d ago");
        assert_eq!(relative(Some("2024-01-01T12:00:00Z"), now), "Jan 1");
        assert_eq!(relative(None, now), "");
    }

    #[test]
    fn test_is_past() {
        let now = at(2024, 3, 4, 12, 0);
        assert!(is_past(Some("2024-03-03"), now));
        assert!(!is_past(Some("2024-03-05"), now));
        assert!(!is_past(None, now));
    }
}
