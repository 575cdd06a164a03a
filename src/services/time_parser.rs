//! Time column parsing
//!
//! Accepted shapes, tried in order:
//! - compact ISO-8601 date `YYYYMMDD` or bare year `YYYY`, midnight UTC
//! - epoch seconds, at least 9 digits (`1769969400`)
//! - RFC 3339 (`2026-02-01T18:10:00Z`, `2026-02-01T18:10:00+01:00`)
//! - `YYYY-MM-DD HH:MM:SS±HH:MM` (space separator, optional fraction)
//! - naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM`, read as UTC
//! - plain `YYYY-MM-DD`, midnight UTC

use crate::constants::LEGACY_OFFSET_SUFFIX;
use crate::error::Error;
use crate::models::OffsetMode;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::borrow::Cow;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Shorter all-digit values are compact dates or invalid, never epoch seconds
const EPOCH_MIN_DIGITS: usize = 9;

/// True when `raw` will go through the `-05:00` → `Z` rewrite under `mode`
pub fn uses_legacy_offset(raw: &str, mode: OffsetMode) -> bool {
    mode == OffsetMode::Legacy && raw.trim().ends_with(LEGACY_OFFSET_SUFFIX)
}

/// Apply the offset mode to a raw time string
pub fn apply_offset_mode(raw: &str, mode: OffsetMode) -> Cow<'_, str> {
    let trimmed = raw.trim();
    if uses_legacy_offset(trimmed, mode) {
        let base = &trimmed[..trimmed.len() - LEGACY_OFFSET_SUFFIX.len()];
        Cow::Owned(format!("{}Z", base))
    } else {
        Cow::Borrowed(trimmed)
    }
}

/// Parse a time column value into a UTC instant
pub fn parse_time(raw: &str, mode: OffsetMode) -> Result<DateTime<Utc>, Error> {
    let value = apply_offset_mode(raw, mode);
    parse_datetime(&value).ok_or_else(|| Error::Parse(format!("Invalid datetime '{}'", raw.trim())))
}

/// Parse a normalized time string; `None` when no accepted shape matches
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(dt) = parse_compact_date(value) {
        return Some(dt);
    }

    if is_epoch_seconds(value) {
        let secs: i64 = value.parse().ok()?;
        return DateTime::from_timestamp(secs, 0);
    }

    // chrono's %:z does not take `Z`, so spell UTC out
    let value: Cow<'_, str> = match value.strip_suffix(['Z', 'z']) {
        Some(base) => Cow::Owned(format!("{}+00:00", base)),
        None => Cow::Borrowed(value),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&value, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&value, fmt) {
            return Some(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&value, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

/// `YYYYMMDD` or `YYYY`
fn parse_compact_date(value: &str) -> Option<DateTime<Utc>> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let date = match value.len() {
        4 => NaiveDate::from_ymd_opt(value.parse().ok()?, 1, 1)?,
        8 => NaiveDate::parse_from_str(value, "%Y%m%d").ok()?,
        _ => return None,
    };
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

fn is_epoch_seconds(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    (EPOCH_MIN_DIGITS..=12).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_legacy_offset_read_as_utc() {
        let t = parse_time("2026-02-01 18:10:00-05:00", OffsetMode::Legacy).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2026, 2, 1, 18, 10, 0).unwrap());
        assert_eq!(t, parse_time("2026-02-01 18:10:00Z", OffsetMode::Legacy).unwrap());
    }

    #[test]
    fn test_honor_applies_offset() {
        let t = parse_time("2026-02-01 18:10:00-05:00", OffsetMode::Honor).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2026, 2, 1, 23, 10, 0).unwrap());
    }

    #[test]
    fn test_other_offsets_always_applied() {
        // -04:00 (EDT) is not rewritten, even in legacy mode
        let t = parse_time("2026-07-01 09:30:00-04:00", OffsetMode::Legacy).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2026, 7, 1, 13, 30, 0).unwrap());
        assert!(!uses_legacy_offset("2026-07-01 09:30:00-04:00", OffsetMode::Legacy));
    }

    #[test]
    fn test_uses_legacy_offset() {
        assert!(uses_legacy_offset("2026-02-01 18:10:00-05:00", OffsetMode::Legacy));
        assert!(!uses_legacy_offset("2026-02-01 18:10:00-05:00", OffsetMode::Honor));
    }

    #[test]
    fn test_rfc3339() {
        let t = parse_datetime("2024-01-15T09:30:00+07:00").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 1, 15, 2, 30, 0).unwrap());
        assert!(parse_datetime("2024-01-15T09:30:00Z").is_some());
    }

    #[test]
    fn test_epoch_seconds() {
        let t = parse_datetime("1769969400").unwrap();
        assert_eq!(t.timestamp(), 1769969400);
    }

    #[test]
    fn test_compact_dates_are_not_epoch() {
        assert_eq!(
            parse_datetime("20240115").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_datetime("2024").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_datetime("20241399").is_none());
        assert!(parse_datetime("12345").is_none());
        assert_eq!(parse_datetime("100000000").unwrap().timestamp(), 100_000_000);
    }

    #[test]
    fn test_naive_and_date_only() {
        assert_eq!(
            parse_datetime("2024-01-15 09:30:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_datetime("2024-01-15").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_invalid() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("not a date").is_none());
        assert!(parse_datetime("2024-13-45").is_none());
        assert!(parse_time("yesterday", OffsetMode::Legacy).is_err());
    }
}
