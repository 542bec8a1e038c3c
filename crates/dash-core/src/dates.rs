use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ── MonthKey ──────────────────────────────────────────────────────────────────

/// A calendar month bucket used for time-grouped aggregation.
///
/// Ordering derives from `(year, month)`, so sorting a collection of keys is
/// chronological by construction. This matters once the data spans a year
/// boundary: string keys would put `"2024-10"` after `"2024-1"` under a
/// lexicographic sort, while `MonthKey` cannot be misordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// The month bucket containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    /// Formats as `"2024-03"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ── Order-date parsing ────────────────────────────────────────────────────────

/// Datetime patterns seen in spreadsheet exports. Any time-of-day component
/// is discarded; the dashboard works at calendar-date granularity.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Date-only patterns, tried after the datetime patterns.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Parse an `order_date` cell into a calendar date.
///
/// Tries RFC 3339 (with or without a trailing `Z`), then the common
/// spreadsheet datetime patterns, then plain date patterns. Returns `None`
/// when nothing matches; the loader turns that into a load failure.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    warn!("could not parse order date \"{}\"", s);
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── MonthKey ──────────────────────────────────────────────────────────

    #[test]
    fn test_month_key_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
        assert_eq!(MonthKey::from_date(date), MonthKey { year: 2024, month: 9 });
    }

    #[test]
    fn test_month_key_display_zero_pads() {
        let key = MonthKey { year: 2024, month: 3 };
        assert_eq!(key.to_string(), "2024-03");
    }

    #[test]
    fn test_month_key_orders_chronologically_across_years() {
        let dec_2023 = MonthKey { year: 2023, month: 12 };
        let jan_2024 = MonthKey { year: 2024, month: 1 };
        let oct_2024 = MonthKey { year: 2024, month: 10 };
        assert!(dec_2023 < jan_2024);
        assert!(jan_2024 < oct_2024);

        let mut keys = vec![oct_2024, dec_2023, jan_2024];
        keys.sort();
        assert_eq!(keys, vec![dec_2023, jan_2024, oct_2024]);
    }

    // ── parse_order_date ──────────────────────────────────────────────────

    #[test]
    fn test_parse_iso_date() {
        let date = parse_order_date("2024-06-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_datetime_discards_time() {
        let date = parse_order_date("2024-01-15 13:45:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_z_suffix() {
        let date = parse_order_date("2024-01-15T10:30:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_slash_format() {
        let date = parse_order_date("2024/02/29").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_day_first_slash_format() {
        let date = parse_order_date("31/01/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let date = parse_order_date("  2024-06-01  ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_empty_returns_none() {
        assert!(parse_order_date("").is_none());
        assert!(parse_order_date("   ").is_none());
    }

    #[test]
    fn test_parse_garbage_returns_none() {
        assert!(parse_order_date("not-a-date").is_none());
    }
}
