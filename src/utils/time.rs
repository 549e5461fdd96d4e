//! Time utilities: parsing HH:MM onto a day, decimal hours, formatting.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Leading float literal, the way a lenient float parse reads `"2.5h"` as 2.5.
static DECIMAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("static regex")
});

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Anchor an `"HH:MM"` string on `day`, seconds zeroed.
///
/// `None` for a missing input, an empty string, or anything that is not a
/// valid hour/minute pair. Never falls back to midnight.
pub fn time_for_day(day: NaiveDate, input: Option<&str>) -> Option<NaiveDateTime> {
    let raw = input?.trim();
    if raw.is_empty() {
        return None;
    }
    parse_time(raw).map(|t| day.and_time(t))
}

pub fn format_hm(ts: &NaiveDateTime) -> String {
    ts.format("%H:%M").to_string()
}

pub fn format_optional_hm(ts: Option<&NaiveDateTime>) -> String {
    ts.map(format_hm).unwrap_or_else(|| "--:--".to_string())
}

/// Decimal hours (`"2,5"`, `"1.25"`) to whole milliseconds.
///
/// The first comma counts as the decimal separator. Missing or unparsable
/// input yields 0, negative values clamp to 0.
pub fn normalise_hours(input: Option<&str>) -> i64 {
    let Some(raw) = input else {
        return 0;
    };
    let normalised = raw.trim_start().replacen(',', ".", 1);

    let value = DECIMAL_PREFIX
        .find(&normalised)
        .and_then(|m| m.as_str().parse::<f64>().ok());

    match value {
        Some(hours) if hours.is_finite() => (hours * MILLIS_PER_HOUR).round().max(0.0) as i64,
        _ => 0,
    }
}
