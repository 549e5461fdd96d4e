use super::day_summary::DaySummary;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single clock-in/out interval. `end == None` means the interval is still open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    pub start: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
}

impl Duration {
    pub fn new(start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Length in whole minutes; open or inverted intervals count as zero.
    pub fn minutes(&self) -> i64 {
        match self.end {
            Some(end) if end > self.start => (end - self.start).num_minutes(),
            _ => 0,
        }
    }
}

/// One day of time-tracking data.
///
/// The field names on disk (`Durations`, `lunchDuration`, `internalCompanyTime`)
/// are part of the persisted layout and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub date: NaiveDate, // ⇔ stored "YYYY-MM-DD"

    #[serde(rename = "Durations", default, skip_serializing_if = "Vec::is_empty")]
    pub durations: Vec<Duration>,

    #[serde(
        rename = "lunchDuration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lunch_duration: Option<Duration>,

    /// Milliseconds of non-clocked company time.
    #[serde(
        rename = "internalCompanyTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub internal_company_time: Option<i64>,
}

impl TimeRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            durations: Vec::new(),
            lunch_duration: None,
            internal_company_time: None,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Sum of all closed intervals, in minutes.
    pub fn worked_minutes(&self) -> i64 {
        self.durations.iter().map(Duration::minutes).sum()
    }

    pub fn lunch_minutes(&self) -> i64 {
        self.lunch_duration.as_ref().map_or(0, Duration::minutes)
    }

    pub fn internal_minutes(&self) -> i64 {
        self.internal_company_time.unwrap_or(0) / 60_000
    }

    pub fn open_intervals(&self) -> usize {
        self.durations.iter().filter(|d| d.is_open()).count()
    }

    pub fn summary(&self) -> DaySummary {
        DaySummary {
            worked: self.worked_minutes(),
            lunch: self.lunch_minutes(),
            internal: self.internal_minutes(),
            open_intervals: self.open_intervals(),
        }
    }

    /// True when every interval timestamp lies on `self.date`.
    pub fn is_same_day(&self) -> bool {
        let on_day = |d: &Duration| {
            d.start.date() == self.date && d.end.is_none_or(|e| e.date() == self.date)
        };
        self.durations.iter().all(on_day) && self.lunch_duration.as_ref().is_none_or(on_day)
    }
}
