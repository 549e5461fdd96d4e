//! Apply user-entered time strings to a keyed `TimeRecord`.
//!
//! Every function mutates the record in place and returns `true` on success.
//! A `false` return always means the record was left untouched. Timestamps
//! are always anchored on `record.date`.

use crate::models::{Duration, Keyed, TimeRecord};
use crate::utils::time::{normalise_hours, time_for_day};
use chrono::{NaiveDate, NaiveDateTime};

/// Raw start/end pair as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationInput {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DurationInput {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    pub fn open(start: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: None,
        }
    }

    /// Parse `"HH:MM-HH:MM"` or `"HH:MM"` (open interval).
    pub fn from_pair(s: &str) -> Self {
        match s.split_once('-') {
            Some((start, end)) => Self::new(start.trim(), end.trim()),
            None => Self::open(s.trim()),
        }
    }
}

/// What an unparsable or missing end string turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndFallback {
    /// The interval becomes open.
    Open,
    /// The end of the interval previously stored at the same position is kept.
    Previous,
}

fn resolve_end(
    day: NaiveDate,
    input: Option<&str>,
    previous: Option<&Duration>,
    fallback: EndFallback,
) -> Option<NaiveDateTime> {
    let parsed = time_for_day(day, input);
    match fallback {
        EndFallback::Open => parsed,
        EndFallback::Previous => parsed.or_else(|| previous.and_then(|d| d.end)),
    }
}

/// Edit the interval at `index`. Cannot append.
///
/// Fails when `index` is `None`, points past the end of `durations`, or the
/// start does not parse. The end uses [`EndFallback::Open`].
pub fn update_single_duration(
    record: &mut Keyed<TimeRecord>,
    index: Option<usize>,
    start: Option<&str>,
    end: Option<&str>,
) -> bool {
    let Some(index) = index else {
        return false;
    };
    if index >= record.durations.len() {
        return false;
    }
    let Some(start) = time_for_day(record.date, start) else {
        return false;
    };

    let end = resolve_end(record.date, end, None, EndFallback::Open);
    record.durations[index] = Duration::new(start, end);
    true
}

/// Replace all intervals.
///
/// Inputs whose start does not parse are dropped, so later entries shift down
/// one slot. Ends use [`EndFallback::Previous`], looked up at the input's own
/// position in the old list.
pub fn replace_durations(record: &mut Keyed<TimeRecord>, inputs: &[DurationInput]) -> bool {
    let day = record.date;
    let previous = &record.durations;

    let updated: Vec<Duration> = inputs
        .iter()
        .enumerate()
        .filter_map(|(idx, input)| {
            let start = time_for_day(day, input.start.as_deref())?;
            let end = resolve_end(
                day,
                input.end.as_deref(),
                previous.get(idx),
                EndFallback::Previous,
            );
            Some(Duration::new(start, end))
        })
        .collect();

    record.durations = updated;
    true
}

/// Set the lunch break.
///
/// A missing or bad start keeps the current lunch start; with no lunch yet
/// that is a failure. The end never falls back.
pub fn update_lunch(
    record: &mut Keyed<TimeRecord>,
    start: Option<&str>,
    end: Option<&str>,
) -> bool {
    let start = time_for_day(record.date, start)
        .or_else(|| record.lunch_duration.as_ref().map(|l| l.start));
    let Some(start) = start else {
        return false;
    };

    let end = resolve_end(record.date, end, None, EndFallback::Open);
    record.lunch_duration = Some(Duration::new(start, end));
    true
}

/// Set internal company time from decimal hours. Always succeeds.
pub fn update_internal(record: &mut Keyed<TimeRecord>, raw: Option<&str>) -> bool {
    record.internal_company_time = Some(normalise_hours(raw));
    true
}

/// Append a new interval. `false` when the start does not parse.
pub fn push_duration(
    record: &mut Keyed<TimeRecord>,
    start: Option<&str>,
    end: Option<&str>,
) -> bool {
    let Some(start) = time_for_day(record.date, start) else {
        return false;
    };
    let end = resolve_end(record.date, end, None, EndFallback::Open);
    record.durations.push(Duration::new(start, end));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn record() -> Keyed<TimeRecord> {
        Keyed::new("2025-04-07", TimeRecord::new(day()))
    }

    fn with_intervals(intervals: &[(u32, Option<u32>)]) -> Keyed<TimeRecord> {
        let mut rec = record();
        for &(h, end) in intervals {
            rec.durations.push(Duration::new(at(h, 0), end.map(|e| at(e, 0))));
        }
        rec
    }

    // ---------------------------
    // update_single_duration
    // ---------------------------

    #[test]
    fn single_duration_rejects_missing_index() {
        let mut rec = with_intervals(&[(9, Some(12))]);
        let before = rec.durations.clone();

        assert!(!update_single_duration(&mut rec, None, Some("08:00"), Some("10:00")));
        assert!(!update_single_duration(&mut rec, Some(1), Some("08:00"), Some("10:00")));
        assert_eq!(rec.durations, before);
    }

    #[test]
    fn single_duration_cannot_append_to_empty_record() {
        let mut rec = record();
        assert!(!update_single_duration(&mut rec, Some(0), Some("08:00"), None));
        assert!(rec.durations.is_empty());
    }

    #[test]
    fn single_duration_bad_start_leaves_record_untouched() {
        let mut rec = with_intervals(&[(9, Some(12))]);
        assert!(!update_single_duration(&mut rec, Some(0), Some("xx:00"), Some("13:00")));
        assert_eq!(rec.durations[0], Duration::new(at(9, 0), Some(at(12, 0))));
    }

    #[test]
    fn single_duration_bad_end_opens_the_interval() {
        let mut rec = with_intervals(&[(9, Some(12)), (13, Some(17))]);

        assert!(update_single_duration(&mut rec, Some(1), Some("13:30"), Some("later")));
        assert_eq!(rec.durations[1], Duration::new(at(13, 30), None));

        assert!(update_single_duration(&mut rec, Some(0), Some("08:45"), Some("12:15")));
        assert_eq!(rec.durations[0], Duration::new(at(8, 45), Some(at(12, 15))));
        assert_eq!(rec.key(), "2025-04-07");
    }

    // ---------------------------
    // replace_durations
    // ---------------------------

    #[test]
    fn replace_drops_entries_with_bad_start() {
        let mut rec = with_intervals(&[(8, Some(9)), (10, Some(14))]);

        let ok = replace_durations(
            &mut rec,
            &[
                DurationInput::new("09:00", "12:00"),
                DurationInput::new("bad", "13:00"),
            ],
        );

        assert!(ok);
        assert_eq!(rec.durations, vec![Duration::new(at(9, 0), Some(at(12, 0)))]);
    }

    #[test]
    fn replace_keeps_previous_end_at_same_position() {
        let mut rec = with_intervals(&[(8, Some(12)), (13, Some(17))]);

        replace_durations(
            &mut rec,
            &[DurationInput::new("08:30", ""), DurationInput::open("13:15")],
        );

        assert_eq!(
            rec.durations,
            vec![
                Duration::new(at(8, 30), Some(at(12, 0))),
                Duration::new(at(13, 15), Some(at(17, 0))),
            ]
        );
    }

    #[test]
    fn replace_beyond_previous_length_yields_open_interval() {
        let mut rec = with_intervals(&[(8, Some(12))]);
        replace_durations(
            &mut rec,
            &[DurationInput::new("08:00", "12:00"), DurationInput::open("13:00")],
        );
        assert_eq!(rec.durations[1], Duration::new(at(13, 0), None));
    }

    #[test]
    fn replace_with_nothing_clears() {
        let mut rec = with_intervals(&[(8, Some(12))]);
        assert!(replace_durations(&mut rec, &[]));
        assert!(rec.durations.is_empty());
    }

    #[test]
    fn pair_strings_parse() {
        assert_eq!(DurationInput::from_pair("09:00-12:00"), DurationInput::new("09:00", "12:00"));
        assert_eq!(DurationInput::from_pair(" 13:00 "), DurationInput::open("13:00"));
    }

    // ---------------------------
    // update_lunch
    // ---------------------------

    #[test]
    fn lunch_without_any_start_fails() {
        let mut rec = record();
        assert!(!update_lunch(&mut rec, None, None));
        assert!(rec.lunch_duration.is_none());

        assert!(!update_lunch(&mut rec, Some("nope"), Some("13:00")));
        assert!(rec.lunch_duration.is_none());
    }

    #[test]
    fn lunch_start_falls_back_but_end_does_not() {
        let mut rec = record();
        assert!(update_lunch(&mut rec, Some("12:00"), Some("12:30")));
        assert_eq!(rec.lunch_duration, Some(Duration::new(at(12, 0), Some(at(12, 30)))));

        assert!(update_lunch(&mut rec, None, Some("12:45")));
        assert_eq!(rec.lunch_duration, Some(Duration::new(at(12, 0), Some(at(12, 45)))));

        assert!(update_lunch(&mut rec, Some("12:10"), None));
        assert_eq!(rec.lunch_duration, Some(Duration::new(at(12, 10), None)));
    }

    // ---------------------------
    // update_internal
    // ---------------------------

    #[test]
    fn internal_time_is_normalised() {
        let mut rec = record();

        assert!(update_internal(&mut rec, Some("2,5")));
        assert_eq!(rec.internal_company_time, Some(9_000_000));

        assert!(update_internal(&mut rec, Some("-1")));
        assert_eq!(rec.internal_company_time, Some(0));

        assert!(update_internal(&mut rec, Some("abc")));
        assert_eq!(rec.internal_company_time, Some(0));

        assert!(update_internal(&mut rec, None));
        assert_eq!(rec.internal_company_time, Some(0));
    }

    // ---------------------------
    // push_duration
    // ---------------------------

    #[test]
    fn push_appends_on_the_record_day() {
        let mut rec = record();
        assert!(push_duration(&mut rec, Some("07:30"), None));
        assert!(!push_duration(&mut rec, Some(""), Some("09:00")));
        assert_eq!(rec.durations, vec![Duration::new(at(7, 30), None)]);
        assert!(rec.is_same_day());
    }
}
