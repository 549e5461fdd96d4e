use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Storage key for the record of `date`.
pub fn record_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Inclusive `(first, last)` day covered by a period:
/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let last = last_day_of_month(first.year(), first.month())
            .ok_or_else(|| format!("Invalid period: {p}"))?;
        return Ok((first, last));
    }

    if let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}

/// `A:B` ranges span from the start of `A` to the end of `B`.
pub fn range_bounds(range: &str) -> Result<(NaiveDate, NaiveDate), String> {
    match range.split_once(':') {
        Some((start, end)) => {
            let (first, _) = period_bounds(start)?;
            let (_, last) = period_bounds(end)?;
            if last < first {
                return Err(format!("Invalid range: {range}"));
            }
            Ok((first, last))
        }
        None => period_bounds(range),
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

pub fn weekday_str(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}
