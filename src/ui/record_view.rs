//! Human-readable rendering of time records.

use crate::models::{Keyed, TimeRecord};
use crate::utils::colors::{colorize_in_out, colorize_optional};
use crate::utils::date::weekday_str;
use crate::utils::formatting::{bold, millis2hours, mins2readable};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_hm, format_optional_hm};

fn day_label(rec: &TimeRecord, show_weekday: bool) -> String {
    if show_weekday {
        format!("{} ({})", rec.date_str(), weekday_str(rec.date))
    } else {
        rec.date_str()
    }
}

/// Detailed view of one day.
pub fn render_record(rec: &TimeRecord, show_weekday: bool) -> String {
    let mut out = String::new();
    out.push_str(&bold(&day_label(rec, show_weekday)));
    out.push('\n');

    if rec.durations.is_empty() {
        out.push_str(&colorize_optional("  no intervals"));
        out.push('\n');
    }
    for (i, d) in rec.durations.iter().enumerate() {
        out.push_str(&format!(
            "  #{:<2} {} → {}  {}\n",
            i + 1,
            colorize_in_out(&format_hm(&d.start), true),
            colorize_in_out(&format_optional_hm(d.end.as_ref()), false),
            colorize_optional(&mins2readable(d.minutes(), false, false)),
        ));
    }

    let lunch = match &rec.lunch_duration {
        Some(l) => format!("{} → {}", format_hm(&l.start), format_optional_hm(l.end.as_ref())),
        None => "--:--".to_string(),
    };
    out.push_str(&format!("  Lunch:    {}\n", colorize_optional(&lunch)));

    let internal = rec.internal_company_time.unwrap_or(0);
    out.push_str(&format!("  Internal: {} h\n", millis2hours(internal)));

    let s = rec.summary();
    out.push_str(&format!(
        "  Worked:   {}  (total {})\n",
        mins2readable(s.worked, false, false),
        mins2readable(s.total(), false, false)
    ));
    out
}

/// One row per record.
pub fn render_list(records: &[Keyed<TimeRecord>], show_weekday: bool) -> String {
    let mut table = Table::new(
        ["Date", "Intervals", "Open", "Worked", "Lunch", "Internal"]
            .into_iter()
            .map(Column::new)
            .collect(),
    );

    for rec in records {
        let s = rec.summary();
        table.add_row(vec![
            day_label(rec, show_weekday),
            rec.durations.len().to_string(),
            s.open_intervals.to_string(),
            mins2readable(s.worked, false, true),
            mins2readable(s.lunch, false, true),
            mins2readable(s.internal, false, true),
        ]);
    }
    table.render()
}
