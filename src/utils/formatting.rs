//! Formatting utilities used for CLI outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn mins2readable(mins: i64, want_sign: bool, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;

    let sign = if mins > 0 && want_sign {
        "+"
    } else if mins < 0 && want_sign {
        "-"
    } else {
        ""
    };

    if short {
        // e.g. +02:25 or -01:10
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        // e.g. +02h 25m or -01h 10m
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// Milliseconds as decimal hours with two digits, e.g. `9000000` → `"2.50"`.
pub fn millis2hours(ms: i64) -> String {
    format!("{:.2}", ms as f64 / 3_600_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_minutes() {
        assert_eq!(mins2readable(145, false, false), "02h 25m");
        assert_eq!(mins2readable(145, true, true), "+02:25");
        assert_eq!(mins2readable(-70, true, true), "-01:10");
        assert_eq!(mins2readable(0, true, false), "00h 00m");
    }

    #[test]
    fn decimal_hours() {
        assert_eq!(millis2hours(9_000_000), "2.50");
        assert_eq!(millis2hours(0), "0.00");
    }
}
