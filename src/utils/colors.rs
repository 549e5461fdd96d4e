/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

/// Grey out placeholders (`--:--`, empty, zero durations), keep the rest.
pub fn colorize_optional(value: &str) -> String {
    if is_placeholder(value) {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn colorize_in_out(value: &str, is_in: bool) -> String {
    if is_placeholder(value) {
        return format!("{GREY}{value}{RESET}");
    }

    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v == "--:--" || v == "00h 00m"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_grey() {
        assert_eq!(colorize_optional("--:--"), format!("{GREY}--:--{RESET}"));
        assert_eq!(colorize_optional("09:00"), "09:00");
        assert_eq!(colorize_in_out("09:00", true), format!("{GREEN}09:00{RESET}"));
        assert_eq!(colorize_in_out("", false), format!("{GREY}{RESET}"));
    }
}
