use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const FG_BLUE: &str = "\x1b[34m";

#[derive(Debug, Clone, Copy)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => (FG_BLUE, "ℹ️"),
            Level::Success => ("\x1b[32m", "✅"),
            Level::Warning => ("\x1b[33m", "⚠️"),
            Level::Error => ("\x1b[31m", "❌"),
        }
    }
}

pub fn format_message<T: fmt::Display>(level: Level, msg: T) -> String {
    let (color, icon) = level.style();
    format!("{}{}{} {}{}", color, BOLD, icon, RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", format_message(Level::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", format_message(Level::Success, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", format_message(Level::Warning, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", format_message(Level::Error, msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_icon_and_text() {
        let s = format_message(Level::Success, "saved");
        assert!(s.contains("✅"));
        assert!(s.ends_with("saved"));
    }
}
