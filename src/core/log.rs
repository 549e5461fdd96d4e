use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const OP_WIDTH_MAX: usize = 60;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"));

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// ANSI colour per operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" | "durations" => Colour::Yellow,
        "lunch" | "internal" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

/// `op (target)` truncated to the column width, with only the op coloured.
fn render_op_target(entry: &LogEntry) -> String {
    let visible = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let truncated = if visible.chars().count() > OP_WIDTH_MAX {
        let mut s: String = visible.chars().take(OP_WIDTH_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    let color = color_for_operation(&entry.operation);
    match truncated.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(truncated.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Format every audit line, one string per row.
    pub fn render(entries: &[LogEntry]) -> Vec<String> {
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        let rendered: Vec<String> = entries.iter().map(render_op_target).collect();
        let op_w = rendered
            .iter()
            .map(|r| strip_ansi(r).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);

        entries
            .iter()
            .zip(rendered)
            .map(|(e, op_target)| {
                let visible_len = strip_ansi(&op_target).chars().count();
                let padding = " ".repeat(op_w.saturating_sub(visible_len));
                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    e.id,
                    e.date,
                    op_target,
                    padding,
                    e.message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect()
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = pool.with_conn(load_log)?;

        println!("📜 Internal log:\n");
        for line in Self::render(&entries) {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, op: &str, target: &str) -> LogEntry {
        LogEntry {
            id,
            date: "2025-10-16T09:00:00+02:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn rows_align_after_stripping_colours() {
        let lines = LogLogic::render(&[entry(1, "init", ""), entry(12, "lunch", "2025-10-16")]);
        let plain: Vec<String> = lines.iter().map(|l| strip_ansi(l)).collect();

        assert_eq!(plain[0].find("=>"), plain[1].find("=>"));
        assert!(plain[0].starts_with(" 1: "));
        assert!(plain[1].contains("lunch (2025-10-16)"));
    }

    #[test]
    fn long_targets_are_truncated() {
        let target = "x".repeat(100);
        let lines = LogLogic::render(&[entry(1, "edit", &target)]);
        let plain = strip_ansi(&lines[0]);
        assert!(plain.contains("..."));
        assert!(!plain.contains(&target));
    }
}
