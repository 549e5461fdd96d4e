use crate::cli::commands::{audit, open, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::format_optional_hm;

/// Append a new interval to a day.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { date, start, end } = cmd {
        let d = parse_day(date)?;
        let (store, logic) = open(cfg)?;

        let rec = logic.add_interval(d, start, end.as_deref()).await?;
        let added = rec.durations.last();
        let msg = format!(
            "Added interval #{} on {}: {} → {}",
            rec.durations.len(),
            rec.date_str(),
            start,
            format_optional_hm(added.and_then(|a| a.end.as_ref())),
        );

        audit(&store, "add", &rec.date_str(), &msg);
        success(msg);
    }

    Ok(())
}
