use crate::cli::commands::{audit, open, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::mutations::DurationInput;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Replace every interval of a day.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Durations { date, pairs } = cmd {
        let d = parse_day(date)?;
        let inputs: Vec<DurationInput> = pairs.iter().map(|p| DurationInput::from_pair(p)).collect();

        let (store, logic) = open(cfg)?;
        let rec = logic.replace_intervals(d, &inputs).await?;

        let dropped = inputs.len().saturating_sub(rec.durations.len());
        if dropped > 0 {
            warning(format!(
                "{} interval(s) dropped: start time not in HH:MM format.",
                dropped
            ));
        }

        let msg = format!(
            "{} now has {} interval(s)",
            rec.date_str(),
            rec.durations.len()
        );
        audit(&store, "durations", &rec.date_str(), &msg);
        success(msg);
    }

    Ok(())
}
