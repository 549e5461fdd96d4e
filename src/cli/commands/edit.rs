use crate::cli::commands::{audit, open, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::time::{format_hm, format_optional_hm};

/// Edit interval `--index` (1-based) of an existing day.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        date,
        index,
        start,
        end,
    } = cmd
    {
        let d = parse_day(date)?;
        let slot = index
            .checked_sub(1)
            .ok_or(AppError::InvalidIndex(*index))?;

        let (store, logic) = open(cfg)?;
        let rec = logic
            .edit_interval(d, slot, Some(start.as_str()), end.as_deref())
            .await?;

        let edited = &rec.durations[slot];
        let msg = format!(
            "Interval #{} on {} is now {} → {}",
            index,
            rec.date_str(),
            format_hm(&edited.start),
            format_optional_hm(edited.end.as_ref()),
        );

        audit(&store, "edit", &rec.date_str(), &msg);
        success(msg);
    }

    Ok(())
}
