use crate::cli::commands::{audit, open, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{format_hm, format_optional_hm};

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Lunch { date, start, end } = cmd {
        let d = parse_day(date)?;
        let (store, logic) = open(cfg)?;

        let rec = logic
            .set_lunch(d, start.as_deref(), end.as_deref())
            .await?;

        if let Some(l) = &rec.lunch_duration {
            let msg = format!(
                "Lunch on {} set to {} → {}",
                rec.date_str(),
                format_hm(&l.start),
                format_optional_hm(l.end.as_ref())
            );
            audit(&store, "lunch", &rec.date_str(), &msg);
            success(msg);
        }
    }

    Ok(())
}
