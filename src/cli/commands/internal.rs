use crate::cli::commands::{audit, open, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::millis2hours;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Internal { date, hours } = cmd {
        let d = parse_day(date)?;
        let (store, logic) = open(cfg)?;

        let rec = logic.set_internal(d, hours.as_deref()).await?;
        let msg = format!(
            "Internal company time on {} set to {} h",
            rec.date_str(),
            millis2hours(rec.internal_company_time.unwrap_or(0))
        );

        audit(&store, "internal", &rec.date_str(), &msg);
        success(msg);
    }

    Ok(())
}
