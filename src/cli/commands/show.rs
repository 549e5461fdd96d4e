use crate::cli::commands::{open, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::record_view::render_record;
use crate::utils::date::record_key;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { date } = cmd {
        let d = parse_day(date)?;
        let (_, logic) = open(cfg)?;

        let rec = logic
            .load(d)
            .await?
            .ok_or_else(|| AppError::RecordNotFound(record_key(d)))?;

        print!("{}", render_record(&rec, cfg.show_weekday));
    }

    Ok(())
}
