use crate::cli::commands::open;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::ui::record_view::render_list;
use crate::utils::date;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period } = cmd {
        let bounds = match period {
            Some(p) => Some(date::range_bounds(p).map_err(AppError::InvalidDate)?),
            None => None,
        };

        let (_, logic) = open(cfg)?;
        let records = logic.list(bounds).await?;

        if records.is_empty() {
            info("No records found.");
            return Ok(());
        }

        print!("{}", render_list(&records, cfg.show_weekday));
    }

    Ok(())
}
