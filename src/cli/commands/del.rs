use crate::cli::commands::{audit, open, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { date } = cmd {
        let d = parse_day(date)?;
        let (store, logic) = open(cfg)?;

        logic.delete(d).await?;

        let msg = format!("Record for {} has been deleted.", d);
        audit(&store, "del", &d.to_string(), &msg);
        success(msg);
    }

    Ok(())
}
