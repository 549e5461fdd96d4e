use crate::cli::commands::audit;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::sqlite::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates the configuration file (unless in test mode) and the SQLite
/// database with its schema.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = cfg.database_path();

    info("Initializing rTimestore…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", db_path.display()));

    let store = SqliteStore::open(&db_path.to_string_lossy())?;
    audit(
        &store,
        "init",
        "",
        &format!("Database initialized at {}", db_path.display()),
    );

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
