pub mod add;
pub mod config;
pub mod del;
pub mod durations;
pub mod edit;
pub mod init;
pub mod internal;
pub mod list;
pub mod log;
pub mod lunch;
pub mod show;

use crate::config::Config;
use crate::core::records::RecordLogic;
use crate::db::log::ttlog;
use crate::db::sqlite::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::date;
use chrono::NaiveDate;
use std::sync::Arc;

/// Open the configured database and the record logic on top of it.
pub(crate) fn open(cfg: &Config) -> AppResult<(SqliteStore, RecordLogic)> {
    let path = cfg.database_path();
    let store = SqliteStore::open(&path.to_string_lossy())?;
    let logic = RecordLogic::new(Arc::new(store.clone()));
    Ok((store, logic))
}

pub(crate) fn parse_day(s: &str) -> AppResult<NaiveDate> {
    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Append an audit line; failures are reported but never abort the command.
pub(crate) fn audit(store: &SqliteStore, operation: &str, target: &str, message: &str) {
    if let Err(e) = store
        .pool()
        .with_conn(|conn| ttlog(conn, operation, target, message))
    {
        warning(format!("Failed to write internal log: {}", e));
    }
}
