use rusqlite::{Connection, OptionalExtension, Result};
use tracing::info;

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `records` table exists.
fn records_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='records'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `records` table has a given column.
fn records_has_column(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('records')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the key-value `records` table.
fn create_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            key        TEXT PRIMARY KEY NOT NULL,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT ''
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Tables created before `updated_at` existed only held `key` and `value`.
fn migrate_add_updated_at(conn: &Connection) -> Result<()> {
    let version = "20251016_0001_records_updated_at";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !records_has_column(conn, "updated_at")? {
        conn.execute(
            "ALTER TABLE records ADD COLUMN updated_at TEXT NOT NULL DEFAULT '';",
            [],
        )?;
        info!(version, "added 'updated_at' to records table");
    }

    mark_applied(conn, version, "Added updated_at column to records")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Safe to call on every open; each step is idempotent.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !records_table_exists(conn)? {
        create_records_table(conn)?;
        info!("created records table");
    }

    migrate_add_updated_at(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        assert!(records_table_exists(&conn).unwrap());
        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, 1);
    }

    #[test]
    fn legacy_table_gains_updated_at() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE records (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL);
             INSERT INTO records (key, value) VALUES ('2025-01-01', '{\"date\":\"2025-01-01\"}');",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        assert!(records_has_column(&conn, "updated_at").unwrap());
        let value: String = conn
            .query_row("SELECT value FROM records WHERE key = '2025-01-01'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert!(value.contains("2025-01-01"));
    }
}
