//! Embedded schema scripts and the executor for both connection kinds.
//!
//! # Invariants
//! - `version` values are strictly increasing and scripts are append-only.
//! - Pending scripts run inside one transaction together with the
//!   `PRAGMA user_version` bump.

use crate::db::{DbError, DbResult};
use diesel::connection::SimpleConnection;
use diesel::sql_types::Integer;
use diesel::{Connection as _, QueryableByName, RunQueryDsl, SqliteConnection};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

#[derive(QueryableByName)]
struct UserVersionRow {
    #[diesel(sql_type = Integer)]
    user_version: i32,
}

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on a SQL-family connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let pending = pending_since(current)?;
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&version_pragma(migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

/// Applies all pending migrations on a mapper-family connection.
pub fn apply_mapper_migrations(conn: &mut SqliteConnection) -> DbResult<()> {
    let current = diesel::sql_query("PRAGMA user_version;")
        .get_result::<UserVersionRow>(conn)?
        .user_version;
    // A negative user_version can only come from a foreign writer.
    let current = u32::try_from(current).unwrap_or(u32::MAX);
    let pending = pending_since(current)?;
    if pending.is_empty() {
        return Ok(());
    }

    conn.transaction::<_, diesel::result::Error, _>(|tx| {
        for migration in pending {
            tx.batch_execute(migration.sql)?;
            tx.batch_execute(&version_pragma(migration.version))?;
        }
        Ok(())
    })?;

    Ok(())
}

fn pending_since(current: u32) -> DbResult<&'static [Migration]> {
    let latest = latest_version();
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    let first_pending = MIGRATIONS
        .iter()
        .position(|migration| migration.version > current)
        .unwrap_or(MIGRATIONS.len());
    Ok(&MIGRATIONS[first_pending..])
}

fn version_pragma(version: u32) -> String {
    format!("PRAGMA user_version = {version};")
}
