//! Connection bootstrap for the SQL and mapper store families.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::{apply_mapper_migrations, apply_migrations};
use super::session::MapperSession;
use super::{DbError, DbResult};
use diesel::connection::SimpleConnection;
use diesel::{Connection as _, SqliteConnection};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const IN_MEMORY_URL: &str = ":memory:";

/// Opens a SQLite database file for the SQL family and applies migrations.
///
/// # Side effects
/// - Creates the file when it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    logged_open("sql", "file", || {
        let mut conn = Connection::open(path)?;
        bootstrap_sql(&mut conn)?;
        Ok(conn)
    })
}

/// Opens a private in-memory database for the SQL family.
pub fn open_db_in_memory() -> DbResult<Connection> {
    logged_open("sql", "memory", || {
        let mut conn = Connection::open_in_memory()?;
        bootstrap_sql(&mut conn)?;
        Ok(conn)
    })
}

/// Opens a SQLite database file for the mapper family and applies migrations.
///
/// The file may be shared with SQL-family connections; both see the same
/// schema version.
pub fn open_mapper_db(path: impl AsRef<Path>) -> DbResult<MapperSession> {
    let url = path.as_ref().to_string_lossy().into_owned();
    logged_open("mapper", "file", || establish_mapper(&url))
}

/// Opens a private in-memory database for the mapper family.
pub fn open_mapper_db_in_memory() -> DbResult<MapperSession> {
    logged_open("mapper", "memory", || establish_mapper(IN_MEMORY_URL))
}

fn logged_open<T>(
    backend: &str,
    mode: &str,
    open: impl FnOnce() -> DbResult<T>,
) -> DbResult<T> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start backend={backend} mode={mode}");

    match open() {
        Ok(handle) => {
            info!(
                "event=db_open module=db status=ok backend={backend} mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(handle)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error backend={backend} mode={mode} duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                error_code(&err),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_sql(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}

fn establish_mapper(url: &str) -> DbResult<MapperSession> {
    let mut conn = SqliteConnection::establish(url)?;
    conn.batch_execute(&format!(
        "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
        BUSY_TIMEOUT.as_millis()
    ))?;
    apply_mapper_migrations(&mut conn)?;
    Ok(MapperSession::new(conn))
}

fn error_code(err: &DbError) -> &'static str {
    match err {
        DbError::Sqlite(_) | DbError::Mapper(_) => "db_bootstrap_failed",
        DbError::MapperConnection(_) => "db_open_failed",
        DbError::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
    }
}
