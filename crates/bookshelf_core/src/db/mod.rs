//! SQLite storage bootstrap for both store families.
//!
//! # Responsibility
//! - Open and configure connections for the SQL family (`rusqlite`) and the
//!   mapper family (`diesel`).
//! - Apply the embedded schema before handing a connection to a store.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Every returned connection has `foreign_keys=ON`, so deleting a person
//!   cascades to the books it owns.
//! - Stores never see a connection whose schema is not fully applied.

pub mod migrations;
mod open;
mod session;

pub use open::{open_db, open_db_in_memory, open_mapper_db, open_mapper_db_in_memory};
pub use session::MapperSession;

use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Storage transport failure, independent of which family raised it.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Mapper(#[from] diesel::result::Error),
    #[error("failed to open mapper connection: {0}")]
    MapperConnection(#[from] diesel::ConnectionError),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}
