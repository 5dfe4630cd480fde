//! Startup configuration: which store family to wire and where data lives.
//!
//! # Invariants
//! - The store family is fixed at startup; nothing switches it at runtime.
//! - No database path means a private in-memory database.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Persistence strategy backing the facade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Hand-written statements over `rusqlite`.
    #[default]
    Sql,
    /// Diesel table DSL.
    Mapper,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Mapper => "mapper",
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported store backend `{0}`; expected sql|mapper")]
pub struct ParseBackendError(String);

impl FromStr for StoreBackend {
    type Err = ParseBackendError;

    /// Accepts the family names plus the `jdbc`/`orm`/`jpa` aliases.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sql" | "jdbc" => Ok(Self::Sql),
            "mapper" | "orm" | "jpa" => Ok(Self::Mapper),
            other => Err(ParseBackendError(other.to_string())),
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: StoreBackend,
    /// SQLite file; `None` for in-memory.
    pub database: Option<PathBuf>,
    pub log_level: String,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            database: None,
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Short label for logs: the file path or `memory`.
    pub fn database_label(&self) -> String {
        self.database
            .as_ref()
            .map_or_else(|| "memory".to_string(), |path| path.display().to_string())
    }
}
