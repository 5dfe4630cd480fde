//! Core domain logic for Bookshelf: users, the books they own, and two
//! interchangeable ways of persisting them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{AppConfig, ParseBackendError, StoreBackend};
pub use db::{DbError, DbResult, MapperSession};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookId};
pub use model::user::{User, UserId};
pub use service::user_data_facade::{UserBooks, UserDataFacade};
pub use store::{
    BookStore, MapperBookStore, MapperUserStore, SqlBookStore, SqlUserStore, StoreError,
    StoreResult, UserStore,
};
pub use validation::{
    is_valid_book, is_valid_user, validate_book, validate_user, FieldViolation, ValidationError,
};

/// Minimal health-check API for wiring probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
