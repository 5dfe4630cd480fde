//! Shared diesel connection for the mapper store family.

use diesel::SqliteConnection;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};

/// One migrated diesel connection that several mapper stores borrow.
///
/// Diesel needs `&mut SqliteConnection` for every query while the store
/// traits take `&self`, so the connection sits behind a `RefCell`. Borrows
/// are scoped to a single [`MapperSession::with_conn`] call and never nest.
pub struct MapperSession {
    conn: RefCell<SqliteConnection>,
}

impl MapperSession {
    pub(crate) fn new(conn: SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
        }
    }

    /// Runs `f` with exclusive access to the underlying connection.
    pub fn with_conn<T, E>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut conn = self.conn.borrow_mut();
        f(&mut conn)
    }
}

impl Debug for MapperSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperSession").finish_non_exhaustive()
    }
}
