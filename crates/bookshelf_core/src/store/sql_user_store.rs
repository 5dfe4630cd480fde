//! Direct-SQL user store over a borrowed `rusqlite` connection.

use super::{require_id, StoreError, StoreResult, UserStore};
use crate::model::user::{User, UserId};
use crate::validation::validate_user;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PERSON_SELECT_SQL: &str = "SELECT id, full_name, title, age FROM person";

/// SQL-family user store.
pub struct SqlUserStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlUserStore<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserStore for SqlUserStore<'_> {
    fn create_user(&self, user: &User) -> StoreResult<User> {
        validate_user(user)?;

        self.conn.execute(
            "INSERT INTO person (full_name, title, age) VALUES (?1, ?2, ?3);",
            params![user.full_name.as_str(), user.title.as_str(), user.age],
        )?;
        let id = self.conn.last_insert_rowid();

        info!("event=user_create module=store backend=sql status=ok user_id={id}");
        Ok(User {
            id: Some(id),
            ..user.clone()
        })
    }

    fn update_user(&self, user: &User) -> StoreResult<User> {
        let id = require_id(user.id)?;
        let mut merged = self.get_user_by_id(id)?;
        merged.merge_from(user);
        validate_user(&merged)?;

        let changed = self.conn.execute(
            "UPDATE person SET full_name = ?1, title = ?2, age = ?3 WHERE id = ?4;",
            params![merged.full_name.as_str(), merged.title.as_str(), merged.age, id],
        )?;
        if changed == 0 {
            return Err(StoreError::UserNotFound(id));
        }

        info!("event=user_update module=store backend=sql status=ok user_id={id}");
        Ok(merged)
    }

    fn get_user_by_id(&self, id: UserId) -> StoreResult<User> {
        debug!("event=user_get module=store backend=sql user_id={id}");
        self.conn
            .query_row(
                &format!("{PERSON_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_person_row,
            )
            .optional()?
            .ok_or(StoreError::UserNotFound(id))
    }

    fn delete_user_by_id(&self, id: UserId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM person WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(StoreError::UserNotFound(id));
        }

        info!("event=user_delete module=store backend=sql status=ok user_id={id}");
        Ok(())
    }
}

fn parse_person_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: Some(row.get("id")?),
        full_name: row.get("full_name")?,
        title: row.get("title")?,
        age: row.get("age")?,
    })
}
