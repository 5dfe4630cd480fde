//! Mapper-family user store backed by diesel.

use super::mapper_rows::{PersonRow, PersonValues};
use super::mapper_schema::person;
use super::{require_id, StoreError, StoreResult, UserStore};
use crate::db::MapperSession;
use crate::model::user::{User, UserId};
use crate::validation::validate_user;
use diesel::prelude::*;
use log::{debug, info};

/// Mapper-family user store.
pub struct MapperUserStore<'s> {
    session: &'s MapperSession,
}

impl<'s> MapperUserStore<'s> {
    /// Wraps a session returned by [`crate::db::open_mapper_db`].
    pub fn new(session: &'s MapperSession) -> Self {
        Self { session }
    }
}

impl UserStore for MapperUserStore<'_> {
    fn create_user(&self, user: &User) -> StoreResult<User> {
        validate_user(user)?;

        let id = self.session.with_conn(|conn| {
            diesel::insert_into(person::table)
                .values(&PersonValues::from(user))
                .returning(person::id)
                .get_result::<i64>(conn)
        })?;

        info!("event=user_create module=store backend=mapper status=ok user_id={id}");
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

        let saved = self.session.with_conn(|conn| {
            diesel::update(person::table.find(id))
                .set(&PersonValues::from(&merged))
                .returning(PersonRow::as_returning())
                .get_result(conn)
                .optional()
        })?;
        let saved = saved.ok_or(StoreError::UserNotFound(id))?;

        info!("event=user_update module=store backend=mapper status=ok user_id={id}");
        Ok(saved.into())
    }

    fn get_user_by_id(&self, id: UserId) -> StoreResult<User> {
        debug!("event=user_get module=store backend=mapper user_id={id}");
        let row = self.session.with_conn(|conn| {
            person::table
                .find(id)
                .select(PersonRow::as_select())
                .first(conn)
                .optional()
        })?;
        row.map(User::from).ok_or(StoreError::UserNotFound(id))
    }

    fn delete_user_by_id(&self, id: UserId) -> StoreResult<()> {
        let removed = self
            .session
            .with_conn(|conn| diesel::delete(person::table.find(id)).execute(conn))?;
        if removed == 0 {
            return Err(StoreError::UserNotFound(id));
        }

        info!("event=user_delete module=store backend=mapper status=ok user_id={id}");
        Ok(())
    }
}
