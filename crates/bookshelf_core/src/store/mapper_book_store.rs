//! Mapper-family book store backed by diesel.

use super::mapper_rows::{BookChangeset, BookRow, NewBookRow};
use super::mapper_schema::{book, person};
use super::{require_id, BookStore, StoreError, StoreResult};
use crate::db::MapperSession;
use crate::model::book::{Book, BookId};
use crate::model::user::UserId;
use crate::validation::validate_book;
use diesel::dsl::exists;
use diesel::prelude::*;
use log::{debug, info};

/// Mapper-family book store.
pub struct MapperBookStore<'s> {
    session: &'s MapperSession,
}

impl<'s> MapperBookStore<'s> {
    /// Wraps a session returned by [`crate::db::open_mapper_db`].
    pub fn new(session: &'s MapperSession) -> Self {
        Self { session }
    }
}

impl BookStore for MapperBookStore<'_> {
    fn create_book(&self, book: &Book) -> StoreResult<Book> {
        validate_book(book)?;

        let id = self.session.with_conn(|conn| {
            let owner_exists = diesel::select(exists(person::table.find(book.user_id)))
                .get_result::<bool>(conn)?;
            if !owner_exists {
                return Ok(None);
            }
            diesel::insert_into(book::table)
                .values(&NewBookRow::from(book))
                .returning(book::id)
                .get_result::<i64>(conn)
                .map(Some)
        })?;
        let id = id.ok_or(StoreError::UserNotFound(book.user_id))?;

        info!(
            "event=book_create module=store backend=mapper status=ok book_id={id} user_id={}",
            book.user_id
        );
        Ok(Book {
            id: Some(id),
            ..book.clone()
        })
    }

    fn update_book(&self, book: &Book) -> StoreResult<Book> {
        let id = require_id(book.id)?;
        let mut merged = self.get_book_by_id(id)?;
        merged.merge_from(book);
        validate_book(&merged)?;

        let saved = self.session.with_conn(|conn| {
            diesel::update(book::table.find(id))
                .set(&BookChangeset::from(&merged))
                .returning(BookRow::as_returning())
                .get_result(conn)
                .optional()
        })?;
        let saved = saved.ok_or(StoreError::BookNotFound(id))?;

        info!("event=book_update module=store backend=mapper status=ok book_id={id}");
        Ok(saved.into())
    }

    fn get_book_by_id(&self, id: BookId) -> StoreResult<Book> {
        debug!("event=book_get module=store backend=mapper book_id={id}");
        let row = self.session.with_conn(|conn| {
            book::table
                .find(id)
                .select(BookRow::as_select())
                .first(conn)
                .optional()
        })?;
        row.map(Book::from).ok_or(StoreError::BookNotFound(id))
    }

    fn delete_book_by_id(&self, id: BookId) -> StoreResult<()> {
        let removed = self
            .session
            .with_conn(|conn| diesel::delete(book::table.find(id)).execute(conn))?;
        if removed == 0 {
            return Err(StoreError::BookNotFound(id));
        }

        info!("event=book_delete module=store backend=mapper status=ok book_id={id}");
        Ok(())
    }

    fn get_books_by_user_id(&self, user_id: UserId) -> StoreResult<Vec<Book>> {
        let rows = self.session.with_conn(|conn| {
            book::table
                .filter(book::person_id.eq(user_id))
                .order(book::id.asc())
                .select(BookRow::as_select())
                .load(conn)
        })?;

        debug!(
            "event=books_by_user module=store backend=mapper user_id={user_id} count={}",
            rows.len()
        );
        Ok(rows.into_iter().map(Book::from).collect())
    }

    fn delete_books_by_user_id(&self, user_id: UserId) -> StoreResult<()> {
        let removed = self.session.with_conn(|conn| {
            diesel::delete(book::table.filter(book::person_id.eq(user_id))).execute(conn)
        })?;

        info!(
            "event=books_delete_by_user module=store backend=mapper status=ok user_id={user_id} count={removed}"
        );
        Ok(())
    }
}
