//! User-with-books use cases.
//!
//! # Invariants
//! - Store errors propagate unchanged; the facade never translates them.
//! - Replace-all book updates delete before recreating, with no enclosing
//!   transaction: a failure in between leaves the user with fewer books.
//! - Returned book ids after an update are read back from the store.

use crate::model::book::{Book, BookId};
use crate::model::user::{User, UserId};
use crate::store::{require_id, BookStore, StoreResult, UserStore};
use log::info;
use serde::{Deserialize, Serialize};

/// Aggregate view of a user and the ids of the books it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBooks {
    pub user_id: UserId,
    pub book_ids: Vec<BookId>,
}

/// Orchestrates user and book stores of the same family.
pub struct UserDataFacade<U, B> {
    users: U,
    books: B,
}

impl<U: UserStore, B: BookStore> UserDataFacade<U, B> {
    /// Creates a facade over concrete store instances chosen at startup.
    pub fn new(users: U, books: B) -> Self {
        Self { users, books }
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn books(&self) -> &B {
        &self.books
    }

    /// Creates `user`, then every `Some` book owned by the new user.
    ///
    /// `None` entries are skipped. Book ids come back in input order.
    pub fn create_user_with_books(
        &self,
        user: &User,
        books: &[Option<Book>],
    ) -> StoreResult<UserBooks> {
        let created = self.users.create_user(user)?;
        let user_id = require_id(created.id)?;

        let book_ids = self.create_books_for(user_id, books)?;
        info!(
            "event=user_books_create module=facade status=ok user_id={user_id} book_count={}",
            book_ids.len()
        );

        Ok(UserBooks { user_id, book_ids })
    }

    /// Partially updates the user and, when `books` is given, replaces the
    /// whole owned book set with it.
    pub fn update_user_with_books(
        &self,
        user: &User,
        user_id: UserId,
        books: Option<&[Option<Book>]>,
    ) -> StoreResult<UserBooks> {
        let patch = user.clone().with_id(user_id);
        self.users.update_user(&patch)?;

        if let Some(books) = books {
            self.books.delete_books_by_user_id(user_id)?;
            let created = self.create_books_for(user_id, books)?;
            info!(
                "event=user_books_replace module=facade status=ok user_id={user_id} book_count={}",
                created.len()
            );
        }

        let book_ids = self.book_ids_of(user_id)?;
        info!(
            "event=user_books_update module=facade status=ok user_id={user_id} book_count={}",
            book_ids.len()
        );
        Ok(UserBooks { user_id, book_ids })
    }

    /// Reads the user and its book ids. Fails when the user is absent.
    pub fn get_user_with_books(&self, user_id: UserId) -> StoreResult<UserBooks> {
        let user = self.users.get_user_by_id(user_id)?;
        let user_id = require_id(user.id)?;
        let book_ids = self.book_ids_of(user_id)?;
        Ok(UserBooks { user_id, book_ids })
    }

    /// Deletes the user's books, then the user.
    pub fn delete_user_with_books(&self, user_id: UserId) -> StoreResult<()> {
        self.books.delete_books_by_user_id(user_id)?;
        self.users.delete_user_by_id(user_id)?;
        info!("event=user_books_delete module=facade status=ok user_id={user_id}");
        Ok(())
    }

    fn create_books_for(
        &self,
        user_id: UserId,
        books: &[Option<Book>],
    ) -> StoreResult<Vec<BookId>> {
        books
            .iter()
            .flatten()
            .map(|book| {
                let owned = Book {
                    user_id,
                    ..book.clone()
                };
                let created = self.books.create_book(&owned)?;
                require_id(created.id)
            })
            .collect()
    }

    fn book_ids_of(&self, user_id: UserId) -> StoreResult<Vec<BookId>> {
        self.books
            .get_books_by_user_id(user_id)?
            .into_iter()
            .map(|book| require_id(book.id))
            .collect()
    }
}
