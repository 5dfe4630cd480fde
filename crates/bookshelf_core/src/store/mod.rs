//! User/book store contracts and their two interchangeable families.
//!
//! # Responsibility
//! - Define the capability traits the facade is written against.
//! - Provide a direct-SQL family (`rusqlite`) and a mapper family (`diesel`).
//!
//! # Invariants
//! - Write paths validate before any SQL mutation.
//! - Both families share one error taxonomy and identical semantics:
//!   owners are verified before inserting a book, an invalid merge on update
//!   raises `Validation`, and bulk delete by owner succeeds on zero rows.

mod mapper_book_store;
mod mapper_rows;
mod mapper_schema;
mod mapper_user_store;
mod sql_book_store;
mod sql_user_store;

pub use mapper_book_store::MapperBookStore;
pub use mapper_user_store::MapperUserStore;
pub use sql_book_store::SqlBookStore;
pub use sql_user_store::SqlUserStore;

use crate::db::DbError;
use crate::model::book::{Book, BookId};
use crate::model::user::{User, UserId};
use crate::validation::ValidationError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by both store families and propagated by the facade.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("ID must be not null")]
    MissingId,
    #[error("User with ID={0} not found!")]
    UserNotFound(UserId),
    #[error("Book with ID={0} not found!")]
    BookNotFound(BookId),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl StoreError {
    /// True for the lookup-miss kinds (`UserNotFound`, `BookNotFound`).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::BookNotFound(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Db(DbError::Mapper(value))
    }
}

/// Persistence contract for users.
pub trait UserStore {
    /// Validates and inserts `user`; returns it with the assigned id.
    fn create_user(&self, user: &User) -> StoreResult<User>;
    /// Merges the non-empty/non-zero fields of `user` into the stored record
    /// with the same id, re-validates and persists the result.
    fn update_user(&self, user: &User) -> StoreResult<User>;
    fn get_user_by_id(&self, id: UserId) -> StoreResult<User>;
    /// Deletes one user; owned books go with it through the storage cascade.
    fn delete_user_by_id(&self, id: UserId) -> StoreResult<()>;
}

/// Persistence contract for books.
pub trait BookStore {
    /// Validates `book`, checks that its owner exists and inserts it.
    fn create_book(&self, book: &Book) -> StoreResult<Book>;
    /// Merge-then-revalidate update over title/author/page count.
    fn update_book(&self, book: &Book) -> StoreResult<Book>;
    fn get_book_by_id(&self, id: BookId) -> StoreResult<Book>;
    fn delete_book_by_id(&self, id: BookId) -> StoreResult<()>;
    /// All books owned by `user_id` in creation order; empty when none.
    fn get_books_by_user_id(&self, user_id: UserId) -> StoreResult<Vec<Book>>;
    /// Deletes all books owned by `user_id`; succeeds when none exist.
    fn delete_books_by_user_id(&self, user_id: UserId) -> StoreResult<()>;
}

impl<S: UserStore + ?Sized> UserStore for &S {
    fn create_user(&self, user: &User) -> StoreResult<User> {
        (**self).create_user(user)
    }

    fn update_user(&self, user: &User) -> StoreResult<User> {
        (**self).update_user(user)
    }

    fn get_user_by_id(&self, id: UserId) -> StoreResult<User> {
        (**self).get_user_by_id(id)
    }

    fn delete_user_by_id(&self, id: UserId) -> StoreResult<()> {
        (**self).delete_user_by_id(id)
    }
}

impl<S: BookStore + ?Sized> BookStore for &S {
    fn create_book(&self, book: &Book) -> StoreResult<Book> {
        (**self).create_book(book)
    }

    fn update_book(&self, book: &Book) -> StoreResult<Book> {
        (**self).update_book(book)
    }

    fn get_book_by_id(&self, id: BookId) -> StoreResult<Book> {
        (**self).get_book_by_id(id)
    }

    fn delete_book_by_id(&self, id: BookId) -> StoreResult<()> {
        (**self).delete_book_by_id(id)
    }

    fn get_books_by_user_id(&self, user_id: UserId) -> StoreResult<Vec<Book>> {
        (**self).get_books_by_user_id(user_id)
    }

    fn delete_books_by_user_id(&self, user_id: UserId) -> StoreResult<()> {
        (**self).delete_books_by_user_id(user_id)
    }
}

impl<S: UserStore + ?Sized> UserStore for Box<S> {
    fn create_user(&self, user: &User) -> StoreResult<User> {
        (**self).create_user(user)
    }

    fn update_user(&self, user: &User) -> StoreResult<User> {
        (**self).update_user(user)
    }

    fn get_user_by_id(&self, id: UserId) -> StoreResult<User> {
        (**self).get_user_by_id(id)
    }

    fn delete_user_by_id(&self, id: UserId) -> StoreResult<()> {
        (**self).delete_user_by_id(id)
    }
}

impl<S: BookStore + ?Sized> BookStore for Box<S> {
    fn create_book(&self, book: &Book) -> StoreResult<Book> {
        (**self).create_book(book)
    }

    fn update_book(&self, book: &Book) -> StoreResult<Book> {
        (**self).update_book(book)
    }

    fn get_book_by_id(&self, id: BookId) -> StoreResult<Book> {
        (**self).get_book_by_id(id)
    }

    fn delete_book_by_id(&self, id: BookId) -> StoreResult<()> {
        (**self).delete_book_by_id(id)
    }

    fn get_books_by_user_id(&self, user_id: UserId) -> StoreResult<Vec<Book>> {
        (**self).get_books_by_user_id(user_id)
    }

    fn delete_books_by_user_id(&self, user_id: UserId) -> StoreResult<()> {
        (**self).delete_books_by_user_id(user_id)
    }
}

/// Returns the id of a record that must already be persisted.
pub(crate) fn require_id(id: Option<i64>) -> StoreResult<i64> {
    id.ok_or(StoreError::MissingId)
}
