//! Direct-SQL book store over a borrowed `rusqlite` connection.

use super::{require_id, BookStore, StoreError, StoreResult};
use crate::model::book::{Book, BookId};
use crate::model::user::UserId;
use crate::validation::validate_book;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

const BOOK_SELECT_SQL: &str = "SELECT id, person_id, title, author, page_count FROM book";

/// SQL-family book store.
pub struct SqlBookStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlBookStore<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn person_exists(&self, user_id: UserId) -> StoreResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM person WHERE id = ?1);",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl BookStore for SqlBookStore<'_> {
    fn create_book(&self, book: &Book) -> StoreResult<Book> {
        validate_book(book)?;
        if !self.person_exists(book.user_id)? {
            return Err(StoreError::UserNotFound(book.user_id));
        }

        self.conn.execute(
            "INSERT INTO book (person_id, title, author, page_count) VALUES (?1, ?2, ?3, ?4);",
            params![
                book.user_id,
                book.title.as_str(),
                book.author.as_str(),
                book.page_count
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        info!(
            "event=book_create module=store backend=sql status=ok book_id={id} user_id={}",
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

        let changed = self.conn.execute(
            "UPDATE book SET title = ?1, author = ?2, page_count = ?3 WHERE id = ?4;",
            params![
                merged.title.as_str(),
                merged.author.as_str(),
                merged.page_count,
                id
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::BookNotFound(id));
        }

        info!("event=book_update module=store backend=sql status=ok book_id={id}");
        Ok(merged)
    }

    fn get_book_by_id(&self, id: BookId) -> StoreResult<Book> {
        debug!("event=book_get module=store backend=sql book_id={id}");
        self.conn
            .query_row(
                &format!("{BOOK_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_book_row,
            )
            .optional()?
            .ok_or(StoreError::BookNotFound(id))
    }

    fn delete_book_by_id(&self, id: BookId) -> StoreResult<()> {
        let changed = self.conn.execute("DELETE FROM book WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(StoreError::BookNotFound(id));
        }

        info!("event=book_delete module=store backend=sql status=ok book_id={id}");
        Ok(())
    }

    fn get_books_by_user_id(&self, user_id: UserId) -> StoreResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL} WHERE person_id = ?1 ORDER BY id ASC;"
        ))?;
        let books = stmt
            .query_map([user_id], parse_book_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(
            "event=books_by_user module=store backend=sql user_id={user_id} count={}",
            books.len()
        );
        Ok(books)
    }

    fn delete_books_by_user_id(&self, user_id: UserId) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM book WHERE person_id = ?1;", [user_id])?;

        info!(
            "event=books_delete_by_user module=store backend=sql status=ok user_id={user_id} count={removed}"
        );
        Ok(())
    }
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: Some(row.get("id")?),
        user_id: row.get("person_id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        page_count: row.get("page_count")?,
    })
}
