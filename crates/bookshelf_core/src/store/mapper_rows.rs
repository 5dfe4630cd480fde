//! Diesel row structs for the mapper family.
//!
//! Kept private to the store module; the rest of the crate only sees
//! `User` and `Book`.

use super::mapper_schema::{book, person};
use crate::model::book::Book;
use crate::model::user::User;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = person)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(super) struct PersonRow {
    pub id: i64,
    pub full_name: String,
    pub title: String,
    pub age: i32,
}

/// Insert and update share one shape: every mutable column.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = person)]
pub(super) struct PersonValues<'a> {
    pub full_name: &'a str,
    pub title: &'a str,
    pub age: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = book)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(super) struct BookRow {
    pub id: i64,
    pub person_id: i64,
    pub title: String,
    pub author: String,
    pub page_count: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = book)]
pub(super) struct NewBookRow<'a> {
    pub person_id: i64,
    pub title: &'a str,
    pub author: &'a str,
    pub page_count: i32,
}

/// Owner is deliberately absent: updates never move a book.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = book)]
pub(super) struct BookChangeset<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub page_count: i32,
}

impl<'a> From<&'a User> for PersonValues<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            full_name: &user.full_name,
            title: &user.title,
            age: user.age,
        }
    }
}

impl From<PersonRow> for User {
    fn from(row: PersonRow) -> Self {
        Self {
            id: Some(row.id),
            full_name: row.full_name,
            title: row.title,
            age: row.age,
        }
    }
}

impl<'a> From<&'a Book> for NewBookRow<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            person_id: book.user_id,
            title: &book.title,
            author: &book.author,
            page_count: book.page_count,
        }
    }
}

impl<'a> From<&'a Book> for BookChangeset<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            title: &book.title,
            author: &book.author,
            page_count: book.page_count,
        }
    }
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: Some(row.id),
            user_id: row.person_id,
            title: row.title,
            author: row.author,
            page_count: row.page_count,
        }
    }
}
