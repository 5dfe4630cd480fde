//! Presence and positivity rules for user and book records.
//!
//! # Invariants
//! - Every rule is evaluated; violations accumulate instead of stopping at
//!   the first bad field.
//! - Pure functions, no side effects.

use crate::model::book::Book;
use crate::model::user::User;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// One broken rule on a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    BlankFullName,
    NonPositiveAge(i32),
    BlankTitle,
    BlankAuthor,
    NonPositivePageCount(i32),
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankFullName => write!(f, "full_name must not be blank"),
            Self::NonPositiveAge(age) => write!(f, "age must be positive, got {age}"),
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::BlankAuthor => write!(f, "author must not be blank"),
            Self::NonPositivePageCount(count) => {
                write!(f, "page_count must be positive, got {count}")
            }
        }
    }
}

/// A record failed validation; carries every violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not valid {entity}: {}", join_violations(.violations))]
pub struct ValidationError {
    pub entity: &'static str,
    pub violations: Vec<FieldViolation>,
}

/// Returns whether `user` may be persisted.
pub fn is_valid_user(user: &User) -> bool {
    validate_user(user).is_ok()
}

/// Returns whether `book` may be persisted.
pub fn is_valid_book(book: &Book) -> bool {
    validate_book(book).is_ok()
}

/// Checks full name presence and age positivity.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    if user.full_name.trim().is_empty() {
        violations.push(FieldViolation::BlankFullName);
    }
    if user.age <= 0 {
        violations.push(FieldViolation::NonPositiveAge(user.age));
    }
    finish("user", violations)
}

/// Checks title/author presence and page count positivity.
pub fn validate_book(book: &Book) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    if book.title.trim().is_empty() {
        violations.push(FieldViolation::BlankTitle);
    }
    if book.author.trim().is_empty() {
        violations.push(FieldViolation::BlankAuthor);
    }
    if book.page_count <= 0 {
        violations.push(FieldViolation::NonPositivePageCount(book.page_count));
    }
    finish("book", violations)
}

fn finish(entity: &'static str, violations: Vec<FieldViolation>) -> Result<(), ValidationError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { entity, violations })
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::{validate_user, FieldViolation};
    use crate::model::user::User;

    #[test]
    fn error_message_lists_every_violation() {
        let err = validate_user(&User::new(" ", "", -1)).unwrap_err();
        assert_eq!(
            err.violations,
            vec![FieldViolation::BlankFullName, FieldViolation::NonPositiveAge(-1)]
        );
        assert_eq!(
            err.to_string(),
            "not valid user: full_name must not be blank; age must be positive, got -1"
        );
    }
}
