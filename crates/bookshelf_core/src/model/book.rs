//! Book record.

use super::user::UserId;
use serde::{Deserialize, Serialize};

/// Store-assigned book identifier.
pub type BookId = i64;

/// A book referencing its owning user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    /// Owner reference. The facade overwrites it when creating books for a
    /// user, so callers may leave it at zero there.
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub page_count: i32,
}

impl Book {
    /// Creates an unpersisted book owned by `user_id`.
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        author: impl Into<String>,
        page_count: i32,
    ) -> Self {
        Self {
            id: None,
            user_id,
            title: title.into(),
            author: author.into(),
            page_count,
        }
    }

    /// Returns this record carrying `id`.
    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }

    /// Overwrites title/author/page count with the non-empty/non-zero values
    /// of `patch`.
    ///
    /// `id` and `user_id` are never touched.
    pub fn merge_from(&mut self, patch: &Book) {
        if !patch.title.is_empty() {
            self.title.clone_from(&patch.title);
        }
        if !patch.author.is_empty() {
            self.author.clone_from(&patch.author);
        }
        if patch.page_count != 0 {
            self.page_count = patch.page_count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Book;

    #[test]
    fn merge_ignores_owner_and_empty_fields() {
        let mut stored = Book::new(1, "Nose", "Gogol", 200).with_id(5);
        stored.merge_from(&Book::new(2, "", "N. Gogol", 0));

        assert_eq!(stored, Book::new(1, "Nose", "N. Gogol", 200).with_id(5));
    }
}
