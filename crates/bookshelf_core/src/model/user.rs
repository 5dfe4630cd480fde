//! User (person) record.

use serde::{Deserialize, Serialize};

/// Store-assigned user identifier.
pub type UserId = i64;

/// A person owning zero or more books.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub full_name: String,
    /// Free text, may be empty.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub age: i32,
}

impl User {
    /// Creates an unpersisted user.
    pub fn new(full_name: impl Into<String>, title: impl Into<String>, age: i32) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            title: title.into(),
            age,
        }
    }

    /// Returns this record carrying `id`.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Overwrites fields with the non-empty/non-zero values of `patch`.
    ///
    /// `id` is never touched.
    pub fn merge_from(&mut self, patch: &User) {
        if !patch.full_name.is_empty() {
            self.full_name.clone_from(&patch.full_name);
        }
        if !patch.title.is_empty() {
            self.title.clone_from(&patch.title);
        }
        if patch.age != 0 {
            self.age = patch.age;
        }
    }
}
