//! Domain records shared by validator, stores and facade.
//!
//! # Invariants
//! - `id` is `None` until a store assigns it and never changes afterwards.
//! - A book references its owner by id only; it does not own the user.

pub mod book;
pub mod user;
