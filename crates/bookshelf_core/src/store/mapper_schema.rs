//! Diesel table definitions.
//!
//! Must match `db/migrations/0001_init.sql` exactly.

diesel::table! {
    /// Users. `id` is the SQLite rowid alias.
    person (id) {
        id -> BigInt,
        full_name -> Text,
        title -> Text,
        age -> Integer,
    }
}

diesel::table! {
    /// Books, owned by `person` through `person_id` (cascading delete).
    book (id) {
        id -> BigInt,
        person_id -> BigInt,
        title -> Text,
        author -> Text,
        page_count -> Integer,
    }
}

diesel::joinable!(book -> person (person_id));
diesel::allow_tables_to_appear_in_same_query!(person, book);
