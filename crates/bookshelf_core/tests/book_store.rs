mod support;

use bookshelf_core::{Book, BookStore, StoreBackend, StoreError, User, UserId, UserStore};
use rstest::rstest;
use support::TestDb;

fn seed_user(db: &TestDb) -> UserId {
    db.users()
        .create_user(&User::new("Nikolai Gogol", "Writer", 42))
        .unwrap()
        .id
        .unwrap()
}

#[rstest]
fn create_then_get_returns_equal_record(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let owner = seed_user(&db);
    let books = db.books();

    let input = Book::new(owner, "The Nose", "Gogol", 200);
    let created = books.create_book(&input).unwrap();
    let id = created.id.unwrap();

    assert_eq!(created, input.clone().with_id(id));
    assert_eq!(books.get_book_by_id(id).unwrap(), input.with_id(id));
}

#[rstest]
fn create_against_missing_owner_is_user_not_found(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let err = db
        .books()
        .create_book(&Book::new(77, "Orphan", "Nobody", 10))
        .unwrap_err();

    assert!(matches!(err, StoreError::UserNotFound(77)));
}

#[rstest]
#[case::blank_title(Book::new(0, " ", "Au", 10))]
#[case::blank_author(Book::new(0, "T", "", 10))]
#[case::zero_pages(Book::new(0, "T", "Au", 0))]
fn create_rejects_invalid_book_before_owner_check(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
    #[case] invalid: Book,
) {
    let db = TestDb::open(backend);
    let err = db.books().create_book(&invalid).unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
}

#[rstest]
fn update_merges_fields_and_keeps_owner(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let owner = seed_user(&db);
    let other = seed_user(&db);
    let books = db.books();
    let id = books
        .create_book(&Book::new(owner, "Nose", "Gogol", 200))
        .unwrap()
        .id
        .unwrap();

    let patch = Book {
        id: Some(id),
        user_id: other,
        page_count: 210,
        ..Book::default()
    };
    let updated = books.update_book(&patch).unwrap();

    let expected = Book::new(owner, "Nose", "Gogol", 210).with_id(id);
    assert_eq!(updated, expected);
    assert_eq!(books.get_book_by_id(id).unwrap(), expected);
}

#[rstest]
fn update_with_invalid_merge_raises_and_keeps_storage(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let owner = seed_user(&db);
    let books = db.books();
    let stored = books
        .create_book(&Book::new(owner, "Nose", "Gogol", 200))
        .unwrap();

    let patch = Book {
        id: stored.id,
        title: "   ".to_string(),
        ..Book::default()
    };
    let err = books.update_book(&patch).unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(books.get_book_by_id(stored.id.unwrap()).unwrap(), stored);
}

#[rstest]
fn update_and_delete_of_missing_book_are_not_found(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let books = db.books();

    assert!(matches!(
        books.update_book(&Book::new(1, "T", "A", 1)).unwrap_err(),
        StoreError::MissingId
    ));
    assert!(matches!(
        books
            .update_book(&Book::new(1, "T", "A", 1).with_id(5))
            .unwrap_err(),
        StoreError::BookNotFound(5)
    ));

    let err = books.delete_book_by_id(5).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Book with ID=5 not found!");
}

#[rstest]
fn books_by_user_are_scoped_and_in_creation_order(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let owner = seed_user(&db);
    let other = seed_user(&db);
    let books = db.books();

    let first = books.create_book(&Book::new(owner, "A", "X", 1)).unwrap();
    books.create_book(&Book::new(other, "B", "Y", 2)).unwrap();
    let third = books.create_book(&Book::new(owner, "C", "Z", 3)).unwrap();

    assert_eq!(books.get_books_by_user_id(owner).unwrap(), vec![first, third]);
    assert!(books.get_books_by_user_id(999).unwrap().is_empty());
}

#[rstest]
fn delete_by_user_is_scoped_and_succeeds_on_zero_rows(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let owner = seed_user(&db);
    let other = seed_user(&db);
    let books = db.books();
    books.create_book(&Book::new(owner, "A", "X", 1)).unwrap();
    let kept = books.create_book(&Book::new(other, "B", "Y", 2)).unwrap();

    books.delete_books_by_user_id(owner).unwrap();
    books.delete_books_by_user_id(owner).unwrap();

    assert!(books.get_books_by_user_id(owner).unwrap().is_empty());
    assert_eq!(books.get_books_by_user_id(other).unwrap(), vec![kept]);
}

#[rstest]
fn deleting_owner_cascades_to_books(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let owner = seed_user(&db);
    let books = db.books();
    let book_id = books
        .create_book(&Book::new(owner, "A", "X", 1))
        .unwrap()
        .id
        .unwrap();

    db.users().delete_user_by_id(owner).unwrap();

    assert!(matches!(
        books.get_book_by_id(book_id).unwrap_err(),
        StoreError::BookNotFound(_)
    ));
}
