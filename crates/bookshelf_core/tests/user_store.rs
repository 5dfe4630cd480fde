mod support;

use bookshelf_core::{StoreBackend, StoreError, User, UserStore};
use rstest::rstest;
use support::TestDb;

#[rstest]
fn create_then_get_returns_equal_record(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let users = db.users();

    let input = User::new("Ada Lovelace", "Countess", 36);
    let created = users.create_user(&input).unwrap();
    let id = created.id.expect("create must assign an id");

    assert_eq!(created, input.clone().with_id(id));
    assert_eq!(users.get_user_by_id(id).unwrap(), input.with_id(id));
}

#[rstest]
fn create_ignores_caller_supplied_id(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let users = db.users();

    let first = users.create_user(&User::new("A", "", 1).with_id(500)).unwrap();
    let second = users.create_user(&User::new("B", "", 2)).unwrap();

    assert_ne!(first.id, Some(500));
    assert_ne!(first.id, second.id);
}

#[rstest]
#[case::blank_name(User::new("  ", "t", 30))]
#[case::zero_age(User::new("Name", "t", 0))]
#[case::negative_age(User::new("Name", "t", -4))]
fn create_rejects_invalid_user_without_writing(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
    #[case] invalid: User,
) {
    let db = TestDb::open(backend);
    let users = db.users();

    let err = users.create_user(&invalid).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let next = users.create_user(&User::new("Valid", "", 20)).unwrap();
    assert_eq!(next.id, Some(1), "rejected insert must not consume a row");
}

#[rstest]
fn update_with_subset_keeps_other_fields(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let users = db.users();
    let id = users
        .create_user(&User::new("Ada Lovelace", "Countess", 36))
        .unwrap()
        .id
        .unwrap();

    let patch = User {
        id: Some(id),
        title: "Mathematician".to_string(),
        ..User::default()
    };
    let updated = users.update_user(&patch).unwrap();

    let expected = User::new("Ada Lovelace", "Mathematician", 36).with_id(id);
    assert_eq!(updated, expected);
    assert_eq!(users.get_user_by_id(id).unwrap(), expected);
}

#[rstest]
fn update_with_invalid_merge_raises_and_keeps_storage(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let users = db.users();
    let stored = users.create_user(&User::new("Ada", "", 36)).unwrap();
    let id = stored.id.unwrap();

    let patch = User {
        id: Some(id),
        full_name: "Grace".to_string(),
        age: -1,
        ..User::default()
    };
    let err = users.update_user(&patch).unwrap_err();

    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(users.get_user_by_id(id).unwrap(), stored);
}

#[rstest]
fn update_requires_id_and_existing_row(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let users = db.users();

    let missing_id = users.update_user(&User::new("A", "", 1)).unwrap_err();
    assert!(matches!(missing_id, StoreError::MissingId));

    let absent = users
        .update_user(&User::new("A", "", 1).with_id(42))
        .unwrap_err();
    assert!(matches!(absent, StoreError::UserNotFound(42)));
}

#[rstest]
fn get_missing_user_is_not_found(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let err = db.users().get_user_by_id(9).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "User with ID=9 not found!");
}

#[rstest]
fn delete_removes_user_and_rejects_missing_id(
    #[values(StoreBackend::Sql, StoreBackend::Mapper)] backend: StoreBackend,
) {
    let db = TestDb::open(backend);
    let users = db.users();
    let id = users.create_user(&User::new("A", "", 1)).unwrap().id.unwrap();

    users.delete_user_by_id(id).unwrap();

    assert!(matches!(
        users.get_user_by_id(id).unwrap_err(),
        StoreError::UserNotFound(missing) if missing == id
    ));
    assert!(matches!(
        users.delete_user_by_id(id).unwrap_err(),
        StoreError::UserNotFound(_)
    ));
}
