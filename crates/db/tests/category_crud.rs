//! Integration tests for the category repository.
//!
//! Exercises ownership scoping, case-insensitive name uniqueness, and
//! entry-count aggregation against a real database.

use dailywins_db::models::category::{CreateCategory, UpdateCategory};
use dailywins_db::models::entry::NewEntry;
use dailywins_db::models::user::CreateUser;
use dailywins_db::repositories::{CategoryRepo, EntryRepo, UserRepo};
use sqlx::PgPool;

async fn create_user(pool: &PgPool, username: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "x".to_string(),
        },
    )
    .await
    .expect("user creation should succeed");
    user.id
}

fn new_category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        color: None,
        description: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;

    let category = CategoryRepo::create(&pool, user_id, &new_category("Work"))
        .await
        .unwrap();

    assert_eq!(category.name, "Work");
    assert_eq!(category.color, "#007bff");
    assert_eq!(category.description, "");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_name_case_insensitive(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;

    CategoryRepo::create(&pool, user_id, &new_category("Work"))
        .await
        .unwrap();

    // "work" collides with "Work" for the same user.
    let exists = CategoryRepo::name_exists(&pool, user_id, "work", None)
        .await
        .unwrap();
    assert!(exists);

    let err = CategoryRepo::create(&pool, user_id, &new_category("work"))
        .await
        .expect_err("duplicate name should violate the unique index");
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_categories_user_lower_name"));
        }
        other => panic!("expected database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_same_name_different_users_allowed(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    CategoryRepo::create(&pool, alice, &new_category("Work"))
        .await
        .unwrap();
    CategoryRepo::create(&pool, bob, &new_category("Work"))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn test_name_exists_excludes_self(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let category = CategoryRepo::create(&pool, user_id, &new_category("Work"))
        .await
        .unwrap();

    // Editing a category keeping its own name is not a conflict.
    let exists = CategoryRepo::name_exists(&pool, user_id, "Work", Some(category.id))
        .await
        .unwrap();
    assert!(!exists);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_scoped_to_owner(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    let category = CategoryRepo::create(&pool, alice, &new_category("Work"))
        .await
        .unwrap();

    // Bob cannot see Alice's category.
    let found = CategoryRepo::find_by_id(&pool, bob, category.id).await.unwrap();
    assert!(found.is_none());

    // Nor update or delete it.
    let updated = CategoryRepo::update(
        &pool,
        bob,
        category.id,
        &UpdateCategory {
            name: Some("Stolen".to_string()),
            color: None,
            description: None,
        },
    )
    .await
    .unwrap();
    assert!(updated.is_none());

    let deleted = CategoryRepo::delete(&pool, bob, category.id).await.unwrap();
    assert!(!deleted);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_with_counts(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;

    let work = CategoryRepo::create(&pool, user_id, &new_category("Work"))
        .await
        .unwrap();
    let health = CategoryRepo::create(&pool, user_id, &new_category("Health"))
        .await
        .unwrap();

    let entry = EntryRepo::create(
        &pool,
        user_id,
        &NewEntry {
            title: "Shipped the release".to_string(),
            ..NewEntry::default()
        },
    )
    .await
    .unwrap();
    EntryRepo::set_categories(&pool, user_id, entry.id, &[work.id])
        .await
        .unwrap();

    let listed = CategoryRepo::list_with_counts(&pool, user_id).await.unwrap();
    assert_eq!(listed.len(), 2);

    // Ordered by name: Health, Work.
    assert_eq!(listed[0].id, health.id);
    assert_eq!(listed[0].entry_count, 0);
    assert_eq!(listed[1].id, work.id);
    assert_eq!(listed[1].entry_count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_count_owned_ignores_foreign_ids(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;

    let work = CategoryRepo::create(&pool, alice, &new_category("Work"))
        .await
        .unwrap();
    let health = CategoryRepo::create(&pool, alice, &new_category("Health"))
        .await
        .unwrap();
    let bobs = CategoryRepo::create(&pool, bob, &new_category("Work"))
        .await
        .unwrap();

    let owned = CategoryRepo::count_owned(&pool, alice, &[work.id, health.id])
        .await
        .unwrap();
    assert_eq!(owned, 2);

    // Bob's category and a nonexistent ID do not count for Alice.
    let owned = CategoryRepo::count_owned(&pool, alice, &[work.id, bobs.id, 999_999])
        .await
        .unwrap();
    assert_eq!(owned, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_detaches_entries(pool: PgPool) {
    let user_id = create_user(&pool, "alice").await;
    let work = CategoryRepo::create(&pool, user_id, &new_category("Work"))
        .await
        .unwrap();

    let entry = EntryRepo::create(
        &pool,
        user_id,
        &NewEntry {
            title: "Shipped the release".to_string(),
            ..NewEntry::default()
        },
    )
    .await
    .unwrap();
    EntryRepo::set_categories(&pool, user_id, entry.id, &[work.id])
        .await
        .unwrap();

    assert!(CategoryRepo::delete(&pool, user_id, work.id).await.unwrap());

    // The entry survives, just without the category.
    let entry = EntryRepo::find_by_id(&pool, user_id, entry.id)
        .await
        .unwrap()
        .expect("entry should survive category deletion");
    let categories = EntryRepo::categories_for_entry(&pool, entry.id).await.unwrap();
    assert!(categories.is_empty());
}
