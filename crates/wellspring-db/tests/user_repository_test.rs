//! Integration tests for the User repository using in-memory SurrealDB.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use wellspring_core::error::WellspringError;
use wellspring_core::models::user::{CreateUser, UpdateUser};
use wellspring_core::repository::UserRepository;
use wellspring_db::repository::SurrealUserRepository;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    wellspring_db::run_migrations(&db).await.unwrap();
    db
}

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.into(),
        password: "secret1".into(),
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let repo = SurrealUserRepository::new(setup().await);

    let user = repo.create(new_user("alice@example.com")).await.unwrap();

    assert_eq!(user.email, "alice@example.com");
    assert!(user.last_login.is_none());

    // Password should be hashed, not stored in plaintext.
    assert_ne!(user.password_hash, "secret1");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
async fn email_is_stored_lowercase_and_looked_up_case_insensitively() {
    let repo = SurrealUserRepository::new(setup().await);

    let user = repo.create(new_user("Bob@Example.COM")).await.unwrap();
    assert_eq!(user.email, "bob@example.com");

    let fetched = repo.get_by_email("BOB@example.com").await.unwrap();
    assert_eq!(fetched.id, user.id);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let repo = SurrealUserRepository::new(setup().await);

    repo.create(new_user("carol@example.com")).await.unwrap();
    let err = repo
        .create(new_user("CAROL@example.com"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, WellspringError::AlreadyExists { .. }),
        "expected AlreadyExists, got {err:?}"
    );
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let repo = SurrealUserRepository::new(setup().await);

    let err = repo.get_by_id(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, WellspringError::NotFound { .. }));

    let err = repo.get_by_email("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, WellspringError::NotFound { .. }));
}

#[tokio::test]
async fn update_sets_last_login() {
    let repo = SurrealUserRepository::new(setup().await);
    let user = repo.create(new_user("dave@example.com")).await.unwrap();

    let now = Utc::now();
    let updated = repo
        .update(
            user.id,
            UpdateUser {
                last_login: Some(now),
            },
        )
        .await
        .unwrap();

    assert!(updated.last_login.is_some());
    assert!(updated.updated_at >= user.updated_at);
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let repo = SurrealUserRepository::new(setup().await);

    let err = repo
        .update(uuid::Uuid::new_v4(), UpdateUser::default())
        .await
        .unwrap_err();
    assert!(matches!(err, WellspringError::NotFound { .. }));
}

#[tokio::test]
async fn purge_removes_all_users() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db.clone());
    let user = repo.create(new_user("erin@example.com")).await.unwrap();

    wellspring_db::purge(&db).await.unwrap();

    assert!(repo.get_by_id(user.id).await.is_err());
}
