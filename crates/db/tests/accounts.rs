//! Integration tests for users and login sessions.

use chrono::{Duration, Utc};
use renungan_db::models::session::CreateSession;
use renungan_db::models::user::CreateUser;
use renungan_db::repositories::{SessionRepo, UserRepo};
use sqlx::PgPool;

fn new_user(email: &str, role: &str) -> CreateUser {
    CreateUser {
        full_name: Some("Test User".to_string()),
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        role: role.to_string(),
    }
}

fn new_session(user_id: i64, hash: &str, ttl: Duration) -> CreateSession {
    CreateSession {
        user_id,
        token_hash: hash.to_string(),
        expires_at: Utc::now() + ttl,
        user_agent: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_violates_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("a@example.com", "admin"))
        .await
        .unwrap();
    let err = UserRepo::create(&pool, &new_user("a@example.com", "contributor"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.constraint(), Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_role_rejected(pool: PgPool) {
    assert!(UserRepo::create(&pool, &new_user("x@example.com", "owner"))
        .await
        .is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_email_ignores_case(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("Admin@Example.com", "admin"))
        .await
        .unwrap();
    let found = UserRepo::find_by_email(&pool, "admin@example.COM")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_emails_and_deletes(pool: PgPool) {
    UserRepo::create(&pool, &new_user("a@example.com", "admin")).await.unwrap();
    UserRepo::create(&pool, &new_user("c@example.com", "contributor"))
        .await
        .unwrap();

    assert_eq!(
        UserRepo::list_admin_emails(&pool).await.unwrap(),
        ["a@example.com"]
    );
    assert!(UserRepo::delete_by_email(&pool, "c@example.com").await.unwrap());
    assert!(!UserRepo::delete_by_email(&pool, "c@example.com").await.unwrap());
    assert_eq!(UserRepo::delete_all(&pool).await.unwrap(), 1);
    assert!(UserRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_password(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("a@example.com", "admin"))
        .await
        .unwrap();
    assert!(UserRepo::update_password(&pool, user.id, "$argon2id$new").await.unwrap());
    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.password_hash, "$argon2id$new");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_lifecycle(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("a@example.com", "admin"))
        .await
        .unwrap();
    let session_id = SessionRepo::create(&pool, &new_session(user.id, "live", Duration::hours(1)))
        .await
        .unwrap();
    SessionRepo::create(&pool, &new_session(user.id, "old", Duration::hours(-1)))
        .await
        .unwrap();

    let active = SessionRepo::find_active_by_token_hash(&pool, "live")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, session_id);
    assert_eq!(active.user_id, user.id);
    assert!(SessionRepo::find_active_by_token_hash(&pool, "old")
        .await
        .unwrap()
        .is_none());

    assert!(SessionRepo::revoke(&pool, session_id).await.unwrap());
    assert!(!SessionRepo::revoke(&pool, session_id).await.unwrap());
    assert!(SessionRepo::find_active_by_token_hash(&pool, "live")
        .await
        .unwrap()
        .is_none());

    assert_eq!(SessionRepo::cleanup_expired(&pool).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoke_all_for_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("a@example.com", "admin"))
        .await
        .unwrap();
    for hash in ["one", "two"] {
        SessionRepo::create(&pool, &new_session(user.id, hash, Duration::hours(1)))
            .await
            .unwrap();
    }
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap(), 2);
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap(), 0);
}
