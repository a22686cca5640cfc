//! PostgreSQL repository tests.
//!
//! Each test gets a fresh database with migrations applied by `#[sqlx::test]`.
//! Run with `DATABASE_URL` pointing at a server and `cargo test -- --ignored`.

use sqlx::PgPool;
use std::sync::Arc;
use url_alias::domain::entities::UrlPatch;
use url_alias::domain::repositories::{StoreError, UrlRepository};
use url_alias::infrastructure::persistence::PgUrlRepository;

fn repo(pool: PgPool) -> PgUrlRepository {
    PgUrlRepository::new(Arc::new(pool))
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_insert_and_get_by_alias(pool: PgPool) {
    let repo = repo(pool);

    let created = repo.insert("abc123", "https://example.com").await.unwrap();
    assert_eq!(created.alias, "abc123");
    assert_eq!(created.visit_count, 0);

    let found = repo.get_by_alias("abc123").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.target_url, "https://example.com");
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_insert_duplicate_alias(pool: PgPool) {
    let repo = repo(pool);
    repo.insert("dup", "https://example.com").await.unwrap();

    let err = repo.insert("dup", "https://other.com").await.unwrap_err();

    assert_eq!(err, StoreError::AliasExists("dup".to_string()));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_get_missing_alias(pool: PgPool) {
    let repo = repo(pool);
    assert!(repo.get_by_alias("zzzzzz").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_partial_update_alias(pool: PgPool) {
    let repo = repo(pool);
    let record = repo.insert("old", "https://example.com").await.unwrap();
    repo.increment_visit_count(record.id).await.unwrap();

    let patch = UrlPatch {
        alias: Some("new".to_string()),
        ..Default::default()
    };
    assert_eq!(repo.update(record.id, patch).await.unwrap(), 1);

    assert!(repo.get_by_alias("old").await.unwrap().is_none());
    let updated = repo.get_by_alias("new").await.unwrap().unwrap();
    assert_eq!(updated.target_url, "https://example.com");
    assert_eq!(updated.visit_count, 1);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_update_missing_id(pool: PgPool) {
    let repo = repo(pool);
    let patch = UrlPatch {
        target_url: Some("https://example.com".to_string()),
        ..Default::default()
    };

    assert_eq!(repo.update(4242, patch).await.unwrap(), 0);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_update_to_taken_alias(pool: PgPool) {
    let repo = repo(pool);
    let first = repo.insert("first", "https://example.com/1").await.unwrap();
    repo.insert("second", "https://example.com/2").await.unwrap();

    let patch = UrlPatch {
        alias: Some("second".to_string()),
        ..Default::default()
    };
    let err = repo.update(first.id, patch).await.unwrap_err();

    assert_eq!(err, StoreError::AliasExists("second".to_string()));
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_concurrent_increments(pool: PgPool) {
    let repo = Arc::new(repo(pool));
    let record = repo.insert("hot", "https://example.com").await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_visit_count(record.id).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 1);
    }

    let found = repo.get_by_alias("hot").await.unwrap().unwrap();
    assert_eq!(found.visit_count, 20);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_health_check(pool: PgPool) {
    assert!(repo(pool).health_check().await.is_ok());
}
