mod common;

use shortcode_service::AppError;
use shortcode_service::domain::entities::NewUrlRecord;
use shortcode_service::domain::repositories::UrlRepository;
use shortcode_service::infrastructure::persistence::PgUrlRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_record(url: &str, shortcode: &str) -> NewUrlRecord {
    NewUrlRecord {
        url: url.to_string(),
        shortcode: shortcode.to_string(),
    }
}

#[sqlx::test]
async fn test_create_record(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let record = repo
        .create(new_record("https://example.com", "abc123"))
        .await
        .unwrap();

    assert_eq!(record.shortcode, "abc123");
    assert_eq!(record.url, "https://example.com");
    assert_eq!(record.access_count, 0);
    assert_eq!(record.created_at, record.updated_at);
}

#[sqlx::test]
async fn test_create_duplicate_shortcode_is_collision(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    repo.create(new_record("https://a.example", "abc123"))
        .await
        .unwrap();
    let result = repo.create(new_record("https://b.example", "abc123")).await;

    assert!(matches!(result, Err(AppError::Collision { .. })));
    assert_eq!(
        common::stored_url(&pool, "abc123").await.as_deref(),
        Some("https://a.example")
    );
}

#[sqlx::test]
async fn test_find_by_shortcode(pool: PgPool) {
    common::insert_record(&pool, "https://example.com", "xyz789").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let found = repo.find_by_shortcode("xyz789").await.unwrap();
    let missing = repo.find_by_shortcode("nope00").await.unwrap();

    assert_eq!(found.unwrap().url, "https://example.com");
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_increment_access_count(pool: PgPool) {
    common::insert_record(&pool, "https://example.com", "count1").await;
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    assert!(repo.increment_access_count("count1").await.unwrap());
    assert!(repo.increment_access_count("count1").await.unwrap());
    assert!(!repo.increment_access_count("nope00").await.unwrap());

    assert_eq!(common::access_count(&pool, "count1").await, 2);
}

#[sqlx::test]
async fn test_update_url_keeps_shortcode(pool: PgPool) {
    common::insert_record(&pool, "https://old.example", "upd001").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let before = repo.find_by_shortcode("upd001").await.unwrap().unwrap();
    let updated = repo
        .update_url("upd001", "https://new.example")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, before.id);
    assert_eq!(updated.shortcode, "upd001");
    assert_eq!(updated.url, "https://new.example");
    assert!(updated.updated_at >= before.updated_at);
}

#[sqlx::test]
async fn test_update_url_missing_returns_none(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let result = repo.update_url("nope00", "https://new.example").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_delete_by_shortcode(pool: PgPool) {
    common::insert_record(&pool, "https://example.com", "del001").await;
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    let removed = repo.delete_by_shortcode("del001").await.unwrap();
    let again = repo.delete_by_shortcode("del001").await.unwrap();

    assert_eq!(removed.unwrap().url, "https://example.com");
    assert!(again.is_none());
    assert_eq!(common::record_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_list_all_ordered_by_id(pool: PgPool) {
    common::insert_record(&pool, "https://first.example", "first1").await;
    common::insert_record(&pool, "https://second.example", "secnd2").await;
    let repo = PgUrlRepository::new(Arc::new(pool));

    let records = repo.list_all().await.unwrap();

    let codes: Vec<&str> = records.iter().map(|r| r.shortcode.as_str()).collect();
    assert_eq!(codes, vec!["first1", "secnd2"]);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
