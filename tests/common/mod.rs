#![allow(dead_code)]

use axum_test::TestServer;
use shortcode_service::api::routes::routes;
use shortcode_service::infrastructure::cache::MemoryCache;
use shortcode_service::infrastructure::persistence::PgUrlRepository;
use shortcode_service::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub fn create_test_state(pool: PgPool) -> (AppState, Arc<MemoryCache>) {
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    let cache = Arc::new(MemoryCache::new());
    let state = AppState::new(repository, cache.clone());
    (state, cache)
}

/// Builds a test server over every route, backed by an in-process cache the
/// test can inspect.
pub fn make_server(pool: PgPool) -> (TestServer, Arc<MemoryCache>) {
    let (state, cache) = create_test_state(pool);
    let app = routes().with_state(state);
    (TestServer::new(app).unwrap(), cache)
}

pub async fn insert_record(pool: &PgPool, url: &str, shortcode: &str) {
    sqlx::query("INSERT INTO url_store (url, shortcode) VALUES ($1, $2)")
        .bind(url)
        .bind(shortcode)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn access_count(pool: &PgPool, shortcode: &str) -> i64 {
    sqlx::query_scalar("SELECT access_count FROM url_store WHERE shortcode = $1")
        .bind(shortcode)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn stored_url(pool: &PgPool, shortcode: &str) -> Option<String> {
    sqlx::query_scalar("SELECT url FROM url_store WHERE shortcode = $1")
        .bind(shortcode)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub async fn record_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_store")
        .fetch_one(pool)
        .await
        .unwrap()
}
