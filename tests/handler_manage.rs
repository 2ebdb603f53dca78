mod common;

use serde_json::{Value, json};
use shortcode_service::infrastructure::cache::CacheKey;
use shortcode_service::utils::shortener::shorten;
use sqlx::PgPool;

#[sqlx::test]
async fn test_update_success(pool: PgPool) {
    common::insert_record(&pool, "https://old.example", "upd001").await;
    let (server, cache) = common::make_server(pool.clone());

    // Warm the redirect index with the old target.
    server.get("/shorten/upd001").await;

    let response = server
        .put("/shorten/upd001")
        .json(&json!({ "url": "https://new.example" }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["shortcode"], "upd001");
    assert_eq!(body["shortened_url"], "https://new.example");

    assert_eq!(
        cache.peek(&CacheKey::redirect("upd001")).await,
        Some("https://new.example".to_string())
    );

    let redirect = server.get("/shorten/upd001").await;
    assert_eq!(redirect.header("location"), "https://new.example");
}

#[sqlx::test]
async fn test_update_invalidates_old_dedup_entry(pool: PgPool) {
    let (server, cache) = common::make_server(pool);

    let created = server
        .post("/shorten")
        .json(&json!({ "url": "https://old.example" }))
        .await
        .json::<Value>();
    let code = created["shortcode"].as_str().unwrap();
    assert!(cache.peek(&CacheKey::dedup("https://old.example")).await.is_some());

    server
        .put(&format!("/shorten/{}", code))
        .json(&json!({ "url": "https://new.example" }))
        .await
        .assert_status_ok();

    assert!(cache.peek(&CacheKey::dedup("https://old.example")).await.is_none());
}

#[sqlx::test]
async fn test_update_not_found(pool: PgPool) {
    let (server, _cache) = common::make_server(pool.clone());

    let response = server
        .put("/shorten/nope00")
        .json(&json!({ "url": "https://new.example" }))
        .await;

    response.assert_status_not_found();
    assert_eq!(common::record_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_update_invalid_url(pool: PgPool) {
    common::insert_record(&pool, "https://old.example", "upd001").await;
    let (server, _cache) = common::make_server(pool.clone());

    let response = server
        .put("/shorten/upd001")
        .json(&json!({ "url": "nope" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        common::stored_url(&pool, "upd001").await.as_deref(),
        Some("https://old.example")
    );
}

#[sqlx::test]
async fn test_update_rejects_javascript_url(pool: PgPool) {
    common::insert_record(&pool, "https://old.example", "upd001").await;
    let (server, _cache) = common::make_server(pool.clone());

    server
        .put("/shorten/upd001")
        .json(&json!({ "url": "javascript:alert(1)" }))
        .await
        .assert_status_bad_request();

    let redirect = server.get("/shorten/upd001").await;
    assert_eq!(redirect.header("location"), "https://old.example");
}

#[sqlx::test]
async fn test_delete_success(pool: PgPool) {
    common::insert_record(&pool, "https://example.com", "del001").await;
    let (server, cache) = common::make_server(pool.clone());
    server.get("/shorten/del001").await;

    let response = server.delete("/shorten/del001").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Successfully deleted del001"
    );
    assert_eq!(common::record_count(&pool).await, 0);
    assert!(cache.peek(&CacheKey::redirect("del001")).await.is_none());

    server.get("/shorten/del001").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_delete_unknown_code_still_confirms(pool: PgPool) {
    let (server, _cache) = common::make_server(pool);

    let response = server.delete("/shorten/nope00").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Successfully deleted nope00"
    );
}

#[sqlx::test]
async fn test_recreate_after_delete(pool: PgPool) {
    let (server, _cache) = common::make_server(pool.clone());
    let code = shorten("https://example.com");

    server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .assert_status_ok();
    server
        .delete(&format!("/shorten/{}", code))
        .await
        .assert_status_ok();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["shortcode"], code.as_str());
    assert_eq!(common::record_count(&pool).await, 1);
}

#[sqlx::test]
async fn test_list_all_empty(pool: PgPool) {
    let (server, _cache) = common::make_server(pool);

    let response = server.get("/get_shorten/all").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "urls": [] }));
}

#[sqlx::test]
async fn test_list_all_tracks_mutations(pool: PgPool) {
    let (server, _cache) = common::make_server(pool);

    for url in ["https://a.example", "https://b.example"] {
        server
            .post("/shorten")
            .json(&json!({ "url": url }))
            .await
            .assert_status_ok();
    }
    let code_a = shorten("https://a.example");
    let code_b = shorten("https://b.example");

    server.get("/get_shorten/all").await.assert_json(&json!({
        "urls": [
            { "url": "https://a.example", "shortcode": code_a },
            { "url": "https://b.example", "shortcode": code_b },
        ]
    }));

    server
        .put(&format!("/shorten/{}", code_a))
        .json(&json!({ "url": "https://c.example" }))
        .await
        .assert_status_ok();
    server
        .delete(&format!("/shorten/{}", code_b))
        .await
        .assert_status_ok();

    server.get("/get_shorten/all").await.assert_json(&json!({
        "urls": [
            { "url": "https://c.example", "shortcode": code_a },
        ]
    }));
}

#[sqlx::test]
async fn test_list_all_served_from_snapshot(pool: PgPool) {
    common::insert_record(&pool, "https://example.com", "snap01").await;
    let (server, cache) = common::make_server(pool.clone());

    server.get("/get_shorten/all").await.assert_status_ok();
    assert!(cache.peek(&CacheKey::AllRecords).await.is_some());

    // Rows written behind the service's back are not visible until the
    // snapshot is refreshed by a mutation.
    common::insert_record(&pool, "https://other.example", "snap02").await;
    let body = server.get("/get_shorten/all").await.json::<Value>();
    assert_eq!(body["urls"].as_array().unwrap().len(), 1);
}

#[sqlx::test]
async fn test_stats(pool: PgPool) {
    common::insert_record(&pool, "https://example.com", "stat01").await;
    let (server, _cache) = common::make_server(pool);

    server.get("/shorten/stat01").await;
    server.get("/shorten/stat01").await;

    let response = server.get("/shorten/stat01/stats").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["shortcode"], "stat01");
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["access_count"], 2);
}

#[sqlx::test]
async fn test_stats_not_found(pool: PgPool) {
    let (server, _cache) = common::make_server(pool);

    server.get("/shorten/nope00/stats").await.assert_status_not_found();
}

#[sqlx::test]
async fn test_health(pool: PgPool) {
    let (server, _cache) = common::make_server(pool);

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["database"]["message"], "Connected");
    assert_eq!(body["checks"]["cache"]["message"], "memory connected");
}

#[sqlx::test]
async fn test_full_lifecycle(pool: PgPool) {
    let (server, _cache) = common::make_server(pool.clone());

    let created = server
        .post("/shorten")
        .json(&json!({ "url": "http://a.example" }))
        .await
        .json::<Value>();
    let code = created["shortcode"].as_str().unwrap().to_string();
    assert_eq!(code, shorten("http://a.example"));

    let redirect = server.get(&format!("/shorten/{}", code)).await;
    assert_eq!(redirect.header("location"), "http://a.example");
    assert_eq!(common::access_count(&pool, &code).await, 1);

    server
        .put(&format!("/shorten/{}", code))
        .json(&json!({ "url": "http://b.example" }))
        .await
        .assert_status_ok();

    let redirect = server.get(&format!("/shorten/{}", code)).await;
    assert_eq!(redirect.header("location"), "http://b.example");
    assert_eq!(common::access_count(&pool, &code).await, 2);

    server
        .delete(&format!("/shorten/{}", code))
        .await
        .assert_status_ok();

    server
        .get(&format!("/shorten/{}", code))
        .await
        .assert_status_not_found();
    server
        .get("/get_shorten/all")
        .await
        .assert_json(&json!({ "urls": [] }));
}
