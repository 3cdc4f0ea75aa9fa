mod common;

use axum_test::TestServer;
use serde_json::{Value, json};
use shardlink::routes::app_router;

use common::MockConnectInfoLayer;

fn test_server(state: shardlink::AppState) -> TestServer {
    let app = app_router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_follows_seeded_mapping() {
    let ctx = common::test_context();
    let server = test_server(ctx.state.clone());

    ctx.shard_a.seed(3, "abc12345", "https://example.com/target");

    let response = server.get("/abc12345").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_unknown_code_is_404() {
    let ctx = common::test_context();
    let server = test_server(ctx.state.clone());

    let response = server.get("/nosuch00").await;

    response.assert_status_not_found();

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_repopulates_cache_after_shard_hit() {
    let ctx = common::test_context();
    let server = test_server(ctx.state.clone());

    ctx.shard_b.seed(2, "cacheme1", "https://example.com/a");
    assert_eq!(ctx.cache.get("cacheme1"), None);

    let response = server.get("/cacheme1").await;
    assert_eq!(response.status_code(), 307);

    assert_eq!(ctx.cache.get("cacheme1"), Some("https://example.com/a".to_string()));
}

#[tokio::test]
async fn test_redirect_click_from_cache_has_null_url_id() {
    let mut ctx = common::test_context();
    let server = test_server(ctx.state.clone());

    ctx.cache.seed("fromcach", "https://example.com/cached");

    let response = server.get("/fromcach").await;
    assert_eq!(response.status_code(), 307);

    // Served entirely from cache: no shard was consulted and the row id is
    // unknown.
    assert_eq!(ctx.shard_a.find_call_count(), 0);
    assert_eq!(ctx.shard_b.find_call_count(), 0);

    let event = ctx.clicks.try_recv().unwrap();
    assert_eq!(event.code, "fromcach");
    assert_eq!(event.url_id, None);
}

#[tokio::test]
async fn test_redirect_click_from_shard_carries_url_id() {
    let mut ctx = common::test_context();
    let server = test_server(ctx.state.clone());

    let row = ctx.shard_a.seed(5, "fromshar", "https://example.com/x");

    let response = server
        .get("/fromshar")
        .add_header("User-Agent", "TestBot/1.0")
        .await;
    assert_eq!(response.status_code(), 307);

    let event = ctx.clicks.try_recv().unwrap();
    assert_eq!(event.code, "fromshar");
    assert_eq!(event.url_id, Some(row.id));
    assert_eq!(event.user_agent, Some("TestBot/1.0".to_string()));
    assert!(event.ip.is_some());
}

#[tokio::test]
async fn test_redirect_fanout_stops_at_first_holding_shard() {
    let ctx = common::test_context();
    let server = test_server(ctx.state.clone());

    ctx.shard_a.seed(1, "onfirst0", "https://example.com");

    let response = server.get("/onfirst0").await;
    assert_eq!(response.status_code(), 307);

    assert_eq!(ctx.shard_a.find_call_count(), 1);
    assert_eq!(ctx.shard_b.find_call_count(), 0);
}

#[tokio::test]
async fn test_redirect_shard_outage_is_503_not_404() {
    let ctx = common::test_context();
    let server = test_server(ctx.state.clone());

    ctx.shard_a.set_fail_reads(true);
    ctx.shard_b.set_fail_reads(true);

    let response = server.get("/anycode1").await;

    assert_eq!(response.status_code(), 503);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "backend_error");
}

#[tokio::test]
async fn test_redirect_survives_shard_outage_within_cache_ttl() {
    let ctx = common::test_context();
    let server = test_server(ctx.state.clone());

    // Create a link, then take every shard down. The primed cache entry
    // keeps the redirect working.
    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/durable" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let code = body["code"].as_str().unwrap().to_string();

    ctx.shard_a.set_fail_reads(true);
    ctx.shard_b.set_fail_reads(true);

    let response = server.get(&format!("/{}", code)).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/durable");
}

#[tokio::test]
async fn test_redirect_falls_back_to_shards_when_cache_is_cold() {
    let ctx = common::test_context();
    let server = test_server(ctx.state.clone());

    let response = server
        .post("/shorten")
        .add_header("x-user-id", "8")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let code = body["code"].as_str().unwrap().to_string();

    // Simulate cache expiry.
    ctx.cache.clear();

    let response = server.get(&format!("/{}", code)).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/page");
    // Owner 8 is even, so the read was served by shard B.
    assert!(ctx.shard_b.find_call_count() >= 1);
}
