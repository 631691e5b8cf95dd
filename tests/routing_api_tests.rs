/// Wire-contract tests for the delegated routing endpoint
/// Drives the assembled router in-process, no sockets or sleeps involved
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Duration, Utc};
use polaris_router::api::routing::ProvidersResponse;
use polaris_router::config::{DirectoryConfig, LoggingConfig, ServerConfig, ServiceConfig};
use polaris_router::context::AppContext;
use polaris_router::directory::ProviderRecord;
use polaris_router::routing_key::RoutingKey;
use polaris_router::server::build_router;
use tower::ServiceExt;

fn test_context() -> AppContext {
    AppContext::new(ServerConfig {
        service: ServiceConfig {
            hostname: "localhost".to_string(),
            port: 0,
        },
        directory: DirectoryConfig {
            provider_ttl_secs: 60,
            sweep_interval_secs: 0,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
    })
    .unwrap()
}

fn peer_a() -> ProviderRecord {
    ProviderRecord {
        peer_id: "peerA".to_string(),
        addrs: vec!["/ip4/127.0.0.1/tcp/4001".to_string()],
        protocols: vec![],
    }
}

async fn get(ctx: &AppContext, path: &str) -> (StatusCode, serde_json::Value) {
    let response = build_router(ctx.clone())
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "expected JSON response, got {:?}",
        content_type
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn providers_path(key: &RoutingKey) -> String {
    format!("/routing/v1/providers/{}", key)
}

#[tokio::test]
async fn test_announced_provider_is_served() {
    let ctx = test_context();
    let key = RoutingKey::from_topic("/plebbit/pubsub-repro/1");
    ctx.directory.announce(&key, peer_a());

    let (status, body) = get(&ctx, &providers_path(&key)).await;

    assert_eq!(status, StatusCode::OK);
    let parsed: ProvidersResponse = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(parsed.providers.len(), 1);
    assert_eq!(parsed.providers[0].id, "peerA");
    assert_eq!(
        parsed.providers[0].addrs,
        vec!["/ip4/127.0.0.1/tcp/4001".to_string()]
    );
    assert!(parsed.providers[0].protocols.is_empty());

    // Field names on the wire are capitalized
    assert_eq!(body["Providers"][0]["ID"], "peerA");
}

#[tokio::test]
async fn test_unknown_key_is_a_miss() {
    let ctx = test_context();
    let key = RoutingKey::from_topic("/plebbit/never-announced/1");

    let (status, body) = get(&ctx, &providers_path(&key)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "Providers": [] }));
}

#[tokio::test]
async fn test_malformed_identifier_is_unprocessable() {
    let ctx = test_context();

    let (status, body) = get(&ctx, "/routing/v1/providers/not-a-cid").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, serde_json::json!({ "Providers": [] }));
}

#[tokio::test]
async fn test_expired_announcement_is_not_served() {
    let ctx = test_context();
    let key = RoutingKey::from_topic("/plebbit/pubsub-repro/1");

    // Announced two minutes ago with a one-minute TTL
    ctx.directory.announce_at(
        &key,
        peer_a(),
        Duration::seconds(60),
        Utc::now() - Duration::seconds(120),
    );

    let (status, body) = get(&ctx, &providers_path(&key)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "Providers": [] }));
    // The lookup evicted the stale entry
    assert!(ctx.directory.is_empty());
}

#[tokio::test]
async fn test_reannounce_overwrites_over_http() {
    let ctx = test_context();
    let key = RoutingKey::from_topic("/plebbit/pubsub-repro/1");

    ctx.directory.announce(&key, peer_a());
    ctx.directory.announce(
        &key,
        ProviderRecord {
            peer_id: "peerB".to_string(),
            addrs: vec!["/ip4/10.0.0.2/tcp/4001".to_string()],
            protocols: vec!["/floodsub/1.0.0".to_string()],
        },
    );

    let (status, body) = get(&ctx, &providers_path(&key)).await;

    assert_eq!(status, StatusCode::OK);
    let parsed: ProvidersResponse = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.providers.len(), 1);
    assert_eq!(parsed.providers[0].id, "peerB");
    assert_eq!(
        parsed.providers[0].protocols,
        vec!["/floodsub/1.0.0".to_string()]
    );
}

#[tokio::test]
async fn test_unrelated_paths_fall_through_to_not_found() {
    let ctx = test_context();

    let (status, body) = get(&ctx, "/health").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "message": "not found" }));

    let (status, body) = get(&ctx, "/routing/v1/peers/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "message": "not found" }));
}

#[tokio::test]
async fn test_non_get_method_on_providers_is_unrouted() {
    let ctx = test_context();
    let key = RoutingKey::from_topic("/plebbit/pubsub-repro/1");
    ctx.directory.announce(&key, peer_a());

    let response = build_router(ctx.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(providers_path(&key))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "message": "not found" }));

    // Only GET lookups count
    assert_eq!(ctx.query_count(), 0);
}

#[tokio::test]
async fn test_query_count_tracks_lookup_requests_only() {
    let ctx = test_context();
    let key = RoutingKey::from_topic("/plebbit/pubsub-repro/1");
    ctx.directory.announce(&key, peer_a());

    assert_eq!(ctx.query_count(), 0);

    // Hit
    let (status, _) = get(&ctx, &providers_path(&key)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctx.query_count(), 1);

    // Miss
    let miss = RoutingKey::from_topic("/plebbit/other/1");
    let (status, _) = get(&ctx, &providers_path(&miss)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.query_count(), 2);

    // Invalid identifier
    let (status, _) = get(&ctx, "/routing/v1/providers/not-a-cid").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.query_count(), 3);

    // Unrelated path does not count
    let (status, _) = get(&ctx, "/health").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.query_count(), 3);
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let ctx = test_context();

    // Derive the key for a topic, announce, and discover it over the wire
    let key = RoutingKey::from_topic("/plebbit/pubsub-repro/1");
    ctx.directory.announce(&key, peer_a());

    let (status, body) = get(&ctx, &providers_path(&key)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Providers"][0]["ID"], "peerA");

    // A re-derived key reaches the same entry
    let rederived = RoutingKey::from_topic("/plebbit/pubsub-repro/1");
    let (status, _) = get(&ctx, &providers_path(&rederived)).await;
    assert_eq!(status, StatusCode::OK);

    // A parsed copy of the canonical string also reaches it
    let reparsed = RoutingKey::parse(&key.canonical()).unwrap();
    let (status, _) = get(&ctx, &providers_path(&reparsed)).await;
    assert_eq!(status, StatusCode::OK);
}
