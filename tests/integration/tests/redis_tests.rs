//! Redis Integration Tests
//!
//! These tests require:
//! - Running Redis instance
//! - Environment variable: REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test redis_tests

use std::time::Duration;

use futures_util::StreamExt;
use integration_tests::{check_test_env, fixtures::*, redis_url, test_config};
use reaper_cache::{Publisher, RedisPool, RedisPoolConfig, SubscriberBuilder};
use reaper_core::DeferredDeletionRequest;
use reaper_worker::relay::LoopExit;
use reaper_worker::server::{connect_subscriber, create_worker_state};
use reaper_worker::shutdown::cancellation;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

fn publisher() -> Publisher {
    let pool = RedisPool::new(RedisPoolConfig {
        url: redis_url().unwrap_or_default(),
        max_connections: 2,
        ..RedisPoolConfig::default()
    })
    .expect("Failed to create pool");
    Publisher::new(pool)
}

// ============================================================================
// Pub/Sub
// ============================================================================

#[tokio::test]
async fn test_publish_reaches_subscriber() {
    if !check_test_env().await {
        return;
    }

    let channel = format!("reaper-test-{}", unique_suffix());
    let subscriber = SubscriberBuilder::new()
        .redis_url(redis_url().unwrap_or_default())
        .subscribe(&channel)
        .connect()
        .await
        .expect("Failed to subscribe");
    let (handle, mut payloads) = subscriber.into_parts();

    let receivers = publisher()
        .publish(&channel, "hello")
        .await
        .expect("Failed to publish");
    assert_eq!(receivers, 1);

    let received = tokio::time::timeout(RECEIVE_TIMEOUT, payloads.next())
        .await
        .expect("Timed out waiting for payload");
    assert_eq!(received.as_deref(), Some("hello"));

    handle.shutdown().await.unwrap();
    let ended = tokio::time::timeout(RECEIVE_TIMEOUT, payloads.next())
        .await
        .expect("Stream did not end after shutdown");
    assert_eq!(ended, None);
}

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let pool = RedisPool::connect(RedisPoolConfig {
        url: redis_url().unwrap_or_default(),
        max_connections: 1,
        ..RedisPoolConfig::default()
    })
    .await
    .expect("PING failed");
    assert_eq!(pool.status().size, 1);
}

// ============================================================================
// Worker
// ============================================================================

#[tokio::test]
async fn test_worker_relays_bomb_to_timebomb_channel() {
    if !check_test_env().await {
        return;
    }

    let slack = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat.delete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&slack)
        .await;

    let suffix = unique_suffix();
    let mut config = test_config(&redis_url().unwrap_or_default(), &slack.uri()).unwrap();
    config.channels.reactions = format!("reaper-test-reactions-{suffix}");
    config.channels.timebomb = format!("reaper-test-timebomb-{suffix}");

    // Listen where deferred deletions land
    let (timebomb_handle, mut timebomb) = SubscriberBuilder::new()
        .redis_url(&config.redis.url)
        .subscribe(&config.channels.timebomb)
        .connect()
        .await
        .expect("Failed to subscribe to timebomb channel")
        .into_parts();

    let state = create_worker_state(config.clone())
        .await
        .expect("Failed to create worker state");
    let (inbound_handle, inbound) = connect_subscriber(&config)
        .await
        .expect("Failed to subscribe to reactions")
        .into_parts();

    let (cancel_tx, cancel_rx) = cancellation();
    let mut dispatch_loop = state.dispatch_loop();
    let worker = tokio::spawn(async move { dispatch_loop.run(inbound, cancel_rx).await });

    let publisher = publisher();
    publisher
        .publish(
            &config.channels.reactions,
            &ReactionPayload::reaction("bomb").to_json(),
        )
        .await
        .unwrap();
    publisher
        .publish(
            &config.channels.reactions,
            &ReactionPayload::reaction("wastebasket").to_json(),
        )
        .await
        .unwrap();

    let payload = tokio::time::timeout(RECEIVE_TIMEOUT, timebomb.next())
        .await
        .expect("Timed out waiting for deferred deletion")
        .expect("Timebomb stream ended");
    let request = DeferredDeletionRequest::from_json(&payload).unwrap();
    assert_eq!(request.channel, CHANNEL);
    assert_eq!(request.ts, TS);
    assert_eq!(request.ttl, 5);

    // Give the wastebasket event time to reach the mock
    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel_tx.send_replace(true);

    let report = worker.await.unwrap();
    assert_eq!(report.exit, LoopExit::Cancelled);
    assert_eq!(report.counters.scheduled, 1);
    assert_eq!(report.counters.deleted, 1);

    inbound_handle.shutdown().await.ok();
    timebomb_handle.shutdown().await.ok();
    slack.verify().await;
}

#[tokio::test]
async fn test_unreachable_redis_fails_startup() {
    let slack = MockServer::start().await;
    let config = test_config("redis://127.0.0.1:1", &slack.uri()).unwrap();

    let err = create_worker_state(config)
        .await
        .expect_err("startup must fail without Redis");
    assert_eq!(err.error_code(), "CACHE_ERROR");
}
