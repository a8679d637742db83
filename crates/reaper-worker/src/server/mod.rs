//! Worker setup
//!
//! Wires configuration, Redis and Slack into a running dispatch loop.

mod state;

pub use state::WorkerState;

use crate::dispatch::Dispatcher;
use crate::relay::LoopReport;
use crate::shutdown::{cancel_on_signal, cancellation, ShutdownSignals};
use reaper_cache::{Publisher, RedisPool, Subscriber, SubscriberConfig};
use reaper_common::{AppConfig, AppError, AppResult};
use reaper_core::Classifier;
use reaper_slack::SlackClient;
use std::sync::Arc;

/// Initialize all dependencies and create `WorkerState`
pub async fn create_worker_state(config: AppConfig) -> AppResult<WorkerState> {
    // Create Redis pool
    tracing::info!(url = %config.redis.redacted_url(), "Connecting to Redis...");
    let redis_pool = RedisPool::connect_with(&config.redis)
        .await
        .map_err(|e| AppError::cache(format!("Redis is unreachable: {e}")))?;

    // Create Slack client
    let slack = SlackClient::from_config(&config.slack);
    tracing::info!(api_base_url = %config.slack.api_base_url, "Slack client ready");

    // The publisher owns the pool from here on
    let publisher = Publisher::new(redis_pool);

    let dispatcher = Dispatcher::new(
        Arc::new(slack),
        Arc::new(publisher),
        config.channels.timebomb.clone(),
    )
    .with_call_timeout(config.relay.dispatch_timeout);

    let classifier = Classifier::new(config.relay.default_ttl_seconds);

    Ok(WorkerState::new(classifier, dispatcher, config))
}

/// Subscribe to the inbound reaction channel
pub async fn connect_subscriber(config: &AppConfig) -> AppResult<Subscriber> {
    let subscriber_config = SubscriberConfig {
        redis_url: config.redis.url.clone(),
        reconnect_delay_ms: config.relay.reconnect_delay_ms,
        ..Default::default()
    };

    Subscriber::connect(subscriber_config, vec![config.channels.reactions.clone()])
        .await
        .map_err(|e| AppError::cache(format!("Failed to subscribe: {e}")))
}

/// Run the worker until a shutdown signal arrives or the inbound stream ends
pub async fn run(config: AppConfig) -> AppResult<LoopReport> {
    let state = create_worker_state(config).await?;

    let subscriber = connect_subscriber(state.config()).await?;
    let (handle, payloads) = subscriber.into_parts();

    let signals = ShutdownSignals::install().map_err(|e| {
        tracing::error!(error = %e, "Failed to install signal handlers");
        AppError::internal(e)
    })?;
    let (cancel_tx, cancel_rx) = cancellation();
    let signal_task = cancel_on_signal(signals, cancel_tx);

    let mut dispatch_loop = state.dispatch_loop();
    let report = dispatch_loop.run(payloads, cancel_rx).await;

    signal_task.abort();
    if let Err(e) = handle.shutdown().await {
        // Listener already stopped on its own
        tracing::debug!(error = %e, "Subscriber was already stopped");
    }

    Ok(report)
}
