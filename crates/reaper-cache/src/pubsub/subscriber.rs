//! Redis Pub/Sub subscriber.
//!
//! Subscribes to the inbound channels and forwards payloads, in receipt order,
//! to a single consumer.

use futures_util::{Stream, StreamExt};
use redis::aio::PubSub;
use redis::Client;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::mpsc;

/// Error type for subscriber operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("No channels to subscribe to")]
    NoChannels,

    #[error("Channel closed")]
    ChannelClosed,
}

/// Result type for subscriber operations
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Payloads buffered between the listener and the consumer
    pub buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            buffer: 256,
            reconnect_delay_ms: 1000,
        }
    }
}

/// Commands for the background listener
#[derive(Debug)]
enum SubscriberCommand {
    Shutdown,
}

/// Why a forwarding session ended
enum SessionEnd {
    Shutdown,
    StreamEnded,
}

/// Redis Pub/Sub subscriber
pub struct Subscriber {
    handle: SubscriberHandle,
    payloads: PayloadStream,
}

/// Control side of a running subscriber
#[derive(Debug, Clone)]
pub struct SubscriberHandle {
    channels: Vec<String>,
    control_tx: mpsc::Sender<SubscriberCommand>,
}

/// Stream of inbound payloads, in receipt order.
///
/// Ends when the subscriber shuts down.
#[derive(Debug)]
pub struct PayloadStream {
    rx: mpsc::Receiver<String>,
}

impl Stream for PayloadStream {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.rx.poll_recv(cx)
    }
}

impl Subscriber {
    /// Connect, subscribe, and start the background listener.
    ///
    /// The first connection is made here so that an unreachable server fails
    /// startup. Later connection losses are retried in the background.
    pub async fn connect(config: SubscriberConfig, channels: Vec<String>) -> SubscriberResult<Self> {
        if channels.is_empty() {
            return Err(SubscriberError::NoChannels);
        }

        let client = Client::open(config.redis_url.as_str())?;
        let pubsub = Self::open(&client, &channels).await?;

        let (payload_tx, payload_rx) = mpsc::channel(config.buffer.max(1));
        let (control_tx, control_rx) = mpsc::channel(4);

        tokio::spawn(Self::listener_loop(
            client,
            pubsub,
            channels.clone(),
            Duration::from_millis(config.reconnect_delay_ms),
            payload_tx,
            control_rx,
        ));

        Ok(Self {
            handle: SubscriberHandle {
                channels,
                control_tx,
            },
            payloads: PayloadStream { rx: payload_rx },
        })
    }

    /// Open a connection and subscribe to every channel
    async fn open(client: &Client, channels: &[String]) -> SubscriberResult<PubSub> {
        let mut pubsub = client.get_async_pubsub().await?;
        for channel in channels {
            pubsub.subscribe(channel).await?;
            tracing::info!(channel = %channel, "Subscribed to channel");
        }
        Ok(pubsub)
    }

    /// Background listener loop
    async fn listener_loop(
        client: Client,
        initial: PubSub,
        channels: Vec<String>,
        reconnect_delay: Duration,
        payload_tx: mpsc::Sender<String>,
        mut control_rx: mpsc::Receiver<SubscriberCommand>,
    ) {
        let mut pending = Some(initial);

        loop {
            let pubsub = match pending.take() {
                Some(pubsub) => pubsub,
                None => match Self::open(&client, &channels).await {
                    Ok(pubsub) => {
                        tracing::info!("Subscriber reconnected to Redis");
                        pubsub
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Subscriber error, reconnecting...");
                        if Self::wait_or_shutdown(reconnect_delay, &mut control_rx).await {
                            break;
                        }
                        continue;
                    }
                },
            };

            match Self::forward(pubsub, &payload_tx, &mut control_rx).await {
                SessionEnd::Shutdown => break,
                SessionEnd::StreamEnded => {
                    tracing::warn!("Pub/Sub stream ended, reconnecting...");
                    if Self::wait_or_shutdown(reconnect_delay, &mut control_rx).await {
                        break;
                    }
                }
            }
        }

        tracing::info!("Subscriber shutting down");
    }

    /// Forward messages until the stream ends or shutdown is requested
    async fn forward(
        pubsub: PubSub,
        payload_tx: &mpsc::Sender<String>,
        control_rx: &mut mpsc::Receiver<SubscriberCommand>,
    ) -> SessionEnd {
        let mut stream = Box::pin(pubsub.into_on_message());

        loop {
            tokio::select! {
                msg = stream.next() => {
                    let Some(msg) = msg else {
                        return SessionEnd::StreamEnded;
                    };

                    // Non-UTF-8 payloads become empty and are rejected by the decoder
                    let payload: String = msg.get_payload().unwrap_or_default();

                    tracing::trace!(
                        channel = %msg.get_channel_name(),
                        bytes = payload.len(),
                        "Received Pub/Sub message"
                    );

                    if payload_tx.send(payload).await.is_err() {
                        // Consumer is gone
                        return SessionEnd::Shutdown;
                    }
                }

                cmd = control_rx.recv() => {
                    match cmd {
                        Some(SubscriberCommand::Shutdown) => return SessionEnd::Shutdown,
                        None => {
                            tracing::debug!("Control channel closed");
                            return SessionEnd::Shutdown;
                        }
                    }
                }
            }
        }
    }

    /// Sleep for the reconnect delay; true if shutdown was requested meanwhile
    async fn wait_or_shutdown(
        delay: Duration,
        control_rx: &mut mpsc::Receiver<SubscriberCommand>,
    ) -> bool {
        tokio::select! {
            () = tokio::time::sleep(delay) => false,
            _ = control_rx.recv() => true,
        }
    }

    /// Split into the control handle and the payload stream
    #[must_use]
    pub fn into_parts(self) -> (SubscriberHandle, PayloadStream) {
        (self.handle, self.payloads)
    }

    /// Channels this subscriber listens on
    #[must_use]
    pub fn channels(&self) -> &[String] {
        self.handle.channels()
    }
}

impl SubscriberHandle {
    /// Channels the subscriber listens on
    #[must_use]
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Stop the background listener; the payload stream ends afterwards
    pub async fn shutdown(&self) -> SubscriberResult<()> {
        self.control_tx
            .send(SubscriberCommand::Shutdown)
            .await
            .map_err(|_| SubscriberError::ChannelClosed)
    }
}

/// Builder for subscriber
#[derive(Debug, Default)]
pub struct SubscriberBuilder {
    config: SubscriberConfig,
    channels: Vec<String>,
}

impl SubscriberBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set Redis URL
    #[must_use]
    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.config.redis_url = url.into();
        self
    }

    /// Set payload buffer size
    #[must_use]
    pub fn buffer(mut self, size: usize) -> Self {
        self.config.buffer = size;
        self
    }

    /// Set reconnection delay
    #[must_use]
    pub fn reconnect_delay_ms(mut self, delay: u64) -> Self {
        self.config.reconnect_delay_ms = delay;
        self
    }

    /// Add a channel subscription
    #[must_use]
    pub fn subscribe(mut self, channel: impl Into<String>) -> Self {
        self.channels.push(channel.into());
        self
    }

    /// Connect and start the subscriber
    pub async fn connect(self) -> SubscriberResult<Subscriber> {
        Subscriber::connect(self.config, self.channels).await
    }
}
