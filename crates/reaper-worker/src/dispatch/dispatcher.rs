//! Action dispatcher
//!
//! Executes a routing decision against the external capabilities. Each decision
//! produces at most one delete call or at most one publish call, never both.
//! Failures are reported in the outcome and never retried.

use reaper_core::{
    DeferredDeletionRequest, DispatchError, IgnoreReason, MessageDeleter, MessageRef,
    PayloadPublisher, PortResult, RoutingDecision,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Result of dispatching a single decision
#[derive(Debug)]
pub enum DispatchOutcome {
    /// No side effect was attempted
    Ignored(IgnoreReason),
    /// The message was deleted
    Deleted(MessageRef),
    /// A deferred deletion request was published
    Scheduled(DeferredDeletionRequest),
    /// A side effect was attempted and did not complete
    Failed(DispatchError),
}

/// Dispatches routing decisions to the delete and publish capabilities
#[derive(Clone)]
pub struct Dispatcher {
    deleter: Arc<dyn MessageDeleter>,
    publisher: Arc<dyn PayloadPublisher>,
    deferred_channel: String,
    call_timeout: Option<Duration>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("deferred_channel", &self.deferred_channel)
            .field("call_timeout", &self.call_timeout)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Create a dispatcher publishing deferred deletions to `deferred_channel`
    pub fn new(
        deleter: Arc<dyn MessageDeleter>,
        publisher: Arc<dyn PayloadPublisher>,
        deferred_channel: impl Into<String>,
    ) -> Self {
        Self {
            deleter,
            publisher,
            deferred_channel: deferred_channel.into(),
            call_timeout: None,
        }
    }

    /// Bound every delete and publish call; `None` leaves them unbounded
    #[must_use]
    pub fn with_call_timeout(mut self, call_timeout: Option<Duration>) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Channel deferred deletion requests are published to
    #[must_use]
    pub fn deferred_channel(&self) -> &str {
        &self.deferred_channel
    }

    /// Execute a routing decision
    pub async fn dispatch(&self, decision: RoutingDecision) -> DispatchOutcome {
        match decision {
            RoutingDecision::Ignore(reason) => {
                tracing::debug!(reason = %reason, "Ignoring event");
                DispatchOutcome::Ignored(reason)
            }
            RoutingDecision::DeleteNow(target) => self.delete_now(target).await,
            RoutingDecision::ScheduleDelete { target, ttl } => self.schedule(&target, ttl).await,
        }
    }

    async fn delete_now(&self, target: MessageRef) -> DispatchOutcome {
        let result = self
            .bounded("delete", self.deleter.delete_message(&target))
            .await
            .and_then(|res| {
                res.map_err(|source| DispatchError::DeleteFailed {
                    target: target.clone(),
                    source,
                })
            });

        match result {
            Ok(()) => {
                tracing::info!(
                    channel = %target.channel,
                    ts = %target.ts,
                    "Message deleted"
                );
                DispatchOutcome::Deleted(target)
            }
            Err(e) => Self::failed(e),
        }
    }

    async fn schedule(&self, target: &MessageRef, ttl: u64) -> DispatchOutcome {
        let request = DeferredDeletionRequest::new(target, ttl);
        let payload = match request.to_json() {
            Ok(payload) => payload,
            Err(e) => return Self::failed(DispatchError::Serialize(e)),
        };

        let result = self
            .bounded(
                "publish",
                self.publisher.publish(&self.deferred_channel, &payload),
            )
            .await
            .and_then(|res| {
                res.map_err(|source| DispatchError::PublishFailed {
                    channel: self.deferred_channel.clone(),
                    source,
                })
            });

        match result {
            Ok(()) => {
                tracing::info!(
                    channel = %request.channel,
                    ts = %request.ts,
                    ttl = request.ttl,
                    deferred_channel = %self.deferred_channel,
                    "Message scheduled for deletion"
                );
                DispatchOutcome::Scheduled(request)
            }
            Err(e) => Self::failed(e),
        }
    }

    /// Await a capability call, applying the call timeout if one is set
    async fn bounded<F>(&self, action: &'static str, call: F) -> Result<PortResult<()>, DispatchError>
    where
        F: Future<Output = PortResult<()>>,
    {
        match self.call_timeout {
            Some(after) => tokio::time::timeout(after, call)
                .await
                .map_err(|_| DispatchError::TimedOut { action, after }),
            None => Ok(call.await),
        }
    }

    fn failed(err: DispatchError) -> DispatchOutcome {
        tracing::error!(error = %err, code = err.code(), "Dispatch failed");
        DispatchOutcome::Failed(err)
    }
}
