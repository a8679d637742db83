//! Dispatch loop
//!
//! Waits for the next inbound payload or the cancellation signal, whichever
//! comes first. Cancellation is only observed between events: a payload that
//! has started processing always finishes before the loop stops.

use crate::dispatch::{DispatchOutcome, Dispatcher};
use futures_util::{Stream, StreamExt};
use reaper_core::{decode, Classifier};
use tokio::sync::watch;

/// Loop lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The cancellation signal fired or its sender went away
    Cancelled,
    /// The inbound stream ended
    InboundClosed,
}

/// Per-outcome counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopCounters {
    pub received: u64,
    pub decode_errors: u64,
    pub ignored: u64,
    pub deleted: u64,
    pub scheduled: u64,
    pub failed: u64,
}

impl LoopCounters {
    fn record(&mut self, outcome: Option<&DispatchOutcome>) {
        match outcome {
            None => self.decode_errors += 1,
            Some(DispatchOutcome::Ignored(_)) => self.ignored += 1,
            Some(DispatchOutcome::Deleted(_)) => self.deleted += 1,
            Some(DispatchOutcome::Scheduled(_)) => self.scheduled += 1,
            Some(DispatchOutcome::Failed(_)) => self.failed += 1,
        }
    }
}

/// Summary returned when the loop stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub exit: LoopExit,
    pub counters: LoopCounters,
}

/// Single-worker loop: decode, classify, dispatch
#[derive(Debug)]
pub struct DispatchLoop {
    classifier: Classifier,
    dispatcher: Dispatcher,
    state: LoopState,
}

impl DispatchLoop {
    pub fn new(classifier: Classifier, dispatcher: Dispatcher) -> Self {
        Self {
            classifier,
            dispatcher,
            state: LoopState::Stopped,
        }
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Process one raw payload.
    ///
    /// Returns `None` when the payload could not be decoded.
    pub async fn handle_payload(&self, raw: &str) -> Option<DispatchOutcome> {
        let event = match decode(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(error = %e, bytes = raw.len(), "Failed to decode payload");
                return None;
            }
        };

        tracing::trace!(
            kind = %event.kind,
            reaction = %event.reaction,
            user = %event.user,
            "Decoded event"
        );

        let decision = self.classifier.classify(&event);
        Some(self.dispatcher.dispatch(decision).await)
    }

    /// Run until cancellation or until `inbound` ends.
    ///
    /// A dropped cancellation sender counts as cancellation.
    pub async fn run<S>(&mut self, inbound: S, mut cancel: watch::Receiver<bool>) -> LoopReport
    where
        S: Stream<Item = String>,
    {
        let mut inbound = std::pin::pin!(inbound);
        let mut counters = LoopCounters::default();

        self.state = LoopState::Running;
        tracing::info!(
            default_ttl = self.classifier.default_ttl(),
            deferred_channel = %self.dispatcher.deferred_channel(),
            "Dispatch loop started"
        );

        let exit = if *cancel.borrow_and_update() {
            LoopExit::Cancelled
        } else {
            loop {
                tokio::select! {
                    biased;

                    changed = cancel.changed() => {
                        if changed.is_err() || *cancel.borrow_and_update() {
                            break LoopExit::Cancelled;
                        }
                    }

                    next = inbound.next() => {
                        let Some(raw) = next else {
                            break LoopExit::InboundClosed;
                        };

                        counters.received += 1;
                        let outcome = self.handle_payload(&raw).await;
                        counters.record(outcome.as_ref());
                    }
                }
            }
        };

        self.state = LoopState::Stopped;
        tracing::info!(
            exit = ?exit,
            received = counters.received,
            decode_errors = counters.decode_errors,
            ignored = counters.ignored,
            deleted = counters.deleted,
            scheduled = counters.scheduled,
            failed = counters.failed,
            "Dispatch loop stopped"
        );

        LoopReport { exit, counters }
    }
}
