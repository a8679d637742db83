//! Worker state
//!
//! Shared dependencies built once at startup.

use crate::dispatch::Dispatcher;
use crate::relay::DispatchLoop;
use reaper_common::AppConfig;
use reaper_core::Classifier;
use std::sync::Arc;

/// Worker application state
#[derive(Clone)]
pub struct WorkerState {
    /// Classifier configured with the default TTL
    classifier: Classifier,
    /// Dispatcher wired to Slack and Redis
    dispatcher: Dispatcher,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl WorkerState {
    /// Create a new worker state
    pub fn new(classifier: Classifier, dispatcher: Dispatcher, config: AppConfig) -> Self {
        Self {
            classifier,
            dispatcher,
            config: Arc::new(config),
        }
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build a dispatch loop from this state
    pub fn dispatch_loop(&self) -> DispatchLoop {
        DispatchLoop::new(self.classifier, self.dispatcher.clone())
    }
}

impl std::fmt::Debug for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerState")
            .field("classifier", &self.classifier)
            .field("dispatcher", &self.dispatcher)
            .field("config", &"AppConfig")
            .finish()
    }
}
