//! # reaper-worker
//!
//! Consumes reaction events from Redis Pub/Sub and acts on them: deletes the
//! reacted-to message right away, or hands it to the time bomb channel for
//! deferred deletion.

pub mod dispatch;
pub mod relay;
pub mod server;
pub mod shutdown;
