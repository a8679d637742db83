//! Reaction relay
//!
//! The dispatch loop that drives inbound payloads through decode, classify and
//! dispatch, one at a time and in receipt order.

mod dispatch_loop;

pub use dispatch_loop::{DispatchLoop, LoopCounters, LoopExit, LoopReport, LoopState};
