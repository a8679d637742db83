//! Action dispatch
//!
//! Turns routing decisions into at most one external side effect.

mod dispatcher;


pub use dispatcher::{DispatchOutcome, Dispatcher};
