//! Redis Pub/Sub module.
//!
//! Inbound subscription for reaction events and outbound publishing of
//! deferred deletion requests.

mod publisher;
mod subscriber;

pub use publisher::Publisher;
pub use subscriber::{
    PayloadStream, Subscriber, SubscriberBuilder, SubscriberConfig, SubscriberError,
    SubscriberHandle, SubscriberResult,
};
