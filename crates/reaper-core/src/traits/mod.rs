//! Capability traits (ports) - the outbound actions the dispatcher may take

mod capabilities;

pub use capabilities::{MessageDeleter, PayloadPublisher, PortResult};
