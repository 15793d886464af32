//! Event sink implementations for OmniLog.
//!
//! Transport to a real collector lives outside this workspace. These sinks
//! cover the two in-process hand-offs: writing records to the tracing log,
//! and queueing them for an async consumer.

pub mod channel_sink;
pub mod tracing_sink;

pub use channel_sink::ChannelSink;
pub use tracing_sink::TracingSink;
