//! Shared abstractions for the OmniLog crates.
//!
//! This crate defines the data model handed across the engine boundary
//! (event sources, routing descriptors, event records) and the seams the
//! engine depends on (clock, id generation, event sink). It contains no
//! context-tracking logic.

pub mod clock;
pub mod error;
pub mod event;
pub mod ids;
pub mod routing;
pub mod sink;
pub mod source;
