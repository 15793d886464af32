//! Error types for the OmniLog crates.
//!
//! Lifecycle calls never fail. The only fallible surface is engine
//! construction.

use thiserror::Error;

/// Top-level OmniLog error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OmniLogError {
    /// The engine was built without an event sink.
    #[error("an event sink is required to build the logger")]
    MissingSink,
}
