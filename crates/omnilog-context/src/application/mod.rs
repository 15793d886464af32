//! Lifecycle operations and event assembly.

pub mod capabilities;
pub(crate) mod envelope;
pub mod omnilog;
