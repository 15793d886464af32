//! Context state, per-call options and the event name catalog.

pub mod context;
pub mod names;
pub mod options;
