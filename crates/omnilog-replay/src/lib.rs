//! Replays YAML scripts of lifecycle calls through an `OmniLog` engine.
//!
//! Useful for checking what a UI journey will emit without running the UI.

pub mod config;
pub mod error;
pub mod runner;
pub mod script;
