//! Shared test doubles for the OmniLog crates.

mod clock;
mod ids;
mod sink;

pub use clock::{FixedClock, SteppingClock};
pub use ids::SequentialIds;
pub use sink::RecordingSink;
