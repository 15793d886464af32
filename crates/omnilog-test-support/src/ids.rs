//! A deterministic `IdGenerator` for tests.

use omnilog_core::ids::IdGenerator;
use uuid::Uuid;

/// Hands out `Uuid::from_u128(start)`, `Uuid::from_u128(start + 1)`, ... so
/// tests can predict every generated id.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Create a generator whose first id is `Uuid::from_u128(start)`.
    #[must_use]
    pub fn starting_at(start: u128) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        let id = Uuid::from_u128(self.next);
        self.next += 1;
        id
    }
}
