//! Card instance identification.
//!
//! Every card instance created during a match gets a unique `InstanceId`,
//! assigned monotonically by `GameState`. IDs are stable for the lifetime
//! of the match, which keeps externally recorded replays deterministic.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within a match.
///
/// Assigned monotonically starting from 0. Never reused, even after the
/// card leaves play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}
