//! Card instances - runtime card state.
//!
//! A `CardInstance` is a specific card in a specific match. It tracks the
//! mutable state the rules engine cares about: zone, tap state, accumulated
//! combat damage, summoning sickness, and per-instance stat overrides.
//!
//! Zone membership is mutated only through
//! [`GameState::move_card`](crate::core::GameState::move_card); nothing else
//! may touch `zone` directly, which is what keeps the one-card-one-zone
//! invariant airtight.

use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::zones::Zone;

use super::template::CardId;

/// A card instance in a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique instance ID, monotonic within the match.
    pub instance_id: InstanceId,

    /// The template this instance was created from.
    pub card_id: CardId,

    /// Owning player. Ownership never changes.
    pub owner: PlayerId,

    /// Current zone. Mutated only by `GameState::move_card`.
    pub zone: Zone,

    /// Tapped (has been used this turn).
    pub tapped: bool,

    /// Face-down (hidden information; the engine carries the flag, the
    /// presentation layer gives it meaning).
    pub face_down: bool,

    /// Combat damage accumulated during the current combat step.
    pub damage: i64,

    /// Turn this card entered its current board row (summoning sickness).
    pub entered_turn: u32,

    /// Has this card attacked this turn?
    pub attacked_this_turn: bool,

    /// Instance-level power override (e.g. from a resolver effect).
    pub power_override: Option<i64>,

    /// Instance-level guard override.
    pub guard_override: Option<i64>,
}

impl CardInstance {
    /// Create an instance with zero-initialized mutable state.
    #[must_use]
    pub fn new(instance_id: InstanceId, card_id: CardId, owner: PlayerId, zone: Zone) -> Self {
        Self {
            instance_id,
            card_id,
            owner,
            zone,
            tapped: false,
            face_down: false,
            damage: 0,
            entered_turn: 0,
            attacked_this_turn: false,
            power_override: None,
            guard_override: None,
        }
    }

    /// Tap the card. Idempotent.
    pub fn tap(&mut self) {
        self.tapped = true;
    }

    /// Untap the card. Idempotent.
    pub fn untap(&mut self) {
        self.tapped = false;
    }

    /// Did this card enter its row on the given turn (summoning sickness)?
    #[must_use]
    pub fn is_summoning_sick(&self, current_turn: u32) -> bool {
        self.entered_turn == current_turn
    }

    /// Clear state that does not survive a zone change.
    pub fn clear_transient(&mut self) {
        self.tapped = false;
        self.face_down = false;
        self.damage = 0;
        self.attacked_this_turn = false;
        self.power_override = None;
        self.guard_override = None;
    }
}
