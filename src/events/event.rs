//! Game events.
//!
//! Every externally visible state transition is announced as a `GameEvent`.
//! Events are plain data: they describe what already happened and carry the
//! IDs a subscriber needs to react, never references into the state tree.

use serde::{Deserialize, Serialize};

use crate::core::combat::AttackTarget;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::core::state::Phase;
use crate::zones::Zone;

/// Event discriminant, for subscriber-side filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ZoneChanged,
    AttackDeclared,
    DamageDealt,
    CardDestroyed,
    CardDrawn,
    EssenceChanged,
    TurnStarted,
    PhaseChanged,
}

/// A state transition that already happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card moved between zones.
    ZoneChanged {
        card: InstanceId,
        owner: PlayerId,
        from: Zone,
        to: Zone,
    },

    /// An attacker was committed against a target.
    AttackDeclared {
        attacker: InstanceId,
        target: AttackTarget,
    },

    /// Combat damage was dealt. `target` is the deity or avatar hit;
    /// `defender` is the player on the receiving side.
    DamageDealt {
        source: InstanceId,
        defender: PlayerId,
        target: AttackTarget,
        amount: i64,
    },

    /// A permanent took lethal damage and moved to the Crypt.
    CardDestroyed { card: InstanceId, owner: PlayerId },

    /// A card was drawn from the deck into the hand.
    CardDrawn { player: PlayerId, card: InstanceId },

    /// A player's essence changed.
    EssenceChanged {
        player: PlayerId,
        delta: i64,
        new_total: i64,
    },

    /// A new turn began.
    TurnStarted { turn: u32, active_player: PlayerId },

    /// The phase advanced.
    PhaseChanged {
        phase: Phase,
        active_player: PlayerId,
    },
}

impl GameEvent {
    /// The event's kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::ZoneChanged { .. } => EventKind::ZoneChanged,
            GameEvent::AttackDeclared { .. } => EventKind::AttackDeclared,
            GameEvent::DamageDealt { .. } => EventKind::DamageDealt,
            GameEvent::CardDestroyed { .. } => EventKind::CardDestroyed,
            GameEvent::CardDrawn { .. } => EventKind::CardDrawn,
            GameEvent::EssenceChanged { .. } => EventKind::EssenceChanged,
            GameEvent::TurnStarted { .. } => EventKind::TurnStarted,
            GameEvent::PhaseChanged { .. } => EventKind::PhaseChanged,
        }
    }
}
