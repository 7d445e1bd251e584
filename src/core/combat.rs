//! Transient combat state.
//!
//! `CombatState` lives inside [`GameState`](crate::core::GameState) and is
//! cleared back to [`CombatStage::Idle`] at the end of every combat step.
//! It only records declarations; the resolution logic that reads and
//! consumes it lives on [`Game`](crate::game::Game).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use rustc_hash::FxHashMap;

use super::entity::InstanceId;

/// The combat sub-state machine.
///
/// `Idle -> SelectingAttackers -> DeclaringBlockers -> Resolving -> Idle`.
/// The first attacker declaration arms `SelectingAttackers`; the Clash phase
/// cannot be left until the machine is back at `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatStage {
    #[default]
    Idle,
    SelectingAttackers,
    DeclaringBlockers,
    Resolving,
}

/// What an attacker was declared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackTarget {
    /// The defending player's Deity; unblocked damage hits essence.
    Deity,
    /// A specific enemy Avatar.
    Avatar(InstanceId),
}

/// A single declared attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackDeclaration {
    pub attacker: InstanceId,
    pub target: AttackTarget,
}

/// Declarations for the current combat step.
///
/// Cleared every turn; all fields are rebuilt from scratch each Clash.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    /// Current sub-state.
    pub stage: CombatStage,

    /// Declared attackers with their chosen targets, in declaration order.
    pub attackers: SmallVec<[AttackDeclaration; 4]>,

    /// Blocker assignments: attacker -> blocker. One blocker per attacker.
    pub blockers: FxHashMap<InstanceId, InstanceId>,
}

impl CombatState {
    /// Has this card been declared as an attacker?
    #[must_use]
    pub fn is_declared(&self, attacker: InstanceId) -> bool {
        self.attackers.iter().any(|d| d.attacker == attacker)
    }

    /// The blocker assigned to an attacker, if any.
    #[must_use]
    pub fn blocker_of(&self, attacker: InstanceId) -> Option<InstanceId> {
        self.blockers.get(&attacker).copied()
    }

    /// Is this card already assigned as a blocker?
    #[must_use]
    pub fn is_blocking(&self, blocker: InstanceId) -> bool {
        self.blockers.values().any(|&b| b == blocker)
    }

    /// Reset to `Idle` with no declarations.
    pub fn clear(&mut self) {
        self.stage = CombatStage::Idle;
        self.attackers.clear();
        self.blockers.clear();
    }
}
