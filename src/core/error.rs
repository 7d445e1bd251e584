//! Engine error taxonomy.
//!
//! Every variant is a *local* validation failure: the operation was rejected
//! before any state mutation, so the caller may inspect, re-prompt, and try
//! a different action. Match-ending conditions (deck exhaustion, essence at
//! zero) are never errors; they surface as [`MatchEnd`](crate::core::MatchEnd)
//! values.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::combat::CombatStage;
use crate::core::entity::InstanceId;
use crate::core::state::Phase;
use crate::zones::Zone;

/// A rejected engine operation.
///
/// Rejection is atomic: the game state is guaranteed to be unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cost {required} exceeds available resource {available}")]
    InsufficientResource { required: u8, available: u8 },

    #[error("{card} is not in {expected:?} (found in {actual:?})")]
    IllegalZoneTransition {
        card: InstanceId,
        expected: Zone,
        actual: Zone,
    },

    #[error("{attacker} must target a Guardian permanent")]
    PriorityViolation { attacker: InstanceId },

    #[error("{0} entered play this turn and lacks Haste")]
    SummoningSickness(InstanceId),

    #[error("{0} has already attacked this turn")]
    AlreadyActed(InstanceId),

    #[error("only one Domain may be played per turn")]
    TurnLimitExceeded,

    #[error("{0} is tapped")]
    TappedCard(InstanceId),

    #[error("{0} is already blocking another attacker")]
    BlockerAlreadyAssigned(InstanceId),

    #[error("{0} is already blocked")]
    AttackerAlreadyBlocked(InstanceId),

    #[error("{0} was not declared as an attacker")]
    AttackerNotDeclared(InstanceId),

    #[error("combat is in {actual:?}, expected {expected:?}")]
    InvalidCombatStage {
        expected: CombatStage,
        actual: CombatStage,
    },

    #[error("operation requires the {expected:?} phase (currently {actual:?})")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("player does not hold action rights")]
    NotActivePlayer,

    #[error("no card instance {0}")]
    UnknownInstance(InstanceId),

    #[error("no template registered for {0}")]
    UnknownTemplate(CardId),

    #[error("{0} is not an Avatar on the acting side's row")]
    NotAnAvatar(InstanceId),

    #[error("{0} is not an Avatar template")]
    NotAnAvatarTemplate(CardId),

    #[error("{0} cannot be played from hand")]
    UnplayableCard(InstanceId),

    #[error("hand holds {size} cards, limit is {limit}")]
    HandLimitExceeded { size: usize, limit: usize },

    #[error("no god-code charge available")]
    NoGodCodeCharge,

    #[error("deity passive already used this turn")]
    PassiveAlreadyUsed,

    #[error("the match has already ended")]
    MatchOver,
}
