//! Core types: identifiers, players, errors, RNG, and the state tree.

pub mod combat;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use combat::{AttackDeclaration, AttackTarget, CombatStage, CombatState};
pub use entity::InstanceId;
pub use error::EngineError;
pub use player::{PlayerId, PlayerPair};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, MatchEnd, MatchEndReason, Phase, PlayerState, HAND_LIMIT};
