//! # clash-engine
//!
//! A deterministic rules engine for a two-player, zone-based card game. The
//! engine owns turn sequencing, the energy resource ledger, combat
//! resolution, and the card/zone lifecycle; rendering, audio, matchmaking,
//! and effect-text interpretation are external collaborators that call the
//! public operations and listen on the event bus.
//!
//! ## Design
//!
//! - **Owned state, no singletons**: a match is one [`GameState`] value
//!   inside a [`Game`]; nothing is ambient, so matches run side by side and
//!   tests stay deterministic.
//! - **Validate, then mutate**: every operation checks all preconditions
//!   before touching anything; a rejected call returns an [`EngineError`]
//!   and leaves the state deep-equal to its pre-call snapshot.
//! - **Terminal conditions are values**: deck exhaustion and essence
//!   depletion record a [`MatchEnd`] on the state rather than erroring;
//!   afterwards operations fail with [`EngineError::MatchOver`].
//! - **Typed effects**: card behavior is described by
//!   [`EffectSpec`](effects::EffectSpec) descriptors that an external
//!   resolver interprets by calling back through the same public surface.
//!
//! ## Quick start
//!
//! ```
//! use clash_engine::cards::{CardId, CardRegistry, CardTemplate, CardType};
//! use clash_engine::core::PlayerId;
//! use clash_engine::game::GameBuilder;
//!
//! let mut registry = CardRegistry::new();
//! registry.register(
//!     CardTemplate::new(CardId::new(1), "Ashen Raider", CardType::Avatar)
//!         .with_cost(1)
//!         .with_power(3)
//!         .with_guard(2),
//! );
//! registry.register(CardTemplate::new(CardId::new(9), "Solmara", CardType::Deity));
//!
//! let mut game = GameBuilder::new(registry)
//!     .with_deity(PlayerId::FIRST, CardId::new(9))
//!     .with_deity(PlayerId::SECOND, CardId::new(9))
//!     .with_deck(PlayerId::FIRST, vec![CardId::new(1); 20])
//!     .with_deck(PlayerId::SECOND, vec![CardId::new(1); 20])
//!     .with_seed(42)
//!     .build()
//!     .unwrap();
//!
//! // Turn 1: Dawn -> Draw (skipped for the first player) -> Main.
//! game.advance_phase().unwrap();
//! game.advance_phase().unwrap();
//! let hand = game.draw_cards(PlayerId::FIRST, 1).unwrap();
//! game.play_card(PlayerId::FIRST, hand[0]).unwrap();
//! ```

pub mod cards;
pub mod core;
pub mod effects;
pub mod events;
pub mod game;
pub mod ledger;
pub mod zones;

pub use crate::cards::{CardId, CardInstance, CardRegistry, CardTemplate, CardType, Keyword};
pub use crate::core::{
    AttackDeclaration, AttackTarget, CombatStage, CombatState, EngineError, GameState, InstanceId,
    MatchEnd, MatchEndReason, Phase, PlayerId, PlayerPair, HAND_LIMIT,
};
pub use crate::effects::{EffectSpec, EffectTarget};
pub use crate::events::{EventKind, EventSubscriber, GameEvent, SubscriberId};
pub use crate::game::{AdvanceOutcome, CombatOutcome, Game, GameBuilder};
pub use crate::ledger::{ResourceLedger, GOD_CODE_CHARGE_CAP, OVERFLOW_PER_CHARGE, RESOURCE_CAP};
pub use crate::zones::{Zone, ZoneStore};
