//! The engine facade.
//!
//! `Game` bundles the owned [`GameState`] with the card registry and the
//! event machinery, and exposes every public engine operation:
//!
//! - phase control ([`advance_phase`](Game::advance_phase)),
//! - card plays and player operations (`plays`),
//! - the combat engine (`combat`),
//! - board mutators for the effect resolver (`resolver`),
//! - the legal-move query surface (`queries`).
//!
//! ## Mutation contract
//!
//! Every operation validates all of its preconditions before mutating
//! anything, so a rejected call leaves the state deep-equal to the pre-call
//! snapshot. Match-ending conditions are values, never errors; once a result
//! is recorded every further operation is rejected with
//! [`EngineError::MatchOver`].
//!
//! ## Event dispatch
//!
//! Operations queue events as they mutate; the outermost public call drains
//! the queue before returning. While a subscriber runs, the subscriber list
//! is detached and the `dispatching` flag is set, so re-entrant engine calls
//! made by the subscriber queue their events instead of recursing into
//! dispatch. A subscriber error propagates to the original caller with the
//! engine's own effects for that step already committed; the rest of the
//! queue is dropped (no transactions).

pub mod builder;
pub mod combat;
pub mod phases;
pub mod plays;
pub mod queries;
pub mod resolver;

pub use builder::GameBuilder;
pub use combat::CombatOutcome;
pub use phases::AdvanceOutcome;

use std::collections::VecDeque;

use im::Vector;

use crate::cards::{CardId, CardRegistry, CardTemplate};
use crate::core::{EngineError, GameState, MatchEnd, MatchEndReason, Phase, PlayerId};
use crate::events::{EventBus, EventSubscriber, GameEvent, SubscriberId};

/// A running match.
pub struct Game {
    pub(crate) state: GameState,
    registry: CardRegistry,
    bus: EventBus,
    pending: VecDeque<GameEvent>,
    dispatching: bool,
    history: Vector<GameEvent>,
}

impl Game {
    pub(crate) fn from_parts(state: GameState, registry: CardRegistry) -> Self {
        Self {
            state,
            registry,
            bus: EventBus::new(),
            pending: VecDeque::new(),
            dispatching: false,
            history: Vector::new(),
        }
    }

    /// The current game state (read-only; mutate through operations).
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The card registry.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// The recorded match result, if the match has ended.
    #[must_use]
    pub fn result(&self) -> Option<MatchEnd> {
        self.state.result
    }

    /// Every event dispatched so far, in emission order.
    #[must_use]
    pub fn history(&self) -> &Vector<GameEvent> {
        &self.history
    }

    /// Attach an event subscriber. Notified in subscription order.
    pub fn subscribe(&mut self, subscriber: Box<dyn EventSubscriber>) -> SubscriberId {
        self.bus.subscribe(subscriber)
    }

    /// Detach an event subscriber.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Look up a template, surfacing registry misconfiguration as an error.
    pub(crate) fn template(&self, id: CardId) -> Result<&CardTemplate, EngineError> {
        self.registry.get(id).ok_or(EngineError::UnknownTemplate(id))
    }

    /// Reject any operation once the match has ended.
    pub(crate) fn ensure_live(&self) -> Result<(), EngineError> {
        if self.state.result.is_some() {
            return Err(EngineError::MatchOver);
        }
        Ok(())
    }

    /// Gate an operation on the current phase.
    pub(crate) fn ensure_phase(&self, expected: Phase) -> Result<(), EngineError> {
        if self.state.phase != expected {
            return Err(EngineError::WrongPhase {
                expected,
                actual: self.state.phase,
            });
        }
        Ok(())
    }

    /// Record a match result. The first recorded result wins; later
    /// conditions in the same step do not overwrite it.
    pub(crate) fn record_result(&mut self, winner: PlayerId, reason: MatchEndReason) {
        if self.state.result.is_none() {
            self.state.result = Some(MatchEnd { winner, reason });
        }
    }

    /// Queue an event for dispatch and append it to the history.
    pub(crate) fn queue(&mut self, event: GameEvent) {
        self.history.push_back(event.clone());
        self.pending.push_back(event);
    }

    /// Apply a (possibly negative) essence delta, floored at zero.
    ///
    /// Queues `EssenceChanged` with the delta actually applied and records
    /// the match result when essence reaches zero. Returns the new total.
    pub(crate) fn apply_essence_delta(&mut self, player: PlayerId, delta: i64) -> i64 {
        let essence = self.state.player(player).essence;
        let new_total = (essence + delta).max(0);
        self.state.player_mut(player).essence = new_total;

        self.queue(GameEvent::EssenceChanged {
            player,
            delta: new_total - essence,
            new_total,
        });
        if new_total == 0 {
            self.record_result(player.opponent(), MatchEndReason::EssenceDepleted);
        }
        new_total
    }

    /// Drain the pending event queue through the subscriber list.
    ///
    /// No-op when called re-entrantly from inside a dispatch step.
    pub(crate) fn flush_events(&mut self) -> Result<(), EngineError> {
        if self.dispatching {
            return Ok(());
        }
        self.dispatching = true;

        while let Some(event) = self.pending.pop_front() {
            let mut detached = self.bus.detach();
            let mut failed = None;
            for (_, subscriber) in detached.iter_mut() {
                if let Err(err) = subscriber.on_event(self, &event) {
                    failed = Some(err);
                    break;
                }
            }
            self.bus.reattach(detached);

            if let Some(err) = failed {
                self.pending.clear();
                self.dispatching = false;
                return Err(err);
            }
        }

        self.dispatching = false;
        Ok(())
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("turn", &self.state.turn_number)
            .field("phase", &self.state.phase)
            .field("active_player", &self.state.active_player)
            .field("result", &self.state.result)
            .finish()
    }
}
