//! The phase controller.
//!
//! Drives the `Dawn -> Draw -> Main -> Clash -> Twilight` cycle. Phase-entry
//! effects run when a phase is entered, not when the caller happens to poll:
//! Dawn untaps, refills the ledger and resets turn flags; Draw performs the
//! one mandatory draw; Clash arms the combat sub-state machine.
//!
//! Advancing out of Twilight is the turn handoff: it increments the turn
//! counter, switches the active player, and enters the opponent's Dawn. It is
//! also where the hand limit bites: the advance is rejected with
//! `HandLimitExceeded` until the caller discards down to the limit.

use crate::core::{
    CombatStage, EngineError, MatchEnd, MatchEndReason, Phase, PlayerId, HAND_LIMIT,
};
use crate::events::GameEvent;
use crate::zones::Zone;

use super::Game;

/// Result of a successful phase advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The cycle moved to this phase.
    Entered(Phase),
    /// The advance triggered a match-ending condition (deck exhaustion at
    /// the mandatory draw). Recorded on the state; not an error.
    MatchEnded(MatchEnd),
}

impl Game {
    /// Advance to the next phase, running its entry effects.
    ///
    /// Rejections: leaving Clash while combat declarations are open
    /// (`InvalidCombatStage`), leaving Twilight over the hand limit
    /// (`HandLimitExceeded`), any call after the match ended (`MatchOver`).
    pub fn advance_phase(&mut self) -> Result<AdvanceOutcome, EngineError> {
        self.ensure_live()?;

        match self.state.phase {
            Phase::Clash if self.state.combat.stage != CombatStage::Idle => {
                return Err(EngineError::InvalidCombatStage {
                    expected: CombatStage::Idle,
                    actual: self.state.combat.stage,
                });
            }
            Phase::Twilight => {
                let active = self.state.active_player;
                let size = self.state.player(active).zones.zone_size(Zone::Hand);
                if size > HAND_LIMIT {
                    return Err(EngineError::HandLimitExceeded {
                        size,
                        limit: HAND_LIMIT,
                    });
                }
            }
            _ => {}
        }

        if self.state.phase == Phase::Twilight {
            self.state.turn_number += 1;
            self.state.active_player = self.state.active_player.opponent();
        }
        self.state.phase = self.state.phase.next();

        let outcome = self.enter_phase()?;
        self.flush_events()?;
        Ok(outcome)
    }

    /// Entry effects for the phase just entered.
    pub(crate) fn enter_phase(&mut self) -> Result<AdvanceOutcome, EngineError> {
        let phase = self.state.phase;
        let active = self.state.active_player;

        match phase {
            Phase::Dawn => self.enter_dawn()?,
            Phase::Draw => {
                self.queue(GameEvent::PhaseChanged {
                    phase,
                    active_player: active,
                });
                if let Some(end) = self.mandatory_draw()? {
                    return Ok(AdvanceOutcome::MatchEnded(end));
                }
                return Ok(AdvanceOutcome::Entered(phase));
            }
            Phase::Main | Phase::Clash | Phase::Twilight => {
                self.queue(GameEvent::PhaseChanged {
                    phase,
                    active_player: active,
                });
            }
        }
        Ok(AdvanceOutcome::Entered(phase))
    }

    /// Dawn entry: untap, refill, reset turn flags.
    fn enter_dawn(&mut self) -> Result<(), EngineError> {
        let active = self.state.active_player;

        let mut permanents = Vec::new();
        for zone in [Zone::AvatarRow, Zone::DomainRow, Zone::RelicRow] {
            permanents.extend(self.state.player(active).zones.zone(zone).iter().copied());
        }
        for id in permanents {
            let card = self.state.card_mut(id)?;
            card.untap();
            card.attacked_this_turn = false;
        }

        self.state.player_mut(active).ledger.refill_at_dawn();
        self.state.player_mut(active).reset_turn_flags();

        self.queue(GameEvent::TurnStarted {
            turn: self.state.turn_number,
            active_player: active,
        });
        self.queue(GameEvent::PhaseChanged {
            phase: Phase::Dawn,
            active_player: active,
        });
        Ok(())
    }

    /// The one mandatory draw at Draw entry. Skipped on the first player's
    /// first turn; an empty deck here ends the match.
    fn mandatory_draw(&mut self) -> Result<Option<MatchEnd>, EngineError> {
        let active = self.state.active_player;
        if self.state.turn_number == 1 && active == PlayerId::FIRST {
            return Ok(None);
        }

        match self.state.player(active).zones.deck_top() {
            Some(card) => {
                let owner = self.state.move_card(card, Zone::Deck, Zone::Hand)?;
                self.state.player_mut(active).has_drawn_this_turn = true;
                self.queue(GameEvent::ZoneChanged {
                    card,
                    owner,
                    from: Zone::Deck,
                    to: Zone::Hand,
                });
                self.queue(GameEvent::CardDrawn {
                    player: active,
                    card,
                });
                Ok(None)
            }
            None => {
                let end = MatchEnd {
                    winner: active.opponent(),
                    reason: MatchEndReason::DeckExhausted,
                };
                self.state.result = Some(end);
                Ok(Some(end))
            }
        }
    }
}
