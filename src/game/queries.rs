//! The legal-move query surface.
//!
//! Read-only helpers for anything that drives the engine: human input,
//! scripted opponents, or search. Decision quality is not the engine's
//! concern; these only report what the rules allow, through the same checks
//! the mutating operations enforce.

use crate::core::{AttackTarget, EngineError, InstanceId, PlayerId};
use crate::zones::Zone;

use super::Game;

impl Game {
    /// Avatars of `player` that could legally be declared as attackers
    /// right now (ignoring the phase gate).
    pub fn legal_attackers(&self, player: PlayerId) -> Result<Vec<InstanceId>, EngineError> {
        let mut eligible = Vec::new();
        for &id in self.state.player(player).zones.zone(Zone::AvatarRow) {
            let card = self.state.card(id)?;
            if card.tapped || card.attacked_this_turn || self.state.combat.is_declared(id) {
                continue;
            }
            let template = self.template(card.card_id)?;
            if card.is_summoning_sick(self.state.turn_number)
                && !template.has_keyword(crate::cards::Keyword::Haste)
            {
                continue;
            }
            eligible.push(id);
        }
        Ok(eligible)
    }

    /// Avatars of `player` that could be assigned as blockers.
    pub fn legal_blockers(&self, player: PlayerId) -> Result<Vec<InstanceId>, EngineError> {
        let mut eligible = Vec::new();
        for &id in self.state.player(player).zones.zone(Zone::AvatarRow) {
            let card = self.state.card(id)?;
            if !card.tapped && !self.state.combat.is_blocking(id) {
                eligible.push(id);
            }
        }
        Ok(eligible)
    }

    /// The targets an attacker of `player` may be declared against.
    ///
    /// While the defender controls Guardians, only those; otherwise the
    /// Deity and every defending Avatar.
    pub fn legal_attack_targets(&self, player: PlayerId) -> Result<Vec<AttackTarget>, EngineError> {
        let defender = player.opponent();
        let guardians = self.guardians(defender)?;
        if !guardians.is_empty() {
            return Ok(guardians.into_iter().map(AttackTarget::Avatar).collect());
        }

        let mut targets = vec![AttackTarget::Deity];
        targets.extend(
            self.state
                .player(defender)
                .zones
                .zone(Zone::AvatarRow)
                .iter()
                .map(|&id| AttackTarget::Avatar(id)),
        );
        Ok(targets)
    }

    /// May `player` still play a Domain this turn?
    #[must_use]
    pub fn can_play_domain(&self, player: PlayerId) -> bool {
        self.state.player(player).domains_played_this_turn == 0
    }

    /// A card's power, with any instance override applied.
    pub fn effective_power(&self, instance: InstanceId) -> Result<i64, EngineError> {
        let card = self.state.card(instance)?;
        if let Some(power) = card.power_override {
            return Ok(power);
        }
        Ok(self.template(card.card_id)?.power)
    }

    /// A card's guard, with any instance override applied.
    pub fn effective_guard(&self, instance: InstanceId) -> Result<i64, EngineError> {
        let card = self.state.card(instance)?;
        if let Some(guard) = card.guard_override {
            return Ok(guard);
        }
        Ok(self.template(card.card_id)?.guard)
    }

    /// Guard minus accumulated combat damage.
    pub fn effective_health(&self, instance: InstanceId) -> Result<i64, EngineError> {
        let guard = self.effective_guard(instance)?;
        let card = self.state.card(instance)?;
        Ok(guard - card.damage)
    }
}
