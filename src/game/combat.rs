//! The combat resolution engine.
//!
//! Combat runs inside the Clash phase as its own little state machine:
//! `Idle -> SelectingAttackers -> DeclaringBlockers -> Resolving -> Idle`.
//! The first attacker declaration arms it; a turn with no attacks never
//! touches it.
//!
//! All validation happens at declaration time. Once `resolve_combat` flips
//! the stage to `Resolving`, resolution is pure computation over
//! already-validated declarations: every bout's damage is computed from the
//! pre-resolution board (no bout's death affects another bout's inputs),
//! lethality is evaluated only after all bouts, and destruction is additive
//! across the whole step.

use rustc_hash::FxHashMap;

use crate::cards::{CardType, Keyword};
use crate::core::{
    AttackDeclaration, AttackTarget, CombatStage, EngineError, InstanceId, MatchEnd, Phase,
    PlayerId,
};
use crate::events::GameEvent;
use crate::zones::Zone;

use super::Game;

/// What a combat resolution did.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatOutcome {
    /// Instances destroyed and moved to the Crypt, in sweep order.
    pub destroyed: Vec<InstanceId>,

    /// Total essence damage dealt to the defending player.
    pub essence_damage: i64,

    /// Set when the resolution depleted the defender's essence.
    pub match_end: Option<MatchEnd>,
}

impl Game {
    /// Declare an attacker against a target.
    ///
    /// Legal during Clash from `Idle` (arms the sub-state) or
    /// `SelectingAttackers`. The attacker must be an untapped Avatar on the
    /// active player's row that has not acted and is not summoning-sick
    /// (unless it has Haste). While the defender controls a Guardian, the
    /// target must be one of those Guardians.
    pub fn declare_attacker(
        &mut self,
        attacker: InstanceId,
        target: AttackTarget,
    ) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Clash)?;
        match self.state.combat.stage {
            CombatStage::Idle | CombatStage::SelectingAttackers => {}
            actual => {
                return Err(EngineError::InvalidCombatStage {
                    expected: CombatStage::SelectingAttackers,
                    actual,
                });
            }
        }

        let active = self.state.active_player;
        let defender = active.opponent();

        let card = self.state.card(attacker)?;
        if card.owner != active || card.zone != Zone::AvatarRow {
            return Err(EngineError::NotAnAvatar(attacker));
        }
        if card.tapped {
            return Err(EngineError::TappedCard(attacker));
        }
        if card.attacked_this_turn || self.state.combat.is_declared(attacker) {
            return Err(EngineError::AlreadyActed(attacker));
        }
        let template = self.template(card.card_id)?;
        if template.card_type != CardType::Avatar {
            return Err(EngineError::NotAnAvatar(attacker));
        }
        if card.is_summoning_sick(self.state.turn_number) && !template.has_keyword(Keyword::Haste)
        {
            return Err(EngineError::SummoningSickness(attacker));
        }

        if let AttackTarget::Avatar(victim) = target {
            let victim_card = self.state.card(victim)?;
            if victim_card.owner != defender || victim_card.zone != Zone::AvatarRow {
                return Err(EngineError::NotAnAvatar(victim));
            }
        }

        // Mandatory-target rule: Guardians soak attacks first.
        let guardians = self.guardians(defender)?;
        if !guardians.is_empty() {
            let compliant = matches!(target, AttackTarget::Avatar(v) if guardians.contains(&v));
            if !compliant {
                return Err(EngineError::PriorityViolation { attacker });
            }
        }

        self.state.combat.stage = CombatStage::SelectingAttackers;
        self.state
            .combat
            .attackers
            .push(AttackDeclaration { attacker, target });
        self.queue(GameEvent::AttackDeclared { attacker, target });
        self.flush_events()
    }

    /// Withdraw every declaration made so far.
    ///
    /// Legal until resolution begins; leaves the sub-state at
    /// `SelectingAttackers` with nothing else changed.
    pub fn cancel_attacks(&mut self) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Clash)?;
        match self.state.combat.stage {
            CombatStage::SelectingAttackers | CombatStage::DeclaringBlockers => {}
            actual => {
                return Err(EngineError::InvalidCombatStage {
                    expected: CombatStage::SelectingAttackers,
                    actual,
                });
            }
        }

        self.state.combat.attackers.clear();
        self.state.combat.blockers.clear();
        self.state.combat.stage = CombatStage::SelectingAttackers;
        Ok(())
    }

    /// Close the attacker selection and hand priority to the defender.
    ///
    /// With no attackers declared the sub-state drops straight back to
    /// `Idle`.
    pub fn close_attacks(&mut self) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Clash)?;
        if self.state.combat.stage != CombatStage::SelectingAttackers {
            return Err(EngineError::InvalidCombatStage {
                expected: CombatStage::SelectingAttackers,
                actual: self.state.combat.stage,
            });
        }

        if self.state.combat.attackers.is_empty() {
            self.state.combat.clear();
        } else {
            self.state.combat.stage = CombatStage::DeclaringBlockers;
        }
        Ok(())
    }

    /// Assign a blocker to a declared attacker. One blocker per attacker;
    /// the defender may leave any subset of attackers unblocked.
    pub fn declare_blocker(
        &mut self,
        attacker: InstanceId,
        blocker: InstanceId,
    ) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Clash)?;
        if self.state.combat.stage != CombatStage::DeclaringBlockers {
            return Err(EngineError::InvalidCombatStage {
                expected: CombatStage::DeclaringBlockers,
                actual: self.state.combat.stage,
            });
        }

        let defender = self.state.active_player.opponent();
        let card = self.state.card(blocker)?;
        if card.owner != defender || card.zone != Zone::AvatarRow {
            return Err(EngineError::NotAnAvatar(blocker));
        }
        if card.tapped {
            return Err(EngineError::TappedCard(blocker));
        }
        if self.template(card.card_id)?.card_type != CardType::Avatar {
            return Err(EngineError::NotAnAvatar(blocker));
        }
        if self.state.combat.is_blocking(blocker) {
            return Err(EngineError::BlockerAlreadyAssigned(blocker));
        }
        if !self.state.combat.is_declared(attacker) {
            return Err(EngineError::AttackerNotDeclared(attacker));
        }
        if self.state.combat.blocker_of(attacker).is_some() {
            return Err(EngineError::AttackerAlreadyBlocked(attacker));
        }

        self.state.combat.blockers.insert(attacker, blocker);
        Ok(())
    }

    /// Resolve all declared attacks simultaneously.
    ///
    /// Blocked attackers trade damage with their blockers; unblocked
    /// attackers land their power on the declared target (defender essence
    /// for the Deity, damage accumulation for an Avatar). Destruction is
    /// evaluated once, after every bout. Declared attackers end up tapped
    /// and flagged; the sub-state returns to `Idle`.
    pub fn resolve_combat(&mut self) -> Result<CombatOutcome, EngineError> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Clash)?;
        if self.state.combat.stage != CombatStage::DeclaringBlockers {
            return Err(EngineError::InvalidCombatStage {
                expected: CombatStage::DeclaringBlockers,
                actual: self.state.combat.stage,
            });
        }
        self.state.combat.stage = CombatStage::Resolving;

        let active = self.state.active_player;
        let defender = active.opponent();
        let declarations: Vec<AttackDeclaration> =
            self.state.combat.attackers.iter().copied().collect();
        let blockers: FxHashMap<InstanceId, InstanceId> = self.state.combat.blockers.clone();

        // Bout damage, computed from the pre-resolution board. Accumulated
        // damage never feeds back into power, so ordering is immaterial.
        let mut essence_damage = 0i64;
        for declaration in &declarations {
            let attacker = declaration.attacker;
            let power = self.effective_power(attacker)?;

            match blockers.get(&attacker) {
                Some(&blocker) => {
                    let counter = self.effective_power(blocker)?;
                    if power > 0 {
                        self.state.card_mut(blocker)?.damage += power;
                        self.queue(GameEvent::DamageDealt {
                            source: attacker,
                            defender,
                            target: AttackTarget::Avatar(blocker),
                            amount: power,
                        });
                    }
                    if counter > 0 {
                        self.state.card_mut(attacker)?.damage += counter;
                        self.queue(GameEvent::DamageDealt {
                            source: blocker,
                            defender: active,
                            target: AttackTarget::Avatar(attacker),
                            amount: counter,
                        });
                    }
                }
                None => match declaration.target {
                    AttackTarget::Deity => {
                        if power > 0 {
                            essence_damage += power;
                            self.queue(GameEvent::DamageDealt {
                                source: attacker,
                                defender,
                                target: AttackTarget::Deity,
                                amount: power,
                            });
                            self.apply_essence_delta(defender, -power);
                        }
                    }
                    AttackTarget::Avatar(victim) => {
                        if power > 0 {
                            self.state.card_mut(victim)?.damage += power;
                            self.queue(GameEvent::DamageDealt {
                                source: attacker,
                                defender,
                                target: AttackTarget::Avatar(victim),
                                amount: power,
                            });
                        }
                    }
                },
            }
        }

        // Destruction sweep, only after every bout has been applied.
        let mut destroyed = Vec::new();
        for player in PlayerId::both() {
            let row: Vec<InstanceId> =
                self.state.player(player).zones.zone(Zone::AvatarRow).clone();
            for id in row {
                let card = self.state.card(id)?;
                if card.damage > 0 && card.damage >= self.effective_guard(id)? {
                    destroyed.push(id);
                }
            }
        }
        for &id in &destroyed {
            let owner = self.state.move_card(id, Zone::AvatarRow, Zone::Crypt)?;
            self.queue(GameEvent::ZoneChanged {
                card: id,
                owner,
                from: Zone::AvatarRow,
                to: Zone::Crypt,
            });
            self.queue(GameEvent::CardDestroyed { card: id, owner });
        }

        // Declared attackers that survived are spent for the turn; combat
        // damage does not carry past the step.
        for declaration in &declarations {
            let card = self.state.card_mut(declaration.attacker)?;
            if card.zone == Zone::AvatarRow {
                card.tap();
                card.attacked_this_turn = true;
            }
        }
        for player in PlayerId::both() {
            let row: Vec<InstanceId> =
                self.state.player(player).zones.zone(Zone::AvatarRow).clone();
            for id in row {
                self.state.card_mut(id)?.damage = 0;
            }
        }

        self.state.combat.clear();
        let match_end = self.state.result;
        self.flush_events()?;
        Ok(CombatOutcome {
            destroyed,
            essence_damage,
            match_end,
        })
    }

    /// The defender-side Guardian permanents that soak attacks. Attack
    /// targets are Avatars or the Deity, so only the Avatar row is scanned.
    pub(crate) fn guardians(&self, player: PlayerId) -> Result<Vec<InstanceId>, EngineError> {
        let mut found = Vec::new();
        for &id in self.state.player(player).zones.zone(Zone::AvatarRow) {
            let card = self.state.card(id)?;
            if self.template(card.card_id)?.has_keyword(Keyword::Guardian) {
                found.push(id);
            }
        }
        Ok(found)
    }
}
