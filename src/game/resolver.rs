//! Board mutators for the external effect resolver.
//!
//! The resolver discharges [`EffectSpec`](crate::effects::EffectSpec)
//! descriptors by calling back through this surface; there is no privileged
//! back door into `GameState`. Each operation validates before mutating,
//! like every other engine operation.
//!
//! Non-combat damage resolves lethality immediately: there is no bout to
//! wait for, so a hit that meets guard destroys the card on the spot.

use crate::cards::{CardId, CardType};
use crate::core::{AttackTarget, EngineError, InstanceId, PlayerId};
use crate::events::GameEvent;
use crate::zones::Zone;

use super::Game;

impl Game {
    /// Move a card between two zones of its owner. Emits `ZoneChanged`.
    ///
    /// Fails with [`EngineError::IllegalZoneTransition`] if the card is not
    /// currently in `from`.
    pub fn move_card(
        &mut self,
        instance: InstanceId,
        from: Zone,
        to: Zone,
    ) -> Result<(), EngineError> {
        self.ensure_live()?;
        let owner = self.state.move_card(instance, from, to)?;
        self.queue(GameEvent::ZoneChanged {
            card: instance,
            owner,
            from,
            to,
        });
        self.flush_events()
    }

    /// Tap a card. Idempotent.
    pub fn tap_card(&mut self, instance: InstanceId) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.state.card_mut(instance)?.tap();
        Ok(())
    }

    /// Untap a card. Idempotent.
    pub fn untap_card(&mut self, instance: InstanceId) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.state.card_mut(instance)?.untap();
        Ok(())
    }

    /// Put a fresh instance of an Avatar template onto a player's row.
    ///
    /// The summoned card enters with summoning sickness, like a played one.
    /// Creation is not a zone transition, so no `ZoneChanged` is emitted;
    /// the returned ID is the caller's handle to the new card.
    pub fn summon(&mut self, player: PlayerId, card: CardId) -> Result<InstanceId, EngineError> {
        self.ensure_live()?;
        if self.template(card)?.card_type != CardType::Avatar {
            return Err(EngineError::NotAnAvatarTemplate(card));
        }
        Ok(self.state.create_instance(card, player, Zone::AvatarRow))
    }

    /// Deal non-combat damage from `source` to an Avatar on a row.
    ///
    /// Damage accumulates on the victim; meeting its guard destroys it
    /// immediately (moved to the Crypt, `CardDestroyed`). Amounts `<= 0` are
    /// no-ops.
    pub fn deal_damage(
        &mut self,
        source: InstanceId,
        victim: InstanceId,
        amount: i64,
    ) -> Result<(), EngineError> {
        self.ensure_live()?;
        let card = self.state.card(victim)?;
        if card.zone != Zone::AvatarRow {
            return Err(EngineError::NotAnAvatar(victim));
        }
        if amount <= 0 {
            return Ok(());
        }
        let defender = card.owner;

        self.state.card_mut(victim)?.damage += amount;
        self.queue(GameEvent::DamageDealt {
            source,
            defender,
            target: AttackTarget::Avatar(victim),
            amount,
        });

        if self.state.card(victim)?.damage >= self.effective_guard(victim)? {
            let owner = self.state.move_card(victim, Zone::AvatarRow, Zone::Crypt)?;
            self.queue(GameEvent::ZoneChanged {
                card: victim,
                owner,
                from: Zone::AvatarRow,
                to: Zone::Crypt,
            });
            self.queue(GameEvent::CardDestroyed {
                card: victim,
                owner,
            });
        }
        self.flush_events()
    }

    /// Set or clear an instance-level power override.
    pub fn set_power_override(
        &mut self,
        instance: InstanceId,
        power: Option<i64>,
    ) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.state.card_mut(instance)?.power_override = power;
        Ok(())
    }

    /// Set or clear an instance-level guard override.
    ///
    /// Overrides only move the threshold; lethality is evaluated when damage
    /// next lands (combat resolution or [`deal_damage`](Game::deal_damage)).
    pub fn set_guard_override(
        &mut self,
        instance: InstanceId,
        guard: Option<i64>,
    ) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.state.card_mut(instance)?.guard_override = guard;
        Ok(())
    }
}
