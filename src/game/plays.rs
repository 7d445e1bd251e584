//! Card plays and the other player-facing operations.
//!
//! `play_card` is the Main-phase entry point: it pays the cost, places the
//! card, and hands the template's effect descriptor back to the caller for
//! the external resolver. The engine enforces cost payment, zone placement
//! and the once-per-turn Domain limit; effect text is not its business.
//!
//! Validation runs in full before anything mutates, so a rejected play
//! leaves resources and hand exactly as they were (refund semantics hold by
//! construction).

use crate::cards::CardType;
use crate::core::{EngineError, InstanceId, Phase, PlayerId};
use crate::effects::EffectSpec;
use crate::events::GameEvent;
use crate::zones::Zone;

use super::Game;

impl Game {
    /// Play a card from hand. Main phase, active player only.
    ///
    /// Avatars, Domains and Relics land on their rows (summoning sickness
    /// starts for Avatars); Spells go straight to the Crypt once their
    /// descriptor is surfaced. Returns the template's `EffectSpec`, if any,
    /// for the external resolver.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        instance: InstanceId,
    ) -> Result<Option<EffectSpec>, EngineError> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Main)?;
        if player != self.state.active_player {
            return Err(EngineError::NotActivePlayer);
        }

        let card = self.state.card(instance)?;
        if card.owner != player {
            return Err(EngineError::NotActivePlayer);
        }
        if card.zone != Zone::Hand {
            return Err(EngineError::IllegalZoneTransition {
                card: instance,
                expected: Zone::Hand,
                actual: card.zone,
            });
        }

        let template = self.template(card.card_id)?;
        let destination = match template.card_type {
            CardType::Avatar => Zone::AvatarRow,
            CardType::Domain => Zone::DomainRow,
            CardType::Relic => Zone::RelicRow,
            CardType::Spell => Zone::Crypt,
            CardType::Deity => return Err(EngineError::UnplayableCard(instance)),
        };
        let is_domain = template.card_type == CardType::Domain;
        if is_domain && self.state.player(player).domains_played_this_turn >= 1 {
            return Err(EngineError::TurnLimitExceeded);
        }
        let cost = template.cost;
        let effect = template.effect.clone();

        // All checks passed; the spend is the first mutation and validates
        // itself, so a failed payment still leaves the state untouched.
        self.state.player_mut(player).ledger.spend(cost)?;
        let owner = self.state.move_card(instance, Zone::Hand, destination)?;
        if is_domain {
            self.state.player_mut(player).domains_played_this_turn += 1;
        }
        self.queue(GameEvent::ZoneChanged {
            card: instance,
            owner,
            from: Zone::Hand,
            to: destination,
        });
        self.flush_events()?;
        Ok(effect)
    }

    /// Draw up to `count` cards. Stops silently when the deck runs out; only
    /// the mandatory phase draw is lethal. Returns the drawn instances.
    pub fn draw_cards(
        &mut self,
        player: PlayerId,
        count: usize,
    ) -> Result<Vec<InstanceId>, EngineError> {
        self.ensure_live()?;

        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(card) = self.state.player(player).zones.deck_top() else {
                break;
            };
            let owner = self.state.move_card(card, Zone::Deck, Zone::Hand)?;
            self.queue(GameEvent::ZoneChanged {
                card,
                owner,
                from: Zone::Deck,
                to: Zone::Hand,
            });
            self.queue(GameEvent::CardDrawn { player, card });
            drawn.push(card);
        }
        self.flush_events()?;
        Ok(drawn)
    }

    /// Discard a card from hand to the Crypt.
    ///
    /// Used to get under the hand limit at the Twilight boundary; the engine
    /// never chooses which card goes.
    pub fn discard(&mut self, player: PlayerId, instance: InstanceId) -> Result<(), EngineError> {
        self.ensure_live()?;

        let card = self.state.card(instance)?;
        if card.owner != player {
            return Err(EngineError::NotActivePlayer);
        }

        let owner = self.state.move_card(instance, Zone::Hand, Zone::Crypt)?;
        self.queue(GameEvent::ZoneChanged {
            card: instance,
            owner,
            from: Zone::Hand,
            to: Zone::Crypt,
        });
        self.flush_events()?;
        Ok(())
    }

    /// Gain energy this turn. Excess above `max` banks as overflow.
    pub fn gain_resource(&mut self, player: PlayerId, amount: u8) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.state.player_mut(player).ledger.adjust(amount);
        Ok(())
    }

    /// Change a player's essence by `delta`, floored at zero.
    ///
    /// Reaching zero ends the match in the opponent's favor. Returns the new
    /// total.
    pub fn modify_essence(&mut self, player: PlayerId, delta: i64) -> Result<i64, EngineError> {
        self.ensure_live()?;
        let total = self.apply_essence_delta(player, delta);
        self.flush_events()?;
        Ok(total)
    }

    /// Set a player's essence to an absolute value, floored at zero.
    ///
    /// Reaching zero ends the match in the opponent's favor. Returns the new
    /// total.
    pub fn set_essence(&mut self, player: PlayerId, value: i64) -> Result<i64, EngineError> {
        self.ensure_live()?;
        let delta = value.max(0) - self.state.player(player).essence;
        if delta == 0 {
            return Ok(self.state.player(player).essence);
        }
        let total = self.apply_essence_delta(player, delta);
        self.flush_events()?;
        Ok(total)
    }

    /// Use the deity's passive ability. Once per turn, Main phase, active
    /// player only. Returns the passive's descriptor for the resolver.
    pub fn activate_passive(
        &mut self,
        player: PlayerId,
    ) -> Result<Option<EffectSpec>, EngineError> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Main)?;
        if player != self.state.active_player {
            return Err(EngineError::NotActivePlayer);
        }
        if self.state.player(player).passive_used_this_turn {
            return Err(EngineError::PassiveAlreadyUsed);
        }

        let deity = self.state.player(player).deity;
        let effect = self.template(deity)?.effect.clone();
        self.state.player_mut(player).passive_used_this_turn = true;
        Ok(effect)
    }

    /// Unleash the deity's god-code ultimate, consuming one charge.
    ///
    /// Main phase, active player only. Returns the ultimate's descriptor.
    pub fn activate_god_code(
        &mut self,
        player: PlayerId,
    ) -> Result<Option<EffectSpec>, EngineError> {
        self.ensure_live()?;
        self.ensure_phase(Phase::Main)?;
        if player != self.state.active_player {
            return Err(EngineError::NotActivePlayer);
        }

        let deity = self.state.player(player).deity;
        let ultimate = self.template(deity)?.ultimate.clone();
        self.state.player_mut(player).ledger.spend_charge()?;
        Ok(ultimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardRegistry, CardTemplate};
    use crate::core::{MatchEnd, MatchEndReason};
    use crate::effects::EffectTarget;
    use crate::game::GameBuilder;
    use crate::ledger::ResourceLedger;

    const AVATAR: CardId = CardId::new(1);
    const SPELL: CardId = CardId::new(2);
    const DOMAIN: CardId = CardId::new(3);
    const RELIC: CardId = CardId::new(4);
    const DEITY: CardId = CardId::new(100);

    fn test_registry() -> CardRegistry {
        let mut registry = CardRegistry::new();
        registry.register(
            CardTemplate::new(AVATAR, "Ember Whelp", CardType::Avatar)
                .with_cost(1)
                .with_power(3)
                .with_guard(2),
        );
        registry.register(
            CardTemplate::new(SPELL, "Spark", CardType::Spell)
                .with_cost(1)
                .with_effect(EffectSpec::damage(EffectTarget::EnemyAvatar, 2)),
        );
        registry.register(CardTemplate::new(DOMAIN, "Vale", CardType::Domain).with_cost(1));
        registry.register(CardTemplate::new(RELIC, "Idol", CardType::Relic).with_cost(1));
        registry.register(
            CardTemplate::new(DEITY, "Solmara", CardType::Deity)
                .with_effect(EffectSpec::GainEssence { amount: 1 })
                .with_ultimate(EffectSpec::damage(EffectTarget::EnemyDeity, 5)),
        );
        registry
    }

    /// A game advanced into the first player's Main phase with plenty of
    /// energy and the given cards placed in hand.
    fn main_phase_game(hand: &[CardId]) -> (Game, Vec<InstanceId>) {
        let mut game = GameBuilder::new(test_registry())
            .with_deity(PlayerId::FIRST, DEITY)
            .with_deity(PlayerId::SECOND, DEITY)
            .with_deck(PlayerId::FIRST, vec![AVATAR; 10])
            .with_deck(PlayerId::SECOND, vec![AVATAR; 10])
            .build()
            .unwrap();

        game.advance_phase().unwrap();
        game.advance_phase().unwrap();
        assert_eq!(game.state().phase, Phase::Main);

        game.state.player_mut(PlayerId::FIRST).ledger = ResourceLedger {
            current: 10,
            max: 10,
            ..ResourceLedger::default()
        };
        let cards = hand
            .iter()
            .map(|&id| game.state.create_instance(id, PlayerId::FIRST, Zone::Hand))
            .collect();
        (game, cards)
    }

    #[test]
    fn test_play_avatar_lands_on_row() {
        let (mut game, cards) = main_phase_game(&[AVATAR]);
        let before = game.state().player(PlayerId::FIRST).ledger.current;

        let effect = game.play_card(PlayerId::FIRST, cards[0]).unwrap();

        assert_eq!(effect, None);
        assert_eq!(game.state().card(cards[0]).unwrap().zone, Zone::AvatarRow);
        assert_eq!(
            game.state().player(PlayerId::FIRST).ledger.current,
            before - 1
        );
        assert_eq!(
            game.state().card(cards[0]).unwrap().entered_turn,
            game.state().turn_number
        );
    }

    #[test]
    fn test_play_spell_goes_to_crypt_and_returns_effect() {
        let (mut game, cards) = main_phase_game(&[SPELL]);

        let effect = game.play_card(PlayerId::FIRST, cards[0]).unwrap();

        assert_eq!(effect, Some(EffectSpec::damage(EffectTarget::EnemyAvatar, 2)));
        assert_eq!(game.state().card(cards[0]).unwrap().zone, Zone::Crypt);
    }

    #[test]
    fn test_play_relic_lands_on_relic_row() {
        let (mut game, cards) = main_phase_game(&[RELIC]);
        game.play_card(PlayerId::FIRST, cards[0]).unwrap();
        assert_eq!(game.state().card(cards[0]).unwrap().zone, Zone::RelicRow);
    }

    #[test]
    fn test_second_domain_rejected_with_refund() {
        let (mut game, cards) = main_phase_game(&[DOMAIN, DOMAIN]);

        game.play_card(PlayerId::FIRST, cards[0]).unwrap();
        let before = game.state.clone();

        let err = game.play_card(PlayerId::FIRST, cards[1]).unwrap_err();
        assert_eq!(err, EngineError::TurnLimitExceeded);
        assert_eq!(game.state, before);
    }

    #[test]
    fn test_insufficient_resource_rejected_unchanged() {
        let (mut game, cards) = main_phase_game(&[AVATAR]);
        game.state.player_mut(PlayerId::FIRST).ledger.current = 0;
        let before = game.state.clone();

        let err = game.play_card(PlayerId::FIRST, cards[0]).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientResource {
                required: 1,
                available: 0,
            }
        );
        assert_eq!(game.state, before);
    }

    #[test]
    fn test_play_outside_main_rejected() {
        let (mut game, cards) = main_phase_game(&[AVATAR]);
        game.state.phase = Phase::Clash;

        let err = game.play_card(PlayerId::FIRST, cards[0]).unwrap_err();
        assert_eq!(
            err,
            EngineError::WrongPhase {
                expected: Phase::Main,
                actual: Phase::Clash,
            }
        );
    }

    #[test]
    fn test_inactive_player_cannot_play() {
        let (mut game, _) = main_phase_game(&[]);
        let card = game
            .state
            .create_instance(AVATAR, PlayerId::SECOND, Zone::Hand);

        let err = game.play_card(PlayerId::SECOND, card).unwrap_err();
        assert_eq!(err, EngineError::NotActivePlayer);
    }

    #[test]
    fn test_deity_card_unplayable() {
        let (mut game, cards) = main_phase_game(&[DEITY]);

        let err = game.play_card(PlayerId::FIRST, cards[0]).unwrap_err();
        assert_eq!(err, EngineError::UnplayableCard(cards[0]));
    }

    #[test]
    fn test_play_from_wrong_zone_rejected() {
        let (mut game, _) = main_phase_game(&[]);
        let card = game
            .state
            .create_instance(AVATAR, PlayerId::FIRST, Zone::Crypt);

        let err = game.play_card(PlayerId::FIRST, card).unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalZoneTransition {
                card,
                expected: Zone::Hand,
                actual: Zone::Crypt,
            }
        );
    }

    #[test]
    fn test_draw_stops_silently_on_empty_deck() {
        let (mut game, _) = main_phase_game(&[]);

        let drawn = game.draw_cards(PlayerId::FIRST, 15).unwrap();
        assert_eq!(drawn.len(), 10);
        assert!(game.result().is_none());

        let more = game.draw_cards(PlayerId::FIRST, 1).unwrap();
        assert!(more.is_empty());
    }

    #[test]
    fn test_discard_moves_to_crypt() {
        let (mut game, cards) = main_phase_game(&[SPELL]);

        game.discard(PlayerId::FIRST, cards[0]).unwrap();
        assert_eq!(game.state().card(cards[0]).unwrap().zone, Zone::Crypt);
    }

    #[test]
    fn test_essence_floors_at_zero_and_ends_match() {
        let (mut game, _) = main_phase_game(&[]);

        let total = game.modify_essence(PlayerId::SECOND, -100).unwrap();
        assert_eq!(total, 0);
        assert_eq!(
            game.result(),
            Some(MatchEnd {
                winner: PlayerId::FIRST,
                reason: MatchEndReason::EssenceDepleted,
            })
        );
        assert_eq!(
            game.draw_cards(PlayerId::FIRST, 1).unwrap_err(),
            EngineError::MatchOver
        );
    }

    #[test]
    fn test_set_essence_absolute() {
        let (mut game, _) = main_phase_game(&[]);

        let total = game.set_essence(PlayerId::SECOND, 7).unwrap();
        assert_eq!(total, 7);
        assert_eq!(game.state().player(PlayerId::SECOND).essence, 7);

        // Setting to the current value emits nothing.
        let before = game.history().len();
        game.set_essence(PlayerId::SECOND, 7).unwrap();
        assert_eq!(game.history().len(), before);

        game.set_essence(PlayerId::SECOND, 0).unwrap();
        assert_eq!(
            game.result(),
            Some(MatchEnd {
                winner: PlayerId::FIRST,
                reason: MatchEndReason::EssenceDepleted,
            })
        );
    }

    #[test]
    fn test_passive_once_per_turn() {
        let (mut game, _) = main_phase_game(&[]);

        let effect = game.activate_passive(PlayerId::FIRST).unwrap();
        assert_eq!(effect, Some(EffectSpec::GainEssence { amount: 1 }));

        let err = game.activate_passive(PlayerId::FIRST).unwrap_err();
        assert_eq!(err, EngineError::PassiveAlreadyUsed);
    }

    #[test]
    fn test_god_code_requires_charge() {
        let (mut game, _) = main_phase_game(&[]);

        let err = game.activate_god_code(PlayerId::FIRST).unwrap_err();
        assert_eq!(err, EngineError::NoGodCodeCharge);

        game.state
            .player_mut(PlayerId::FIRST)
            .ledger
            .bank_overflow(13);
        let ultimate = game.activate_god_code(PlayerId::FIRST).unwrap();
        assert_eq!(ultimate, Some(EffectSpec::damage(EffectTarget::EnemyDeity, 5)));
        assert_eq!(
            game.state().player(PlayerId::FIRST).ledger.god_code_charges,
            0
        );
    }

    #[test]
    fn test_gain_resource_banks_overflow() {
        let (mut game, _) = main_phase_game(&[]);
        // main_phase_game already topped the ledger up to max.
        let ledger = game.state().player(PlayerId::FIRST).ledger;
        assert_eq!(ledger.current, ledger.max);

        game.gain_resource(PlayerId::FIRST, 5).unwrap();
        let after = game.state().player(PlayerId::FIRST).ledger;
        assert_eq!(after.current, after.max);
        assert!(after.overflow > 0 || after.god_code_charges > 0);
    }
}
