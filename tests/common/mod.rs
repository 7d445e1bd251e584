//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use clash_engine::cards::{CardId, CardRegistry, CardTemplate, CardType, Keyword};
use clash_engine::core::{InstanceId, PlayerId};
use clash_engine::effects::{EffectSpec, EffectTarget};
use clash_engine::game::{Game, GameBuilder};
use clash_engine::zones::Zone;

/// 3 power / 2 guard, Haste, cost 1.
pub const RAIDER: CardId = CardId::new(1);
/// 2 power / 4 guard, cost 0.
pub const WARDEN: CardId = CardId::new(2);
/// 1 power / 3 guard, Guardian, cost 1.
pub const SENTINEL: CardId = CardId::new(3);
/// Spell, cost 1, deals 2 to an enemy Avatar (resolver-interpreted).
pub const SPARK: CardId = CardId::new(4);
/// Domain, cost 1.
pub const VALE: CardId = CardId::new(5);
/// Deity with a passive and an ultimate.
pub const SOLMARA: CardId = CardId::new(100);

pub fn registry() -> CardRegistry {
    let mut registry = CardRegistry::new();
    registry.register(
        CardTemplate::new(RAIDER, "Ashen Raider", CardType::Avatar)
            .with_cost(1)
            .with_power(3)
            .with_guard(2)
            .with_keyword(Keyword::Haste),
    );
    registry.register(
        CardTemplate::new(WARDEN, "Tide Warden", CardType::Avatar)
            .with_cost(0)
            .with_power(2)
            .with_guard(4),
    );
    registry.register(
        CardTemplate::new(SENTINEL, "Stone Sentinel", CardType::Avatar)
            .with_cost(1)
            .with_power(1)
            .with_guard(3)
            .with_keyword(Keyword::Guardian),
    );
    registry.register(
        CardTemplate::new(SPARK, "Spark", CardType::Spell)
            .with_cost(1)
            .with_effect(EffectSpec::damage(EffectTarget::EnemyAvatar, 2)),
    );
    registry.register(CardTemplate::new(VALE, "Vale of Embers", CardType::Domain).with_cost(1));
    registry.register(
        CardTemplate::new(SOLMARA, "Solmara", CardType::Deity)
            .with_effect(EffectSpec::GainEssence { amount: 1 })
            .with_ultimate(EffectSpec::damage(EffectTarget::EnemyDeity, 5)),
    );
    registry
}

pub fn builder() -> GameBuilder {
    GameBuilder::new(registry())
        .with_deity(PlayerId::FIRST, SOLMARA)
        .with_deity(PlayerId::SECOND, SOLMARA)
        .with_deck(PlayerId::FIRST, vec![RAIDER; 20])
        .with_deck(PlayerId::SECOND, vec![WARDEN; 20])
        .with_seed(42)
}

pub fn advance_n(game: &mut Game, count: usize) {
    for _ in 0..count {
        game.advance_phase().unwrap();
    }
}

/// Find an instance of a template in a player's zone.
pub fn find_in_zone(game: &Game, player: PlayerId, zone: Zone, card_id: CardId) -> InstanceId {
    game.state()
        .cards()
        .find(|c| c.owner == player && c.zone == zone && c.card_id == card_id)
        .map(|c| c.instance_id)
        .expect("expected card not found in zone")
}
