//! Match setup.
//!
//! `GameBuilder` assembles a match from a registry, per-player deck lists
//! and deity choices, shuffles the decks with the seeded RNG, and runs the
//! first turn's Dawn entry so the returned game is ready for play. Opening
//! hands are deliberately not drawn; mulligan policy belongs to the setup
//! routine calling [`Game::draw_cards`].

use crate::cards::{CardId, CardRegistry};
use crate::core::{EngineError, GameState, PlayerId, PlayerPair};
use crate::zones::Zone;

use super::Game;

/// Default starting essence for both players.
pub const DEFAULT_STARTING_ESSENCE: i64 = 25;

/// Builder for a fresh match.
///
/// ## Example
///
/// ```
/// use clash_engine::cards::{CardId, CardRegistry, CardTemplate, CardType};
/// use clash_engine::core::PlayerId;
/// use clash_engine::game::GameBuilder;
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::new(CardId::new(1), "Whelp", CardType::Avatar));
/// registry.register(CardTemplate::new(CardId::new(9), "Solmara", CardType::Deity));
///
/// let game = GameBuilder::new(registry)
///     .with_deity(PlayerId::FIRST, CardId::new(9))
///     .with_deity(PlayerId::SECOND, CardId::new(9))
///     .with_deck(PlayerId::FIRST, vec![CardId::new(1); 20])
///     .with_deck(PlayerId::SECOND, vec![CardId::new(1); 20])
///     .with_seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(game.state().turn_number, 1);
/// ```
pub struct GameBuilder {
    registry: CardRegistry,
    decks: PlayerPair<Vec<CardId>>,
    deities: PlayerPair<CardId>,
    starting_essence: i64,
    seed: u64,
}

impl GameBuilder {
    /// Start building a match over the given registry.
    #[must_use]
    pub fn new(registry: CardRegistry) -> Self {
        Self {
            registry,
            decks: PlayerPair::with_default(),
            deities: PlayerPair::with_value(CardId::new(0)),
            starting_essence: DEFAULT_STARTING_ESSENCE,
            seed: 0,
        }
    }

    /// Set a player's deck list (builder pattern). Order is irrelevant; the
    /// deck is shuffled at build.
    #[must_use]
    pub fn with_deck(mut self, player: PlayerId, cards: Vec<CardId>) -> Self {
        self.decks[player] = cards;
        self
    }

    /// Set a player's deity template (builder pattern). The template must be
    /// registered.
    #[must_use]
    pub fn with_deity(mut self, player: PlayerId, deity: CardId) -> Self {
        self.deities[player] = deity;
        self
    }

    /// Set the starting essence for both players (builder pattern).
    #[must_use]
    pub fn with_starting_essence(mut self, essence: i64) -> Self {
        self.starting_essence = essence;
        self
    }

    /// Set the shuffle seed (builder pattern). The seed fully determines the
    /// deck orders.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the match: validate the card pool, shuffle, and enter turn 1.
    pub fn build(self) -> Result<Game, EngineError> {
        for player in PlayerId::both() {
            let deity = self.deities[player];
            if !self.registry.contains(deity) {
                return Err(EngineError::UnknownTemplate(deity));
            }
            for &card in &self.decks[player] {
                if !self.registry.contains(card) {
                    return Err(EngineError::UnknownTemplate(card));
                }
            }
        }

        let mut state = GameState::new(self.deities.clone(), self.starting_essence, self.seed);
        for player in PlayerId::both() {
            let mut deck = self.decks[player].clone();
            state.rng.shuffle(&mut deck);
            for card in deck {
                state.create_instance(card, player, Zone::Deck);
            }
        }

        let mut game = Game::from_parts(state, self.registry);
        game.enter_phase()?;
        game.flush_events()?;
        Ok(game)
    }
}
