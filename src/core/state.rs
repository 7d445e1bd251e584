//! The single owned game-state tree.
//!
//! `GameState` holds everything a match is: both players, whose turn it is,
//! the current phase, combat declarations, and every card instance. It is a
//! plain serializable value with no ambient/static access: every engine
//! operation takes it (through [`Game`](crate::game::Game)) explicitly, so
//! multiple matches can run side by side and unit tests stay deterministic.
//!
//! Mutation discipline: every operation validates all of its preconditions
//! before touching the tree, so a rejected operation leaves the state
//! byte-for-byte unchanged.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardInstance};
use crate::ledger::ResourceLedger;
use crate::zones::{Zone, ZoneStore};

use super::combat::CombatState;
use super::entity::InstanceId;
use super::error::EngineError;
use super::player::{PlayerId, PlayerPair};
use super::rng::GameRng;

/// Maximum hand size, enforced when leaving the Twilight phase.
pub const HAND_LIMIT: usize = 7;

/// The turn phases, in strict cyclic order.
///
/// `Dawn -> Draw -> Main -> Clash -> Twilight -> (opponent's Dawn, turn + 1)`.
/// There is no terminal phase; the cycle runs until a match-ending condition
/// is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Dawn,
    Draw,
    Main,
    Clash,
    Twilight,
}

impl Phase {
    /// The phase that follows this one. `Twilight` wraps to the opponent's
    /// `Dawn`; the turn/player handoff is the phase controller's job.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Dawn => Phase::Draw,
            Phase::Draw => Phase::Main,
            Phase::Main => Phase::Clash,
            Phase::Clash => Phase::Twilight,
            Phase::Twilight => Phase::Dawn,
        }
    }
}

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEndReason {
    /// The loser had to draw from an empty deck.
    DeckExhausted,
    /// The loser's essence reached zero.
    EssenceDepleted,
}

/// A recorded match result.
///
/// Terminal conditions are values, not errors: the engine records the result
/// on the state and rejects further operations with
/// [`EngineError::MatchOver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEnd {
    pub winner: PlayerId,
    pub reason: MatchEndReason,
}

/// Per-player state: essence, resource ledger, deity, zones, turn flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Life total. The match ends when this reaches 0.
    pub essence: i64,

    /// The energy resource ledger.
    pub ledger: ResourceLedger,

    /// The player's fixed companion Deity (template reference). The deity
    /// never occupies a zone and never moves; attacks against it damage
    /// essence directly.
    pub deity: CardId,

    /// The player's card zones.
    pub zones: ZoneStore,

    /// Turn-scoped flags, reset at the player's Dawn.
    pub has_drawn_this_turn: bool,
    pub domains_played_this_turn: u8,
    pub passive_used_this_turn: bool,
}

impl PlayerState {
    /// Create a player with full essence and an empty board.
    #[must_use]
    pub fn new(deity: CardId, starting_essence: i64) -> Self {
        Self {
            essence: starting_essence,
            ledger: ResourceLedger::new(),
            deity,
            zones: ZoneStore::default(),
            has_drawn_this_turn: false,
            domains_played_this_turn: 0,
            passive_used_this_turn: false,
        }
    }

    /// Reset the turn-scoped flags at Dawn.
    pub fn reset_turn_flags(&mut self) {
        self.has_drawn_this_turn = false;
        self.domains_played_this_turn = 0;
        self.passive_used_this_turn = false;
    }
}

/// Complete match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Both players, indexed by `PlayerId`.
    pub players: PlayerPair<PlayerState>,

    /// Whose turn it is.
    pub active_player: PlayerId,

    /// Turn number, starting at 1.
    pub turn_number: u32,

    /// Current phase.
    pub phase: Phase,

    /// Transient combat declarations, cleared every turn.
    pub combat: CombatState,

    /// Card instances by ID.
    cards: FxHashMap<InstanceId, CardInstance>,

    /// Deterministic RNG (used only for setup shuffling).
    pub rng: GameRng,

    /// Next instance ID to assign.
    next_instance_id: u32,

    /// Recorded result, if the match has ended.
    pub result: Option<MatchEnd>,
}

impl GameState {
    /// Create a fresh match state: turn 1, first player, Dawn phase.
    #[must_use]
    pub fn new(deities: PlayerPair<CardId>, starting_essence: i64, seed: u64) -> Self {
        Self {
            players: PlayerPair::new(|p| PlayerState::new(deities[p], starting_essence)),
            active_player: PlayerId::FIRST,
            turn_number: 1,
            phase: Phase::Dawn,
            combat: CombatState::default(),
            cards: FxHashMap::default(),
            rng: GameRng::new(seed),
            next_instance_id: 0,
            result: None,
        }
    }

    // === Players ===

    /// A player's state.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// A player's mutable state.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    // === Card instances ===

    /// Create a card instance in the given zone with a fresh monotonic ID.
    pub fn create_instance(&mut self, card_id: CardId, owner: PlayerId, zone: Zone) -> InstanceId {
        let instance_id = InstanceId::new(self.next_instance_id);
        self.next_instance_id += 1;

        let mut instance = CardInstance::new(instance_id, card_id, owner, zone);
        instance.entered_turn = self.turn_number;

        self.cards.insert(instance_id, instance);
        self.players[owner].zones.zone_mut(zone).push(instance_id);
        instance_id
    }

    /// Look up a card instance.
    pub fn card(&self, id: InstanceId) -> Result<&CardInstance, EngineError> {
        self.cards.get(&id).ok_or(EngineError::UnknownInstance(id))
    }

    /// Look up a mutable card instance.
    pub fn card_mut(&mut self, id: InstanceId) -> Result<&mut CardInstance, EngineError> {
        self.cards
            .get_mut(&id)
            .ok_or(EngineError::UnknownInstance(id))
    }

    /// Iterate all card instances.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.values()
    }

    /// Number of card instances tracked.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    // === Zone transitions ===

    /// Move a card between two zones of its owner.
    ///
    /// Fails with [`EngineError::IllegalZoneTransition`] if the card is not
    /// currently in `from`. The move is atomic remove-then-append with no
    /// intermediate observable state. Transient combat state (tapped,
    /// damage, attacked flag, overrides) is cleared on every zone change,
    /// and `entered_turn` is stamped when the card lands on a board row.
    ///
    /// Returns the owner, for event emission by the caller.
    pub fn move_card(
        &mut self,
        id: InstanceId,
        from: Zone,
        to: Zone,
    ) -> Result<PlayerId, EngineError> {
        let turn = self.turn_number;
        let (owner, actual) = {
            let card = self.card(id)?;
            (card.owner, card.zone)
        };

        if actual != from || !self.players[owner].zones.zone(from).contains(&id) {
            return Err(EngineError::IllegalZoneTransition {
                card: id,
                expected: from,
                actual,
            });
        }

        let store = &mut self.players[owner].zones;
        store.zone_mut(from).retain(|&c| c != id);
        store.zone_mut(to).push(id);

        let card = self.cards.get_mut(&id).expect("validated above");
        card.zone = to;
        card.clear_transient();
        if to.is_row() {
            card.entered_turn = turn;
        }

        Ok(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn test_state() -> GameState {
        GameState::new(
            PlayerPair::new(|_| CardId::new(100)),
            25,
            42,
        )
    }

    #[test]
    fn test_new_state() {
        let state = test_state();

        assert_eq!(state.turn_number, 1);
        assert_eq!(state.active_player, PlayerId::FIRST);
        assert_eq!(state.phase, Phase::Dawn);
        assert_eq!(state.player(PlayerId::FIRST).essence, 25);
        assert!(state.result.is_none());
    }

    #[test]
    fn test_phase_cycle() {
        assert_eq!(Phase::Dawn.next(), Phase::Draw);
        assert_eq!(Phase::Draw.next(), Phase::Main);
        assert_eq!(Phase::Main.next(), Phase::Clash);
        assert_eq!(Phase::Clash.next(), Phase::Twilight);
        assert_eq!(Phase::Twilight.next(), Phase::Dawn);
    }

    #[test]
    fn test_create_instance_monotonic_ids() {
        let mut state = test_state();

        let a = state.create_instance(CardId::new(1), PlayerId::FIRST, Zone::Deck);
        let b = state.create_instance(CardId::new(1), PlayerId::FIRST, Zone::Deck);
        let c = state.create_instance(CardId::new(2), PlayerId::SECOND, Zone::Hand);

        assert!(a < b && b < c);
        assert_eq!(state.card_count(), 3);
        assert_eq!(state.player(PlayerId::FIRST).zones.zone(Zone::Deck).len(), 2);
    }

    #[test]
    fn test_create_instance_zero_initialized() {
        let mut state = test_state();
        let id = state.create_instance(CardId::new(1), PlayerId::FIRST, Zone::Hand);

        let card = state.card(id).unwrap();
        assert!(!card.tapped);
        assert!(!card.face_down);
        assert_eq!(card.damage, 0);
    }

    #[test]
    fn test_move_card() {
        let mut state = test_state();
        let id = state.create_instance(CardId::new(1), PlayerId::FIRST, Zone::Hand);

        let owner = state.move_card(id, Zone::Hand, Zone::AvatarRow).unwrap();

        assert_eq!(owner, PlayerId::FIRST);
        assert_eq!(state.card(id).unwrap().zone, Zone::AvatarRow);
        assert!(state.player(PlayerId::FIRST).zones.zone(Zone::Hand).is_empty());
        assert_eq!(
            state.player(PlayerId::FIRST).zones.zone(Zone::AvatarRow),
            &[id]
        );
    }

    #[test]
    fn test_move_card_wrong_source_rejected() {
        let mut state = test_state();
        let id = state.create_instance(CardId::new(1), PlayerId::FIRST, Zone::Hand);

        let before = state.clone();
        let err = state.move_card(id, Zone::Deck, Zone::Crypt).unwrap_err();

        assert_eq!(
            err,
            EngineError::IllegalZoneTransition {
                card: id,
                expected: Zone::Deck,
                actual: Zone::Hand,
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_card_clears_transient_state() {
        let mut state = test_state();
        let id = state.create_instance(CardId::new(1), PlayerId::FIRST, Zone::AvatarRow);

        {
            let card = state.card_mut(id).unwrap();
            card.tapped = true;
            card.damage = 3;
            card.attacked_this_turn = true;
        }

        state.move_card(id, Zone::AvatarRow, Zone::Crypt).unwrap();

        let card = state.card(id).unwrap();
        assert!(!card.tapped);
        assert_eq!(card.damage, 0);
        assert!(!card.attacked_this_turn);
    }

    #[test]
    fn test_move_card_stamps_entered_turn() {
        let mut state = test_state();
        let id = state.create_instance(CardId::new(1), PlayerId::FIRST, Zone::Hand);

        state.turn_number = 5;
        state.move_card(id, Zone::Hand, Zone::AvatarRow).unwrap();

        assert_eq!(state.card(id).unwrap().entered_turn, 5);
    }

    #[test]
    fn test_unknown_instance() {
        let state = test_state();
        assert_eq!(
            state.card(InstanceId::new(99)).unwrap_err(),
            EngineError::UnknownInstance(InstanceId::new(99))
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let mut state = test_state();
        state.create_instance(CardId::new(1), PlayerId::FIRST, Zone::Deck);
        state.create_instance(CardId::new(2), PlayerId::SECOND, Zone::Hand);

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
