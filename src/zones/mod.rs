//! Zone vocabulary and per-player card containers.
//!
//! Zones are a closed enum: the game defines exactly seven, and the engine
//! enforces their semantics directly (deck order, hand limit at the phase
//! boundary, rows for permanents). The deck is ordered with the top at the
//! end of the vec, so drawing is a `pop`.
//!
//! Zone transitions happen only through
//! [`GameState::move_card`](crate::core::GameState::move_card), which makes
//! each move an atomic remove-then-append.

use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;

/// The zones a card can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Ordered; top of deck is the end of the vec.
    Deck,
    /// Unordered; capacity-limited at the Twilight boundary.
    Hand,
    /// Creatures in play.
    AvatarRow,
    /// Domain permanents in play.
    DomainRow,
    /// Relic permanents in play.
    RelicRow,
    /// Death/discard zone.
    Crypt,
    /// Exile. Terminal: nothing in the engine moves cards back out.
    Banished,
}

impl Zone {
    /// Is this a board row (a zone where permanents are in play)?
    #[must_use]
    pub const fn is_row(self) -> bool {
        matches!(self, Zone::AvatarRow | Zone::DomainRow | Zone::RelicRow)
    }

    /// All zones, in a fixed order.
    #[must_use]
    pub const fn all() -> [Zone; 7] {
        [
            Zone::Deck,
            Zone::Hand,
            Zone::AvatarRow,
            Zone::DomainRow,
            Zone::RelicRow,
            Zone::Crypt,
            Zone::Banished,
        ]
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Deck => "Deck",
            Zone::Hand => "Hand",
            Zone::AvatarRow => "AvatarRow",
            Zone::DomainRow => "DomainRow",
            Zone::RelicRow => "RelicRow",
            Zone::Crypt => "Crypt",
            Zone::Banished => "Banished",
        };
        f.write_str(name)
    }
}

/// One player's card zones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStore {
    deck: Vec<InstanceId>,
    hand: Vec<InstanceId>,
    avatar_row: Vec<InstanceId>,
    domain_row: Vec<InstanceId>,
    relic_row: Vec<InstanceId>,
    crypt: Vec<InstanceId>,
    banished: Vec<InstanceId>,
}

impl ZoneStore {
    /// The cards in a zone. Deck order is bottom-to-top.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> &Vec<InstanceId> {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::AvatarRow => &self.avatar_row,
            Zone::DomainRow => &self.domain_row,
            Zone::RelicRow => &self.relic_row,
            Zone::Crypt => &self.crypt,
            Zone::Banished => &self.banished,
        }
    }

    /// Mutable access to a zone's card list.
    pub fn zone_mut(&mut self, zone: Zone) -> &mut Vec<InstanceId> {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::AvatarRow => &mut self.avatar_row,
            Zone::DomainRow => &mut self.domain_row,
            Zone::RelicRow => &mut self.relic_row,
            Zone::Crypt => &mut self.crypt,
            Zone::Banished => &mut self.banished,
        }
    }

    /// Is the card in the given zone?
    #[must_use]
    pub fn contains(&self, zone: Zone, id: InstanceId) -> bool {
        self.zone(zone).contains(&id)
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        self.zone(zone).len()
    }

    /// The top card of the deck, if any.
    #[must_use]
    pub fn deck_top(&self) -> Option<InstanceId> {
        self.deck.last().copied()
    }

    /// Total cards across all zones.
    #[must_use]
    pub fn total(&self) -> usize {
        Zone::all().iter().map(|&z| self.zone_size(z)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_row() {
        assert!(Zone::AvatarRow.is_row());
        assert!(Zone::DomainRow.is_row());
        assert!(Zone::RelicRow.is_row());
        assert!(!Zone::Deck.is_row());
        assert!(!Zone::Hand.is_row());
        assert!(!Zone::Crypt.is_row());
        assert!(!Zone::Banished.is_row());
    }

    #[test]
    fn test_store_push_and_contains() {
        let mut store = ZoneStore::default();
        store.zone_mut(Zone::Hand).push(InstanceId::new(1));
        store.zone_mut(Zone::Hand).push(InstanceId::new(2));

        assert!(store.contains(Zone::Hand, InstanceId::new(1)));
        assert!(!store.contains(Zone::Deck, InstanceId::new(1)));
        assert_eq!(store.zone_size(Zone::Hand), 2);
        assert_eq!(store.total(), 2);
    }

    #[test]
    fn test_deck_top_is_last() {
        let mut store = ZoneStore::default();
        store.zone_mut(Zone::Deck).push(InstanceId::new(1));
        store.zone_mut(Zone::Deck).push(InstanceId::new(2));

        assert_eq!(store.deck_top(), Some(InstanceId::new(2)));
    }

    #[test]
    fn test_empty_deck_top() {
        let store = ZoneStore::default();
        assert_eq!(store.deck_top(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Zone::Crypt.to_string(), "Crypt");
        assert_eq!(Zone::AvatarRow.to_string(), "AvatarRow");
    }
}
