//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card: type, cost,
//! combat stats, keywords, and the typed effect descriptor the external
//! resolver consumes. Instance-specific data (damage, tap state, zone) is
//! stored separately in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::effects::EffectSpec;

/// Unique identifier for a card template.
///
/// Identifies the card's definition ("Ashen Sentinel"), not a specific
/// instance in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The card types the rules engine distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// A creature that fights on the Avatar row.
    Avatar,
    /// One-shot effect; goes to the Crypt as it resolves.
    Spell,
    /// Persistent non-creature permanent, one play per turn.
    Domain,
    /// Persistent artifact permanent.
    Relic,
    /// A player's fixed companion. Never played from hand.
    Deity,
}

/// Keywords with rules meaning.
///
/// `Guardian` and `Haste` are enforced by core combat; the rest are carried
/// for the external resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Attackers must target this permanent before any other target.
    Guardian,
    /// May attack the turn it enters play.
    Haste,
    /// Combat damage dealt also heals the controller (resolver-interpreted).
    Lifedrink,
    /// Excess combat damage carries through to essence (resolver-interpreted).
    Piercing,
}

/// Immutable card definition.
///
/// ## Example
///
/// ```
/// use clash_engine::cards::{CardId, CardTemplate, CardType, Keyword};
///
/// let sentinel = CardTemplate::new(CardId::new(1), "Ashen Sentinel", CardType::Avatar)
///     .with_cost(2)
///     .with_power(1)
///     .with_guard(3)
///     .with_keyword(Keyword::Guardian);
///
/// assert!(sentinel.has_keyword(Keyword::Guardian));
/// assert_eq!(sentinel.guard, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Unique identifier for this template.
    pub id: CardId,

    /// Card name (display/debugging).
    pub name: String,

    /// The card's type.
    pub card_type: CardType,

    /// Aspect tags. Order irrelevant; used for resolver-side filtering.
    pub aspects: SmallVec<[String; 2]>,

    /// Energy cost to play.
    pub cost: u8,

    /// Offensive stat. Default 0.
    pub power: i64,

    /// Defensive threshold. Defaults to 1 for Avatars, 0 otherwise.
    pub guard: i64,

    /// Keywords.
    pub keywords: SmallVec<[Keyword; 2]>,

    /// Effect descriptor handed to the external resolver when played.
    pub effect: Option<EffectSpec>,

    /// For Deity templates: the gated ultimate ability.
    pub ultimate: Option<EffectSpec>,
}

impl CardTemplate {
    /// Create a new template with default stats.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            aspects: SmallVec::new(),
            cost: 0,
            power: 0,
            guard: if card_type == CardType::Avatar { 1 } else { 0 },
            keywords: SmallVec::new(),
            effect: None,
            ultimate: None,
        }
    }

    /// Set the energy cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u8) -> Self {
        self.cost = cost;
        self
    }

    /// Set the power stat (builder pattern).
    #[must_use]
    pub fn with_power(mut self, power: i64) -> Self {
        self.power = power;
        self
    }

    /// Set the guard stat (builder pattern).
    #[must_use]
    pub fn with_guard(mut self, guard: i64) -> Self {
        self.guard = guard;
        self
    }

    /// Add an aspect tag (builder pattern).
    #[must_use]
    pub fn with_aspect(mut self, aspect: impl Into<String>) -> Self {
        let aspect = aspect.into();
        if !self.aspects.contains(&aspect) {
            self.aspects.push(aspect);
        }
        self
    }

    /// Add a keyword (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    /// Set the effect descriptor (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Set the deity ultimate descriptor (builder pattern).
    #[must_use]
    pub fn with_ultimate(mut self, ultimate: EffectSpec) -> Self {
        self.ultimate = Some(ultimate);
        self
    }

    /// Does this template carry a keyword?
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Does this template carry an aspect tag?
    #[must_use]
    pub fn has_aspect(&self, aspect: &str) -> bool {
        self.aspects.iter().any(|a| a == aspect)
    }
}
