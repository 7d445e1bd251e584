//! Typed effect descriptors.
//!
//! Card behavior is described by tagged variants, never by free-text
//! matching. The engine stores an [`EffectSpec`] on a template and hands it
//! back to the external effect resolver when the card is played or an
//! ability is activated; the engine itself never interprets one. The
//! resolver acts on a spec by calling back through the engine's public
//! operations (there is no privileged back door).

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Who or what an effect applies to, resolved by the external resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The deity of the card's controller.
    OwnDeity,
    /// The opposing deity (player essence).
    EnemyDeity,
    /// Any Avatar on either board, chosen by the controller.
    AnyAvatar,
    /// An enemy Avatar, chosen by the controller.
    EnemyAvatar,
    /// The card's controller.
    Controller,
    /// The opposing player.
    Opponent,
}

/// A typed effect descriptor.
///
/// ## Example
///
/// ```
/// use clash_engine::effects::{EffectSpec, EffectTarget};
///
/// let bolt = EffectSpec::DealDamage {
///     target: EffectTarget::EnemyAvatar,
///     amount: 2,
/// };
/// assert_eq!(bolt, bolt.clone());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSpec {
    /// Deal damage to a target.
    DealDamage { target: EffectTarget, amount: i64 },

    /// The controller gains essence.
    GainEssence { amount: i64 },

    /// Drain: the opponent loses essence and the controller gains it.
    DrainEssence { amount: i64 },

    /// The controller draws cards.
    Draw { count: usize },

    /// The controller gains energy resource this turn.
    GainResource { amount: u8 },

    /// Put a specific card onto the controller's Avatar row.
    Summon { card: CardId },

    /// Apply several effects in order.
    Sequence(Vec<EffectSpec>),
}

impl EffectSpec {
    /// Convenience constructor for a damage effect.
    pub fn damage(target: EffectTarget, amount: i64) -> Self {
        Self::DealDamage { target, amount }
    }

    /// Convenience constructor for a draw effect.
    pub fn draw(count: usize) -> Self {
        Self::Draw { count }
    }

    /// Convenience constructor for a sequence.
    pub fn sequence(effects: impl IntoIterator<Item = EffectSpec>) -> Self {
        Self::Sequence(effects.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let spec = EffectSpec::damage(EffectTarget::EnemyDeity, 1);
        assert_eq!(
            spec,
            EffectSpec::DealDamage {
                target: EffectTarget::EnemyDeity,
                amount: 1
            }
        );

        let seq = EffectSpec::sequence([EffectSpec::draw(1), EffectSpec::damage(EffectTarget::AnyAvatar, 2)]);
        match seq {
            EffectSpec::Sequence(parts) => assert_eq!(parts.len(), 2),
            _ => panic!("Expected Sequence"),
        }
    }

    #[test]
    fn test_serialization() {
        let spec = EffectSpec::sequence([
            EffectSpec::DrainEssence { amount: 2 },
            EffectSpec::GainResource { amount: 1 },
        ]);

        let json = serde_json::to_string(&spec).unwrap();
        let restored: EffectSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, restored);
    }
}
