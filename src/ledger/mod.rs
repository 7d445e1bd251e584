//! The per-player energy resource ledger.
//!
//! Each player tracks `current` spendable energy, a turn-incrementing `max`
//! (capped at 13), and an `overflow` bank. Energy gained beyond `max` banks
//! into overflow; every 13 banked overflow converts into one god-code
//! charge, up to 2 charges. Once both charges are held, further overflow is
//! discarded rather than banked.
//!
//! `spend` follows the engine-wide validate-then-mutate rule: it checks the
//! cost against `current` before touching anything, so a rejected spend
//! leaves the ledger unchanged.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;

/// Hard cap on both `current` and `max` energy.
pub const RESOURCE_CAP: u8 = 13;

/// Banked overflow consumed per god-code charge.
pub const OVERFLOW_PER_CHARGE: u16 = 13;

/// Maximum god-code charges a player can hold.
pub const GOD_CODE_CHARGE_CAP: u8 = 2;

/// A player's energy ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    /// Spendable energy. Always `<= max`.
    pub current: u8,

    /// Energy refilled each Dawn. Always `<= RESOURCE_CAP`.
    pub max: u8,

    /// Banked overflow toward the next god-code charge. Always
    /// `< OVERFLOW_PER_CHARGE` after any mutation.
    pub overflow: u16,

    /// Held god-code charges. Always `<= GOD_CODE_CHARGE_CAP`.
    pub god_code_charges: u8,
}

impl ResourceLedger {
    /// An empty ledger (turn zero: nothing accrued yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gain energy. Anything beyond `max` banks into overflow.
    pub fn adjust(&mut self, amount: u8) {
        let headroom = self.max - self.current;
        if amount <= headroom {
            self.current += amount;
        } else {
            self.current = self.max;
            self.bank_overflow(amount - headroom);
        }
    }

    /// Bank overflow and convert full increments into god-code charges.
    ///
    /// Each conversion consumes exactly [`OVERFLOW_PER_CHARGE`]. Overflow
    /// arriving while both charges are held is discarded, and a conversion
    /// that reaches the cap discards whatever remains in the bank.
    pub fn bank_overflow(&mut self, amount: u8) {
        if self.god_code_charges >= GOD_CODE_CHARGE_CAP {
            return;
        }
        self.overflow += u16::from(amount);
        while self.overflow >= OVERFLOW_PER_CHARGE && self.god_code_charges < GOD_CODE_CHARGE_CAP {
            self.overflow -= OVERFLOW_PER_CHARGE;
            self.god_code_charges += 1;
        }
        if self.god_code_charges >= GOD_CODE_CHARGE_CAP {
            self.overflow = 0;
        }
    }

    /// Dawn refill: `max` grows by 1 (to the cap) and `current` resets to it.
    pub fn refill_at_dawn(&mut self) {
        if self.max < RESOURCE_CAP {
            self.max += 1;
        }
        self.current = self.max;
    }

    /// Spend energy. Rejects without mutating if the cost exceeds `current`.
    pub fn spend(&mut self, cost: u8) -> Result<(), EngineError> {
        if cost > self.current {
            return Err(EngineError::InsufficientResource {
                required: cost,
                available: self.current,
            });
        }
        self.current -= cost;
        Ok(())
    }

    /// Consume one god-code charge.
    pub fn spend_charge(&mut self) -> Result<(), EngineError> {
        if self.god_code_charges == 0 {
            return Err(EngineError::NoGodCodeCharge);
        }
        self.god_code_charges -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_ledger_empty() {
        let ledger = ResourceLedger::new();
        assert_eq!(ledger.current, 0);
        assert_eq!(ledger.max, 0);
        assert_eq!(ledger.overflow, 0);
        assert_eq!(ledger.god_code_charges, 0);
    }

    #[test]
    fn test_refill_grows_max_to_cap() {
        let mut ledger = ResourceLedger::new();
        for turn in 1..=15u8 {
            ledger.refill_at_dawn();
            assert_eq!(ledger.max, turn.min(RESOURCE_CAP));
            assert_eq!(ledger.current, ledger.max);
        }
    }

    #[test]
    fn test_adjust_within_max() {
        let mut ledger = ResourceLedger {
            current: 1,
            max: 5,
            ..ResourceLedger::default()
        };

        ledger.adjust(3);
        assert_eq!(ledger.current, 4);
        assert_eq!(ledger.overflow, 0);
    }

    #[test]
    fn test_adjust_excess_banks_overflow() {
        let mut ledger = ResourceLedger {
            current: 4,
            max: 5,
            ..ResourceLedger::default()
        };

        ledger.adjust(7);
        assert_eq!(ledger.current, 5);
        assert_eq!(ledger.overflow, 6);
    }

    #[test]
    fn test_overflow_converts_to_charge() {
        let mut ledger = ResourceLedger::new();

        ledger.bank_overflow(12);
        assert_eq!(ledger.god_code_charges, 0);
        assert_eq!(ledger.overflow, 12);

        ledger.bank_overflow(4);
        assert_eq!(ledger.god_code_charges, 1);
        assert_eq!(ledger.overflow, 3);
    }

    #[test]
    fn test_charge_cap_discards_excess() {
        let mut ledger = ResourceLedger::new();

        ledger.bank_overflow(26);
        assert_eq!(ledger.god_code_charges, 2);
        assert_eq!(ledger.overflow, 0);

        // Both charges held: further overflow is discarded outright.
        ledger.bank_overflow(13);
        assert_eq!(ledger.god_code_charges, 2);
        assert_eq!(ledger.overflow, 0);
    }

    #[test]
    fn test_conversion_at_cap_discards_remainder() {
        let mut ledger = ResourceLedger::new();

        ledger.bank_overflow(30);
        assert_eq!(ledger.god_code_charges, 2);
        assert_eq!(ledger.overflow, 0);
    }

    #[test]
    fn test_spend() {
        let mut ledger = ResourceLedger {
            current: 5,
            max: 5,
            ..ResourceLedger::default()
        };

        ledger.spend(3).unwrap();
        assert_eq!(ledger.current, 2);
    }

    #[test]
    fn test_spend_insufficient_rejected_unchanged() {
        let mut ledger = ResourceLedger {
            current: 2,
            max: 5,
            ..ResourceLedger::default()
        };
        let before = ledger;

        let err = ledger.spend(3).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientResource {
                required: 3,
                available: 2,
            }
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_spend_charge() {
        let mut ledger = ResourceLedger::new();
        assert_eq!(ledger.spend_charge().unwrap_err(), EngineError::NoGodCodeCharge);

        ledger.bank_overflow(13);
        ledger.spend_charge().unwrap();
        assert_eq!(ledger.god_code_charges, 0);
    }

    proptest! {
        #[test]
        fn prop_current_never_exceeds_max(ops in prop::collection::vec(0u8..40, 0..64)) {
            let mut ledger = ResourceLedger::new();
            for (i, amount) in ops.into_iter().enumerate() {
                match i % 3 {
                    0 => ledger.refill_at_dawn(),
                    1 => ledger.adjust(amount),
                    _ => { let _ = ledger.spend(amount); }
                }
                prop_assert!(ledger.current <= ledger.max);
                prop_assert!(ledger.max <= RESOURCE_CAP);
                prop_assert!(ledger.god_code_charges <= GOD_CODE_CHARGE_CAP);
                prop_assert!(ledger.overflow < OVERFLOW_PER_CHARGE);
            }
        }
    }
}
