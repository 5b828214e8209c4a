//! # Ledger Configuration & Constants
//!
//! Every magic number in AGORA lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.
//!
//! A marketplace ledger doesn't need fifty tunables. It needs the handful
//! it has to be correct.

use crate::model::Amount;

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// Cents per whole currency unit. Two decimal places, like the money in
/// your pocket. All arithmetic happens in cents; the decimal point only
/// exists at the display/parse boundary.
pub const CENTS_PER_UNIT: u64 = 100;

/// Balance granted to every newly registered user: 500.00.
///
/// A bootstrap convenience so new accounts can participate immediately.
/// Real deployments would fund accounts through `deposit` instead.
pub const STARTING_BALANCE: Amount = Amount::from_cents(500_00);

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Total attempts for a state save before the failure propagates to the
/// caller. Persistence is the only operation in the ledger eligible for
/// automatic retry; two quick retries paper over transient I/O hiccups
/// without hiding a genuinely dead disk.
pub const SAVE_RETRY_ATTEMPTS: u32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_balance_is_500_units() {
        assert_eq!(STARTING_BALANCE.cents(), 500 * CENTS_PER_UNIT);
        assert_eq!(STARTING_BALANCE.to_string(), "500.00");
    }

    #[test]
    fn save_retry_budget_is_bounded() {
        // At least one attempt (otherwise nothing ever persists), and a
        // small finite budget (otherwise a dead disk hangs every mutation).
        assert!(SAVE_RETRY_ATTEMPTS >= 1);
        assert!(SAVE_RETRY_ATTEMPTS <= 5);
    }
}
