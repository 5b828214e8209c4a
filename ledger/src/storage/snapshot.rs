//! The wire form of the ledger's entire state.
//!
//! A [`LedgerSnapshot`] is what crosses the persistence boundary: every
//! user, every item, every transaction, plus the session pointer, as one
//! value. Entity vectors are sorted by id (transactions keep append order)
//! so the same logical state always serializes to the same bytes.

use serde::{Deserialize, Serialize};

use crate::model::{Item, Transaction, User, UserId};

use super::gateway::GatewayError;

/// Complete ledger state, ready for storage or interchange.
///
/// Binary persistence goes through bincode (see
/// [`AgoraDb`](super::AgoraDb)); the JSON helpers exist for operators —
/// state exports, backups, and eyeballing what a misbehaving deployment
/// actually contains.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub users: Vec<User>,
    pub items: Vec<Item>,
    pub transactions: Vec<Transaction>,
    /// The authenticated user at save time, if any.
    pub current_user: Option<UserId>,
}

impl LedgerSnapshot {
    /// The state of a ledger nobody has used yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, GatewayError> {
        serde_json::to_string_pretty(self).map_err(|e| GatewayError::Serialization(e.to_string()))
    }

    /// Parses a snapshot previously produced by [`to_json`](Self::to_json).
    pub fn from_json(raw: &str) -> Result<Self, GatewayError> {
        serde_json::from_str(raw).map_err(|e| GatewayError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Item, User};

    fn sample() -> LedgerSnapshot {
        let seller = User::new("ada", "ada@example.com", "s3cret", Amount::from_cents(1000_00));
        let item = Item::new(
            seller.id,
            "Difference Engine",
            "Crank included",
            Amount::from_cents(420_00),
            "Office",
        );
        LedgerSnapshot {
            current_user: Some(seller.id),
            users: vec![seller],
            items: vec![item],
            transactions: vec![],
        }
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let snapshot = sample();
        let json = snapshot.to_json().unwrap();
        let back = LedgerSnapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn json_is_human_readable() {
        let json = sample().to_json().unwrap();
        // The export is for operators; field names and values should be
        // greppable as written.
        assert!(json.contains("\"username\": \"ada\""));
        assert!(json.contains("\"available\""));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(LedgerSnapshot::from_json("{not json").is_err());
        assert!(LedgerSnapshot::from_json("{}").is_err());
    }

    #[test]
    fn empty_snapshot_has_nothing_in_it() {
        let empty = LedgerSnapshot::empty();
        assert!(empty.users.is_empty());
        assert!(empty.items.is_empty());
        assert!(empty.transactions.is_empty());
        assert!(empty.current_user.is_none());
    }
}
