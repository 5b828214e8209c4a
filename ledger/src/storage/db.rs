//! # AgoraDb — Persistent Storage Engine
//!
//! The production [`PersistenceGateway`], built on sled's embedded
//! key-value store.
//!
//! ## Layout
//!
//! One tree, one key:
//!
//! | Tree      | Key            | Value                     |
//! |-----------|----------------|---------------------------|
//! | (default) | `ledger/state` | `bincode(LedgerSnapshot)` |
//!
//! A blockchain-style store would index entities individually; this
//! gateway's contract is load-all / save-all, so the natural unit of
//! storage is the whole snapshot. The payoff is atomicity for free: a
//! single-key insert in sled either replaces the old value or doesn't,
//! which is exactly the all-or-nothing guarantee the trait demands. No
//! batches to coordinate, no partially updated trees to repair.
//!
//! ## Durability
//!
//! Every save ends with a `flush()`. sled buffers writes; without the
//! flush a crash could drop a committed purchase, and "the money moved
//! but the disk forgot" is not a bug report we want to read.

use sled::Db;
use std::path::Path;

use super::gateway::{GatewayError, PersistenceGateway};
use super::snapshot::LedgerSnapshot;

/// Key under which the snapshot lives in the default tree.
const STATE_KEY: &[u8] = b"ledger/state";

/// Persistent storage engine for the marketplace ledger.
///
/// # Thread Safety
///
/// sled handles are thread-safe and cheaply cloneable; `AgoraDb` can be
/// shared via `Arc` without external synchronization. Callers still
/// serialize *logical* writes through the repository's lock — the engine
/// being safe doesn't make interleaved snapshots meaningful.
#[derive(Debug, Clone)]
pub struct AgoraDb {
    db: Db,
}

impl AgoraDb {
    /// Open or create a database at the given filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GatewayError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Create a temporary database that is cleaned up on drop.
    ///
    /// Ideal for tests — no filesystem side effects, no cleanup needed.
    pub fn open_temporary() -> Result<Self, GatewayError> {
        let config = sled::Config::new().temporary(true);
        let db = config.open()?;
        Ok(Self { db })
    }

    /// Bytes currently occupied on disk, as reported by sled. Purely
    /// informational; handy for operator logging.
    pub fn size_on_disk(&self) -> Result<u64, GatewayError> {
        Ok(self.db.size_on_disk()?)
    }
}

impl PersistenceGateway for AgoraDb {
    fn load_all(&self) -> Result<Option<LedgerSnapshot>, GatewayError> {
        match self.db.get(STATE_KEY)? {
            Some(bytes) => {
                let snapshot = bincode::deserialize(&bytes)
                    .map_err(|e| GatewayError::Serialization(e.to_string()))?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    fn save_all(&self, snapshot: &LedgerSnapshot) -> Result<(), GatewayError> {
        let bytes = bincode::serialize(snapshot)
            .map_err(|e| GatewayError::Serialization(e.to_string()))?;
        self.db.insert(STATE_KEY, bytes)?;
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Item, ItemStatus, Transaction, User};

    /// A snapshot with one of everything, including a sold item, so the
    /// round trip exercises every entity kind and enum variant.
    fn populated_snapshot() -> LedgerSnapshot {
        let seller = User::new("ada", "ada@example.com", "s3cret", Amount::from_cents(1250_00));
        let buyer = User::new("bob", "bob@example.com", "hunter2", Amount::from_cents(1250_00));

        let mut sold = Item::new(
            seller.id,
            "Vintage Camera",
            "A beautiful vintage camera in excellent condition",
            Amount::from_cents(250_00),
            "Electronics",
        );
        sold.status = ItemStatus::Sold;
        let open = Item::new(
            seller.id,
            "Mountain Bike",
            "High-quality mountain bike, barely used",
            Amount::from_cents(450_00),
            "Sports",
        );

        let tx = Transaction::record(sold.id, seller.id, buyer.id, Amount::from_cents(250_00));

        LedgerSnapshot {
            current_user: Some(buyer.id),
            users: vec![seller, buyer],
            items: vec![sold, open],
            transactions: vec![tx],
        }
    }

    #[test]
    fn fresh_database_loads_none() {
        let db = AgoraDb::open_temporary().expect("temp db");
        assert!(db.load_all().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let db = AgoraDb::open_temporary().expect("temp db");
        let snapshot = populated_snapshot();

        db.save_all(&snapshot).unwrap();
        let loaded = db.load_all().unwrap().expect("state should exist");

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn latest_save_wins() {
        let db = AgoraDb::open_temporary().expect("temp db");

        db.save_all(&LedgerSnapshot::empty()).unwrap();
        let snapshot = populated_snapshot();
        db.save_all(&snapshot).unwrap();

        let loaded = db.load_all().unwrap().expect("state should exist");
        assert_eq!(loaded.users.len(), 2);
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn state_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let snapshot = populated_snapshot();

        // First session: write and drop.
        {
            let db = AgoraDb::open(dir.path()).expect("open db");
            db.save_all(&snapshot).unwrap();
        }

        // Second session: everything is still there.
        {
            let db = AgoraDb::open(dir.path()).expect("reopen db");
            let loaded = db.load_all().unwrap().expect("state should survive reopen");
            assert_eq!(loaded, snapshot);
            assert_eq!(loaded.items[0].status, ItemStatus::Sold);
            assert_eq!(loaded.current_user, snapshot.current_user);
        }
    }
}
