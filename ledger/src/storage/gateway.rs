//! # Persistence Gateway
//!
//! The contract between the ledger and whatever stores its state. Two
//! operations, both whole-state:
//!
//! - [`load_all`](PersistenceGateway::load_all) — once, at startup.
//! - [`save_all`](PersistenceGateway::save_all) — after every committed
//!   mutation, all-or-nothing.
//!
//! There is deliberately no `save_user` / `save_item` granularity. The
//! repository treats a save as the commit point of a logical transaction,
//! and a gateway that can persist half a purchase is a gateway that can
//! corrupt a ledger. Whole-snapshot semantics make the atomicity story a
//! property of the interface instead of a discipline for implementors.
//!
//! Implementations in the crate: [`AgoraDb`](super::AgoraDb) (sled, the
//! production engine) and [`MemoryGateway`] (tests and ephemera).

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::snapshot::LedgerSnapshot;

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Errors that can occur at the storage boundary.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("storage engine error: {0}")]
    Sled(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// PersistenceGateway
// ---------------------------------------------------------------------------

/// Durable whole-state storage for the ledger.
///
/// `Send + Sync` because the repository is shared behind a lock and the
/// gateway handle travels with it.
pub trait PersistenceGateway: Send + Sync {
    /// Loads the entire persisted state.
    ///
    /// `Ok(None)` means storage has never been written (first run); the
    /// caller starts from empty collections. Corrupt or unreadable storage
    /// is an error, not an empty state — silently discarding a ledger is
    /// worse than refusing to start.
    fn load_all(&self) -> Result<Option<LedgerSnapshot>, GatewayError>;

    /// Persists the entire state. All-or-nothing: after an `Err`, a
    /// subsequent `load_all` must observe either the previous snapshot in
    /// full or the new one in full, never a blend.
    fn save_all(&self, snapshot: &LedgerSnapshot) -> Result<(), GatewayError>;
}

// ---------------------------------------------------------------------------
// MemoryGateway
// ---------------------------------------------------------------------------

/// In-memory gateway for tests and throwaway ledgers.
///
/// Stores the snapshot in a mutex-guarded slot. Supports failure
/// injection so tests can prove that a failed save leaves the live state
/// untouched, and counts saves so tests can prove the commit-per-mutation
/// discipline holds.
#[derive(Default)]
pub struct MemoryGateway {
    slot: Mutex<Option<LedgerSnapshot>>,
    fail_saves: AtomicBool,
    saves: AtomicU64,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that already holds a snapshot, as if a previous process
    /// had written it.
    pub fn preloaded(snapshot: LedgerSnapshot) -> Self {
        MemoryGateway {
            slot: Mutex::new(Some(snapshot)),
            fail_saves: AtomicBool::new(false),
            saves: AtomicU64::new(0),
        }
    }

    /// When set, every `save_all` fails with [`GatewayError::Unavailable`]
    /// and stores nothing.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }

    /// The last successfully saved snapshot, if any.
    pub fn stored(&self) -> Option<LedgerSnapshot> {
        self.slot.lock().clone()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load_all(&self) -> Result<Option<LedgerSnapshot>, GatewayError> {
        Ok(self.slot.lock().clone())
    }

    fn save_all(&self, snapshot: &LedgerSnapshot) -> Result<(), GatewayError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("injected save failure".into()));
        }
        *self.slot.lock() = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
