//! # Entity Repository
//!
//! The authoritative in-memory state: every user, item, and transaction,
//! plus the session pointer, behind one write lock. Persistence flows
//! through a [`PersistenceGateway`]; queries come out as owned snapshots.
//!
//! ## The commit protocol
//!
//! Every mutation runs as a staged commit:
//!
//! ```text
//!   clone live state ──▶ mutate the clone ──▶ save_all(clone)
//!                              │                    │
//!                     precondition failed?     save failed?
//!                              │                    │
//!                              ▼                    ▼
//!                        live state            live state
//!                        never touched         never touched
//!                                                   │
//!                                     (after retries, error to caller)
//!                                                   │
//!                              save succeeded ──▶ swap clone in
//! ```
//!
//! The live state is replaced only after the gateway reports the new
//! snapshot durable. A failed precondition, a panic in the mutation
//! closure, or a dead disk all leave the ledger exactly as it was — there
//! is no rollback code because there is nothing to roll back. The clone
//! costs a full copy of the collections per mutation, which is the right
//! trade for a process-resident marketplace state: correctness here is
//! worth more than shaving microseconds off a purchase.
//!
//! Saves are the one retry-eligible operation in the crate (bounded by
//! [`SAVE_RETRY_ATTEMPTS`](crate::config::SAVE_RETRY_ATTEMPTS)); when the
//! budget is exhausted the failure propagates to the caller as
//! `PersistenceFailure`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::config::SAVE_RETRY_ATTEMPTS;
use crate::ledger::{LedgerError, LedgerResult};
use crate::model::{Item, ItemId, Transaction, User, UserId};

use super::gateway::PersistenceGateway;
use super::snapshot::LedgerSnapshot;

/// The repository as shared by the ledger, catalog, and session gate.
///
/// One process-wide exclusive lock over all mutations (the write half)
/// is the concurrency contract: purchases are observed atomically or not
/// at all. Readers take the read half and clone out what they need.
pub type SharedRepository = Arc<RwLock<Repository>>;

// ---------------------------------------------------------------------------
// RepoState
// ---------------------------------------------------------------------------

/// The bare collections, separated from the gateway so a staged commit
/// can clone and swap them as one value.
#[derive(Clone, Debug, Default)]
pub(crate) struct RepoState {
    pub users: HashMap<UserId, User>,
    pub items: HashMap<ItemId, Item>,
    /// Append-only. Settlement order is the audit order.
    pub transactions: Vec<Transaction>,
    pub current_user: Option<UserId>,
}

impl RepoState {
    fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        RepoState {
            users: snapshot.users.into_iter().map(|u| (u.id, u)).collect(),
            items: snapshot.items.into_iter().map(|i| (i.id, i)).collect(),
            transactions: snapshot.transactions,
            current_user: snapshot.current_user,
        }
    }

    /// Serializable view. Users and items are sorted by id so identical
    /// states produce identical bytes; transactions keep append order.
    fn to_snapshot(&self) -> LedgerSnapshot {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        let mut items: Vec<Item> = self.items.values().cloned().collect();
        items.sort_by_key(|i| i.id);

        LedgerSnapshot {
            users,
            items,
            transactions: self.transactions.clone(),
            current_user: self.current_user,
        }
    }

    /// Finds a user by email, case-insensitively — the account uniqueness
    /// rule. Linear scan: the user collection is small and resident, and
    /// an extra index would be one more thing to keep consistent.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email_matches(email))
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Authoritative ledger state plus its persistence gateway.
pub struct Repository {
    state: RepoState,
    gateway: Arc<dyn PersistenceGateway>,
}

impl Repository {
    /// Loads persisted state through the gateway, or starts empty when the
    /// gateway has never been written.
    pub fn load(gateway: Arc<dyn PersistenceGateway>) -> LedgerResult<Self> {
        let state = match gateway.load_all()? {
            Some(snapshot) => RepoState::from_snapshot(snapshot),
            None => RepoState::default(),
        };

        info!(
            users = state.users.len(),
            items = state.items.len(),
            transactions = state.transactions.len(),
            "ledger state loaded"
        );

        Ok(Repository { state, gateway })
    }

    /// Wraps the repository for sharing across components.
    pub fn into_shared(self) -> SharedRepository {
        Arc::new(RwLock::new(self))
    }

    /// True when nothing has ever been stored — the trigger for seeding.
    pub fn is_empty(&self) -> bool {
        self.state.users.is_empty()
            && self.state.items.is_empty()
            && self.state.transactions.is_empty()
    }

    /// An owned snapshot of everything. The public read surface for
    /// callers that want the whole state (exports, assertions in tests).
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.to_snapshot()
    }

    /// Read access for in-crate query components.
    pub(crate) fn state(&self) -> &RepoState {
        &self.state
    }

    /// Runs one logical transaction: stage, mutate, persist, swap.
    ///
    /// The closure sees a clone of the live state. If it returns an error
    /// the clone is dropped and nothing happened. If it succeeds, the
    /// mutated clone is saved through the gateway (the commit barrier) and
    /// only then becomes the live state. Callers therefore never observe a
    /// mutation that isn't durable, and never observe half of one.
    pub(crate) fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut RepoState) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let mut staged = self.state.clone();
        let out = mutate(&mut staged)?;

        self.save_with_retry(&staged.to_snapshot())?;
        self.state = staged;
        Ok(out)
    }

    /// Saves a snapshot, retrying transient failures within the fixed
    /// budget. The last error propagates when the budget runs out.
    fn save_with_retry(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
        let mut attempt = 1;
        loop {
            match self.gateway.save_all(snapshot) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < SAVE_RETRY_ATTEMPTS => {
                    warn!(attempt, error = %e, "state save failed, retrying");
                    attempt += 1;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "state save failed, giving up");
                    return Err(LedgerError::PersistenceFailure(e));
                }
            }
        }
    }
}
