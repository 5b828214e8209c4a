//! The session gate: who is currently signed in.
//!
//! The session is a persisted `Option<UserId>` inside the repository, not
//! a copy of the user record. Reads resolve the id against live state, so
//! a deposit or purchase is visible on the very next read with no refresh
//! step anywhere. Opening a session is
//! [`Ledger::authenticate`](crate::ledger::Ledger::authenticate); this
//! type owns reading and closing it.

use tracing::info;

use crate::ledger::LedgerResult;
use crate::model::{User, UserId};
use crate::storage::SharedRepository;

/// Read/close handle for the persisted session pointer.
#[derive(Clone)]
pub struct SessionGate {
    repo: SharedRepository,
}

impl SessionGate {
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    /// The signed-in user, resolved against live state at call time.
    pub fn current_user(&self) -> Option<User> {
        let repo = self.repo.read();
        let state = repo.state();
        state
            .current_user
            .and_then(|id| state.users.get(&id))
            .cloned()
    }

    /// The signed-in user's id, without cloning the record.
    pub fn current_user_id(&self) -> Option<UserId> {
        self.repo.read().state().current_user
    }

    /// Closes the session and persists the cleared pointer. Logging out
    /// twice is a no-op and touches nothing.
    pub fn logout(&self) -> LedgerResult<()> {
        let mut repo = self.repo.write();
        if repo.state().current_user.is_none() {
            return Ok(());
        }
        repo.commit(|state| {
            state.current_user = None;
            Ok(())
        })?;
        info!("session closed");
        Ok(())
    }
}
