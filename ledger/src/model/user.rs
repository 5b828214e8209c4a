//! # Users
//!
//! A [`User`] is an account: identity, contact details, a credential
//! hash, and a cash balance. Users are never deleted; a marketplace that
//! forgets who sold what has no business keeping transaction records.
//!
//! Credentials are stored as salted BLAKE3 hashes ([`SecretHash`]), never
//! as plaintext. The hash uses BLAKE3's `derive_key` mode with a fixed
//! context string, so a credential digest can never collide with any other
//! hash this codebase produces from the same bytes.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::money::Amount;

/// Domain-separation context for credential hashing. Versioned so a future
/// scheme change can coexist with stored hashes during migration.
const CREDENTIAL_CONTEXT: &str = "agora-ledger 2026-06 credential v1";

/// Salt length in bytes. 16 random bytes per credential make precomputed
/// tables useless.
const SALT_LENGTH: usize = 16;

// ---------------------------------------------------------------------------
// SecretHash
// ---------------------------------------------------------------------------

/// A salted, domain-separated BLAKE3 hash of a user's credential secret.
///
/// The plaintext secret exists only transiently in the arguments of
/// [`SecretHash::derive`] and [`SecretHash::verify`]; it is never stored,
/// serialized, or logged.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretHash {
    salt: [u8; SALT_LENGTH],
    digest: [u8; 32],
}

impl SecretHash {
    /// Hashes a secret under a fresh random salt.
    pub fn derive(secret: &str) -> Self {
        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);
        let digest = Self::digest_with(&salt, secret);
        SecretHash { salt, digest }
    }

    /// True when `candidate` hashes to the stored digest under the stored
    /// salt.
    pub fn verify(&self, candidate: &str) -> bool {
        Self::digest_with(&self.salt, candidate) == self.digest
    }

    fn digest_with(salt: &[u8; SALT_LENGTH], secret: &str) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new_derive_key(CREDENTIAL_CONTEXT);
        hasher.update(salt);
        hasher.update(secret.as_bytes());
        *hasher.finalize().as_bytes()
    }
}

impl fmt::Debug for SecretHash {
    /// Redacted. A `{:?}` dump of a `User` must never leak anything an
    /// attacker could take offline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Not even a truncated digest. A prefix still narrows an offline
        // search, and grepping logs for hex is trivial.
        write!(f, "SecretHash(..)")
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A marketplace account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Unique across users, compared case-insensitively. The stored value
    /// keeps whatever casing the caller registered with.
    pub email: String,
    pub credential: SecretHash,
    /// Cash balance in the single marketplace currency. Only ledger
    /// operations mutate this.
    pub balance: Amount,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates an account with a fresh id, hashing the secret immediately.
    pub fn new(username: &str, email: &str, secret: &str, balance: Amount) -> Self {
        User {
            id: UserId::generate(),
            username: username.to_string(),
            email: email.to_string(),
            credential: SecretHash::derive(secret),
            balance,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive email comparison, the uniqueness rule for accounts.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}
