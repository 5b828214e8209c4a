//! # Data Model
//!
//! The three entity kinds the ledger governs, plus the value types they
//! are built from:
//!
//! ```text
//!   User ◀──seller──── Item
//!    ▲  ▲                ▲
//!    │  └──buyer──┐      │
//!    │            │      │
//!    └──seller── Transaction ──item──┘
//! ```
//!
//! - [`User`] — an account with a balance. Never deleted.
//! - [`Item`] — a listing owned by a seller. Available until sold, sold
//!   forever after.
//! - [`Transaction`] — the immutable record binding the two together.
//!
//! ## Design Decisions
//!
//! - **Typed ids** ([`UserId`], [`ItemId`], [`TransactionId`]): UUID v4
//!   newtypes. Mixing them up is a compile error, and id reuse across
//!   deletions is impossible without bookkeeping.
//! - **Fixed-point money** ([`Amount`]): u64 cents, checked arithmetic.
//!   Negative and non-finite amounts do not exist in this type system.
//! - **Hashed credentials** ([`SecretHash`]): salted BLAKE3 via
//!   `derive_key`. Plaintext secrets never persist.
//!
//! Entities are plain serde-derived structs. Invariants that span entities
//! (seller exists, sold-iff-transaction, zero-sum transfers) are enforced
//! by the [`ledger`](crate::ledger) module, not here; a struct can't know
//! about its siblings.

pub mod ids;
pub mod item;
pub mod money;
pub mod transaction;
pub mod user;

pub use ids::{ItemId, TransactionId, UserId};
pub use item::{Item, ItemPatch, ItemStatus};
pub use money::{Amount, ParseAmountError};
pub use transaction::Transaction;
pub use user::{SecretHash, User};
