//! # Ledger Module
//!
//! The mutation surface of the marketplace: account registration and
//! authentication, deposits, listing management, and purchase settlement.
//! Everything here changes state; read-side queries live in
//! [`catalog`](crate::catalog) and [`session`](crate::session).
//!
//! ## Architecture
//!
//! ```text
//! engine.rs  — Ledger operations, each one a single staged commit
//! error.rs   — LedgerError taxonomy and the LedgerResult alias
//! ```
//!
//! A purchase runs the full pipeline:
//!
//! ```text
//!  item        item        buyer       seller      funds
//!  exists? --> unsold? --> exists? --> exists? --> cover? --+
//!                                                            |
//!        +---------------------------------------------------+
//!        v
//!  debit buyer --> credit seller --> mark Sold --> append record
//!        \________________________________________________/
//!                  one staged commit, one persist
//! ```
//!
//! ## Design Decisions
//!
//! - Preconditions always run before the first mutation, in a documented
//!   order, so callers get stable failure kinds and the live state never
//!   needs unwinding.
//! - The engine holds the same `SharedRepository` as the query layers. One
//!   write lock spans validate, mutate, and persist, which is what makes
//!   "an item never sells twice" hold under concurrent callers.
//! - Errors carry the ids and amounts a caller needs to explain the
//!   failure. `InvalidCredentials` is the deliberate exception: it stays
//!   opaque so login failures do not leak which emails exist.

pub mod engine;
pub mod error;

pub use engine::Ledger;
pub use error::{LedgerError, LedgerResult};
