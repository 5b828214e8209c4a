//! # Storage Module
//!
//! Persistence and authoritative state for the marketplace ledger. This
//! module owns the source of truth: the in-memory repository every
//! operation reads and mutates, the gateway abstraction it persists
//! through, and the snapshot form that crosses the storage boundary.
//!
//! ## Architecture
//!
//! ```text
//! repository.rs  — Authoritative in-memory state + staged commit protocol
//! gateway.rs     — PersistenceGateway trait and the in-memory test fake
//! snapshot.rs    — LedgerSnapshot, the serialized whole-state form
//! db.rs          — AgoraDb, the sled gateway for real deployments
//! seed.rs        — First-run demo fixture
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! Ledger mutation → Repository.commit → LedgerSnapshot → Gateway.save_all
//!                        ↑                                      ↓
//!                   (swap on success)                  sled / memory slot
//! ```
//!
//! The snapshot is the unit of persistence: the whole state travels as one
//! value, so storage either holds a consistent marketplace or the previous
//! one, never a blend.
//!
//! ## Design Decisions
//!
//! 1. **One key in sled.** The entire snapshot lives under a single key;
//!    a single insert + flush is atomic, which honors the all-or-nothing
//!    gateway contract without multi-tree coordination.
//!
//! 2. **Bincode for on-disk serialization.** Compact, fast, deterministic.
//!    JSON is for interchange and debugging; bincode is for storage.
//!
//! 3. **The gateway is a trait.** Tests run against [`MemoryGateway`] with
//!    failure injection; deployments run against [`AgoraDb`]. The
//!    repository cannot tell them apart.

pub mod db;
pub mod gateway;
pub mod repository;
pub mod seed;
pub mod snapshot;

pub use db::AgoraDb;
pub use gateway::{GatewayError, MemoryGateway, PersistenceGateway};
pub use repository::{Repository, SharedRepository};
pub use snapshot::LedgerSnapshot;
