// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # AGORA Ledger — Core Library
//!
//! The transactional heart of AGORA: a single-currency marketplace ledger
//! where balances, listings, and settlement history stay consistent or
//! nothing happens at all.
//!
//! AGORA takes a deliberately boring stance: money is integer cents
//! (floating point near money is how you end up on the news), every
//! mutation is one staged commit under one exclusive lock, and the whole
//! state persists as a single atomic snapshot. Clever would be faster.
//! Boring reconciles.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! marketplace:
//!
//! - **model** — Users, items, transactions, ids, and money itself.
//! - **ledger** — The mutation surface: registration, authentication,
//!   deposits, listing management, purchase settlement.
//! - **catalog** — Read-only queries. Market views, search, history.
//! - **session** — Who is signed in, resolved fresh on every read.
//! - **storage** — The repository, the commit protocol, and the gateways
//!   (sled for deployments, in-memory for tests).
//! - **config** — Ledger constants.
//!
//! ## Design Philosophy
//!
//! 1. An item sells once. Everything else is negotiable; that isn't.
//! 2. Every transfer is zero-sum, checked, and durable before it is real.
//! 3. Preconditions fail before mutations start — no unwinding, ever.
//! 4. If it moves money, it has tests. Plural.

pub mod catalog;
pub mod config;
pub mod ledger;
pub mod model;
pub mod session;
pub mod storage;
