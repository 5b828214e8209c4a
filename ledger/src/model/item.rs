//! # Items
//!
//! An [`Item`] is a listing: something a seller put up for sale. Items have
//! exactly two lifecycle states, and the transition between them happens
//! exactly once:
//!
//! ```text
//!   Available ──(purchase settles)──▶ Sold
//! ```
//!
//! There is no way back. A sold item is an immutable anchor for the
//! transaction that bought it; edits and removal are for available items
//! only.
//!
//! Edits go through [`ItemPatch`], which exposes only the fields a seller
//! may change. Identity, ownership, lifecycle state, and the creation
//! timestamp are not on the menu.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ItemId, UserId};
use super::money::Amount;

/// Lifecycle state of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Listed and purchasable.
    Available,
    /// Bought. Terminal.
    Sold,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::Available => write!(f, "available"),
            ItemStatus::Sold => write!(f, "sold"),
        }
    }
}

/// A marketplace listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// The user who listed this item. Always references an existing user.
    pub seller: UserId,
    pub title: String,
    pub description: String,
    /// Asking price while available. The price actually paid is frozen
    /// into the [`Transaction`](super::Transaction) at settlement.
    pub price: Amount,
    /// Optional display image reference. Carried for the storefront; no
    /// ledger operation populates or interprets it.
    pub image: Option<String>,
    pub category: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Creates an available listing with a fresh id.
    pub fn new(
        seller: UserId,
        title: &str,
        description: &str,
        price: Amount,
        category: &str,
    ) -> Self {
        Item {
            id: ItemId::generate(),
            seller,
            title: title.to_string(),
            description: description.to_string(),
            price,
            image: None,
            category: category.to_string(),
            status: ItemStatus::Available,
            created_at: Utc::now(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }
}

/// The seller-editable subset of an item. `None` fields are left alone.
///
/// Everything absent from this struct is immutable: `id` and `created_at`
/// identify the listing, `seller` is ownership, `status` is ledger-internal
/// and only a settled purchase moves it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Amount>,
    pub category: Option<String>,
}

impl ItemPatch {
    /// A patch that changes nothing. Applying it is legal and useless.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Applies the present fields to `item`.
    pub(crate) fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(category) = &self.category {
            item.category = category.clone();
        }
    }
}
