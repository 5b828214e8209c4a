//! Settlement records. Append-only and immutable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ItemId, TransactionId, UserId};
use super::money::Amount;

/// The audit record of one settled purchase.
///
/// Created exactly once per successful purchase and never touched again.
/// `price` is the amount that actually moved, frozen at settlement; the
/// item's asking price may have been edited before the sale and the record
/// doesn't care.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub item: ItemId,
    pub seller: UserId,
    pub buyer: UserId,
    pub price: Amount,
    pub settled_at: DateTime<Utc>,
}

impl Transaction {
    /// Records a settlement happening right now.
    pub(crate) fn record(item: ItemId, seller: UserId, buyer: UserId, price: Amount) -> Self {
        Transaction {
            id: TransactionId::generate(),
            item,
            seller,
            buyer,
            price,
            settled_at: Utc::now(),
        }
    }

    /// True when `user` was on either side of the trade.
    pub fn involves(&self, user: UserId) -> bool {
        self.buyer == user || self.seller == user
    }
}
