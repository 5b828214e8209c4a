//! Failure taxonomy for ledger operations.
//!
//! Every variant names the precondition that failed, with enough context
//! attached (ids, amounts) for a caller to render a useful message without
//! re-querying. Precondition failures are ordinary outcomes here, not
//! panics: the engine returns them before any state is touched, so a
//! caller that sees one knows the ledger is exactly as it was.

use thiserror::Error;

use crate::model::{Amount, ItemId, UserId};
use crate::storage::GatewayError;

/// Shorthand for results produced by ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Everything that can go wrong between a request and a committed state
/// change.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Registration with an email some account already uses.
    #[error("email already registered: {email}")]
    DuplicateEmail { email: String },

    /// Login with an unknown email or a wrong secret. One variant for
    /// both so a caller cannot probe which emails exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A deposit that is zero or would overflow the balance.
    #[error("invalid amount: {reason}")]
    InvalidAmount { reason: &'static str },

    /// A listing price of zero.
    #[error("invalid price: {reason}")]
    InvalidPrice { reason: &'static str },

    /// The referenced listing does not exist.
    #[error("item not found: {item}")]
    ItemNotFound { item: ItemId },

    /// The listing exists but has already been sold.
    #[error("item already sold: {item}")]
    ItemAlreadySold { item: ItemId },

    /// The paying side of a purchase does not exist.
    #[error("buyer not found: {buyer}")]
    BuyerNotFound { buyer: UserId },

    /// The receiving side of a purchase does not exist.
    #[error("seller not found: {seller}")]
    SellerNotFound { seller: UserId },

    /// The buyer's balance does not cover the price.
    #[error("insufficient funds: have {available}, need {required}")]
    InsufficientFunds {
        available: Amount,
        required: Amount,
    },

    /// The referenced account does not exist (operations outside a
    /// purchase, where buyer/seller variants carry the role).
    #[error("user not found: {user}")]
    UserNotFound { user: UserId },

    /// Storage rejected the commit. The in-memory state was not swapped,
    /// so the ledger still reflects the last durable snapshot.
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] GatewayError),
}
