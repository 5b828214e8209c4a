//! The ledger engine: every state-changing marketplace operation.
//!
//! Each operation takes the write lock, stages its mutation through
//! [`Repository::commit`](crate::storage::Repository), and returns either
//! the committed entity or the first failed precondition. Preconditions
//! run in a fixed order per operation; that order is part of the contract.

use tracing::info;

use crate::config::STARTING_BALANCE;
use crate::model::{Amount, Item, ItemId, ItemPatch, ItemStatus, Transaction, User, UserId};
use crate::storage::SharedRepository;

use super::error::{LedgerError, LedgerResult};

/// Handle over the shared repository through which all mutations flow.
///
/// Cloning is cheap (an `Arc` bump); every clone settles against the same
/// state under the same exclusive lock.
#[derive(Clone)]
pub struct Ledger {
    repo: SharedRepository,
}

impl Ledger {
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    /// Creates an account with the standard starting balance.
    ///
    /// Fails with [`LedgerError::DuplicateEmail`] when any account already
    /// uses the email (compared case-insensitively). Registration does not
    /// open a session; the caller authenticates separately.
    pub fn register_user(&self, username: &str, email: &str, secret: &str) -> LedgerResult<User> {
        let user = self.repo.write().commit(|state| {
            if state.user_by_email(email).is_some() {
                return Err(LedgerError::DuplicateEmail {
                    email: email.to_owned(),
                });
            }
            let user = User::new(username, email, secret, STARTING_BALANCE);
            state.users.insert(user.id, user.clone());
            Ok(user)
        })?;
        info!(user = %user.id, username = %username, "user registered");
        Ok(user)
    }

    /// Verifies a credential and opens a session for the matching account.
    ///
    /// Unknown email and wrong secret collapse into the same
    /// [`LedgerError::InvalidCredentials`] so the response does not reveal
    /// which emails are registered. The session pointer is persisted with
    /// the rest of the state.
    pub fn authenticate(&self, email: &str, secret: &str) -> LedgerResult<User> {
        let user = self.repo.write().commit(|state| {
            let user = state
                .user_by_email(email)
                .filter(|user| user.credential.verify(secret))
                .cloned()
                .ok_or(LedgerError::InvalidCredentials)?;
            state.current_user = Some(user.id);
            Ok(user)
        })?;
        info!(user = %user.id, "session opened");
        Ok(user)
    }

    /// Credits an account. The amount must be positive and the credited
    /// balance must stay representable.
    pub fn deposit(&self, user: UserId, amount: Amount) -> LedgerResult<User> {
        let updated = self.repo.write().commit(|state| {
            if amount.is_zero() {
                return Err(LedgerError::InvalidAmount {
                    reason: "deposit must be positive",
                });
            }
            let account = state
                .users
                .get_mut(&user)
                .ok_or(LedgerError::UserNotFound { user })?;
            account.balance = account.balance.checked_add(amount).ok_or(
                LedgerError::InvalidAmount {
                    reason: "deposit overflows balance",
                },
            )?;
            Ok(account.clone())
        })?;
        info!(user = %user, amount = %amount, balance = %updated.balance, "funds deposited");
        Ok(updated)
    }

    /// Puts a new listing on the market, status Available.
    ///
    /// The seller must resolve to an existing account; listings never
    /// reference dangling users.
    pub fn list_item(
        &self,
        seller: UserId,
        title: &str,
        description: &str,
        price: Amount,
        category: &str,
    ) -> LedgerResult<Item> {
        let item = self.repo.write().commit(|state| {
            if price.is_zero() {
                return Err(LedgerError::InvalidPrice {
                    reason: "price must be positive",
                });
            }
            if !state.users.contains_key(&seller) {
                return Err(LedgerError::UserNotFound { user: seller });
            }
            let item = Item::new(seller, title, description, price, category);
            state.items.insert(item.id, item.clone());
            Ok(item)
        })?;
        info!(item = %item.id, seller = %seller, price = %price, "item listed");
        Ok(item)
    }

    /// Edits a listing that is still on the market.
    ///
    /// The patch reaches title, description, price, and category only; id,
    /// seller, status, and timestamps are not editable. Sold listings are
    /// frozen.
    pub fn update_item(&self, item: ItemId, patch: ItemPatch) -> LedgerResult<Item> {
        let updated = self.repo.write().commit(|state| {
            let listing = state
                .items
                .get_mut(&item)
                .ok_or(LedgerError::ItemNotFound { item })?;
            if !listing.is_available() {
                return Err(LedgerError::ItemAlreadySold { item });
            }
            if patch.price.is_some_and(|price| price.is_zero()) {
                return Err(LedgerError::InvalidPrice {
                    reason: "price must be positive",
                });
            }
            patch.apply_to(listing);
            Ok(listing.clone())
        })?;
        info!(item = %item, "item updated");
        Ok(updated)
    }

    /// Withdraws an available listing from the market.
    ///
    /// Sold listings are refused: the transaction log references them, and
    /// history stays resolvable forever.
    pub fn remove_item(&self, item: ItemId) -> LedgerResult<()> {
        self.repo.write().commit(|state| {
            let listing = state
                .items
                .get(&item)
                .ok_or(LedgerError::ItemNotFound { item })?;
            if !listing.is_available() {
                return Err(LedgerError::ItemAlreadySold { item });
            }
            state.items.remove(&item);
            Ok(())
        })?;
        info!(item = %item, "item removed");
        Ok(())
    }

    /// Settles a purchase: debit the buyer, credit the seller, mark the
    /// listing Sold, and append the transaction record, all in one commit.
    ///
    /// Precondition order is part of the contract: listing exists, listing
    /// available, buyer exists, seller exists, funds cover the price. A
    /// buyer may purchase their own listing; the transfer nets to zero.
    /// Once the preconditions hold nothing below them can fail short of
    /// the persistence barrier, and a persistence failure discards the
    /// staged mutation wholesale.
    pub fn purchase(&self, item: ItemId, buyer: UserId) -> LedgerResult<Transaction> {
        let settled = self.repo.write().commit(|state| {
            let listing = state
                .items
                .get(&item)
                .ok_or(LedgerError::ItemNotFound { item })?;
            if !listing.is_available() {
                return Err(LedgerError::ItemAlreadySold { item });
            }
            let price = listing.price;
            let seller = listing.seller;

            let available = state
                .users
                .get(&buyer)
                .ok_or(LedgerError::BuyerNotFound { buyer })?
                .balance;
            if !state.users.contains_key(&seller) {
                return Err(LedgerError::SellerNotFound { seller });
            }
            let debited = available
                .checked_sub(price)
                .ok_or(LedgerError::InsufficientFunds {
                    available,
                    required: price,
                })?;

            // Mutations land on the staged copy only. Debit before credit
            // so a self-purchase reads its own debited balance and nets to
            // zero.
            state
                .users
                .get_mut(&buyer)
                .ok_or(LedgerError::BuyerNotFound { buyer })?
                .balance = debited;
            let account = state
                .users
                .get_mut(&seller)
                .ok_or(LedgerError::SellerNotFound { seller })?;
            account.balance =
                account
                    .balance
                    .checked_add(price)
                    .ok_or(LedgerError::InvalidAmount {
                        reason: "credit overflows seller balance",
                    })?;
            state
                .items
                .get_mut(&item)
                .ok_or(LedgerError::ItemNotFound { item })?
                .status = ItemStatus::Sold;

            let record = Transaction::record(item, seller, buyer, price);
            state.transactions.push(record.clone());
            Ok(record)
        })?;
        info!(
            transaction = %settled.id,
            item = %item,
            buyer = %buyer,
            seller = %settled.seller,
            price = %settled.price,
            "purchase settled"
        );
        Ok(settled)
    }
}
