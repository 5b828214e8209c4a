//! First-run demo fixture.
//!
//! A fresh marketplace with nobody in it is hard to demo and harder to
//! test against, so an empty repository can be seeded with two accounts
//! and four listings. Seeding is opt-in and idempotent: it writes once
//! through the normal commit path, and a repository that already holds
//! anything is left alone.

use tracing::info;

use crate::model::{Amount, Item, User};

use super::repository::Repository;
use crate::ledger::LedgerResult;

/// Credential shared by the demo accounts. Fixture data, not a default
/// for real accounts — registration always takes a caller-chosen secret.
pub const DEMO_SECRET: &str = "password123";

/// Populates an empty repository with the demo users and listings.
///
/// Returns `true` if seeding happened, `false` if the repository already
/// held state. The two demo accounts start at 1000.00 and 1500.00; the
/// four listings cover one category each so search and filter demos have
/// something to chew on.
pub fn seed_if_empty(repo: &mut Repository) -> LedgerResult<bool> {
    if !repo.is_empty() {
        return Ok(false);
    }

    repo.commit(|state| {
        let john = User::new(
            "john_doe",
            "john@example.com",
            DEMO_SECRET,
            Amount::from_cents(1000_00),
        );
        let jane = User::new(
            "jane_smith",
            "jane@example.com",
            DEMO_SECRET,
            Amount::from_cents(1500_00),
        );

        let listings = [
            Item::new(
                john.id,
                "Vintage Camera",
                "A beautiful vintage camera in excellent condition",
                Amount::from_cents(250_00),
                "Electronics",
            ),
            Item::new(
                john.id,
                "Mountain Bike",
                "High-quality mountain bike, barely used",
                Amount::from_cents(450_00),
                "Sports",
            ),
            Item::new(
                jane.id,
                "Designer Watch",
                "Luxury designer watch, water resistant",
                Amount::from_cents(350_00),
                "Fashion",
            ),
            Item::new(
                jane.id,
                "Laptop Stand",
                "Ergonomic laptop stand, adjustable height",
                Amount::from_cents(75_00),
                "Office",
            ),
        ];

        state.users.insert(john.id, john);
        state.users.insert(jane.id, jane);
        for item in listings {
            state.items.insert(item.id, item);
        }
        Ok(())
    })?;

    info!("demo state seeded");
    Ok(true)
}
