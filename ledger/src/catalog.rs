//! Read-only queries over the marketplace state.
//!
//! The catalog never mutates and never fails: queries take the read lock,
//! clone what they need, and hand back owned snapshots. Item listings are
//! ordered by (created_at, id) so map iteration order never leaks into
//! results; log-derived queries keep the append order of the transaction
//! log itself.

use crate::model::{Item, ItemId, Transaction, UserId};
use crate::storage::SharedRepository;

/// Query handle sharing the repository with the ledger engine.
#[derive(Clone)]
pub struct Catalog {
    repo: SharedRepository,
}

impl Catalog {
    pub fn new(repo: SharedRepository) -> Self {
        Self { repo }
    }

    /// Every listing a user has put up, sold or not.
    pub fn items_by_seller(&self, seller: UserId) -> Vec<Item> {
        let repo = self.repo.read();
        sorted(
            repo.state()
                .items
                .values()
                .filter(|item| item.seller == seller)
                .cloned()
                .collect(),
        )
    }

    /// Everything currently on the market.
    pub fn items_available(&self) -> Vec<Item> {
        let repo = self.repo.read();
        sorted(
            repo.state()
                .items
                .values()
                .filter(|item| item.is_available())
                .cloned()
                .collect(),
        )
    }

    /// The shop view: everything on the market except a user's own
    /// listings.
    pub fn items_available_except(&self, seller: UserId) -> Vec<Item> {
        let repo = self.repo.read();
        sorted(
            repo.state()
                .items
                .values()
                .filter(|item| item.is_available() && item.seller != seller)
                .cloned()
                .collect(),
        )
    }

    /// Resolves ids to listings, preserving the caller's order. Ids that
    /// do not resolve are skipped.
    pub fn items_by_ids(&self, ids: &[ItemId]) -> Vec<Item> {
        let repo = self.repo.read();
        let state = repo.state();
        ids.iter()
            .filter_map(|id| state.items.get(id))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search across title, description, and
    /// category, over available listings only. An empty query matches
    /// everything on the market.
    pub fn search(&self, query: &str) -> Vec<Item> {
        let needle = query.to_lowercase();
        let repo = self.repo.read();
        sorted(
            repo.state()
                .items
                .values()
                .filter(|item| item.is_available())
                .filter(|item| {
                    item.title.to_lowercase().contains(&needle)
                        || item.description.to_lowercase().contains(&needle)
                        || item.category.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect(),
        )
    }

    /// A user's full settlement history, as buyer or seller, oldest first.
    pub fn transactions_for(&self, user: UserId) -> Vec<Transaction> {
        let repo = self.repo.read();
        repo.state()
            .transactions
            .iter()
            .filter(|record| record.involves(user))
            .cloned()
            .collect()
    }

    /// The listings a user has bought, in purchase order. Sold listings
    /// are never removed, so every record resolves.
    pub fn purchased_items(&self, buyer: UserId) -> Vec<Item> {
        let repo = self.repo.read();
        let state = repo.state();
        state
            .transactions
            .iter()
            .filter(|record| record.buyer == buyer)
            .filter_map(|record| state.items.get(&record.item))
            .cloned()
            .collect()
    }

    /// The listings a user has sold, in settlement order. The seller-side
    /// counterpart of [`purchased_items`](Self::purchased_items).
    pub fn sold_items(&self, seller: UserId) -> Vec<Item> {
        let repo = self.repo.read();
        let state = repo.state();
        state
            .transactions
            .iter()
            .filter(|record| record.seller == seller)
            .filter_map(|record| state.items.get(&record.item))
            .cloned()
            .collect()
    }
}

fn sorted(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::model::{Amount, ItemPatch};
    use crate::storage::{MemoryGateway, Repository};
    use std::sync::Arc;

    fn setup() -> (Ledger, Catalog) {
        let repo = Repository::load(Arc::new(MemoryGateway::new()))
            .unwrap()
            .into_shared();
        (Ledger::new(Arc::clone(&repo)), Catalog::new(repo))
    }

    fn register(ledger: &Ledger, name: &str) -> UserId {
        ledger
            .register_user(name, &format!("{name}@example.com"), "hunter2")
            .unwrap()
            .id
    }

    fn list(ledger: &Ledger, seller: UserId, title: &str, category: &str) -> ItemId {
        ledger
            .list_item(seller, title, "well loved", Amount::from_cents(10_00), category)
            .unwrap()
            .id
    }

    #[test]
    fn available_views_respect_status_and_ownership() {
        let (ledger, catalog) = setup();
        let ada = register(&ledger, "ada");
        let grace = register(&ledger, "grace");
        let kettle = list(&ledger, ada, "Kettle", "Kitchen");
        let teapot = list(&ledger, ada, "Teapot", "Kitchen");
        let lamp = list(&ledger, grace, "Lamp", "Lighting");
        ledger.purchase(teapot, grace).unwrap();

        let on_market: Vec<_> = catalog.items_available().iter().map(|i| i.id).collect();
        assert_eq!(on_market.len(), 2);
        assert!(on_market.contains(&kettle) && on_market.contains(&lamp));

        let shop_for_ada: Vec<_> = catalog
            .items_available_except(ada)
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(shop_for_ada, vec![lamp]);

        let adas: Vec<_> = catalog.items_by_seller(ada).iter().map(|i| i.id).collect();
        assert_eq!(adas.len(), 2, "sold listings still show under their seller");
    }

    #[test]
    fn listings_come_back_in_stable_age_order() {
        let (ledger, catalog) = setup();
        let ada = register(&ledger, "ada");
        for n in 0..8 {
            list(&ledger, ada, &format!("Widget {n}"), "Misc");
        }

        let items = catalog.items_available();
        assert_eq!(items.len(), 8);
        assert!(items.windows(2).all(|pair| {
            (pair[0].created_at, pair[0].id) <= (pair[1].created_at, pair[1].id)
        }));
        assert_eq!(items, catalog.items_available());
    }

    #[test]
    fn items_by_ids_keeps_caller_order_and_skips_unknowns() {
        let (ledger, catalog) = setup();
        let ada = register(&ledger, "ada");
        let first = list(&ledger, ada, "First", "Misc");
        let second = list(&ledger, ada, "Second", "Misc");

        let found: Vec<_> = catalog
            .items_by_ids(&[second, ItemId::generate(), first])
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(found, vec![second, first]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let (ledger, catalog) = setup();
        let ada = register(&ledger, "ada");
        let camera = list(&ledger, ada, "Vintage Camera", "Electronics");
        list(&ledger, ada, "Mountain Bike", "Sports");

        let by_title: Vec<_> = catalog.search("CAMERA").iter().map(|i| i.id).collect();
        assert_eq!(by_title, vec![camera]);

        let by_category = catalog.search("sports");
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].title, "Mountain Bike");

        let by_description = catalog.search("well loved");
        assert_eq!(by_description.len(), 2);

        assert!(catalog.search("gramophone").is_empty());
    }

    #[test]
    fn empty_search_matches_the_whole_market() {
        let (ledger, catalog) = setup();
        let ada = register(&ledger, "ada");
        let grace = register(&ledger, "grace");
        list(&ledger, ada, "Kettle", "Kitchen");
        let teapot = list(&ledger, ada, "Teapot", "Kitchen");
        ledger.purchase(teapot, grace).unwrap();

        // Sold listings drop out of search like any other market view.
        assert_eq!(catalog.search("").len(), 1);
    }

    #[test]
    fn search_sees_updates_immediately() {
        let (ledger, catalog) = setup();
        let ada = register(&ledger, "ada");
        let item = list(&ledger, ada, "Kettle", "Kitchen");

        assert!(catalog.search("copper").is_empty());
        let patch = ItemPatch {
            title: Some("Copper Kettle".to_owned()),
            ..ItemPatch::empty()
        };
        ledger.update_item(item, patch).unwrap();
        assert_eq!(catalog.search("copper").len(), 1);
    }

    #[test]
    fn history_queries_follow_the_log() {
        let (ledger, catalog) = setup();
        let ada = register(&ledger, "ada");
        let grace = register(&ledger, "grace");
        let kettle = list(&ledger, ada, "Kettle", "Kitchen");
        let lamp = list(&ledger, grace, "Lamp", "Lighting");

        ledger.purchase(kettle, grace).unwrap();
        ledger.purchase(lamp, ada).unwrap();

        // Ada sold the kettle then bought the lamp; both records are hers,
        // in settlement order.
        let adas = catalog.transactions_for(ada);
        assert_eq!(adas.len(), 2);
        assert_eq!(adas[0].item, kettle);
        assert_eq!(adas[1].item, lamp);

        let bought: Vec<_> = catalog.purchased_items(grace).iter().map(|i| i.id).collect();
        assert_eq!(bought, vec![kettle]);

        // Each sale shows up exactly once, on the seller's side only.
        let ada_sold: Vec<_> = catalog.sold_items(ada).iter().map(|i| i.id).collect();
        assert_eq!(ada_sold, vec![kettle]);
        let grace_sold: Vec<_> = catalog.sold_items(grace).iter().map(|i| i.id).collect();
        assert_eq!(grace_sold, vec![lamp]);

        let stranger = register(&ledger, "edsger");
        assert!(catalog.transactions_for(stranger).is_empty());
        assert!(catalog.purchased_items(stranger).is_empty());
        assert!(catalog.sold_items(stranger).is_empty());
    }
}
