// Ledger benchmarks for the AGORA marketplace.
//
// Covers credential hashing at registration, purchase settlement through
// the full staged-commit path, and catalog search over growing markets.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use agora_ledger::catalog::Catalog;
use agora_ledger::ledger::Ledger;
use agora_ledger::model::{Amount, ItemId, UserId};
use agora_ledger::storage::{MemoryGateway, Repository};

/// Stands up a ledger over an in-memory gateway with `sellers` accounts,
/// each holding `listings_each` items priced at 10.00. Returns the ledger,
/// a catalog over the same state, and the flattened listing ids.
fn setup_market(sellers: usize, listings_each: usize) -> (Ledger, Catalog, Vec<ItemId>) {
    let repo = Repository::load(Arc::new(MemoryGateway::new()))
        .expect("load empty state")
        .into_shared();
    let ledger = Ledger::new(Arc::clone(&repo));
    let catalog = Catalog::new(repo);

    let mut items = Vec::with_capacity(sellers * listings_each);
    for s in 0..sellers {
        let seller = ledger
            .register_user(
                &format!("seller_{s}"),
                &format!("seller_{s}@example.com"),
                "bench secret",
            )
            .expect("register seller")
            .id;
        for l in 0..listings_each {
            let item = ledger
                .list_item(
                    seller,
                    &format!("Turntable {s}-{l}"),
                    "Belt drive, serviced last spring",
                    Amount::from_cents(10_00),
                    "Audio",
                )
                .expect("list item")
                .id;
            items.push(item);
        }
    }
    (ledger, catalog, items)
}

/// A buyer rich enough to never hit `InsufficientFunds` during a run.
fn funded_buyer(ledger: &Ledger) -> UserId {
    let buyer = ledger
        .register_user("deep_pockets", "buyer@example.com", "bench secret")
        .expect("register buyer")
        .id;
    ledger
        .deposit(buyer, Amount::from_cents(1_000_000_00))
        .expect("fund buyer");
    buyer
}

fn bench_register_user(c: &mut Criterion) {
    // Dominated by salted credential hashing, which is the point: this is
    // the unit cost of bringing an account into the world.
    let (ledger, _, _) = setup_market(0, 0);
    let mut n = 0u64;

    c.bench_function("ledger/register_user", |b| {
        b.iter(|| {
            n += 1;
            ledger
                .register_user(
                    &format!("user_{n}"),
                    &format!("user_{n}@example.com"),
                    "bench secret",
                )
                .unwrap()
        });
    });
}

fn bench_purchase(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger/purchase");

    // Settlement cost scales with state size because every commit clones
    // and persists the full snapshot; measure it at several market sizes.
    for market_size in [16, 128, 1024] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(market_size),
            &market_size,
            |b, &size| {
                b.iter_with_setup(
                    || {
                        let (ledger, _, items) = setup_market(4, size / 4);
                        let buyer = funded_buyer(&ledger);
                        (ledger, items[0], buyer)
                    },
                    |(ledger, item, buyer)| {
                        ledger.purchase(item, buyer).unwrap();
                    },
                );
            },
        );
    }

    group.finish();
}

fn bench_deposit(c: &mut Criterion) {
    let (ledger, _, _) = setup_market(1, 1);
    let buyer = funded_buyer(&ledger);

    c.bench_function("ledger/deposit", |b| {
        b.iter(|| ledger.deposit(buyer, Amount::from_cents(1)).unwrap());
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog/search");

    for market_size in [64, 512, 4096] {
        let (_ledger, catalog, items) = setup_market(8, market_size / 8);
        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(market_size),
            &market_size,
            |b, _| {
                b.iter(|| catalog.search("belt drive"));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_register_user,
    bench_purchase,
    bench_deposit,
    bench_search,
);
criterion_main!(benches);
