//! Integration tests for cart operations and derived values through the public store API.
//!
//! Covers the shopping flows a shopper would go through:
//!
//! 1. Adding the same product twice leaves a single line at quantity one.
//! 2. Increment and decrement move the quantity, and decrementing the last
//!    unit removes the line.
//! 3. Removing one product leaves the others untouched.

use std::{cell::RefCell, rc::Rc};

use rust_decimal::Decimal;
use testresult::TestResult;

use trolley::prelude::*;

fn widget_a() -> Product {
    Product::new("widget-a", "Widget A", Decimal::new(10, 0)).with_image("/images/widget-a.png")
}

fn widget_b() -> Product {
    Product::new("widget-b", "Widget B", Decimal::new(5, 0))
}

/// Observer that keeps the latest reported count and total.
#[derive(Debug, Default, Clone)]
struct Latest {
    state: Rc<RefCell<(Option<usize>, Option<Decimal>, usize)>>,
}

impl CartObserver for Latest {
    fn on_items_changed(&mut self, _items: &CartItems) {
        self.state.borrow_mut().2 += 1;
    }

    fn on_count_changed(&mut self, count: usize) {
        self.state.borrow_mut().0 = Some(count);
    }

    fn on_total_changed(&mut self, total: Decimal) {
        self.state.borrow_mut().1 = Some(total);
    }
}

#[test]
fn add_twice_then_increment_then_decrement_to_empty() {
    let mut store = CartStore::open(MemoryStorage::new());

    store.add(&widget_a());
    store.add(&widget_a());

    assert_eq!(store.count(), 1);
    assert_eq!(store.items().get(&widget_a()).map(CartItem::quantity), Some(1));
    assert_eq!(store.total(), Decimal::new(10, 0));

    store.increment(&widget_a());

    assert_eq!(store.items().get(&widget_a()).map(CartItem::quantity), Some(2));
    assert_eq!(store.total(), Decimal::new(20, 0));

    store.decrement(&widget_a());
    store.decrement(&widget_a());

    assert!(store.items().is_empty());
    assert_eq!(store.count(), 0);
    assert_eq!(store.total(), Decimal::ZERO);
}

#[test]
fn remove_one_of_two_products() {
    let mut store = CartStore::open(MemoryStorage::new());

    store.add(&widget_a());
    store.add(&widget_b());

    assert_eq!(store.count(), 2);
    assert_eq!(store.total(), Decimal::new(15, 0));

    store.remove(&widget_a());

    assert_eq!(store.count(), 1);
    assert_eq!(store.total(), Decimal::new(5, 0));
    assert_eq!(store.items().get(&widget_b()).map(CartItem::quantity), Some(1));
}

#[test]
fn observer_tracks_scenario_step_by_step() {
    let mut store = CartStore::open(MemoryStorage::new());
    let latest = Latest::default();
    store.subscribe(latest.clone());

    store.add(&widget_a());
    store.add(&widget_a());
    store.increment(&widget_a());

    assert_eq!(
        *latest.state.borrow(),
        (Some(1), Some(Decimal::new(20, 0)), 2)
    );

    store.decrement(&widget_a());
    store.decrement(&widget_a());

    assert_eq!(*latest.state.borrow(), (Some(0), Some(Decimal::ZERO), 4));
}

#[test]
fn dispatching_operations_matches_named_methods() {
    let mut by_method = CartStore::open(MemoryStorage::new());
    let mut by_operation = CartStore::open(MemoryStorage::new());

    by_method.add(&widget_a());
    by_method.add(&widget_b());
    by_method.increment(&widget_b());
    by_method.decrement(&widget_a());

    for operation in [
        CartOperation::Add(widget_a()),
        CartOperation::Add(widget_b()),
        CartOperation::increment(&widget_b()),
        CartOperation::decrement(&widget_a()),
    ] {
        by_operation.apply(&operation);
    }

    assert_eq!(by_method.items(), by_operation.items());
    assert_eq!(by_method.total(), Decimal::new(10, 0));
}

#[test]
fn every_operation_is_noop_for_absent_products() {
    let mut store = CartStore::open(MemoryStorage::new());
    store.add(&widget_a());

    let before = store.items().clone();
    let missing = ProductId::new("missing");

    assert!(!store.remove(&missing));
    assert!(!store.increment(&missing));
    assert!(!store.decrement(&missing));

    assert_eq!(store.items(), &before);
}

#[test]
fn total_always_matches_line_items() -> TestResult {
    let mut store = CartStore::open(MemoryStorage::new());
    let catalog = Catalog::from_products(vec![
        widget_a(),
        widget_b(),
        Product::new("mug", "Travel Mug", Decimal::new(1499, 2)),
    ])?;

    for product in catalog.iter() {
        store.add(product);
        store.increment(product);
    }
    store.decrement(&widget_b());

    let expected: Decimal = store
        .items()
        .iter()
        .map(|item| item.product().price * Decimal::from(item.quantity()))
        .sum();

    assert_eq!(store.total(), expected);
    assert_eq!(store.total(), Decimal::new(5498, 2));

    Ok(())
}

#[test]
fn matching_ignores_price_and_name_differences() {
    let mut store = CartStore::open(MemoryStorage::new());
    store.add(&widget_a());

    let repriced = Product::new("widget-a", "Widget A (sale)", Decimal::new(1, 0));

    assert!(!store.add(&repriced));
    assert!(store.increment(&repriced));

    // The stored product keeps its original price.
    assert_eq!(store.total(), Decimal::new(20, 0));
}

#[test]
fn huge_prices_never_break_the_total() {
    let mut store = CartStore::open(MemoryStorage::new());
    let latest = Latest::default();
    store.subscribe(latest.clone());

    let priceless = Product::new("priceless", "Priceless", Decimal::MAX);

    assert!(store.add(&priceless));
    assert!(!store.add(&widget_b()));
    assert!(!store.increment(&priceless));

    assert_eq!(store.count(), 1);
    assert_eq!(store.total(), Decimal::MAX);
    assert_eq!(latest.state.borrow().1, Some(Decimal::MAX));
}
