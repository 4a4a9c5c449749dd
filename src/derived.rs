//! Derived values
//!
//! Values computed purely from the current [`CartItems`] snapshot. They are
//! never stored independently: the container drops the cached value whenever
//! it commits a new snapshot, and the next read recomputes it.

use std::cell::{Cell, OnceCell};
use std::fmt;

use rust_decimal::Decimal;
use tracing::trace;

use crate::cart::CartItems;

/// Item count: number of line items, not the sum of quantities.
pub fn count(items: &CartItems) -> usize {
    items.len()
}

/// Cart total: Σ price × quantity.
pub fn total(items: &CartItems) -> Decimal {
    items.total()
}

/// A lazily computed value derived from a cart snapshot.
///
/// The value is computed on first read and cached until [`Derived::invalidate`]
/// is called. The owner must invalidate on every snapshot change; reading with
/// a different snapshot in between returns the stale cached value.
pub struct Derived<T> {
    name: &'static str,
    compute: fn(&CartItems) -> T,
    value: OnceCell<T>,
    computations: Cell<u64>,
}

impl<T> Derived<T> {
    /// Create a derived value from a pure function of the cart.
    pub const fn new(name: &'static str, compute: fn(&CartItems) -> T) -> Self {
        Self {
            name,
            compute,
            value: OnceCell::new(),
            computations: Cell::new(0),
        }
    }

    /// Current value, computing it from `items` if not already cached.
    pub fn get(&self, items: &CartItems) -> &T {
        self.value.get_or_init(|| {
            trace!(derived = self.name, "recomputing derived value");

            self.computations.set(self.computations.get() + 1);

            (self.compute)(items)
        })
    }

    /// Drop the cached value.
    pub fn invalidate(&mut self) {
        self.value.take();
    }

    /// Whether a value is currently cached.
    pub fn is_cached(&self) -> bool {
        self.value.get().is_some()
    }

    /// How many times the value has been computed.
    pub fn computations(&self) -> u64 {
        self.computations.get()
    }

    /// Name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("name", &self.name)
            .field("value", &self.value.get())
            .field("computations", &self.computations.get())
            .finish_non_exhaustive()
    }
}

/// The derived values kept alongside the cart.
#[derive(Debug)]
pub struct DerivedValues {
    /// Line item count.
    pub count: Derived<usize>,

    /// Price total.
    pub total: Derived<Decimal>,
}

impl DerivedValues {
    /// Fresh, uncomputed values.
    pub const fn new() -> Self {
        Self {
            count: Derived::new("count", count),
            total: Derived::new("total", total),
        }
    }

    /// Drop every cached value.
    pub fn invalidate(&mut self) {
        self.count.invalidate();
        self.total.invalidate();
    }
}

impl Default for DerivedValues {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{items::CartItem, products::Product};

    use super::*;

    fn cart() -> Result<CartItems, crate::cart::CartItemsError> {
        CartItems::try_from(vec![
            CartItem::with_quantity(Product::new("a", "A", Decimal::new(10, 0)), 2),
            CartItem::new(Product::new("b", "B", Decimal::new(5, 0))),
        ])
    }

    #[test]
    fn count_is_number_of_line_items() -> TestResult {
        assert_eq!(count(&cart()?), 2);
        assert_eq!(count(&CartItems::new()), 0);

        Ok(())
    }

    #[test]
    fn total_sums_price_times_quantity() -> TestResult {
        assert_eq!(total(&cart()?), Decimal::new(25, 0));
        assert_eq!(total(&CartItems::new()), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn derived_value_is_computed_once_until_invalidated() -> TestResult {
        let items = cart()?;
        let mut derived = Derived::new("count", count);

        assert!(!derived.is_cached());
        assert_eq!(*derived.get(&items), 2);
        assert_eq!(*derived.get(&items), 2);
        assert_eq!(derived.computations(), 1);

        derived.invalidate();

        assert_eq!(*derived.get(&CartItems::new()), 0);
        assert_eq!(derived.computations(), 2);

        Ok(())
    }

    #[test]
    fn derived_values_invalidate_together() -> TestResult {
        let items = cart()?;
        let mut values = DerivedValues::new();

        values.count.get(&items);
        values.total.get(&items);
        values.invalidate();

        assert!(!values.count.is_cached());
        assert!(!values.total.is_cached());

        Ok(())
    }
}
