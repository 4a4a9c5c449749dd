//! Cart
//!
//! [`CartItems`] is the single source of truth for what is in the cart. It is
//! an immutable value: every operation that changes it returns a new
//! collection, and operations that would change nothing return `None` so the
//! caller can skip the commit entirely.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    items::CartItem,
    products::{Product, ProductRef},
};

/// Errors raised when a collection read from outside breaks the cart invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartItemsError {
    /// The same product appears in more than one line item.
    #[error("Product {0} appears in more than one line item")]
    DuplicateProduct(String),

    /// A line item has a quantity of zero.
    #[error("Product {0} has a quantity of zero")]
    ZeroQuantity(String),

    /// The cart total does not fit in a `Decimal`.
    #[error("Cart total overflows")]
    TotalOverflow,
}

/// Ordered cart contents, insertion order being display order.
///
/// Holds at most one line item per product id, each with a quantity of at
/// least one, and its total always fits in a `Decimal`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct CartItems {
    items: Vec<CartItem>,
}

impl CartItems {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of line items. Quantities are not summed.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the line items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Line items as a slice.
    pub fn as_slice(&self) -> &[CartItem] {
        &self.items
    }

    /// Line item for the given product, if present.
    pub fn get(&self, product: &impl ProductRef) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.product_id() == product.product_id())
    }

    /// Whether the given product has a line item in the cart.
    pub fn contains(&self, product: &impl ProductRef) -> bool {
        self.get(product).is_some()
    }

    /// Sum of price × quantity over all line items. Zero for an empty cart.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Cart with `product` appended at quantity one.
    ///
    /// Returns `None` if the product is already in the cart: adding never
    /// increments. Also `None` if the new total would overflow.
    #[must_use]
    pub fn with_added(&self, product: &Product) -> Option<Self> {
        if self.contains(product) {
            return None;
        }

        let mut items = self.items.clone();
        items.push(CartItem::new(product.clone()));

        Self::checked(items)
    }

    /// Cart without the line item for `product`, or `None` if it is absent.
    #[must_use]
    pub fn without(&self, product: &impl ProductRef) -> Option<Self> {
        let index = self.position(product)?;

        let mut items = self.items.clone();
        items.remove(index);

        Self::checked(items)
    }

    /// Cart with the quantity of `product` raised by one.
    ///
    /// Returns `None` if the product is absent, if its quantity is already
    /// at `u32::MAX`, or if the new total would overflow.
    #[must_use]
    pub fn incremented(&self, product: &impl ProductRef) -> Option<Self> {
        let index = self.position(product)?;
        let quantity = self.items.get(index)?.quantity().checked_add(1)?;

        self.replace_quantity(index, quantity)
    }

    /// Cart with the quantity of `product` lowered by one.
    ///
    /// A line item at quantity one is removed rather than left at zero.
    /// Returns `None` if the product is absent.
    #[must_use]
    pub fn decremented(&self, product: &impl ProductRef) -> Option<Self> {
        let index = self.position(product)?;

        match self.items.get(index)?.quantity() {
            0 | 1 => self.without(product),
            quantity => self.replace_quantity(index, quantity - 1),
        }
    }

    fn position(&self, product: &impl ProductRef) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id() == product.product_id())
    }

    fn replace_quantity(&self, index: usize, quantity: u32) -> Option<Self> {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == index {
                    CartItem::with_quantity(item.product().clone(), quantity)
                } else {
                    item.clone()
                }
            })
            .collect();

        Self::checked(items)
    }

    fn checked(items: Vec<CartItem>) -> Option<Self> {
        checked_total(&items)?;

        Some(Self { items })
    }
}

fn checked_total(items: &[CartItem]) -> Option<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        total.checked_add(item.checked_line_total()?)
    })
}

impl TryFrom<Vec<CartItem>> for CartItems {
    type Error = CartItemsError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        let mut seen = FxHashSet::default();

        for item in &items {
            let id = item.product_id();

            if item.quantity() == 0 {
                return Err(CartItemsError::ZeroQuantity(id.to_string()));
            }

            if !seen.insert(id) {
                return Err(CartItemsError::DuplicateProduct(id.to_string()));
            }
        }

        if checked_total(&items).is_none() {
            return Err(CartItemsError::TotalOverflow);
        }

        Ok(Self { items })
    }
}

impl From<CartItems> for Vec<CartItem> {
    fn from(cart: CartItems) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a CartItems {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
