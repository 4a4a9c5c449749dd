//! Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId, ProductRef};

/// One row in the cart: a product and how many of it.
///
/// Quantity is at least one while the item is part of a [`CartItems`](crate::cart::CartItems)
/// collection; the collection drops the row instead of letting it reach zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    product: Product,
    quantity: u32,
}

impl CartItem {
    /// Creates a line item with a quantity of one.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub(crate) fn with_quantity(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Returns the product of the item
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the quantity of the item
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    ///
    /// Saturates at the `Decimal` bounds; a [`CartItems`](crate::cart::CartItems)
    /// collection never holds a line whose total overflows.
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Unit price multiplied by quantity, or `None` on overflow.
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.product.price.checked_mul(Decimal::from(self.quantity))
    }
}

impl AsRef<Product> for CartItem {
    fn as_ref(&self) -> &Product {
        &self.product
    }
}

impl ProductRef for CartItem {
    fn product_id(&self) -> &ProductId {
        &self.product.id
    }
}
