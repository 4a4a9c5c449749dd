//! Cart operations
//!
//! Each operation reads the whole current cart and yields the whole next
//! cart. `None` means the operation was a no-op and nothing should be
//! committed.

use std::fmt;

use crate::{
    cart::CartItems,
    products::{Product, ProductId, ProductRef},
};

/// A single mutation of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOperation {
    /// Append the product at quantity one, unless it is already present.
    Add(Product),

    /// Drop the line item for the product.
    Remove(ProductId),

    /// Raise the line item's quantity by one.
    Increment(ProductId),

    /// Lower the line item's quantity by one, dropping it at zero.
    Decrement(ProductId),
}

impl CartOperation {
    /// Build a remove operation for anything that identifies a product.
    pub fn remove(product: &impl ProductRef) -> Self {
        Self::Remove(product.product_id().clone())
    }

    /// Build an increment operation for anything that identifies a product.
    pub fn increment(product: &impl ProductRef) -> Self {
        Self::Increment(product.product_id().clone())
    }

    /// Build a decrement operation for anything that identifies a product.
    pub fn decrement(product: &impl ProductRef) -> Self {
        Self::Decrement(product.product_id().clone())
    }

    /// Id of the product the operation targets.
    pub fn target(&self) -> &ProductId {
        match self {
            Self::Add(product) => &product.id,
            Self::Remove(id) | Self::Increment(id) | Self::Decrement(id) => id,
        }
    }

    /// Compute the next cart, or `None` if the operation changes nothing.
    #[must_use]
    pub fn apply(&self, items: &CartItems) -> Option<CartItems> {
        match self {
            Self::Add(product) => items.with_added(product),
            Self::Remove(id) => items.without(id),
            Self::Increment(id) => items.incremented(id),
            Self::Decrement(id) => items.decremented(id),
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.target())
    }
}
