//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartItems, CartItemsError},
    catalog::{Catalog, CatalogError},
    derived::{Derived, DerivedValues},
    items::CartItem,
    observer::{CartObserver, NoopObserver, SubscriptionKey},
    operations::CartOperation,
    persistence::{CartSlot, DEFAULT_KEY, Persistence},
    pricing::{PricingError, format_currency, parse_currency},
    products::{Product, ProductId, ProductRef},
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
    store::CartStore,
    summary::{CartSummary, SummaryError},
};
