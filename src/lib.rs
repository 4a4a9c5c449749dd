//! Trolley
//!
//! Trolley is a persistent, observable shopping cart store. It keeps the cart's
//! line items as immutable snapshots, derives the item count and total from
//! them on demand, tells subscribers when they change and writes every change
//! through to durable storage.

pub mod cart;
pub mod catalog;
pub mod derived;
pub mod items;
pub mod observer;
pub mod operations;
pub mod persistence;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod store;
pub mod summary;
