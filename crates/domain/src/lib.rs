//! Domain layer for the shopping cart.
//!
//! This crate provides:
//! - `Product` catalog descriptors and a `Catalog` loaded from JSON
//! - the `Cart` aggregate with merge-add, absolute-set, remove and reset
//! - `CheckoutSnapshot`, the serializable hand-off to checkout

pub mod cart;
pub mod catalog;
pub mod error;

pub use cart::{Cart, CheckoutSnapshot, OrderLine, SnapshotLine};
pub use catalog::{Catalog, CatalogError, Money, Product, ProductId};
pub use common::CartId;
pub use error::ValidationError;
