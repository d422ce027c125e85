//! Domain error types.

use thiserror::Error;

use crate::catalog::{Money, ProductId};

/// Errors raised when a product or a cart mutation is rejected.
///
/// A validation failure never leaves partial state behind: the product is
/// not built, or the cart is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Product ID is required.
    #[error("Product ID is required")]
    EmptyProductId,

    /// Unit price is below zero.
    #[error("Invalid price: {price} (must not be negative)")]
    NegativePrice { price: Money },

    /// Quantity added to a cart must be at least one.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Merging would push the line quantity past `u32::MAX`.
    #[error("Quantity overflow for {product_id}: {current} + {requested} is too large")]
    QuantityOverflow {
        product_id: ProductId,
        current: u32,
        requested: u32,
    },

    /// The resulting line total or cart total would not fit in `Money`.
    #[error("Total overflow: {quantity} x {product_id} would exceed the maximum cart total")]
    TotalOverflow {
        product_id: ProductId,
        quantity: u32,
    },
}
