//! Serializable view of a cart for the checkout hand-off.

use chrono::{DateTime, Utc};
use common::CartId;
use serde::{Deserialize, Serialize};

use crate::catalog::{Money, ProductId};

use super::{Cart, OrderLine};

/// Point-in-time copy of a cart's lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSnapshot {
    pub cart_id: CartId,
    pub taken_at: DateTime<Utc>,
    pub lines: Vec<SnapshotLine>,
    /// Number of distinct lines.
    pub line_count: usize,
    pub total: Money,
}

/// One line of a [`CheckoutSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLine {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&OrderLine> for SnapshotLine {
    fn from(line: &OrderLine) -> Self {
        Self {
            product_id: line.product_id().clone(),
            title: line.title().to_string(),
            quantity: line.quantity(),
            unit_price: line.unit_price(),
            line_total: line.line_total(),
        }
    }
}

impl CheckoutSnapshot {
    /// Snapshots a cart at the current time.
    pub fn from_cart(cart: &Cart) -> Self {
        Self::taken_at(cart, Utc::now())
    }

    /// Snapshots a cart with an explicit timestamp.
    pub fn taken_at(cart: &Cart, taken_at: DateTime<Utc>) -> Self {
        Self {
            cart_id: cart.id(),
            taken_at,
            lines: cart.lines().map(SnapshotLine::from).collect(),
            line_count: cart.len(),
            total: cart.total(),
        }
    }
}
