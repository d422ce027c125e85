//! A single cart row.

use crate::catalog::{Money, Product, ProductId};

/// One line of a cart: a product snapshot plus a quantity.
///
/// Title and unit price are captured when the line is created, so later
/// catalog changes never reprice an existing line. The owning cart keeps
/// `quantity >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    product_id: ProductId,
    title: String,
    unit_price: Money,
    pub(super) quantity: u32,
}

impl OrderLine {
    pub(super) fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id().clone(),
            title: product.title().to_string(),
            unit_price: product.unit_price(),
            quantity,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unit price captured when the line was created.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns `unit_price * quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}
