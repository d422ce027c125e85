//! Cart aggregate implementation.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use common::CartId;

use crate::catalog::{Money, Product, ProductId};
use crate::error::ValidationError;

use super::{CheckoutSnapshot, OrderLine};

/// Cart aggregate root.
///
/// Holds at most one line per product, in the order the lines were first
/// added. A cart has a single owner; mutators take `&mut self` and either
/// apply fully or leave the cart untouched.
///
/// Every line total and the grand total fit in `Money`: mutations that would
/// break this are rejected with [`ValidationError::TotalOverflow`].
#[derive(Debug, Clone, Default)]
pub struct Cart {
    /// Session-scoped identifier used in logs and snapshots.
    id: CartId,

    /// Lines in insertion order.
    lines: Vec<OrderLine>,

    /// Position of each product's line in `lines`.
    index: HashMap<ProductId, usize>,
}

impl Cart {
    /// Creates an empty cart with a fresh ID.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cart with the given ID.
    pub fn with_id(id: CartId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

// Query methods
impl Cart {
    pub fn id(&self) -> CartId {
        self.id
    }

    /// Returns the line for a product, if any.
    pub fn find_item<Q>(&self, product_id: &Q) -> Option<&OrderLine>
    where
        ProductId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(product_id)
            .map(|&position| &self.lines[position])
    }

    /// Returns all lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &OrderLine> {
        self.lines.iter()
    }

    /// Returns the number of distinct lines (not the sum of quantities).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Returns the sum of all line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Captures the current lines and totals for hand-off to checkout.
    pub fn checkout_snapshot(&self) -> CheckoutSnapshot {
        CheckoutSnapshot::from_cart(self)
    }
}

// Command methods
impl Cart {
    /// Adds `quantity` units of a product.
    ///
    /// An existing line for the product has its quantity increased; otherwise
    /// a new line is appended.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<&OrderLine, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity { quantity });
        }

        if let Some(position) = self.index.get(product.id()).copied() {
            let line = &self.lines[position];
            let previous = line.quantity;
            let merged =
                previous
                    .checked_add(quantity)
                    .ok_or_else(|| ValidationError::QuantityOverflow {
                        product_id: product.id().clone(),
                        current: previous,
                        requested: quantity,
                    })?;
            self.check_totals(Some(position), line.product_id(), line.unit_price(), merged)?;
            self.lines[position].quantity = merged;

            metrics::counter!("cart_lines_merged_total").increment(1);
            tracing::debug!(
                cart_id = %self.id,
                product_id = %product.id(),
                previous,
                quantity = merged,
                "merged into existing line"
            );
            return Ok(&self.lines[position]);
        }

        self.check_totals(None, product.id(), product.unit_price(), quantity)?;

        let position = self.lines.len();
        self.lines.push(OrderLine::from_product(product, quantity));
        self.index.insert(product.id().clone(), position);

        metrics::counter!("cart_lines_added_total").increment(1);
        tracing::debug!(
            cart_id = %self.id,
            product_id = %product.id(),
            quantity,
            "line added"
        );
        Ok(&self.lines[position])
    }

    /// Adds a single unit of a product.
    pub fn add_one(&mut self, product: &Product) -> Result<&OrderLine, ValidationError> {
        self.add(product, 1)
    }

    /// Sets the quantity of an existing line.
    ///
    /// Never creates a line: returns `Ok(None)` when the product is not in
    /// the cart. A quantity of zero removes the line and also returns
    /// `Ok(None)`.
    pub fn change(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<Option<&OrderLine>, ValidationError> {
        let Some(position) = self.index.get(product.id()).copied() else {
            return Ok(None);
        };

        if quantity == 0 {
            self.remove_at(position);
            return Ok(None);
        }

        let line = &self.lines[position];
        self.check_totals(Some(position), line.product_id(), line.unit_price(), quantity)?;

        let line = &mut self.lines[position];
        let previous = std::mem::replace(&mut line.quantity, quantity);

        tracing::debug!(
            cart_id = %self.id,
            product_id = %product.id(),
            previous,
            quantity,
            "line quantity set"
        );
        Ok(Some(&self.lines[position]))
    }

    /// Removes the line for a product and returns it.
    ///
    /// Removing a product that is not in the cart is a no-op.
    pub fn remove(&mut self, product: &Product) -> Option<OrderLine> {
        let position = self.index.get(product.id()).copied()?;
        Some(self.remove_at(position))
    }

    /// Removes every line.
    pub fn reset(&mut self) {
        let dropped = self.lines.len();
        self.lines.clear();
        self.index.clear();

        metrics::counter!("cart_resets_total").increment(1);
        tracing::debug!(cart_id = %self.id, dropped, "cart reset");
    }

    /// Checks that a line of `quantity` at `unit_price`, replacing the line at
    /// `replacing` if any, keeps the line total and cart total in range.
    fn check_totals(
        &self,
        replacing: Option<usize>,
        product_id: &ProductId,
        unit_price: Money,
        quantity: u32,
    ) -> Result<(), ValidationError> {
        let overflow = || ValidationError::TotalOverflow {
            product_id: product_id.clone(),
            quantity,
        };

        let line_total = unit_price.checked_multiply(quantity).ok_or_else(overflow)?;
        self.lines
            .iter()
            .enumerate()
            .filter(|(position, _)| Some(*position) != replacing)
            .try_fold(line_total, |total, (_, line)| {
                total.checked_add(line.line_total())
            })
            .map(|_| ())
            .ok_or_else(overflow)
    }

    fn remove_at(&mut self, position: usize) -> OrderLine {
        let line = self.lines.remove(position);
        self.index.remove(line.product_id());

        // Lines after the removed one shifted left by one.
        for (offset, moved) in self.lines[position..].iter().enumerate() {
            if let Some(slot) = self.index.get_mut(moved.product_id()) {
                *slot = position + offset;
            }
        }

        metrics::counter!("cart_lines_removed_total").increment(1);
        tracing::debug!(
            cart_id = %self.id,
            product_id = %line.product_id(),
            quantity = line.quantity,
            "line removed"
        );
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("{id} title"), Money::from_cents(cents), "", "").unwrap()
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.lines().map(|line| line.product_id().as_str()).collect()
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert_eq!(cart.len(), 0);
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_with_id() {
        let id = CartId::new();
        assert_eq!(Cart::with_id(id).id(), id);
    }

    #[test]
    fn test_add_zero_quantity_fails_without_mutation() {
        let mut cart = Cart::new();
        let p = product("A", 100);

        let result = cart.add(&p, 0);
        assert_eq!(result, Err(ValidationError::InvalidQuantity { quantity: 0 }));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_overflow_leaves_line_unchanged() {
        let mut cart = Cart::new();
        let p = product("A", 1);
        cart.add(&p, u32::MAX - 1).unwrap();

        let result = cart.add(&p, 2);
        assert!(matches!(
            result,
            Err(ValidationError::QuantityOverflow { current, requested: 2, .. }) if current == u32::MAX - 1
        ));
        assert_eq!(cart.find_item("A").unwrap().quantity(), u32::MAX - 1);
    }

    #[test]
    fn test_add_rejects_line_total_overflow() {
        let mut cart = Cart::new();
        let p = product("A", 3_000_000_000);

        let result = cart.add(&p, 4_000_000_000);
        assert!(matches!(
            result,
            Err(ValidationError::TotalOverflow { quantity: 4_000_000_000, .. })
        ));
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_merge_total_overflow_leaves_line_unchanged() {
        let mut cart = Cart::new();
        let p = product("A", 3_000_000_000);
        cart.add(&p, 1_000_000_000).unwrap();

        let result = cart.add(&p, 3_000_000_000);
        assert!(matches!(result, Err(ValidationError::TotalOverflow { .. })));
        assert_eq!(cart.find_item("A").unwrap().quantity(), 1_000_000_000);
        assert_eq!(cart.total().cents(), 3_000_000_000_000_000_000);
    }

    #[test]
    fn test_add_rejects_cart_total_overflow() {
        let mut cart = Cart::new();
        let a = product("A", 5_000_000_000_000_000_000);
        let b = product("B", 5_000_000_000_000_000_000);
        cart.add_one(&a).unwrap();

        let result = cart.add_one(&b);
        assert!(matches!(result, Err(ValidationError::TotalOverflow { .. })));
        assert_eq!(cart.len(), 1);
        assert!(cart.find_item("B").is_none());
        assert_eq!(cart.total().cents(), 5_000_000_000_000_000_000);
    }

    #[test]
    fn test_change_rejects_total_overflow() {
        let mut cart = Cart::new();
        let p = product("A", 3_000_000_000);
        cart.add_one(&p).unwrap();

        let result = cart.change(&p, 4_000_000_000);
        assert!(matches!(result, Err(ValidationError::TotalOverflow { .. })));
        assert_eq!(cart.find_item("A").unwrap().quantity(), 1);

        // Replacing a line only counts its new total once.
        let result = cart.change(&p, 3_000_000_000);
        assert_eq!(result.unwrap().unwrap().quantity(), 3_000_000_000);
        assert_eq!(cart.total().cents(), 9_000_000_000_000_000_000);
    }

    #[test]
    fn test_index_stays_consistent_after_middle_removal() {
        let mut cart = Cart::new();
        let (a, b, c, d) = (
            product("A", 1),
            product("B", 2),
            product("C", 3),
            product("D", 4),
        );
        for p in [&a, &b, &c, &d] {
            cart.add_one(p).unwrap();
        }

        cart.remove(&b).unwrap();
        assert_eq!(ids(&cart), ["A", "C", "D"]);

        // Lookups and in-place updates must hit the shifted lines.
        assert_eq!(
            cart.change(&d, 5).unwrap().unwrap().product_id().as_str(),
            "D"
        );
        assert_eq!(cart.find_item("C").unwrap().unit_price().cents(), 3);
        assert_eq!(cart.find_item("D").unwrap().quantity(), 5);
        assert_eq!(cart.total().cents(), 1 + 3 + 20);
    }

    #[test]
    fn test_change_same_quantity_is_stable() {
        let mut cart = Cart::new();
        let p = product("A", 100);
        cart.add(&p, 2).unwrap();

        assert_eq!(cart.change(&p, 2).unwrap().unwrap().quantity(), 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_total_quantity_counts_units() {
        let mut cart = Cart::new();
        cart.add(&product("A", 100), 2).unwrap();
        cart.add(&product("B", 100), 3).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_reset_then_reuse() {
        let mut cart = Cart::new();
        let a = product("A", 100);
        let b = product("B", 200);
        cart.add_one(&a).unwrap();
        cart.add_one(&b).unwrap();

        cart.reset();
        assert!(cart.is_empty());
        assert!(cart.find_item("A").is_none());

        cart.add_one(&b).unwrap();
        cart.add_one(&a).unwrap();
        assert_eq!(ids(&cart), ["B", "A"]);
    }
}
