//! Cart actions parsed from the command line.

use std::str::FromStr;

use domain::{Cart, Catalog, Product, ProductId};
use thiserror::Error;

use crate::error::CliError;

/// A single step of the demo script.
///
/// Textual forms: `add:SKU[:QTY]`, `change:SKU:QTY`, `remove:SKU`, `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Add { product_id: ProductId, quantity: u32 },
    Change { product_id: ProductId, quantity: u32 },
    Remove { product_id: ProductId },
    Reset,
}

/// Errors produced while parsing a [`CartAction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseActionError {
    #[error("unknown action '{0}' (expected add, change, remove or reset)")]
    UnknownAction(String),

    #[error("'{action}' needs a product ID")]
    MissingProductId { action: &'static str },

    #[error("'change' needs a quantity")]
    MissingQuantity,

    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

impl FromStr for CartAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(4, ':');
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();

        let action = match verb.as_str() {
            "add" => CartAction::Add {
                product_id: product_id(parts.next(), "add")?,
                quantity: match parts.next() {
                    Some(raw) => quantity(raw)?,
                    None => 1,
                },
            },
            "change" => CartAction::Change {
                product_id: product_id(parts.next(), "change")?,
                quantity: quantity(parts.next().ok_or(ParseActionError::MissingQuantity)?)?,
            },
            "remove" => CartAction::Remove {
                product_id: product_id(parts.next(), "remove")?,
            },
            "reset" => CartAction::Reset,
            _ => return Err(ParseActionError::UnknownAction(s.to_string())),
        };

        match parts.next() {
            Some(rest) => Err(ParseActionError::TrailingInput(rest.to_string())),
            None => Ok(action),
        }
    }
}

fn product_id(raw: Option<&str>, action: &'static str) -> Result<ProductId, ParseActionError> {
    match raw.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(ProductId::new(id)),
        _ => Err(ParseActionError::MissingProductId { action }),
    }
}

fn quantity(raw: &str) -> Result<u32, ParseActionError> {
    raw.trim()
        .parse()
        .map_err(|_| ParseActionError::InvalidQuantity(raw.to_string()))
}

impl CartAction {
    /// Applies the action to a cart, resolving products through the catalog.
    pub fn apply(&self, cart: &mut Cart, catalog: &Catalog) -> Result<(), CliError> {
        match self {
            CartAction::Add {
                product_id,
                quantity,
            } => {
                cart.add(lookup(catalog, product_id)?, *quantity)?;
            }
            CartAction::Change {
                product_id,
                quantity,
            } => {
                if cart.change(lookup(catalog, product_id)?, *quantity)?.is_none() && *quantity > 0 {
                    tracing::warn!(%product_id, "change ignored: product is not in the cart");
                }
            }
            CartAction::Remove { product_id } => {
                cart.remove(lookup(catalog, product_id)?);
            }
            CartAction::Reset => cart.reset(),
        }
        Ok(())
    }
}

fn lookup<'a>(catalog: &'a Catalog, product_id: &ProductId) -> Result<&'a Product, CliError> {
    catalog
        .get(product_id)
        .ok_or_else(|| CliError::UnknownProduct {
            product_id: product_id.clone(),
        })
}
