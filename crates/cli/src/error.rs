//! CLI error types.

use domain::{CatalogError, ProductId, ValidationError};
use thiserror::Error;

/// Errors that abort a demo run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The cart rejected an action.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An action named a product missing from the catalog.
    #[error("Unknown product: {product_id}")]
    UnknownProduct { product_id: ProductId },

    /// The snapshot could not be written.
    #[error("Failed to write snapshot: {0}")]
    Output(#[from] serde_json::Error),
}
