//! Product catalog and related value objects.

mod product;
mod value_objects;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use product::Product;
pub use value_objects::{Money, ProductId};

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not a valid JSON product list (including products
    /// that fail validation).
    #[error("Invalid catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Two products share the same ID.
    #[error("Duplicate product: {product_id}")]
    DuplicateProduct { product_id: ProductId },
}

/// An ordered list of products with unique IDs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate product IDs.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for product in products {
            if catalog.index.contains_key(product.id()) {
                return Err(CatalogError::DuplicateProduct {
                    product_id: product.id().clone(),
                });
            }
            catalog
                .index
                .insert(product.id().clone(), catalog.products.len());
            catalog.products.push(product);
        }

        metrics::counter!("catalog_products_loaded_total").increment(catalog.len() as u64);
        Ok(catalog)
    }

    /// Parses a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Reads and parses a JSON catalog file.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_json(&json)?;
        tracing::info!(products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Returns a product by ID.
    pub fn get<Q>(&self, product_id: &Q) -> Option<&Product>
    where
        ProductId: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(product_id)
            .map(|&position| &self.products[position])
    }

    /// Returns all products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
