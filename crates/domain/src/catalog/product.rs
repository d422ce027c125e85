//! Catalog product descriptor.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::{Money, ProductId};

/// An immutable catalog entry.
///
/// Construction (including deserialization) rejects a blank ID and a
/// negative unit price. There are no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    id: ProductId,
    title: String,
    unit_price: Money,
    image: String,
    description: String,
}

impl Product {
    /// Creates a validated product.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        unit_price: Money,
        image: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();

        if id.is_blank() {
            return Err(ValidationError::EmptyProductId);
        }

        if unit_price.is_negative() {
            return Err(ValidationError::NegativePrice { price: unit_price });
        }

        Ok(Self {
            id,
            title: title.into(),
            unit_price,
            image: image.into(),
            description: description.into(),
        })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Image path or URL; opaque to the cart.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Unvalidated wire shape of a product.
#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    title: String,
    unit_price: Money,
    #[serde(default)]
    image: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Product::new(
            record.id,
            record.title,
            record.unit_price,
            record.image,
            record.description,
        )
    }
}
