//! Catalog records.

use serde::{Deserialize, Serialize};

/// A catalog record the engine can match against.
///
/// Only the code and the description are read. Anything else a record
/// carries passes through to the caller untouched.
pub trait Searchable {
    /// Short identifier code, e.g. an EAN or a shortened barcode.
    fn code(&self) -> &str;

    /// Free-text description.
    fn description(&self) -> &str;
}

/// Default product record.
///
/// Catalog JSON may spell the code field `ean`. Unknown fields are kept in
/// `extra` for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier code
    #[serde(default, alias = "ean")]
    pub code: String,
    /// Description text
    #[serde(default)]
    pub description: String,
    /// Unit price
    #[serde(default)]
    pub price: f64,
    /// Display fields the engine never reads
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product with no extra fields.
    pub fn new(code: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            price,
            extra: serde_json::Map::new(),
        }
    }
}

impl Searchable for Product {
    fn code(&self) -> &str {
        &self.code
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Parse a JSON array of products.
pub fn load_catalog_json(json: &str) -> crate::Result<Vec<Product>> {
    Ok(serde_json::from_str(json)?)
}
