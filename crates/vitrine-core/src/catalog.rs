//! Catalog loading and validation
//!
//! A catalog is a flat list of products, normally kept in a TOML file next
//! to the binary, with JSON accepted as well. The format is sniffed from
//! the content rather than the file extension so catalogs can be piped in
//! from other tooling unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::product::{Product, ProductId};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("unrecognized catalog format")]
    UnknownFormat,
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has an empty model source")]
    EmptyModelSource(ProductId),
}

/// An ordered collection of products
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
}

impl std::str::FromStr for Catalog {
    type Err = CatalogError;

    /// Parse a catalog, sniffing the format from the content
    fn from_str(content: &str) -> Result<Self, CatalogError> {
        let trimmed = content.trim();

        // JSON catalogs start with an object or array
        let catalog = if trimmed.starts_with('{') || trimmed.starts_with('[') {
            Self::from_json_str(trimmed)?
        } else if trimmed.contains("[[products]]") || trimmed.is_empty() {
            Self::from_toml_str(content)?
        } else {
            return Err(CatalogError::UnknownFormat);
        };

        catalog.validate()?;
        Ok(catalog)
    }
}

impl Catalog {
    /// Parse a TOML catalog (`[[products]]` tables)
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON catalog - either `{"products": [...]}` or a bare array
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let trimmed = content.trim();
        if trimmed.starts_with('[') {
            let products: Vec<Product> = serde_json::from_str(trimmed)?;
            Ok(Self { products })
        } else {
            Ok(serde_json::from_str(trimmed)?)
        }
    }

    /// Load a catalog from a file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Self = content.parse()?;
        tracing::info!(
            products = catalog.products.len(),
            path = %path.display(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Look up a product by id
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Reject duplicate ids and products with nothing to load
    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for product in &self.products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.model_src.trim().is_empty() {
                return Err(CatalogError::EmptyModelSource(product.id.clone()));
            }
        }
        Ok(())
    }
}
