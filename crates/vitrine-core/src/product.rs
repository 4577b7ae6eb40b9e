//! Product descriptor types

use serde::{Deserialize, Serialize};

/// Unique identifier for a product within a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    /// Create a new ProductId from a string slug
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A displayable catalog item
///
/// The viewer treats this as an opaque, immutable descriptor: it reads the
/// model source to load an asset and the name for display, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-unique identifier
    pub id: ProductId,
    /// Human-readable name shown in the product list
    pub name: String,
    /// glTF/GLB asset source - a path relative to the asset root or an
    /// http(s) URL
    pub model_src: String,
    /// Optional short description
    #[serde(default)]
    pub description: Option<String>,
}

impl Product {
    /// Create a product with just an id, name, and model source
    pub fn new(id: impl Into<String>, name: impl Into<String>, model_src: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            model_src: model_src.into(),
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("walnut-chair");
        assert_eq!(id.as_str(), "walnut-chair");
        assert_eq!(id.to_string(), "walnut-chair");
    }

    #[test]
    fn test_product_creation() {
        let product = Product::new("boombox", "Boom Box", "models/boombox.glb");
        assert_eq!(product.id, ProductId::new("boombox"));
        assert_eq!(product.model_src, "models/boombox.glb");
        assert!(product.description.is_none());
    }

    #[test]
    fn test_product_roundtrip_toml() {
        let product = Product {
            id: ProductId::new("lantern"),
            name: "Lantern".to_string(),
            model_src: "https://example.com/lantern.glb".to_string(),
            description: Some("A lantern".to_string()),
        };
        let text = toml::to_string(&product).unwrap();
        let parsed: Product = toml::from_str(&text).unwrap();
        assert_eq!(parsed, product);
    }
}
