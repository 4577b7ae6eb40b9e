//! Vitrine Core - Catalog types and parsing
//!
//! This crate provides the foundational types for the Vitrine viewer:
//! - Product descriptors (the catalog's view of a displayable item)
//! - Catalog parsing from TOML or JSON files
//!
//! It is intentionally free of rendering dependencies so the viewer crates
//! and any future tooling can share it.

pub mod catalog;
pub mod product;

pub use catalog::{Catalog, CatalogError};
pub use product::{Product, ProductId};
