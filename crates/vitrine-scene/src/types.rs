//! Shared viewer state resources

use bevy::prelude::*;
use vitrine_core::Product;

/// Currently selected product
///
/// `None` means no selection: the viewer renders nothing and performs no
/// setup until a product is published here.
#[derive(Debug, Clone, Resource, Default)]
pub struct SelectedProduct(pub Option<Product>);

/// Load progress surfaced to the UI panel
#[derive(Debug, Clone, PartialEq, Eq, Resource, Default)]
pub enum LoadStatus {
    /// Nothing selected
    #[default]
    Idle,
    /// A load is in flight
    Loading { source: String },
    /// The model is on display
    Ready { source: String },
    /// The last load failed; any previous model stays on display
    Failed { source: String, reason: String },
}
