//! Vitrine Viewer - application shell
//!
//! Assembles the Bevy app around the preview plugins from vitrine-scene and
//! adds the egui product panel.

mod app;
mod ui;

pub use app::{run, ProductCatalog};
