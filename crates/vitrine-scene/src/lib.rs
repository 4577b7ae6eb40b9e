//! Vitrine Scene - the interactive product preview
//!
//! Bevy plugins and resources implementing the viewer proper:
//! - Session and scene setup (camera, lights, tilted stage)
//! - glTF loading into a single, staleness-guarded model slot
//! - Gravity/bounce entrance animation
//! - Drag-to-rotate interaction with spring-back

pub mod error;
pub mod interaction;
pub mod models;
pub mod physics;
pub mod scene;
pub mod types;

pub use error::PreviewError;
pub use interaction::InteractionPlugin;
pub use models::ModelsPlugin;
pub use physics::PhysicsPlugin;
pub use scene::ScenePlugin;
pub use types::{LoadStatus, SelectedProduct};
