//! glTF model loading and the single-model slot
//!
//! The slot holds at most one displayed model and at most one in-flight
//! load. Every load request is tagged with a generation; a completion whose
//! tag no longer matches the slot is stale and is dropped without touching
//! the display (last selection wins, not last completion).

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::error::PreviewError;
use crate::interaction::DragController;
use crate::physics::{self, BounceState};
use crate::scene::PreviewSession;
use crate::types::{LoadStatus, SelectedProduct};

/// Marker component for the currently displayed model
#[derive(Component)]
pub struct PreviewModel;

pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelSlot>()
            .init_resource::<LoadStatus>()
            .add_systems(Update, track_selection)
            .add_systems(
                Update,
                poll_model_loads.after(crate::scene::manage_session),
            );
    }
}

/// Monotonically increasing selection tag backing the staleness guard
#[derive(Debug, Clone, Copy, Default)]
pub struct StaleGuard {
    generation: u64,
}

impl StaleGuard {
    /// Tag a new request, invalidating all earlier ones
    pub fn advance(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether a completion tagged `generation` is still the newest request
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

/// In-flight model load tagged with the generation that requested it
#[derive(Debug)]
struct PendingModel {
    generation: u64,
    source: String,
    gltf: Handle<Gltf>,
}

/// Holds the displayed model entity and the staleness-guarded pending load
#[derive(Resource, Default)]
pub struct ModelSlot {
    guard: StaleGuard,
    pending: Option<PendingModel>,
    current: Option<Entity>,
}

impl ModelSlot {
    /// Entity of the currently displayed model, if any
    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    /// Register a new load request, superseding any in-flight one
    ///
    /// Replacing the pending handle also drops the only strong reference to
    /// the superseded asset, so the asset server abandons it.
    pub fn begin_load(&mut self, source: String, gltf: Handle<Gltf>) -> u64 {
        let generation = self.guard.advance();
        self.pending = Some(PendingModel {
            generation,
            source,
            gltf,
        });
        generation
    }

    /// Invalidate all in-flight loads without starting a new one
    pub fn invalidate(&mut self) {
        self.guard.advance();
        self.pending = None;
    }

    /// Whether a completion tagged with `generation` may still swap in
    pub fn is_current(&self, generation: u64) -> bool {
        self.guard.is_current(generation)
    }
}

/// Start or cancel loads as the selection changes
pub(crate) fn track_selection(
    mut commands: Commands,
    selected: Res<SelectedProduct>,
    asset_server: Res<AssetServer>,
    mut slot: ResMut<ModelSlot>,
    mut status: ResMut<LoadStatus>,
) {
    if !selected.is_changed() {
        return;
    }

    match &selected.0 {
        Some(product) => {
            let source = product.model_src.clone();
            tracing::info!(product = %product.id, source = %source, "Starting model load");
            let gltf: Handle<Gltf> = asset_server.load(source.clone());
            slot.begin_load(source.clone(), gltf);
            *status = LoadStatus::Loading { source };
        }
        None => {
            slot.invalidate();
            if let Some(entity) = slot.current.take() {
                commands.entity(entity).despawn();
            }
            *status = LoadStatus::Idle;
        }
    }
}

/// Poll the in-flight load and swap the model in when it completes
///
/// The swap happens within a single system run: any rendered frame sees the
/// old model or the new one, never both and never a half-swapped state.
pub(crate) fn poll_model_loads(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    session: Res<PreviewSession>,
    mut slot: ResMut<ModelSlot>,
    mut status: ResMut<LoadStatus>,
    mut bounce: ResMut<BounceState>,
    mut drag: ResMut<DragController>,
) {
    let Some(asset_id) = slot.pending.as_ref().map(|p| p.gltf.id()) else {
        return;
    };

    match asset_server.get_load_state(asset_id) {
        Some(LoadState::Loaded) => {
            let Some(pending) = slot.pending.take() else { return };

            // A newer selection superseded this load - drop it silently
            if !slot.is_current(pending.generation) {
                tracing::debug!(source = %pending.source, "Discarding stale model load");
                return;
            }

            let scene_handle = gltf_assets.get(&pending.gltf).and_then(|gltf| {
                gltf.default_scene
                    .clone()
                    .or_else(|| gltf.scenes.first().cloned())
            });
            let Some(scene_handle) = scene_handle else {
                let error = PreviewError::AssetLoadFailure {
                    src: pending.source.clone(),
                    reason: "asset contains no scenes".to_string(),
                };
                tracing::warn!(%error, "Model load failed");
                *status = LoadStatus::Failed {
                    source: pending.source,
                    reason: "asset contains no scenes".to_string(),
                };
                return;
            };

            let Some(stage) = session.stage() else {
                // Session was torn down between request and completion
                tracing::debug!(source = %pending.source, "No live session for completed load");
                return;
            };

            // Swap: the old model is released in the same frame the new one
            // appears
            if let Some(previous) = slot.current.take() {
                commands.entity(previous).despawn();
            }

            let entity = commands
                .spawn((
                    SceneRoot(scene_handle),
                    Transform::from_translation(Vec3::new(
                        0.0,
                        physics::SPAWN_HEIGHT,
                        physics::SPAWN_DEPTH,
                    )),
                    PreviewModel,
                ))
                .id();
            commands.entity(stage).add_child(entity);
            slot.current = Some(entity);

            // A fresh model falls from the spawn height with no inherited
            // motion or rotation
            *bounce = BounceState::at_rest();
            drag.reset();

            tracing::info!(source = %pending.source, "Model ready");
            *status = LoadStatus::Ready {
                source: pending.source,
            };
        }
        Some(LoadState::Failed(err)) => {
            let Some(pending) = slot.pending.take() else { return };

            if !slot.is_current(pending.generation) {
                tracing::debug!(source = %pending.source, "Discarding stale failed load");
                return;
            }

            // The previous model (if any) stays on display
            let error = PreviewError::AssetLoadFailure {
                src: pending.source.clone(),
                reason: err.to_string(),
            };
            tracing::warn!(%error, "Model load failed");
            *status = LoadStatus::Failed {
                source: pending.source,
                reason: err.to_string(),
            };
        }
        _ => {
            // Still loading
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_selection_wins() {
        let mut guard = StaleGuard::default();

        let first = guard.advance();
        let second = guard.advance();

        // The earlier load's completion must be rejected, the later accepted
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_invalidation_rejects_in_flight_loads() {
        let mut guard = StaleGuard::default();
        let generation = guard.advance();
        assert!(guard.is_current(generation));

        // Clearing the selection advances the guard without a new request
        guard.advance();
        assert!(!guard.is_current(generation));
    }

    #[test]
    fn test_generations_never_repeat() {
        let mut guard = StaleGuard::default();
        let mut previous = 0;
        for _ in 0..16 {
            let generation = guard.advance();
            assert!(generation > previous);
            previous = generation;
        }
    }

    #[test]
    fn test_empty_slot_has_no_model() {
        let slot = ModelSlot::default();
        assert!(slot.current().is_none());
        assert!(slot.pending.is_none());
    }
}
