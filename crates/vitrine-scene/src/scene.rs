//! Preview scene and session management
//!
//! A session owns the stage (a tilted root entity parenting the lights and
//! the model) and the camera. It is created when a selection first appears
//! and disposed when the selection clears; at most one session is live.

use bevy::prelude::*;
use bevy::camera::Viewport;

use crate::error::PreviewError;
use crate::types::SelectedProduct;

/// Widest render surface the viewer will use, regardless of window width
pub const SURFACE_WIDTH_CAP: f32 = 1536.0;
/// Vertical field of view of the preview camera, degrees
const CAMERA_FOV_DEGREES: f32 = 75.0;
const CAMERA_NEAR: f32 = 0.1;
const CAMERA_FAR: f32 = 1000.0;
/// Distance from the origin, tuned so a unit-scale asset fills the frame
const CAMERA_DISTANCE: f32 = 5.0;
/// Stage tilt about X - the product is viewed from above, catalog style
const STAGE_TILT_DEGREES: f32 = 60.0;
const AMBIENT_BRIGHTNESS: f32 = 300.0;
const DIRECTIONAL_ILLUMINANCE: f32 = 3_000.0;

/// Directional light positions: one key from above, two fills from the sides
const LIGHT_POSITIONS: [Vec3; 3] = [
    Vec3::new(5.0, 10.0, 7.5),
    Vec3::new(-10.0, 5.0, 0.0),
    Vec3::new(10.0, 5.0, 0.0),
];

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedProduct>()
            .init_resource::<PreviewSession>()
            .add_systems(
                Update,
                manage_session.after(crate::models::track_selection),
            )
            .add_systems(Update, apply_viewport_policy.after(manage_session))
            .add_systems(Update, handle_deselection);
    }
}

/// Marker component for the preview camera
#[derive(Component)]
pub struct PreviewCamera;

/// Marker component for the tilted root entity parenting lights and model
#[derive(Component)]
pub struct StageRoot;

/// Entities owned by a live viewer session
#[derive(Debug, Clone, Copy)]
pub struct SessionEntities {
    pub stage: Entity,
    pub camera: Entity,
}

/// At most one live session per viewer
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct PreviewSession(Option<SessionEntities>);

impl PreviewSession {
    pub fn is_live(&self) -> bool {
        self.0.is_some()
    }

    /// Stage entity new models are parented under, if a session is live
    pub fn stage(&self) -> Option<Entity> {
        self.0.map(|entities| entities.stage)
    }

    /// Tear the session down; safe to call when none is live
    pub fn dispose(&mut self, commands: &mut Commands) {
        if let Some(entities) = self.0.take() {
            commands.entity(entities.stage).despawn();
            commands.entity(entities.camera).despawn();
            commands.remove_resource::<AmbientLight>();
            tracing::info!("Preview session disposed");
        }
    }
}

/// Surface sizing policy: width is capped, height is bounded by the
/// window's smaller dimension so very wide layouts do not produce
/// oversized canvases
pub fn surface_size(container_width: f32, window_width: f32, window_height: f32) -> Vec2 {
    Vec2::new(
        container_width.min(SURFACE_WIDTH_CAP),
        window_width.min(window_height),
    )
}

/// Reject unusable viewports before creating a session
pub fn require_surface(width: f32, height: f32) -> Result<Vec2, PreviewError> {
    if width <= 0.0 || height <= 0.0 {
        return Err(PreviewError::ViewportUnavailable { width, height });
    }
    Ok(surface_size(width, width, height))
}

/// Sizing policy applied to the primary window (the window is its own
/// container in the native viewer)
pub fn window_surface(window: &Window) -> Vec2 {
    surface_size(window.width(), window.width(), window.height())
}

/// Create or dispose the session as the selection appears and clears
pub(crate) fn manage_session(
    mut commands: Commands,
    selected: Res<SelectedProduct>,
    mut session: ResMut<PreviewSession>,
    windows: Query<&Window>,
) {
    if !selected.is_changed() {
        return;
    }

    match (&selected.0, session.is_live()) {
        (Some(_), false) => {
            let Ok(window) = windows.single() else { return };
            match require_surface(window.width(), window.height()) {
                Ok(_) => create_session(&mut commands, &mut session),
                Err(error) => tracing::error!(%error, "Cannot create preview session"),
            }
        }
        (None, true) => session.dispose(&mut commands),
        _ => {}
    }
}

fn create_session(commands: &mut Commands, session: &mut PreviewSession) {
    // The stage mirrors the tilted scene of the catalog presentation:
    // lights and the model are its children, the camera is not
    let stage = commands
        .spawn((
            StageRoot,
            Transform::from_rotation(Quat::from_rotation_x(STAGE_TILT_DEGREES.to_radians())),
            Visibility::default(),
        ))
        .id();

    // Flat product-photography illumination, no configurable parameters
    for position in LIGHT_POSITIONS {
        let light = commands
            .spawn((
                DirectionalLight {
                    illuminance: DIRECTIONAL_ILLUMINANCE,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
            ))
            .id();
        commands.entity(stage).add_child(light);
    }

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    let camera = commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: CAMERA_FOV_DEGREES.to_radians(),
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
                ..default()
            }),
            Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE),
            PreviewCamera,
        ))
        .id();

    session.0 = Some(SessionEntities { stage, camera });
    tracing::info!("Preview session created");
}

/// Keep the camera viewport in line with the sizing policy as the window
/// resizes or moves between monitors
pub(crate) fn apply_viewport_policy(
    windows: Query<&Window>,
    mut cameras: Query<&mut Camera, With<PreviewCamera>>,
) {
    let Ok(window) = windows.single() else { return };
    let Ok(mut camera) = cameras.single_mut() else { return };

    let surface = window_surface(window);
    let scale = window.scale_factor();
    let physical = UVec2::new(
        ((surface.x * scale) as u32).clamp(1, window.physical_width().max(1)),
        ((surface.y * scale) as u32).clamp(1, window.physical_height().max(1)),
    );

    let needs_update = camera
        .viewport
        .as_ref()
        .map(|viewport| viewport.physical_size != physical)
        .unwrap_or(true);
    if needs_update {
        camera.viewport = Some(Viewport {
            physical_position: UVec2::ZERO,
            physical_size: physical,
            ..default()
        });
    }
}

/// Handle Escape key to clear the current selection
fn handle_deselection(
    mut selected: ResMut<SelectedProduct>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) && selected.0.is_some() {
        selected.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::world::CommandQueue;

    #[test]
    fn test_surface_size_policy() {
        // Narrow window: container width wins, height = smaller dimension
        assert_eq!(surface_size(800.0, 800.0, 600.0), Vec2::new(800.0, 600.0));

        // Very wide layout: width capped, height bounded by window height
        assert_eq!(
            surface_size(2560.0, 2560.0, 1440.0),
            Vec2::new(SURFACE_WIDTH_CAP, 1440.0)
        );

        // Portrait window: height bounded by window width
        assert_eq!(surface_size(600.0, 600.0, 900.0), Vec2::new(600.0, 600.0));
    }

    #[test]
    fn test_require_surface_rejects_zero_dimensions() {
        assert!(matches!(
            require_surface(0.0, 600.0),
            Err(PreviewError::ViewportUnavailable { .. })
        ));
        assert!(matches!(
            require_surface(800.0, 0.0),
            Err(PreviewError::ViewportUnavailable { .. })
        ));
        assert_eq!(require_surface(800.0, 600.0).unwrap(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut world = World::new();
        let stage = world.spawn_empty().id();
        let camera = world.spawn_empty().id();

        let mut session = PreviewSession(Some(SessionEntities { stage, camera }));

        let mut queue = CommandQueue::default();
        let mut commands = Commands::new(&mut queue, &world);

        session.dispose(&mut commands);
        assert!(!session.is_live());

        // Second dispose must be a no-op, not a double despawn
        session.dispose(&mut commands);
        assert!(!session.is_live());

        queue.apply(&mut world);
        assert!(world.get_entity(stage).is_err());
        assert!(world.get_entity(camera).is_err());
    }
}
