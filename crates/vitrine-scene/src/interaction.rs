//! Pointer-driven rotation: drag to spin, spring back on release
//!
//! The original gesture handling was a pair of nested callbacks; here it is
//! an explicit state machine so interrupting a spring-back with a new drag
//! is a defined transition rather than a race.

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::f32::consts::PI;

use crate::models::{ModelSlot, PreviewModel};
use crate::scene::window_surface;

/// Fraction of the rotation removed per spring-back frame
pub const SPRING_DECAY: f32 = 0.01;
/// Rotation magnitude treated as "returned to rest"
pub const ROTATION_EPSILON: f32 = 0.01;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragController>().add_systems(
            Update,
            (pointer_drag, spring_back)
                .chain()
                .after(crate::physics::apply_bounce),
        );
    }
}

/// Interaction phase - exactly one active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    SpringingBack,
}

/// Drag state machine plus the authoritative horizontal rotation
///
/// The scalar rotation here is the source of truth; systems copy it onto
/// the model transform as a Y rotation.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct DragController {
    pub phase: DragPhase,
    pub rotation: f32,
}

impl DragController {
    /// Pointer pressed inside the viewport - also interrupts a spring-back
    pub fn press(&mut self) {
        self.phase = DragPhase::Dragging;
    }

    /// Pointer released or left the viewport
    pub fn release(&mut self) {
        if self.phase == DragPhase::Dragging {
            self.phase = DragPhase::SpringingBack;
        }
    }

    /// Absolute pointer-to-rotation mapping; only effective while dragging
    pub fn drag_to(&mut self, cursor_x: f32, surface_width: f32) {
        if self.phase == DragPhase::Dragging {
            self.rotation = pointer_rotation(cursor_x, surface_width);
        }
    }

    /// One spring-back frame; returns to Idle once the rotation is exactly zero
    pub fn spring_frame(&mut self) -> f32 {
        if self.phase == DragPhase::SpringingBack {
            if self.rotation.abs() <= ROTATION_EPSILON {
                self.rotation = 0.0;
                self.phase = DragPhase::Idle;
            } else {
                self.rotation -= self.rotation * SPRING_DECAY;
            }
        }
        self.rotation
    }

    /// Forget any in-progress gesture (a new model was swapped in)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Map a pointer x position over the surface width to a rotation in [-PI, PI]
pub fn pointer_rotation(cursor_x: f32, surface_width: f32) -> f32 {
    if surface_width <= f32::EPSILON {
        return 0.0;
    }
    let normalized = (cursor_x / surface_width) * 2.0 - 1.0;
    normalized.clamp(-1.0, 1.0) * PI
}

/// Translate pointer input into drag-state transitions and rotation
pub(crate) fn pointer_drag(
    windows: Query<&Window>,
    mouse: Res<ButtonInput<MouseButton>>,
    slot: Res<ModelSlot>,
    mut drag: ResMut<DragController>,
    mut models: Query<&mut Transform, With<PreviewModel>>,
    mut contexts: EguiContexts,
) {
    // No model on display - pointer input is a no-op
    let Some(entity) = slot.current() else { return };
    let Ok(window) = windows.single() else { return };

    let ui_owns_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input())
        .unwrap_or(false);

    let surface = window_surface(window);
    let cursor = window.cursor_position();

    // Release or leaving the window ends the drag
    if drag.phase == DragPhase::Dragging
        && (mouse.just_released(MouseButton::Left) || cursor.is_none())
    {
        drag.release();
    }

    // A press inside the render surface starts a drag, interrupting any
    // spring-back in progress
    if mouse.just_pressed(MouseButton::Left) && !ui_owns_pointer {
        if let Some(position) = cursor {
            if position.x <= surface.x && position.y <= surface.y {
                drag.press();
            }
        }
    }

    // While dragging, the pointer position maps directly to rotation
    if drag.phase == DragPhase::Dragging {
        if let Some(position) = cursor {
            drag.drag_to(position.x, surface.x);
            if let Ok(mut transform) = models.get_mut(entity) {
                transform.rotation = Quat::from_rotation_y(drag.rotation);
            }
        }
    }
}

/// Decay the rotation toward rest after a drag ends
pub(crate) fn spring_back(
    slot: Res<ModelSlot>,
    mut drag: ResMut<DragController>,
    mut models: Query<&mut Transform, With<PreviewModel>>,
) {
    if drag.phase != DragPhase::SpringingBack {
        return;
    }

    let rotation = drag.spring_frame();
    if let Some(entity) = slot.current() {
        if let Ok(mut transform) = models.get_mut(entity) {
            transform.rotation = Quat::from_rotation_y(rotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_rotation_bounds() {
        let width = 800.0;
        assert!((pointer_rotation(0.0, width) + PI).abs() < 1e-6);
        assert!((pointer_rotation(width, width) - PI).abs() < 1e-6);
        assert!(pointer_rotation(width / 2.0, width).abs() < 1e-6);

        // Out-of-bounds x clamps instead of exceeding half a turn
        assert_eq!(pointer_rotation(width * 3.0, width), PI);
        assert_eq!(pointer_rotation(-width, width), -PI);

        // Total even for a degenerate surface
        assert_eq!(pointer_rotation(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_drag_transitions() {
        let mut drag = DragController::default();
        assert_eq!(drag.phase, DragPhase::Idle);

        // Release in Idle is a no-op
        drag.release();
        assert_eq!(drag.phase, DragPhase::Idle);

        drag.press();
        assert_eq!(drag.phase, DragPhase::Dragging);

        drag.release();
        assert_eq!(drag.phase, DragPhase::SpringingBack);

        // A new press interrupts the spring-back
        drag.press();
        assert_eq!(drag.phase, DragPhase::Dragging);
    }

    #[test]
    fn test_drag_to_only_effective_while_dragging() {
        let mut drag = DragController::default();
        drag.drag_to(800.0, 800.0);
        assert_eq!(drag.rotation, 0.0);

        drag.press();
        drag.drag_to(800.0, 800.0);
        assert!((drag.rotation - PI).abs() < 1e-6);
    }

    #[test]
    fn test_spring_back_monotonic_and_terminates() {
        let mut drag = DragController {
            phase: DragPhase::SpringingBack,
            rotation: PI,
        };

        let mut previous = drag.rotation.abs();
        let mut frames = 0;
        while drag.phase == DragPhase::SpringingBack {
            let rotation = drag.spring_frame();
            assert!(rotation.abs() <= previous);
            previous = rotation.abs();
            frames += 1;
            assert!(frames < 1_000, "spring-back did not terminate");
        }

        assert_eq!(drag.rotation, 0.0);
        assert_eq!(drag.phase, DragPhase::Idle);
    }

    #[test]
    fn test_spring_back_from_negative_rotation() {
        let mut drag = DragController {
            phase: DragPhase::SpringingBack,
            rotation: -2.5,
        };
        for _ in 0..1_000 {
            drag.spring_frame();
        }
        assert_eq!(drag.rotation, 0.0);
        assert_eq!(drag.phase, DragPhase::Idle);
    }

    #[test]
    fn test_reset_clears_gesture() {
        let mut drag = DragController {
            phase: DragPhase::Dragging,
            rotation: 1.2,
        };
        drag.reset();
        assert_eq!(drag.phase, DragPhase::Idle);
        assert_eq!(drag.rotation, 0.0);
    }
}
