//! Gravity and ground-bounce integration for the previewed model
//!
//! One physics step per rendered frame, not wall-clock integrated: the
//! entrance animation is tuned in per-frame units.

use bevy::prelude::*;

use crate::models::{ModelSlot, PreviewModel};

/// Downward acceleration applied per frame
pub const GRAVITY: f32 = 0.002;
/// Fraction of speed retained after a ground contact
pub const BOUNCE_FACTOR: f32 = 0.3;
/// Speed below which a bouncing model settles
pub const REST_EPSILON: f32 = 0.01;
/// Ground level in stage-local coordinates
pub const GROUND_LEVEL: f32 = 0.0;
/// Vertical position a freshly swapped-in model starts from
pub const SPAWN_HEIGHT: f32 = 12.0;
/// Depth offset of the model within the stage
pub const SPAWN_DEPTH: f32 = -2.0;

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BounceState>()
            .add_systems(Update, apply_bounce.after(crate::models::poll_model_loads));
    }
}

/// Vertical bounce simulation state
///
/// Velocity and position are always updated together in [`BounceState::step`];
/// the position never ends a step below [`GROUND_LEVEL`].
#[derive(Debug, Clone, Copy, PartialEq, Resource)]
pub struct BounceState {
    pub vertical_velocity: f32,
    pub is_bouncing: bool,
}

impl Default for BounceState {
    fn default() -> Self {
        Self::at_rest()
    }
}

impl BounceState {
    /// State for a model that has just been placed at the spawn height
    pub fn at_rest() -> Self {
        Self {
            vertical_velocity: 0.0,
            is_bouncing: false,
        }
    }

    /// Advance the simulation by one rendered frame
    ///
    /// Takes the current vertical position and returns the new, clamped one.
    pub fn step(&mut self, y: f32) -> f32 {
        self.vertical_velocity -= GRAVITY;
        let mut y = y + self.vertical_velocity;

        if y <= GROUND_LEVEL {
            y = GROUND_LEVEL;
            self.vertical_velocity *= -BOUNCE_FACTOR;
            self.is_bouncing = true;
        } else {
            self.is_bouncing = false;
        }

        // Kill residual micro-bounces so the simulation settles
        if self.is_bouncing && self.vertical_velocity.abs() < REST_EPSILON {
            self.vertical_velocity = 0.0;
        }

        y
    }
}

/// Advance the bounce simulation for the current model, one step per frame
pub(crate) fn apply_bounce(
    slot: Res<ModelSlot>,
    mut state: ResMut<BounceState>,
    mut models: Query<&mut Transform, With<PreviewModel>>,
) {
    let Some(entity) = slot.current() else { return };
    let Ok(mut transform) = models.get_mut(entity) else { return };
    transform.translation.y = state.step(transform.translation.y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_never_below_ground() {
        let mut state = BounceState::at_rest();
        let mut y = SPAWN_HEIGHT;
        for _ in 0..10_000 {
            y = state.step(y);
            assert!(y >= GROUND_LEVEL);
        }
    }

    #[test]
    fn test_bounce_retains_fixed_speed_fraction() {
        assert!(BOUNCE_FACTOR < 1.0);

        // One step from just above the ground with a known downward speed
        let mut state = BounceState {
            vertical_velocity: -1.0,
            is_bouncing: false,
        };
        let y = state.step(0.5);

        let speed_at_contact = 1.0 + GRAVITY;
        assert_eq!(y, GROUND_LEVEL);
        assert!(state.is_bouncing);
        assert!((state.vertical_velocity - BOUNCE_FACTOR * speed_at_contact).abs() < 1e-6);
    }

    #[test]
    fn test_settles_to_exact_zero_velocity() {
        let mut state = BounceState::at_rest();
        let mut y = SPAWN_HEIGHT;
        for _ in 0..10_000 {
            y = state.step(y);
        }
        assert_eq!(state.vertical_velocity, 0.0);
        assert_eq!(y, GROUND_LEVEL);

        // The settled state is a fixed point of the step function
        for _ in 0..100 {
            y = state.step(y);
            assert_eq!(state.vertical_velocity, 0.0);
            assert_eq!(y, GROUND_LEVEL);
        }
    }

    #[test]
    fn test_reset_state_carries_no_motion() {
        let mut state = BounceState::at_rest();
        assert_eq!(state.vertical_velocity, 0.0);
        assert!(!state.is_bouncing);

        // First step from the spawn height falls, it does not jump
        let y = state.step(SPAWN_HEIGHT);
        assert!(y < SPAWN_HEIGHT);
        assert!(state.vertical_velocity < 0.0);
    }
}
