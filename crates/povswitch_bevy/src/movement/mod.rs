//! Character movement (kinematic, без Rapier dynamics)
//!
//! # Архитектура
//! - `PlayerCharacter` накапливает input через `MovementControl::add_movement_input`
//! - `integrate_character_movement` раз в frame: input → velocity → translation
//! - Gravity + jump + floor clamp (пол на `floor_height`)
//! - `sync_actor_yaw`: control rotation yaw → actor Transform
//!
//! Units: cm, cm/s (world convention: Z up).

use bevy::prelude::*;
use povswitch_simulation::math::{flatten, yaw_of, PLANAR_EPSILON};
use povswitch_simulation::MovementControl;

use crate::input::PlayerController;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CharacterMovement {
    /// Накопленный input этого frame (сбрасывается integration'ом)
    pub pending_input: Vec3,
    pub velocity: Vec3,
    /// cm/s
    pub max_walk_speed: f32,
    /// cm/s² (отрицательная)
    pub gravity: f32,
    pub jump_z_velocity: f32,
    /// Z центра capsule когда персонаж стоит на полу
    pub floor_height: f32,
    pub grounded: bool,
    pub jump_requested: bool,
    pub use_controller_yaw: bool,
    pub orient_rotation_to_movement: bool,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self {
            pending_input: Vec3::ZERO,
            velocity: Vec3::ZERO,
            max_walk_speed: 600.0,
            gravity: -980.0,
            jump_z_velocity: 700.0,
            floor_height: 0.0,
            grounded: true,
            jump_requested: false,
            use_controller_yaw: true,
            orient_rotation_to_movement: false,
        }
    }
}

impl CharacterMovement {
    pub fn standing_at(floor_height: f32) -> Self {
        Self {
            floor_height,
            ..Default::default()
        }
    }

    /// Horizontal input этого frame (длина ≤ 1)
    pub fn planar_input(&self) -> Vec3 {
        flatten(self.pending_input).clamp_length_max(1.0)
    }
}

impl MovementControl for CharacterMovement {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        if scale.is_finite() && direction.is_finite() {
            self.pending_input += direction * scale;
        }
    }

    fn set_use_controller_yaw(&mut self, enabled: bool) {
        self.use_controller_yaw = enabled;
    }

    fn set_orient_rotation_to_movement(&mut self, enabled: bool) {
        self.orient_rotation_to_movement = enabled;
    }

    fn jump(&mut self) {
        self.jump_requested = true;
    }

    fn stop_jumping(&mut self) {
        self.jump_requested = false;
    }
}

/// Control rotation yaw → actor Transform
///
/// # Schedule
/// - Update, после tick (aim уже обновил control rotation)
pub fn sync_actor_yaw(mut query: Query<(&CharacterMovement, &PlayerController, &mut Transform)>) {
    for (movement, controller, mut transform) in query.iter_mut() {
        if !movement.use_controller_yaw {
            continue;
        }
        let yaw = controller.control_rotation.yaw.to_radians();
        transform.rotation = Quat::from_rotation_z(yaw);
    }
}

/// Input → velocity → translation
///
/// # Schedule
/// - Update, после sync_actor_yaw
pub fn integrate_character_movement(mut query: Query<(&mut CharacterMovement, &mut Transform)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (mut movement, mut transform) in query.iter_mut() {
        let input = movement.planar_input();
        movement.pending_input = Vec3::ZERO;

        // Horizontal: мгновенная скорость (без acceleration)
        let horizontal = input * movement.max_walk_speed;
        movement.velocity.x = horizontal.x;
        movement.velocity.y = horizontal.y;

        if movement.orient_rotation_to_movement && input.length_squared() > PLANAR_EPSILON {
            transform.rotation = Quat::from_rotation_z(yaw_of(input).to_radians());
        }

        // Vertical: jump только с пола
        if movement.grounded && movement.jump_requested {
            movement.velocity.z = movement.jump_z_velocity;
            movement.grounded = false;
        }
        if !movement.grounded {
            movement.velocity.z += movement.gravity * delta;
        }

        transform.translation += movement.velocity * delta;

        // Floor clamp
        if transform.translation.z <= movement.floor_height && movement.velocity.z <= 0.0 {
            transform.translation.z = movement.floor_height;
            movement.velocity.z = 0.0;
            movement.grounded = true;
        }
    }
}
