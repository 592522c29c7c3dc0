//! Player cameras (FirstPerson + TopDown) + view points для deprojection
//!
//! # Архитектура
//!
//! **Camera slots (components на character entity):**
//! - `FirstPersonCamera` — на голове (eye height), вращается control rotation'ом
//! - `TopDownCamera` — на `TopDownSpringArm` (height + pitch), yaw не наследует
//!
//! Active/hidden флаги переключает `ViewModeController` через `CameraControl`.
//! Renderer (вне этого crate) читает `CameraState::active` и зеркалит его на
//! реальную Camera.
//!
//! **View point (каждый frame, после movement):**
//! - Активная камера → `ViewPoint { location, rotation, fov }`
//! - `PlayerController` использует его для screen → world ray

use bevy::prelude::*;
use povswitch_simulation::math::WORLD_UP;
use povswitch_simulation::{CameraControl, PlayerCharacter, Rotator, SpringArmControl, ViewMode, WorldRay};

use crate::input::PlayerController;

/// Activation + render visibility одной камеры
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CameraState {
    pub active: bool,
    pub hidden_in_render: bool,
    /// Horizontal field of view (градусы)
    pub fov: f32,
}

impl CameraState {
    pub fn new(fov: f32, active: bool) -> Self {
        Self {
            active,
            hidden_in_render: !active,
            fov,
        }
    }
}

impl CameraControl for CameraState {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_hidden_in_render(&mut self, hidden: bool) {
        self.hidden_in_render = hidden;
    }
}

/// First-person camera (head socket)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct FirstPersonCamera {
    pub camera: CameraState,
    /// Высота глаз над центром capsule (cm)
    pub eye_height: f32,
}

impl FirstPersonCamera {
    pub fn new(fov: f32) -> Self {
        Self {
            camera: CameraState::new(fov, true),
            eye_height: 64.0,
        }
    }
}

/// Top-down camera (висит на spring arm)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TopDownCamera {
    pub camera: CameraState,
}

impl TopDownCamera {
    /// Изначально выключена (default режим — FirstPerson)
    pub fn new(fov: f32) -> Self {
        Self {
            camera: CameraState::new(fov, false),
        }
    }
}

/// Spring arm для top-down камеры
///
/// Arm length 0, collision test выключен, rotation от pawn не наследуется —
/// камера стоит ровно над персонажем на `relative_height`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TopDownSpringArm {
    pub relative_height: f32,
    pub camera_pitch: f32,
    pub target_arm_length: f32,
    pub do_collision_test: bool,
}

impl Default for TopDownSpringArm {
    fn default() -> Self {
        Self {
            relative_height: 500.0,
            camera_pitch: -45.0,
            target_arm_length: 0.0,
            do_collision_test: false,
        }
    }
}

impl SpringArmControl for TopDownSpringArm {
    fn set_relative_height(&mut self, height: f32) {
        self.relative_height = height;
    }

    fn set_camera_pitch(&mut self, pitch: f32) {
        self.camera_pitch = pitch;
    }
}

/// Поза активной камеры (для deprojection/projection)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ViewPoint {
    pub location: Vec3,
    pub rotation: Rotator,
    /// Horizontal FOV (градусы)
    pub fov: f32,
}

impl ViewPoint {
    fn half_extents(&self, viewport: Vec2) -> Option<(f32, f32)> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        let tan_h = (self.fov.to_radians() * 0.5).tan();
        let tan_v = tan_h * viewport.y / viewport.x;
        Some((tan_h, tan_v))
    }

    /// Screen point (pixels, origin top-left) → world ray
    pub fn deproject(&self, screen: Vec2, viewport: Vec2) -> Option<WorldRay> {
        let (tan_h, tan_v) = self.half_extents(viewport)?;
        let ndc_x = 2.0 * screen.x / viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / viewport.y;

        let rotation = self.rotation;
        let direction = rotation.forward()
            + rotation.right() * (ndc_x * tan_h)
            + rotation.up() * (ndc_y * tan_v);

        Some(WorldRay::new(self.location, direction))
    }

    /// World point → screen point; `None` если точка за камерой
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let (tan_h, tan_v) = self.half_extents(viewport)?;
        let offset = point - self.location;

        let depth = offset.dot(self.rotation.forward());
        if depth <= f32::EPSILON {
            return None;
        }
        let ndc_x = offset.dot(self.rotation.right()) / (depth * tan_h);
        let ndc_y = offset.dot(self.rotation.up()) / (depth * tan_v);

        Some(Vec2::new(
            (ndc_x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc_y) * 0.5 * viewport.y,
        ))
    }
}

/// Обновить `PlayerController::view` по активной камере
///
/// # Schedule
/// - Update, после movement integration (view point этого frame'а
///   используется input'ом следующего)
pub fn update_view_points(
    mut query: Query<(
        &PlayerCharacter,
        &Transform,
        &mut PlayerController,
        Option<&FirstPersonCamera>,
        Option<&TopDownCamera>,
        Option<&TopDownSpringArm>,
    )>,
) {
    for (character, transform, mut controller, first_person, top_down, arm) in query.iter_mut() {
        let location = transform.translation;

        let view = match character.mode() {
            ViewMode::FirstPerson => first_person.map(|camera| ViewPoint {
                location: location + WORLD_UP * camera.eye_height,
                rotation: controller.control_rotation,
                fov: camera.camera.fov,
            }),
            ViewMode::TopDown => match (top_down, arm) {
                (Some(camera), Some(arm)) => Some(ViewPoint {
                    location: location + WORLD_UP * arm.relative_height,
                    rotation: Rotator::new(arm.camera_pitch, 0.0, 0.0),
                    fov: camera.camera.fov,
                }),
                _ => None,
            },
        };

        controller.view = view;
    }
}
