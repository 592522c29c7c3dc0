//! Fake collaborators для unit тестов (in-memory, без ECS)

use std::cell::Cell;

use bevy::math::{Vec2, Vec3};

use crate::collaborators::{
    ActorPose, CameraControl, CharacterRig, InputMode, MeshVisibility, MovementControl,
    PlayerControllerServices, SpringArmControl, WorldRaycast,
};
use crate::math::{Rotator, WorldRay};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FakeCamera {
    pub active: bool,
    pub hidden: bool,
}

impl CameraControl for FakeCamera {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_hidden_in_render(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FakeArm {
    pub height: f32,
    pub pitch: f32,
}

impl SpringArmControl for FakeArm {
    fn set_relative_height(&mut self, height: f32) {
        self.height = height;
    }

    fn set_camera_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeMesh {
    pub visible: bool,
    pub hidden: bool,
    pub owner_only: bool,
    pub owner_no_see: bool,
}

impl Default for FakeMesh {
    fn default() -> Self {
        Self {
            visible: true,
            hidden: false,
            owner_only: false,
            owner_no_see: false,
        }
    }
}

impl MeshVisibility for FakeMesh {
    fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_hidden_in_render(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn set_owner_only_visibility(&mut self, owner_only: bool) {
        self.owner_only = owner_only;
    }

    fn set_owner_no_see(&mut self, owner_no_see: bool) {
        self.owner_no_see = owner_no_see;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeMovement {
    pub inputs: Vec<(Vec3, f32)>,
    pub use_controller_yaw: bool,
    pub orient_rotation_to_movement: bool,
    pub jumping: bool,
}

impl FakeMovement {
    /// Сумма накопленного input (как ConsumeInputVector)
    pub fn accumulated(&self) -> Vec3 {
        self.inputs.iter().map(|(dir, scale)| *dir * *scale).sum()
    }
}

impl MovementControl for FakeMovement {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.inputs.push((direction, scale));
    }

    fn set_use_controller_yaw(&mut self, enabled: bool) {
        self.use_controller_yaw = enabled;
    }

    fn set_orient_rotation_to_movement(&mut self, enabled: bool) {
        self.orient_rotation_to_movement = enabled;
    }

    fn jump(&mut self) {
        self.jumping = true;
    }

    fn stop_jumping(&mut self) {
        self.jumping = false;
    }
}

/// Controller: фиксированная мышь + фиксированный deprojected ray
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeController {
    pub mouse: Option<Vec2>,
    pub ray: Option<WorldRay>,
    pub control_rotation: Rotator,
    pub cursor_visible: bool,
    pub input_mode: InputMode,
}

impl FakeController {
    pub fn with_ray(mouse: Vec2, ray: WorldRay) -> Self {
        Self {
            mouse: Some(mouse),
            ray: Some(ray),
            ..Default::default()
        }
    }

    /// Курсор "смотрит" строго вниз на точку `ground_point`
    pub fn pointing_at(ground_point: Vec3) -> Self {
        Self::with_ray(
            Vec2::new(400.0, 300.0),
            WorldRay::new(ground_point + Vec3::new(0.0, 0.0, 1000.0), -Vec3::Z),
        )
    }
}

impl PlayerControllerServices for FakeController {
    fn mouse_position(&self) -> Option<Vec2> {
        self.mouse
    }

    fn deproject_screen_point(&self, _screen: Vec2) -> Option<WorldRay> {
        self.ray
    }

    fn control_rotation(&self) -> Rotator {
        self.control_rotation
    }

    fn set_control_rotation(&mut self, rotation: Rotator) {
        self.control_rotation = rotation;
    }

    fn set_mouse_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }
}

/// Бесконечная плоскость z = height, считает ray casts
#[derive(Debug, Default)]
pub struct FlatGround {
    height: f32,
    casts: Cell<usize>,
}

impl FlatGround {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            casts: Cell::new(0),
        }
    }

    pub fn casts(&self) -> usize {
        self.casts.get()
    }
}

impl WorldRaycast for FlatGround {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, _exclude_self: bool) -> Option<Vec3> {
        self.casts.set(self.casts.get() + 1);

        let direction = direction.normalize_or_zero();
        if direction.z.abs() < f32::EPSILON {
            return None;
        }
        let distance = (self.height - origin.z) / direction.z;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }
        Some(origin + direction * distance)
    }
}

/// Полный набор fakes (owned) + helper для сборки CharacterRig
#[derive(Debug, Clone, Default)]
pub struct TestRig {
    pub pose: ActorPose,
    pub first_person_camera: FakeCamera,
    pub top_down_camera: FakeCamera,
    pub arm: FakeArm,
    pub first_person_mesh: FakeMesh,
    pub body_mesh: FakeMesh,
    pub movement: FakeMovement,
    pub controller: FakeController,
}

impl TestRig {
    pub fn rig(&mut self) -> CharacterRig<'_> {
        CharacterRig {
            pose: self.pose,
            first_person_camera: Some(&mut self.first_person_camera),
            top_down_camera: Some(&mut self.top_down_camera),
            top_down_arm: Some(&mut self.arm),
            first_person_mesh: Some(&mut self.first_person_mesh),
            body_mesh: Some(&mut self.body_mesh),
            movement: Some(&mut self.movement),
            controller: Some(&mut self.controller),
        }
    }
}
