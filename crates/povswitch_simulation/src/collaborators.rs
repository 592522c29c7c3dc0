//! Collaborator capabilities (host-owned)
//!
//! # Архитектура
//!
//! Simulation НЕ владеет engine объектами. Host (Bevy ECS, тесты, любой
//! другой runtime) реализует узкие traits и на каждый вызов собирает
//! `CharacterRig` из `Option<&mut dyn ...>`:
//!
//! ```text
//! host components ──borrow──▶ CharacterRig ──▶ PlayerCharacter::{tick, on_*}
//! ```
//!
//! `None` в слоте = collaborator отсутствует → соответствующий шаг
//! пропускается с warning, остальные шаги выполняются.

use bevy::math::{Vec2, Vec3};
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

use crate::math::{Rotator, WorldRay};

/// Input routing для player controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum InputMode {
    /// Курсор скрыт, весь input идёт в игру (FirstPerson)
    #[default]
    GameOnly,
    /// Курсор видим, input идёт и в игру и в UI (TopDown)
    GameAndUi,
}

/// Camera component: activation + render visibility
pub trait CameraControl {
    fn set_active(&mut self, active: bool);
    fn set_hidden_in_render(&mut self, hidden: bool);
}

/// Spring arm, на котором висит top-down camera
pub trait SpringArmControl {
    /// Offset arm'а над actor'ом (cm, по Z)
    fn set_relative_height(&mut self, height: f32);
    /// Pitch top-down камеры относительно arm'а (градусы)
    fn set_camera_pitch(&mut self, pitch: f32);
}

/// Mesh visibility flags
pub trait MeshVisibility {
    fn set_visibility(&mut self, visible: bool);
    fn set_hidden_in_render(&mut self, hidden: bool);
    /// Виден только владельцу (first-person arms)
    fn set_owner_only_visibility(&mut self, owner_only: bool);
    /// Невидим для владельца (body mesh в first-person)
    fn set_owner_no_see(&mut self, owner_no_see: bool);
}

/// Movement component персонажа
pub trait MovementControl {
    /// Накопить movement input на этот frame (scale применяется downstream)
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);
    fn set_use_controller_yaw(&mut self, enabled: bool);
    fn set_orient_rotation_to_movement(&mut self, enabled: bool);
    fn jump(&mut self);
    fn stop_jumping(&mut self);
}

/// Player controller services
pub trait PlayerControllerServices {
    /// `None` — мышь недоступна (нет viewport, gamepad-only, etc.)
    fn mouse_position(&self) -> Option<Vec2>;
    /// Screen point → world ray через активную камеру
    fn deproject_screen_point(&self, screen: Vec2) -> Option<WorldRay>;
    fn control_rotation(&self) -> Rotator;
    fn set_control_rotation(&mut self, rotation: Rotator);
    fn set_mouse_cursor_visible(&mut self, visible: bool);
    fn set_input_mode(&mut self, mode: InputMode);
}

/// World ray cast service
pub trait WorldRaycast {
    /// Ближайшая точка попадания луча в пределах `max_distance`.
    /// `exclude_self` — игнорировать querying actor'а.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, exclude_self: bool) -> Option<Vec3>;
}

/// Позиция + ориентация actor'а на момент вызова
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActorPose {
    pub location: Vec3,
    pub rotation: Rotator,
}

impl ActorPose {
    pub fn new(location: Vec3, rotation: Rotator) -> Self {
        Self { location, rotation }
    }

    pub fn at(location: Vec3) -> Self {
        Self {
            location,
            rotation: Rotator::ZERO,
        }
    }
}

/// Набор collaborators для одного вызова
///
/// Все слоты optional — отсутствующий collaborator никогда не прерывает
/// остальные шаги.
#[derive(Default)]
pub struct CharacterRig<'a> {
    pub pose: ActorPose,
    pub first_person_camera: Option<&'a mut dyn CameraControl>,
    pub top_down_camera: Option<&'a mut dyn CameraControl>,
    pub top_down_arm: Option<&'a mut dyn SpringArmControl>,
    pub first_person_mesh: Option<&'a mut dyn MeshVisibility>,
    pub body_mesh: Option<&'a mut dyn MeshVisibility>,
    pub movement: Option<&'a mut dyn MovementControl>,
    pub controller: Option<&'a mut dyn PlayerControllerServices>,
}

impl<'a> CharacterRig<'a> {
    /// Пустой rig (все collaborators отсутствуют)
    pub fn bare(pose: ActorPose) -> Self {
        Self {
            pose,
            ..Default::default()
        }
    }
}
