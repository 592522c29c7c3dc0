//! World conventions + small vector helpers
//!
//! # Coordinate System
//! Engine-native (не Bevy-native!):
//! - `+Z` — up
//! - `+X` — forward (yaw 0°)
//! - `+Y` — right (yaw 90°)
//!
//! Длины в engine units (cm), углы `Rotator` в градусах.

use bevy::math::{Vec2, Vec3};
use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

pub const WORLD_UP: Vec3 = Vec3::Z;
pub const WORLD_FORWARD: Vec3 = Vec3::X;
pub const WORLD_RIGHT: Vec3 = Vec3::Y;

/// Planar length ниже этого порога считается "нет направления"
pub const PLANAR_EPSILON: f32 = 1.0e-4;

/// Pitch/yaw/roll в градусах
///
/// Control rotation игрока и ориентация камер. Roll в этом проекте всегда 0,
/// но поле оставлено для совместимости с engine rotator'ами.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Reflect)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self { pitch: 0.0, yaw: 0.0, roll: 0.0 };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Только yaw (pitch/roll = 0) — так aim поворачивает controller
    pub fn from_yaw(yaw: f32) -> Self {
        Self { pitch: 0.0, yaw, roll: 0.0 }
    }

    /// Forward vector (учитывает pitch + yaw)
    pub fn forward(&self) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }

    /// Right vector (horizontal, roll игнорируется)
    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        Vec3::new(-sy, cy, 0.0)
    }

    /// Up vector камеры: forward × right
    pub fn up(&self) -> Vec3 {
        self.forward().cross(self.right())
    }

    /// Yaw приводится к (-180, 180]
    pub fn with_normalized_yaw(mut self) -> Self {
        self.yaw = normalize_axis(self.yaw);
        self
    }
}

/// Угол в градусах → (-180, 180]
pub fn normalize_axis(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Луч в world space (origin + normalized direction)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl WorldRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Обнуляет вертикальную компоненту (движение никогда не идёт по Z)
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}

/// Flatten + normalize; `None` если горизонтальной составляющей нет
pub fn planar_direction(v: Vec3) -> Option<Vec3> {
    let flat = flatten(v);
    if flat.length_squared() <= PLANAR_EPSILON * PLANAR_EPSILON {
        return None;
    }
    Some(flat.normalize())
}

/// Расстояние в горизонтальной плоскости (Z игнорируется)
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(b - a).length()
}

/// Yaw (градусы) для горизонтального направления: atan2(y, x)
pub fn yaw_of(direction: Vec3) -> f32 {
    direction.y.atan2(direction.x).to_degrees()
}

/// Input axis считается "нажатым" если длина > 0.1
pub fn is_significant_axis(axis: Vec2) -> bool {
    !axis.is_nan() && axis.length_squared() > 0.01
}
