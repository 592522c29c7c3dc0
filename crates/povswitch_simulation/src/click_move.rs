//! Click-to-move (TopDown)
//!
//! Pending target + acceptance radius. Каждый tick:
//! - planar distance ≤ radius → target очищается (arrival, terminal)
//! - иначе → один unit horizontal direction к target (scale 1.0)
//!
//! Cancel: manual movement input (TopDown), arrival, любой `set_view_mode`.

use bevy::math::{Vec2, Vec3};

use crate::math::{is_significant_axis, planar_direction, planar_distance};

pub const DEFAULT_ACCEPTANCE_RADIUS: f32 = 50.0;

/// Один frame movement input к target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveStep {
    /// Horizontal unit vector
    pub direction: Vec3,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickMoveTracker {
    target: Option<Vec3>,
    acceptance_radius: f32,
}

impl Default for ClickMoveTracker {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTANCE_RADIUS)
    }
}

impl ClickMoveTracker {
    pub fn new(acceptance_radius: f32) -> Self {
        Self {
            target: None,
            acceptance_radius,
        }
    }

    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn acceptance_radius(&self) -> f32 {
        self.acceptance_radius
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    /// Новый target + немедленный первый шаг (если ещё не на месте)
    pub fn begin(&mut self, target: Vec3, location: Vec3) -> Option<MoveStep> {
        self.target = Some(target);
        self.step(location)
    }

    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// Manual steering всегда вытесняет click-move.
    ///
    /// Возвращает `true` если pending target был очищен.
    pub fn on_manual_move_input(&mut self, axis: Vec2) -> bool {
        if self.target.is_none() || !is_significant_axis(axis) {
            return false;
        }
        self.target = None;
        true
    }

    /// Шаг к target с текущей позиции
    ///
    /// `None` — target нет, или он достигнут (тогда он очищается).
    pub fn step(&mut self, location: Vec3) -> Option<MoveStep> {
        let target = self.target?;

        if planar_distance(location, target) <= self.acceptance_radius {
            self.target = None;
            return None;
        }

        // radius > 0, значит planar offset здесь всегда ненулевой
        let direction = planar_direction(target - location)?;
        Some(MoveStep {
            direction,
            scale: 1.0,
        })
    }
}
