//! Top-down aim: screen point → ground point → yaw-only facing
//!
//! # Flow (один раз за tick, только TopDown)
//! 1. `PlayerControllerServices::mouse_position()` (может быть `None`)
//! 2. `resolve_aim` — deproject + ground trace (excluding self)
//! 3. `AimState::record` + `compute_facing_yaw` → control rotation
//!
//! Miss на любом шаге = "нет aim в этом frame", retry не нужен —
//! следующий tick попробует снова.

use bevy::math::{Vec2, Vec3};

use crate::collaborators::{PlayerControllerServices, WorldRaycast};
use crate::math::{planar_direction, yaw_of};

/// Max длина ground trace (cm)
pub const DEFAULT_AIM_TRACE_DISTANCE: f32 = 10_000.0;

/// Последняя успешно resolved aim точка
///
/// Пустая до первого hit'а, перезаписывается каждым hit'ом,
/// очищается при каждом `set_view_mode`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AimState {
    last_aim_location: Option<Vec3>,
}

impl AimState {
    pub fn last_aim_location(&self) -> Option<Vec3> {
        self.last_aim_location
    }

    pub fn record(&mut self, location: Vec3) {
        self.last_aim_location = Some(location);
    }

    pub fn clear(&mut self) {
        self.last_aim_location = None;
    }

    pub fn is_empty(&self) -> bool {
        self.last_aim_location.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimResolver {
    max_distance: f32,
}

impl Default for AimResolver {
    fn default() -> Self {
        Self::new(DEFAULT_AIM_TRACE_DISTANCE)
    }
}

impl AimResolver {
    pub fn new(max_distance: f32) -> Self {
        Self { max_distance }
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Screen point → world impact point
    ///
    /// `None` если deprojection не удался или луч ни во что не попал.
    pub fn resolve_aim(
        &self,
        screen: Vec2,
        controller: &dyn PlayerControllerServices,
        world: &dyn WorldRaycast,
    ) -> Option<Vec3> {
        let ray = controller.deproject_screen_point(screen)?;
        world.raycast(ray.origin, ray.direction, self.max_distance, true)
    }

    /// То же, но screen point берётся из текущей позиции мыши
    pub fn resolve_mouse_aim(
        &self,
        controller: &dyn PlayerControllerServices,
        world: &dyn WorldRaycast,
    ) -> Option<Vec3> {
        let screen = controller.mouse_position()?;
        self.resolve_aim(screen, controller, world)
    }
}

/// Yaw (градусы), чтобы смотреть с `self_location` на `aim_point`
///
/// Направление flatten'ится (Z = 0). Если aim точка прямо над/под actor'ом —
/// `None` (rotation не меняется, никаких NaN). Pitch/roll не вычисляются:
/// controller никогда не наклоняется от aim.
pub fn compute_facing_yaw(self_location: Vec3, aim_point: Vec3) -> Option<f32> {
    planar_direction(aim_point - self_location).map(yaw_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::WorldRay;
    use crate::test_support::{FakeController, FlatGround};

    #[test]
    fn test_facing_yaw_straight_above_is_none() {
        let yaw = compute_facing_yaw(Vec3::new(10.0, 20.0, 0.0), Vec3::new(10.0, 20.0, 500.0));
        assert!(yaw.is_none());

        let yaw = compute_facing_yaw(Vec3::ZERO, Vec3::new(0.0, 0.0, -300.0));
        assert!(yaw.is_none());
    }

    #[test]
    fn test_facing_yaw_matches_atan2() {
        let yaw = compute_facing_yaw(Vec3::ZERO, Vec3::new(1000.0, 500.0, 0.0)).unwrap();
        let expected = 500.0_f32.atan2(1000.0).to_degrees();
        assert!((yaw - expected).abs() < 1.0e-4, "yaw = {}", yaw);
    }

    #[test]
    fn test_facing_yaw_ignores_height_difference() {
        let flat = compute_facing_yaw(Vec3::ZERO, Vec3::new(0.0, 100.0, 0.0)).unwrap();
        let raised = compute_facing_yaw(Vec3::new(0.0, 0.0, 90.0), Vec3::new(0.0, 100.0, -40.0)).unwrap();
        assert!((flat - 90.0).abs() < 1.0e-4);
        assert!((flat - raised).abs() < 1.0e-4);
    }

    #[test]
    fn test_resolve_aim_hits_ground() {
        let controller = FakeController::with_ray(
            Vec2::new(400.0, 300.0),
            WorldRay::new(Vec3::new(1000.0, 500.0, 500.0), -Vec3::Z),
        );
        let ground = FlatGround::new(0.0);

        let hit = AimResolver::default().resolve_mouse_aim(&controller, &ground);
        assert_eq!(hit, Some(Vec3::new(1000.0, 500.0, 0.0)));
        assert_eq!(ground.casts(), 1);
    }

    #[test]
    fn test_resolve_aim_respects_max_distance() {
        let controller = FakeController::with_ray(
            Vec2::new(400.0, 300.0),
            WorldRay::new(Vec3::new(0.0, 0.0, 20_000.0), -Vec3::Z),
        );
        let ground = FlatGround::new(0.0);

        assert!(AimResolver::default().resolve_mouse_aim(&controller, &ground).is_none());
        assert!(AimResolver::new(25_000.0).resolve_mouse_aim(&controller, &ground).is_some());
    }

    #[test]
    fn test_no_mouse_means_no_trace() {
        let controller = FakeController::default();
        let ground = FlatGround::new(0.0);

        assert!(AimResolver::default().resolve_mouse_aim(&controller, &ground).is_none());
        assert_eq!(ground.casts(), 0);
    }

    #[test]
    fn test_aim_state_lifecycle() {
        let mut state = AimState::default();
        assert!(state.is_empty());

        state.record(Vec3::X);
        state.record(Vec3::Y);
        assert_eq!(state.last_aim_location(), Some(Vec3::Y));

        state.clear();
        assert!(state.is_empty());
    }
}
