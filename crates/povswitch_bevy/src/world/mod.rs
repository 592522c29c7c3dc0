//! World geometry: ground trace через Rapier colliders
//!
//! # Архитектура
//! - Physics pipeline НЕ запускается: `Collider::cast_ray` работает по
//!   shape + Transform напрямую (детерминизм, headless)
//! - Querying actor исключается по Entity (capsule игрока не ловит aim)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use povswitch_simulation::WorldRaycast;

/// Все colliders, участвующие в aim/click trace
pub type ColliderQuery<'w, 's> = Query<'w, 's, (Entity, &'static Collider, &'static Transform)>;

/// Ground/obstacle marker (для demo и debug)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Ground;

/// `WorldRaycast` поверх collider query
pub struct ColliderRaycast<'q, 'w, 's> {
    colliders: &'q ColliderQuery<'w, 's>,
    querying_actor: Option<Entity>,
}

impl<'q, 'w, 's> ColliderRaycast<'q, 'w, 's> {
    pub fn new(colliders: &'q ColliderQuery<'w, 's>, querying_actor: Option<Entity>) -> Self {
        Self {
            colliders,
            querying_actor,
        }
    }
}

impl WorldRaycast for ColliderRaycast<'_, '_, '_> {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, exclude_self: bool) -> Option<Vec3> {
        let direction = direction.try_normalize()?;
        if !(max_distance > 0.0) {
            return None;
        }

        let mut nearest: Option<f32> = None;
        for (entity, collider, transform) in self.colliders.iter() {
            if exclude_self && Some(entity) == self.querying_actor {
                continue;
            }
            let Some(toi) = collider.cast_ray(
                transform.translation,
                transform.rotation,
                origin,
                direction,
                max_distance,
                true,
            ) else {
                continue;
            };
            if nearest.is_none_or(|best| toi < best) {
                nearest = Some(toi);
            }
        }

        nearest.map(|toi| origin + direction * toi)
    }
}

/// Spawn плоский пол: верхняя грань на z = 0
pub fn spawn_ground(commands: &mut Commands, half_extent: f32) -> Entity {
    const HALF_THICKNESS: f32 = 50.0;

    commands
        .spawn((
            Ground,
            Collider::cuboid(half_extent, half_extent, HALF_THICKNESS),
            Transform::from_xyz(0.0, 0.0, -HALF_THICKNESS),
        ))
        .id()
}

/// Spawn box obstacle (стоит на полу)
pub fn spawn_obstacle(commands: &mut Commands, center: Vec2, half_size: Vec3) -> Entity {
    commands
        .spawn((
            Ground,
            Collider::cuboid(half_size.x, half_size.y, half_size.z),
            Transform::from_xyz(center.x, center.y, half_size.z),
        ))
        .id()
}
