//! Player character spawn
//!
//! Character = одна entity со всеми collaborators как components:
//! cameras + spring arm + meshes + movement + controller + capsule collider.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use povswitch_simulation::{logger, CharacterConfig, ConfigError, PlayerCharacter};

use crate::camera::{FirstPersonCamera, TopDownCamera, TopDownSpringArm};
use crate::input::PlayerController;
use crate::movement::CharacterMovement;
use crate::visual::{BodyMesh, FirstPersonMesh};

/// Capsule (cm): radius 34, полувысота 96 вместе с полусферами
pub const CAPSULE_RADIUS: f32 = 34.0;
pub const CAPSULE_HALF_HEIGHT: f32 = 96.0;

/// Marker: этот персонаж управляется локальным игроком
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Полный набор components персонажа, стоящего на полу z = 0
///
/// `position.z` игнорируется: центр capsule ставится на `CAPSULE_HALF_HEIGHT`.
pub fn player_character_bundle(position: Vec2, config: CharacterConfig) -> Result<impl Bundle, ConfigError> {
    let character = PlayerCharacter::new(config)?;
    let config = character.config();

    let arm = TopDownSpringArm {
        relative_height: config.top_down.height(),
        camera_pitch: config.top_down.angle(),
        ..Default::default()
    };
    let first_person_camera = FirstPersonCamera::new(config.first_person_fov);
    let top_down_camera = TopDownCamera::new(config.top_down_fov);

    Ok((
        Player,
        character,
        Transform::from_xyz(position.x, position.y, CAPSULE_HALF_HEIGHT),
        first_person_camera,
        top_down_camera,
        arm,
        FirstPersonMesh::default(),
        BodyMesh::default(),
        CharacterMovement::standing_at(CAPSULE_HALF_HEIGHT),
        PlayerController::default(),
        Collider::capsule_z(CAPSULE_HALF_HEIGHT - CAPSULE_RADIUS, CAPSULE_RADIUS),
    ))
}

pub fn spawn_player_character(
    commands: &mut Commands,
    position: Vec2,
    config: CharacterConfig,
) -> Result<Entity, ConfigError> {
    let bundle = player_character_bundle(position, config)?;
    let entity = commands.spawn(bundle).id();
    logger::log_info(&format!("🧍 Player character spawned: {:?} at {:?}", entity, position));
    Ok(entity)
}
