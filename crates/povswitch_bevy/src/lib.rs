//! POVSWITCH Bevy host
//!
//! ECS host layer для `povswitch_simulation`: components реализуют
//! collaborator traits, systems собирают `CharacterRig` на каждый вызов.
//!
//! # Архитектура
//!
//! ```text
//! PlayerInputEvent ──▶ dispatch_player_input ─┐
//!                                              ├──▶ PlayerCharacter (component)
//! Update tick ───────▶ tick_player_characters ─┘          │
//!                                                          ▼
//!       Camera/Mesh/Movement/Controller components ◀── CharacterRig
//!                           │
//!                           ▼
//!       sync_actor_yaw → integrate_character_movement → update_view_points
//! ```
//!
//! Rendering НЕ входит в crate: renderer читает `CameraState` / `MeshState`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod camera;
pub mod input;
pub mod movement;
pub mod player;
pub mod rig;
pub mod visual;
pub mod world;

pub use camera::{update_view_points, CameraState, FirstPersonCamera, TopDownCamera, TopDownSpringArm, ViewPoint};
pub use input::{
    PlayerController, PlayerInputEvent, TopDownSettingsChanged, ViewModeChanged, DEFAULT_VIEWPORT,
};
pub use movement::CharacterMovement;
pub use player::{player_character_bundle, spawn_player_character, Player};
pub use rig::{actor_pose, CharacterRigQuery};
pub use visual::{BodyMesh, FirstPersonMesh, MeshState};
pub use world::{spawn_ground, spawn_obstacle, ColliderRaycast, Ground};

pub use povswitch_simulation::{
    init_logger, CharacterConfig, PlayerCharacter, Rotator, TopDownCameraSettings, ViewMode,
};

/// Главный plugin host layer'а
pub struct PovSwitchPlugin;

impl Plugin for PovSwitchPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInputEvent>()
            .add_event::<ViewModeChanged>()
            .add_event::<TopDownSettingsChanged>()
            .register_type::<FirstPersonCamera>()
            .register_type::<TopDownCamera>()
            .register_type::<TopDownSpringArm>()
            .register_type::<FirstPersonMesh>()
            .register_type::<BodyMesh>()
            .register_type::<CharacterMovement>()
            .register_type::<PlayerController>()
            .register_type::<Player>()
            .register_type::<Ground>()
            .add_systems(
                Update,
                (
                    input::initialize_view_modes,
                    input::apply_top_down_settings,
                    input::dispatch_player_input,
                    input::tick_player_characters,
                    movement::sync_actor_yaw,
                    movement::integrate_character_movement,
                    camera::update_view_points,
                )
                    .chain(),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без PovSwitchPlugin)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}
