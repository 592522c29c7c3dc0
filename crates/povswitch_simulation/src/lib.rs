//! POVSWITCH Simulation Core
//!
//! Engine-agnostic player character controller с двумя view modes:
//! - FirstPerson: камера на голове, mouse look, movement относительно actor'а
//! - TopDown: overhead камера, mouse aim + click-to-move, movement в world axes
//!
//! # Архитектура
//!
//! ```text
//! input actions ──▶ PlayerCharacter ──▶ ViewModeController (state machine, a–h)
//!                         │          ──▶ AimResolver (screen → ground → yaw)
//!                         │          ──▶ ClickMoveTracker (target + radius)
//!                         ▼
//!                  CharacterRig (borrowed host collaborators)
//! ```
//!
//! Host layer (Bevy ECS) живёт в `povswitch_bevy`.

pub mod aim;
pub mod character;
pub mod click_move;
pub mod collaborators;
pub mod config;
pub mod logger;
pub mod math;
pub mod view_mode;

#[cfg(test)]
mod test_support;

// Re-export базовых типов для удобства
pub use aim::{compute_facing_yaw, AimResolver, AimState, DEFAULT_AIM_TRACE_DISTANCE};
pub use character::PlayerCharacter;
pub use click_move::{ClickMoveTracker, MoveStep, DEFAULT_ACCEPTANCE_RADIUS};
pub use collaborators::{
    ActorPose, CameraControl, CharacterRig, InputMode, MeshVisibility, MovementControl,
    PlayerControllerServices, SpringArmControl, WorldRaycast,
};
pub use config::{CharacterConfig, ConfigError, LookSettings, TopDownCameraSettings};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use math::{Rotator, WorldRay};
pub use view_mode::{CameraSlot, ModeScopedState, ObserverId, ViewMode, ViewModeController};
