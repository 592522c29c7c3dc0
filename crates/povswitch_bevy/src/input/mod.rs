//! Player input module
//!
//! # Архитектура
//!
//! ```text
//! Host input (keyboard/mouse, headless demo, тесты)
//!     ↓
//! PlayerInputEvent (ECS event) - events.rs
//!     ↓
//! dispatch_player_input (ECS system) - systems.rs
//!     ↓
//! PlayerCharacter::on_* (через CharacterRig)
//! ```
//!
//! # Компоненты модуля
//!
//! - `events` - ECS события (PlayerInputEvent, ViewModeChanged, TopDownSettingsChanged)
//! - `systems` - ECS системы (begin_play, dispatch, tick)
//! - `controller` - PlayerController component (mouse + control rotation)

pub mod controller;
pub mod events;
pub mod systems;

// Re-exports для external use
pub use controller::*;
pub use events::*;
pub use systems::*;
