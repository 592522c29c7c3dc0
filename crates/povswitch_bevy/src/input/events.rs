//! Player input events
//!
//! События генерируются host'ом (keyboard/mouse, headless demo, тесты)
//! и обрабатываются ECS systems.

use bevy::prelude::{Entity, Event, Vec2};
use povswitch_simulation::{TopDownCameraSettings, ViewMode};

/// Player input action (одно событие = одно action)
///
/// # Архитектура
/// - Emit: host input layer (или тест через `world.send_event`)
/// - Consume: `dispatch_player_input` → `PlayerCharacter::on_*`
///
/// # Coordinate System
/// - `Move`: `x` = right, `y` = forward (оба в [-1, 1])
/// - `Look`: `x` = yaw delta, `y` = pitch delta (градусы до sensitivity)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerInputEvent {
    Move(Vec2),
    Look(Vec2),
    JumpStarted,
    JumpEnded,
    /// Переключить FirstPerson ↔ TopDown
    ToggleView,
    /// Click-to-move по текущей позиции мыши (только TopDown)
    ClickMove,
}

/// Runtime правка top-down camera (height/angle)
///
/// В TopDown применяется сразу, в FirstPerson — при следующем входе.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TopDownSettingsChanged {
    pub entity: Entity,
    pub settings: TopDownCameraSettings,
}

/// Emit после каждого перехода (включая begin_play и re-entry в тот же режим)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewModeChanged {
    pub entity: Entity,
    pub mode: ViewMode,
}
