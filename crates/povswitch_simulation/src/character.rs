//! PlayerCharacter — view mode + aim + click-move в одном component
//!
//! # Input routing
//!
//! | action      | FirstPerson                          | TopDown                                  |
//! |-------------|--------------------------------------|------------------------------------------|
//! | Move        | actor right/forward (flattened)      | cancel click-move → world +Y/+X          |
//! | Look        | control yaw/pitch (pitch clamped)    | ignored (aim обновляется в tick)         |
//! | Jump        | movement jump/stop                   | movement jump/stop                       |
//! | ToggleView  | → TopDown                            | → FirstPerson                            |
//! | ClickMove   | ignored                              | resolve ground point → target + 1 step   |
//!
//! # Tick (один раз за frame)
//! - TopDown: aim (1 ray cast) → click-move step
//! - FirstPerson: ничего (aim НЕ resolve'ится)

use bevy::math::{Vec2, Vec3};
use bevy::prelude::Component;

use crate::aim::{compute_facing_yaw, AimResolver, AimState};
use crate::click_move::{ClickMoveTracker, MoveStep};
use crate::collaborators::{CharacterRig, WorldRaycast};
use crate::config::{CharacterConfig, ConfigError, TopDownCameraSettings};
use crate::logger;
use crate::math::{flatten, Rotator, WORLD_FORWARD, WORLD_RIGHT};
use crate::view_mode::{CameraSlot, ModeScopedState, ObserverId, ViewMode, ViewModeController};

#[derive(Component, Debug)]
pub struct PlayerCharacter {
    config: CharacterConfig,
    view: ViewModeController,
    scoped: ModeScopedState,
    resolver: AimResolver,
}

impl PlayerCharacter {
    /// Config валидируется здесь (top-down ranges clamp'ятся)
    pub fn new(config: CharacterConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        Ok(Self {
            view: ViewModeController::new(),
            scoped: ModeScopedState::new(config.acceptance_radius),
            resolver: AimResolver::new(config.aim_trace_distance),
            config,
        })
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn active_camera(&self) -> CameraSlot {
        self.view.active_camera()
    }

    pub fn aim_state(&self) -> &AimState {
        &self.scoped.aim
    }

    pub fn click_move(&self) -> &ClickMoveTracker {
        &self.scoped.click_move
    }

    pub fn aim_resolver(&self) -> &AimResolver {
        &self.resolver
    }

    pub fn subscribe(&mut self, observer: impl Fn(ViewMode) + Send + Sync + 'static) -> ObserverId {
        self.view.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.view.unsubscribe(id)
    }

    // ========================================================================
    // View mode
    // ========================================================================

    /// Spawn-time: прогнать entry action текущего режима
    pub fn begin_play(&mut self, rig: &mut CharacterRig<'_>) -> ViewMode {
        self.set_view_mode(self.view.mode(), rig)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode, rig: &mut CharacterRig<'_>) -> ViewMode {
        self.view
            .set_view_mode(mode, rig, &mut self.scoped, &self.config.top_down)
    }

    pub fn toggle_view_mode(&mut self, rig: &mut CharacterRig<'_>) -> ViewMode {
        self.view.toggle(rig, &mut self.scoped, &self.config.top_down)
    }

    /// Runtime edit: в TopDown применяется сразу, без переключения режима
    pub fn set_top_down_settings(&mut self, settings: TopDownCameraSettings, rig: &mut CharacterRig<'_>) {
        self.config.top_down = TopDownCameraSettings::new(settings.height(), settings.angle());
        if self.view.is_top_down() {
            ViewModeController::apply_top_down_settings(rig, &self.config.top_down);
        }
    }

    // ========================================================================
    // Input actions
    // ========================================================================

    /// Move axis: `x` = right, `y` = forward
    pub fn on_move_input(&mut self, axis: Vec2, rig: &mut CharacterRig<'_>) {
        if !axis.is_finite() {
            return;
        }
        if self.view.is_top_down() && self.scoped.click_move.on_manual_move_input(axis) {
            logger::log("🖱️ Click-move cancelled by manual input");
        }

        let (right, forward) = match self.view.mode() {
            ViewMode::FirstPerson => (flatten(rig.pose.rotation.right()), flatten(rig.pose.rotation.forward())),
            ViewMode::TopDown => (WORLD_RIGHT, WORLD_FORWARD),
        };

        let Some(movement) = rig.movement.as_deref_mut() else {
            return;
        };
        movement.add_movement_input(right.normalize_or_zero(), axis.x);
        movement.add_movement_input(forward.normalize_or_zero(), axis.y);
    }

    /// Look axis: `x` = yaw, `y` = pitch (только FirstPerson)
    pub fn on_look_input(&mut self, axis: Vec2, rig: &mut CharacterRig<'_>) {
        if self.view.is_top_down() || !axis.is_finite() {
            return;
        }
        let Some(controller) = rig.controller.as_deref_mut() else {
            return;
        };

        let look = &self.config.look;
        let mut rotation = controller.control_rotation();
        rotation.yaw += axis.x * look.sensitivity;
        rotation.pitch = (rotation.pitch + axis.y * look.sensitivity).clamp(look.pitch_min, look.pitch_max);
        controller.set_control_rotation(rotation.with_normalized_yaw());
    }

    pub fn on_jump_started(&mut self, rig: &mut CharacterRig<'_>) {
        if let Some(movement) = rig.movement.as_deref_mut() {
            movement.jump();
        }
    }

    pub fn on_jump_ended(&mut self, rig: &mut CharacterRig<'_>) {
        if let Some(movement) = rig.movement.as_deref_mut() {
            movement.stop_jumping();
        }
    }

    /// ClickMove по текущей позиции мыши
    ///
    /// `true` если target установлен.
    pub fn on_click_move(&mut self, rig: &mut CharacterRig<'_>, world: &dyn WorldRaycast) -> bool {
        if !self.view.is_top_down() {
            return false;
        }
        let Some(screen) = rig.controller.as_deref().and_then(|c| c.mouse_position()) else {
            return false;
        };
        self.on_click_move_at(screen, rig, world)
    }

    /// ClickMove по явной screen точке
    pub fn on_click_move_at(&mut self, screen: Vec2, rig: &mut CharacterRig<'_>, world: &dyn WorldRaycast) -> bool {
        if !self.view.is_top_down() {
            return false;
        }
        let Some(controller) = rig.controller.as_deref() else {
            return false;
        };
        let Some(target) = self.resolver.resolve_aim(screen, controller, world) else {
            return false;
        };

        logger::log(&format!("🖱️ Click-move target {:?}", target));
        let step = self.scoped.click_move.begin(target, rig.pose.location);
        apply_step(step, rig);
        true
    }

    // ========================================================================
    // Frame tick
    // ========================================================================

    pub fn tick(&mut self, rig: &mut CharacterRig<'_>, world: &dyn WorldRaycast) {
        if !self.view.is_top_down() {
            return;
        }

        self.update_top_down_aim(rig, world);

        // None: target нет или arrival (target уже очищен) — movement не трогаем
        let step = self.scoped.click_move.step(rig.pose.location);
        apply_step(step, rig);
    }

    /// Mouse → ground → yaw-only control rotation
    fn update_top_down_aim(&mut self, rig: &mut CharacterRig<'_>, world: &dyn WorldRaycast) -> Option<Vec3> {
        let controller = rig.controller.as_deref_mut()?;
        let aim_point = self.resolver.resolve_mouse_aim(&*controller, world)?;
        self.scoped.aim.record(aim_point);

        if let Some(yaw) = compute_facing_yaw(rig.pose.location, aim_point) {
            controller.set_control_rotation(Rotator::from_yaw(yaw));
        }
        Some(aim_point)
    }
}

fn apply_step(step: Option<MoveStep>, rig: &mut CharacterRig<'_>) {
    let (Some(step), Some(movement)) = (step, rig.movement.as_deref_mut()) else {
        return;
    };
    movement.add_movement_input(step.direction, step.scale);
}
