//! ViewModeController — state machine + transition side effects
//!
//! # Transition (entry action, idempotent)
//!
//! `set_view_mode(mode)` всегда выполняет полный entry action, даже если
//! `mode == current` (так работает инициализация при spawn / reconfigure):
//!
//! ```text
//! (a) clear click-move target + aim state
//! (b) deactivate + hide камеру другого режима
//! (c) activate + unhide камеру этого режима
//! (d) first-person mesh / body mesh visibility flags
//! (e) controller yaw ON, orient-to-movement OFF (оба режима)
//! (f) cursor + input routing
//! (g) TopDown: re-apply camera height/angle
//! (h) notify observers
//! ```
//!
//! Отсутствующий collaborator → warning, шаг пропускается, остальные идут дальше.

use crate::aim::AimState;
use crate::click_move::ClickMoveTracker;
use crate::collaborators::{CameraControl, CharacterRig, InputMode, MeshVisibility};
use crate::config::TopDownCameraSettings;
use crate::logger;

use super::{CameraSlot, ViewMode};

/// Callback на смену view mode
pub type ViewModeObserver = Box<dyn Fn(ViewMode) + Send + Sync>;

/// Handle подписки (для `unsubscribe`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// State, который имеет смысл только внутри текущего режима
///
/// Очищается шагом (a) каждого перехода.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModeScopedState {
    pub aim: AimState,
    pub click_move: ClickMoveTracker,
}

impl ModeScopedState {
    pub fn new(acceptance_radius: f32) -> Self {
        Self {
            aim: AimState::default(),
            click_move: ClickMoveTracker::new(acceptance_radius),
        }
    }

    pub fn clear(&mut self) {
        self.aim.clear();
        self.click_move.cancel();
    }
}

pub struct ViewModeController {
    mode: ViewMode,
    observers: Vec<(ObserverId, ViewModeObserver)>,
    next_observer_id: u64,
}

impl Default for ViewModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ViewModeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewModeController")
            .field("mode", &self.mode)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ViewModeController {
    /// Начальное состояние — FirstPerson
    pub fn new() -> Self {
        Self {
            mode: ViewMode::FirstPerson,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_top_down(&self) -> bool {
        self.mode == ViewMode::TopDown
    }

    pub fn active_camera(&self) -> CameraSlot {
        self.mode.into()
    }

    pub fn subscribe(&mut self, observer: impl Fn(ViewMode) + Send + Sync + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// `false` если такой подписки не было
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Переключить на другой режим (всегда успешно)
    pub fn toggle(
        &mut self,
        rig: &mut CharacterRig<'_>,
        scoped: &mut ModeScopedState,
        top_down: &TopDownCameraSettings,
    ) -> ViewMode {
        let next = self.mode.other();
        logger::log(&format!("ToggleViewMode: {} → {}", self.mode, next));
        self.set_view_mode(next, rig, scoped, top_down)
    }

    /// Entry action для `mode` (см. module docs, шаги a–h)
    pub fn set_view_mode(
        &mut self,
        mode: ViewMode,
        rig: &mut CharacterRig<'_>,
        scoped: &mut ModeScopedState,
        top_down: &TopDownCameraSettings,
    ) -> ViewMode {
        self.mode = mode;
        let first_person = mode == ViewMode::FirstPerson;

        // (a)
        scoped.clear();

        // (b) + (c): сначала гасим чужую камеру, чтобы не было двух active
        let (outgoing, incoming) = if first_person {
            (&mut rig.top_down_camera, &mut rig.first_person_camera)
        } else {
            (&mut rig.first_person_camera, &mut rig.top_down_camera)
        };
        switch_camera(outgoing, false, mode.other());
        switch_camera(incoming, true, mode);

        // (d)
        apply_first_person_mesh(&mut rig.first_person_mesh, first_person);
        apply_body_mesh(&mut rig.body_mesh, first_person);

        // (e) Разница режимов — ЧТО крутит controller yaw (look vs aim), а не этот флаг
        match rig.movement.as_deref_mut() {
            Some(movement) => {
                movement.set_use_controller_yaw(true);
                movement.set_orient_rotation_to_movement(false);
            }
            None => warn_missing("movement component", mode),
        }

        // (f)
        match rig.controller.as_deref_mut() {
            Some(controller) => {
                controller.set_mouse_cursor_visible(!first_person);
                controller.set_input_mode(if first_person {
                    InputMode::GameOnly
                } else {
                    InputMode::GameAndUi
                });
            }
            None => warn_missing("player controller", mode),
        }

        // (g)
        if !first_person {
            Self::apply_top_down_settings(rig, top_down);
        }

        logger::log_info(&format!("📷 View mode set to {}", mode));

        // (h)
        self.notify();
        mode
    }

    /// Height/angle → spring arm (вход в TopDown + runtime edit)
    pub fn apply_top_down_settings(rig: &mut CharacterRig<'_>, top_down: &TopDownCameraSettings) {
        match rig.top_down_arm.as_deref_mut() {
            Some(arm) => {
                arm.set_relative_height(top_down.height());
                arm.set_camera_pitch(top_down.angle());
            }
            None => warn_missing("top-down spring arm", ViewMode::TopDown),
        }
    }

    fn notify(&self) {
        for (_, observer) in &self.observers {
            observer(self.mode);
        }
    }
}

fn switch_camera(camera: &mut Option<&mut dyn CameraControl>, active: bool, owner: ViewMode) {
    let Some(camera) = camera.as_deref_mut() else {
        warn_missing(&format!("{} camera", owner), owner);
        return;
    };
    camera.set_active(active);
    camera.set_hidden_in_render(!active);
}

/// Arms: видны только владельцу в FirstPerson, полностью скрыты в TopDown
fn apply_first_person_mesh(mesh: &mut Option<&mut dyn MeshVisibility>, first_person: bool) {
    let Some(mesh) = mesh.as_deref_mut() else {
        warn_missing("first-person mesh", ViewMode::FirstPerson);
        return;
    };
    mesh.set_owner_only_visibility(first_person);
    mesh.set_visibility(first_person);
    mesh.set_hidden_in_render(!first_person);
}

/// Body: владелец не видит своё тело в FirstPerson, в TopDown оно видно всем
fn apply_body_mesh(mesh: &mut Option<&mut dyn MeshVisibility>, first_person: bool) {
    let Some(mesh) = mesh.as_deref_mut() else {
        warn_missing("body mesh", ViewMode::TopDown);
        return;
    };
    mesh.set_owner_no_see(first_person);
    mesh.set_owner_only_visibility(false);
    mesh.set_visibility(true);
    mesh.set_hidden_in_render(false);
}

fn warn_missing(what: &str, mode: ViewMode) {
    logger::log_warning(&format!("⚠️ {} missing while applying {} view, step skipped", what, mode));
}
