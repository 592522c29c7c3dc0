//! PlayerController component (mouse + control rotation + cursor)
//!
//! Host пишет `mouse_position`/`viewport_size` (window cursor или тест),
//! `update_view_points` пишет `view`. Simulation читает всё через
//! `PlayerControllerServices`.

use bevy::prelude::*;
use povswitch_simulation::{InputMode, PlayerControllerServices, Rotator, WorldRay};

use crate::camera::ViewPoint;

pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerController {
    /// Позиция курсора в пикселях (origin top-left), `None` — курсор вне окна
    pub mouse_position: Option<Vec2>,
    pub viewport_size: Vec2,
    pub control_rotation: Rotator,
    pub cursor_visible: bool,
    pub input_mode: InputMode,
    /// Поза активной камеры (обновляется каждый frame)
    pub view: Option<ViewPoint>,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            mouse_position: None,
            viewport_size: DEFAULT_VIEWPORT,
            control_rotation: Rotator::ZERO,
            cursor_visible: false,
            input_mode: InputMode::GameOnly,
            view: None,
        }
    }
}

impl PlayerControllerServices for PlayerController {
    fn mouse_position(&self) -> Option<Vec2> {
        self.mouse_position
    }

    fn deproject_screen_point(&self, screen: Vec2) -> Option<WorldRay> {
        self.view?.deproject(screen, self.viewport_size)
    }

    fn control_rotation(&self) -> Rotator {
        self.control_rotation
    }

    fn set_control_rotation(&mut self, rotation: Rotator) {
        self.control_rotation = rotation;
    }

    fn set_mouse_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }
}
