//! View mode domain — FirstPerson ↔ TopDown
//!
//! Содержит:
//! - ViewMode / CameraSlot (enum'ы)
//! - ViewModeController (state machine + transition side-effect table)
//! - ModeScopedState (aim + click-move, очищается при каждом переходе)
//! - ObserverId (подписка на "view mode changed")

pub mod controller;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod controller_tests;

use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

pub use controller::*;

/// Camera/control scheme персонажа
///
/// - FirstPerson: камера на голове, мышь = look, movement относительно actor'а
/// - TopDown: overhead камера, мышь = aim + click-to-move, movement в world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
pub enum ViewMode {
    #[default]
    FirstPerson,
    TopDown,
}

impl ViewMode {
    pub fn other(self) -> Self {
        match self {
            ViewMode::FirstPerson => ViewMode::TopDown,
            ViewMode::TopDown => ViewMode::FirstPerson,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::FirstPerson => "FirstPerson",
            ViewMode::TopDown => "TopDown",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Какая камера сейчас live (ровно одна, совпадает с ViewMode)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSlot {
    FirstPerson,
    TopDown,
}

impl From<ViewMode> for CameraSlot {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::FirstPerson => CameraSlot::FirstPerson,
            ViewMode::TopDown => CameraSlot::TopDown,
        }
    }
}
