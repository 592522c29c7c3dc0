//! Character configuration: top-down camera, click-move, look limits
//!
//! Все поля named + validated. Host может грузить конфиг через serde
//! (`#[serde(default)]` — недостающие поля берутся из Default), после чего
//! обязательно вызывает `validated()` (это делает `PlayerCharacter::new`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TOP_DOWN_HEIGHT_MIN: f32 = 100.0;
pub const TOP_DOWN_HEIGHT_MAX: f32 = 10_000.0;
pub const TOP_DOWN_ANGLE_MIN: f32 = -90.0;
pub const TOP_DOWN_ANGLE_MAX: f32 = -10.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("look pitch limits inverted: min {min} > max {max}")]
    InvertedPitchLimits { min: f32, max: f32 },
}

/// Top-down camera offset (spring arm height) + pitch
///
/// # Clamping
/// - height: [100, 10000] cm
/// - angle: [-90°, -10°] (камера всегда смотрит вниз)
///
/// Применяется при каждом входе в TopDown и при runtime edit (без рестарта).
/// Deserialize идёт через `new()`: значение вне диапазона построить нельзя.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTopDownCameraSettings")]
pub struct TopDownCameraSettings {
    height: f32,
    angle: f32,
}

/// Wire-форма `TopDownCameraSettings` (до clamp'а)
#[derive(Deserialize)]
#[serde(default)]
struct RawTopDownCameraSettings {
    height: f32,
    angle: f32,
}

impl Default for RawTopDownCameraSettings {
    fn default() -> Self {
        let defaults = TopDownCameraSettings::default();
        Self {
            height: defaults.height,
            angle: defaults.angle,
        }
    }
}

impl From<RawTopDownCameraSettings> for TopDownCameraSettings {
    fn from(raw: RawTopDownCameraSettings) -> Self {
        Self::new(raw.height, raw.angle)
    }
}

impl Default for TopDownCameraSettings {
    fn default() -> Self {
        Self {
            height: 500.0,
            angle: -45.0,
        }
    }
}

impl TopDownCameraSettings {
    /// Значения clamp'ятся в допустимые диапазоны (non-finite → default)
    pub fn new(height: f32, angle: f32) -> Self {
        let defaults = Self::default();
        let height = if height.is_finite() { height } else { defaults.height };
        let angle = if angle.is_finite() { angle } else { defaults.angle };
        Self {
            height: height.clamp(TOP_DOWN_HEIGHT_MIN, TOP_DOWN_HEIGHT_MAX),
            angle: angle.clamp(TOP_DOWN_ANGLE_MIN, TOP_DOWN_ANGLE_MAX),
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    fn validated(self) -> Result<Self, ConfigError> {
        finite("top_down.height", self.height)?;
        finite("top_down.angle", self.angle)?;
        Ok(Self::new(self.height, self.angle))
    }
}

/// Mouse/stick look (FirstPerson)
///
/// Pitch limits — как у player camera manager: -70° вниз / +80° вверх.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookSettings {
    pub sensitivity: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            pitch_min: -70.0,
            pitch_max: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub top_down: TopDownCameraSettings,
    /// Click-move считается завершённым внутри этого радиуса (cm)
    pub acceptance_radius: f32,
    /// Max длина ground trace для aim/click (cm)
    pub aim_trace_distance: f32,
    pub look: LookSettings,
    pub first_person_fov: f32,
    pub top_down_fov: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            top_down: TopDownCameraSettings::default(),
            acceptance_radius: 50.0,
            aim_trace_distance: 10_000.0,
            look: LookSettings::default(),
            first_person_fov: 70.0,
            top_down_fov: 90.0,
        }
    }
}

impl CharacterConfig {
    /// Проверка + clamp top-down диапазонов
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.top_down = self.top_down.validated()?;

        positive("acceptance_radius", self.acceptance_radius)?;
        positive("aim_trace_distance", self.aim_trace_distance)?;
        positive("look.sensitivity", self.look.sensitivity)?;
        positive("first_person_fov", self.first_person_fov)?;
        positive("top_down_fov", self.top_down_fov)?;
        finite("look.pitch_min", self.look.pitch_min)?;
        finite("look.pitch_max", self.look.pitch_max)?;

        if self.look.pitch_min > self.look.pitch_max {
            return Err(ConfigError::InvertedPitchLimits {
                min: self.look.pitch_min,
                max: self.look.pitch_max,
            });
        }

        Ok(self)
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
