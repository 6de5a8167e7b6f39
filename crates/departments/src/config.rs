//! Tunables for pointer gestures and the explorer as a whole.
//!
//! `GestureConfig` is fixed for the lifetime of the gesture classifier. It can
//! be overridden at startup through a JSON settings file whose path is read
//! from `DEPARTMENT_EXPLORER_CONFIG`; anything invalid falls back to defaults.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Environment variable holding the optional settings file path.
pub const SETTINGS_ENV_VAR: &str = "DEPARTMENT_EXPLORER_CONFIG";

pub const DEFAULT_SCROLL_ZOOM_SPEED: f32 = 10.0;
pub const DEFAULT_PINCH_ZOOM_SPEED: f32 = 0.1;
pub const DEFAULT_FOV_MIN: f32 = 15.0;
pub const DEFAULT_FOV_MAX: f32 = 60.0;
pub const DEFAULT_MAX_TAP_TIME: f32 = 0.25;
pub const DEFAULT_MAX_TAP_MOVEMENT: f32 = 10.0;

/// Probability that a department stays visible under the random filter (2 in 5).
pub const DEFAULT_RANDOM_SHOW_PROBABILITY: f64 = 0.4;

// =============================================================================
// Errors
// =============================================================================

/// Rejected gesture configuration values.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureConfigError {
    /// Tap time must be finite and `>= 0`.
    InvalidTapTime(f32),
    /// Tap movement must be finite and `>= 0`.
    InvalidTapMovement(f32),
    /// Zoom speeds must be finite.
    InvalidZoomSpeed(f32),
    /// FOV bounds must be finite with `min <= max`.
    InvalidFovBounds { min: f32, max: f32 },
}

impl fmt::Display for GestureConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureConfigError::InvalidTapTime(t) => {
                write!(f, "max tap time must be a finite value >= 0, got {t}")
            }
            GestureConfigError::InvalidTapMovement(d) => {
                write!(f, "max tap movement must be a finite value >= 0, got {d}")
            }
            GestureConfigError::InvalidZoomSpeed(s) => {
                write!(f, "zoom speed must be finite, got {s}")
            }
            GestureConfigError::InvalidFovBounds { min, max } => {
                write!(f, "field-of-view bounds must satisfy min <= max, got [{min}, {max}]")
            }
        }
    }
}

impl std::error::Error for GestureConfigError {}

/// Failure to load an [`ExplorerSettings`] file.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(GestureConfigError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "I/O error: {e}"),
            SettingsError::Parse(e) => write!(f, "Parse error: {e}"),
            SettingsError::Invalid(e) => write!(f, "Invalid gesture config: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<GestureConfigError> for SettingsError {
    fn from(e: GestureConfigError) -> Self {
        SettingsError::Invalid(e)
    }
}

// =============================================================================
// Gesture configuration
// =============================================================================

/// Thresholds separating a tap from a drag or a long hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// Max press duration in seconds that still counts as a tap.
    pub max_tap_time: f32,
    /// Max pointer travel in logical pixels that still counts as a tap.
    pub max_tap_movement: f32,
}

impl TapConfig {
    pub fn new(max_tap_time: f32, max_tap_movement: f32) -> Result<Self, GestureConfigError> {
        let config = Self {
            max_tap_time,
            max_tap_movement,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GestureConfigError> {
        if !self.max_tap_time.is_finite() || self.max_tap_time < 0.0 {
            return Err(GestureConfigError::InvalidTapTime(self.max_tap_time));
        }
        if !self.max_tap_movement.is_finite() || self.max_tap_movement < 0.0 {
            return Err(GestureConfigError::InvalidTapMovement(self.max_tap_movement));
        }
        Ok(())
    }
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            max_tap_time: DEFAULT_MAX_TAP_TIME,
            max_tap_movement: DEFAULT_MAX_TAP_MOVEMENT,
        }
    }
}

/// Scroll and pinch zoom tuning. FOV values are vertical angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub scroll_speed: f32,
    pub pinch_speed: f32,
    pub fov_min: f32,
    pub fov_max: f32,
}

impl ZoomConfig {
    pub fn new(
        scroll_speed: f32,
        pinch_speed: f32,
        fov_min: f32,
        fov_max: f32,
    ) -> Result<Self, GestureConfigError> {
        let config = Self {
            scroll_speed,
            pinch_speed,
            fov_min,
            fov_max,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GestureConfigError> {
        for speed in [self.scroll_speed, self.pinch_speed] {
            if !speed.is_finite() {
                return Err(GestureConfigError::InvalidZoomSpeed(speed));
            }
        }
        if !self.fov_min.is_finite() || !self.fov_max.is_finite() || self.fov_min > self.fov_max {
            return Err(GestureConfigError::InvalidFovBounds {
                min: self.fov_min,
                max: self.fov_max,
            });
        }
        Ok(())
    }

    /// Clamp a field-of-view into `[fov_min, fov_max]`.
    #[inline]
    pub fn clamp_fov(&self, fov: f32) -> f32 {
        fov.clamp(self.fov_min, self.fov_max)
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            scroll_speed: DEFAULT_SCROLL_ZOOM_SPEED,
            pinch_speed: DEFAULT_PINCH_ZOOM_SPEED,
            fov_min: DEFAULT_FOV_MIN,
            fov_max: DEFAULT_FOV_MAX,
        }
    }
}

/// Everything the gesture classifier is constructed with.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub tap: TapConfig,
    pub zoom: ZoomConfig,
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), GestureConfigError> {
        self.tap.validate()?;
        self.zoom.validate()
    }
}

// =============================================================================
// Explorer settings file
// =============================================================================

/// Seeds and probabilities for the department filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub random_show_probability: f64,
    pub random_seed: u64,
    /// Seed for the generated building's department states.
    pub layout_seed: u64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            random_show_probability: DEFAULT_RANDOM_SHOW_PROBABILITY,
            random_seed: 0x5eed_cafe,
            layout_seed: 42,
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
    pub gesture: GestureConfig,
    pub filters: FilterSettings,
}

impl ExplorerSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.gesture.validate()?;
        settings.filters.random_show_probability =
            settings.filters.random_show_probability.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the file named by [`SETTINGS_ENV_VAR`], or return defaults.
    pub fn load_from_env() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV_VAR) else {
            return Self::default();
        };
        match Self::from_path(Path::new(&path)) {
            Ok(settings) => {
                info!("Loaded explorer settings from '{}'", path);
                settings
            }
            Err(e) => {
                warn!(
                    "Could not load explorer settings from '{}': {}; using defaults",
                    path, e
                );
                Self::default()
            }
        }
    }
}
