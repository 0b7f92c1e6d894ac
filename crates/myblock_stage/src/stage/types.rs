//! Core type definitions: constants, stage configuration, and sprite state.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::geometry::{SpritePoint, DEFAULT_STAGE_HEIGHT_UNITS, DEFAULT_STAGE_WIDTH_UNITS};

// ============================================================================
// Type Aliases and Constants
// ============================================================================

pub type RunId = u64;

/// Stage units travelled per requested step.
pub const STEP_SCALE: f64 = 10.0;
/// Real seconds of suspension per requested simulated second.
pub const WAIT_SCALE: f64 = 0.25;
/// Initial sprite heading in degrees.
pub const INITIAL_DIRECTION_DEG: f64 = 90.0;
/// Default per-run instruction budget.
pub const DEFAULT_MAX_INSTRUCTIONS: u64 = 10_000;

// ============================================================================
// Stage Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(default = "default_stage_width")]
    pub stage_width: f64,
    #[serde(default = "default_stage_height")]
    pub stage_height: f64,
    #[serde(default = "default_step_scale")]
    pub step_scale: f64,
    #[serde(default = "default_wait_scale")]
    pub wait_scale: f64,
    #[serde(default = "default_max_instructions")]
    pub max_instructions: u64,
}

fn default_stage_width() -> f64 {
    DEFAULT_STAGE_WIDTH_UNITS
}

fn default_stage_height() -> f64 {
    DEFAULT_STAGE_HEIGHT_UNITS
}

fn default_step_scale() -> f64 {
    STEP_SCALE
}

fn default_wait_scale() -> f64 {
    WAIT_SCALE
}

fn default_max_instructions() -> u64 {
    DEFAULT_MAX_INSTRUCTIONS
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            stage_width: DEFAULT_STAGE_WIDTH_UNITS,
            stage_height: DEFAULT_STAGE_HEIGHT_UNITS,
            step_scale: STEP_SCALE,
            wait_scale: WAIT_SCALE,
            max_instructions: DEFAULT_MAX_INSTRUCTIONS,
        }
    }
}

impl StageConfig {
    /// Replace non-finite or non-positive dimensions and scales with the
    /// defaults. The stage geometry is a fixed product constant; a config
    /// file can shrink or grow it but never make it degenerate.
    pub fn sanitized(mut self) -> Self {
        if !self.stage_width.is_finite() || self.stage_width <= 0.0 {
            self.stage_width = DEFAULT_STAGE_WIDTH_UNITS;
        }
        if !self.stage_height.is_finite() || self.stage_height <= 0.0 {
            self.stage_height = DEFAULT_STAGE_HEIGHT_UNITS;
        }
        if !self.step_scale.is_finite() || self.step_scale <= 0.0 {
            self.step_scale = STEP_SCALE;
        }
        if !self.wait_scale.is_finite() || self.wait_scale < 0.0 {
            self.wait_scale = WAIT_SCALE;
        }
        if self.max_instructions == 0 {
            self.max_instructions = DEFAULT_MAX_INSTRUCTIONS;
        }
        self
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: StageConfig =
            toml::from_str(input).map_err(|err| ConfigError::ParseConfigFile {
                message: err.to_string(),
            })?;
        Ok(config.sanitized())
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| ConfigError::ReadConfigFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ReadConfigFile { path: String, message: String },
    ParseConfigFile { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadConfigFile { path, message } => {
                write!(f, "read config file failed ({path}): {message}")
            }
            ConfigError::ParseConfigFile { message } => {
                write!(f, "parse config file failed: {message}")
            }
        }
    }
}

impl Error for ConfigError {}

// ============================================================================
// Sprite State
// ============================================================================

/// The complete mutable state of the single sprite on stage.
///
/// The trail is seeded with the initial position and is append-only:
/// exactly one point per executed move, never truncated or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteState {
    pub position: SpritePoint,
    pub direction: f64,
    pub speech: Option<String>,
    pub trail: Vec<SpritePoint>,
}

impl SpriteState {
    pub fn new() -> Self {
        Self {
            position: SpritePoint::ORIGIN,
            direction: INITIAL_DIRECTION_DEG,
            speech: None,
            trail: vec![SpritePoint::ORIGIN],
        }
    }

    /// Independent copy of the state in the shape the rendering layer
    /// consumes. The trail is deep-copied; callers can never mutate the
    /// runtime's state through the returned value.
    pub fn snapshot(&self) -> SpriteSnapshot {
        SpriteSnapshot {
            x: self.position.x,
            y: self.position.y,
            direction: self.direction,
            speech: self.speech.clone(),
            trail: self.trail.clone(),
        }
    }
}

impl Default for SpriteState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the sprite handed to the rendering layer.
///
/// `speech` serializes as a string or `null`; `None` means the sprite has
/// never spoken, which is distinct from an empty utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteSnapshot {
    pub x: f64,
    pub y: f64,
    pub direction: f64,
    pub speech: Option<String>,
    pub trail: Vec<SpritePoint>,
}
