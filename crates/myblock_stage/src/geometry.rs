use serde::{Deserialize, Serialize};

/// A point on the stage plane, origin at the stage center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpritePoint {
    pub x: f64,
    pub y: f64,
}

impl SpritePoint {
    pub const ORIGIN: SpritePoint = SpritePoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub const DEFAULT_STAGE_WIDTH_UNITS: f64 = 320.0;
pub const DEFAULT_STAGE_HEIGHT_UNITS: f64 = 320.0;

/// Clamp a point into the stage rectangle (symmetric about the origin).
///
/// NaN coordinates pass through unchanged: the runtime's numeric contract
/// is garbage-in-garbage-out, so invalid input is propagated, not fixed.
pub fn clamp_to_stage(point: SpritePoint, stage_width: f64, stage_height: f64) -> SpritePoint {
    let half_width = stage_width / 2.0;
    let half_height = stage_height / 2.0;
    SpritePoint {
        x: point.x.clamp(-half_width, half_width),
        y: point.y.clamp(-half_height, half_height),
    }
}

/// Convert a heading in degrees to the radian angle used for translation.
///
/// The stage convention places 90° at the zero angle, so a sprite at the
/// initial heading moves along +x.
pub fn heading_radians(direction_deg: f64) -> f64 {
    (direction_deg - 90.0).to_radians()
}

/// Normalize a heading into `[0, 360)` with a Euclidean remainder.
pub fn normalize_direction(direction_deg: f64) -> f64 {
    direction_deg.rem_euclid(360.0)
}
