//! StageRuntime: exclusive owner of one sprite and its execution log.

use std::time::Duration;

use crate::geometry::{clamp_to_stage, heading_radians, normalize_direction, SpritePoint};

use super::types::{SpriteSnapshot, SpriteState, StageConfig};

/// One run's interpreter state: a single sprite on a bounded stage plus an
/// append-only log of every executed operation.
///
/// Operations never fail. Numeric inputs are taken as-is; a NaN step or
/// turn propagates into the state rather than being rejected. Only `wait`
/// suspends; the other operations mutate and return immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct StageRuntime {
    config: StageConfig,
    sprite: SpriteState,
    log: Vec<String>,
}

impl StageRuntime {
    pub fn new() -> Self {
        Self::with_config(StageConfig::default())
    }

    pub fn with_config(config: StageConfig) -> Self {
        Self {
            config: config.sanitized(),
            sprite: SpriteState::new(),
            log: Vec::new(),
        }
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn sprite(&self) -> &SpriteState {
        &self.sprite
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Translate along the current heading by `steps * step_scale` units,
    /// clamped to the stage bounds. The clamped point is appended to the
    /// trail even when it equals the current position, so the trail grows
    /// by exactly one per call. The log records the requested step count,
    /// not the clamped result.
    pub fn move_steps(&mut self, steps: f64) {
        let distance = steps * self.config.step_scale;
        let radians = heading_radians(self.sprite.direction);
        let next = SpritePoint::new(
            self.sprite.position.x + radians.cos() * distance,
            self.sprite.position.y + radians.sin() * distance,
        );
        let clamped = clamp_to_stage(next, self.config.stage_width, self.config.stage_height);
        self.sprite.position = clamped;
        self.sprite.trail.push(clamped);
        self.log.push(format!("Move {steps} steps"));
    }

    /// Rotate the heading; positive degrees turn right (clockwise). The
    /// result is always renormalized into `[0, 360)`.
    pub fn turn(&mut self, degrees: f64) {
        self.sprite.direction = normalize_direction(self.sprite.direction + degrees);
        let side = if degrees < 0.0 { "left" } else { "right" };
        self.log.push(format!("Turn {side} {}°", degrees.abs()));
    }

    /// Set the speech bubble text. An empty message is a valid utterance,
    /// distinct from the initial "never spoke" state.
    pub fn say(&mut self, message: &str) {
        self.sprite.speech = Some(message.to_string());
        self.log.push(format!("Say: {message}"));
    }

    /// Suspend for `seconds * wait_scale` real seconds. Negative (and NaN)
    /// durations are floored at zero; zero returns without suspending.
    /// There is no upper bound on the suspension.
    pub async fn wait(&mut self, seconds: f64) {
        let seconds = seconds.max(0.0);
        self.log.push(format!("Wait {seconds:.1} second(s)"));
        let scaled = seconds * self.config.wait_scale;
        if scaled > 0.0 {
            let duration = Duration::try_from_secs_f64(scaled).unwrap_or(Duration::MAX);
            tokio::time::sleep(duration).await;
        }
    }

    pub fn snapshot(&self) -> SpriteSnapshot {
        self.sprite.snapshot()
    }

    pub fn report(&self) -> String {
        format!(
            "x: {:.1}, y: {:.1}, direction: {:.0}°",
            self.sprite.position.x, self.sprite.position.y, self.sprite.direction
        )
    }

    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}

impl Default for StageRuntime {
    fn default() -> Self {
        Self::new()
    }
}
