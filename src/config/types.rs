// duopong configuration types
// Defaults reproduce the classic 960x640 table

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::ai::{IDLE_DEAD_ZONE, IDLE_SPEED_FACTOR};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub ai: AIConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Reject geometry the simulation cannot represent.
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        if p.field_width <= 0.0 || p.field_height <= 0.0 {
            bail!(
                "field must have positive size, got {}x{}",
                p.field_width,
                p.field_height
            );
        }
        if p.paddle_width <= 0.0 || p.paddle_height <= 0.0 {
            bail!("paddle must have positive size");
        }
        if p.paddle_height > p.field_height {
            bail!(
                "paddle height {} exceeds field height {}",
                p.paddle_height,
                p.field_height
            );
        }
        if p.paddle_width * 2.0 >= p.field_width {
            bail!("paddles overlap: width {} on a {} wide field", p.paddle_width, p.field_width);
        }
        if p.ball_radius <= 0.0 || p.ball_radius * 2.0 >= p.field_height {
            bail!("ball radius {} does not fit the field", p.ball_radius);
        }
        if p.ball_speed <= 0.0 {
            bail!("ball speed must be positive");
        }
        if p.winning_score == 0 {
            bail!("winning score must be at least 1");
        }
        if p.serve_delay_secs < 0.0 {
            bail!("serve delay cannot be negative");
        }

        let ai = &self.ai;
        if !ai.speed.is_finite() || ai.speed <= 0.0 {
            bail!("AI speed must be positive, got {}", ai.speed);
        }
        // An idle step wider than the dead zone overshoots rest forever
        let idle_step = ai.speed * IDLE_SPEED_FACTOR;
        if idle_step > 2.0 * IDLE_DEAD_ZONE {
            bail!(
                "AI speed {} is too fast to settle at rest (idle step {} > {})",
                ai.speed,
                idle_step,
                2.0 * IDLE_DEAD_ZONE
            );
        }
        if ai.min_reaction_secs < 0.0 {
            bail!("AI reaction time cannot be negative");
        }
        if ai.min_reaction_secs > ai.max_reaction_secs {
            bail!(
                "AI reaction range is inverted: {} > {}",
                ai.min_reaction_secs,
                ai.max_reaction_secs
            );
        }
        if !(ai.min_reaction_secs..=ai.max_reaction_secs).contains(&ai.initial_reaction_secs) {
            bail!("AI initial reaction time must lie within the redraw range");
        }
        if !(0.0..=1.0).contains(&ai.initial_confidence) {
            bail!("AI confidence must be within [0, 1]");
        }
        if ai.max_prediction_error < 0 {
            bail!("AI prediction error cannot be negative, got {}", ai.max_prediction_error);
        }
        for (name, percent) in [
            ("error_redraw_percent", ai.error_redraw_percent),
            ("reaction_redraw_percent", ai.reaction_redraw_percent),
        ] {
            if !(0..=100).contains(&percent) {
                bail!("{} must be within [0, 100], got {}", name, percent);
            }
        }
        if self.display.target_fps == 0 {
            bail!("target fps must be positive");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Left paddle (human)
    pub left_paddle_up: String,
    pub left_paddle_down: String,

    // Right paddle (human)
    pub right_paddle_up: String,
    pub right_paddle_down: String,

    // Control mode toggles
    pub toggle_left_ai: String,
    pub toggle_right_ai: String,

    // Match controls
    pub start: String,
    pub reset: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_paddle_up: "W".to_string(),
            left_paddle_down: "S".to_string(),
            right_paddle_up: "Up".to_string(),
            right_paddle_down: "Down".to_string(),
            toggle_left_ai: "L".to_string(),
            toggle_right_ai: "P".to_string(),
            start: "Space".to_string(),
            reset: "R".to_string(),
            quit: "Q".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Field dimensions in simulation units
    pub field_width: f32,
    pub field_height: f32,

    pub ball_radius: f32,

    // Ball speed in units per tick (constant outside paddle hits)
    pub ball_speed: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,

    // Human paddle movement in units per tick while a key is held
    pub paddle_speed: f32,

    pub winning_score: u8,

    // Pause between a point and the next serve
    pub serve_delay_secs: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            field_width: 960.0,
            field_height: 640.0,
            ball_radius: 15.0,
            ball_speed: 3.0,
            paddle_width: 15.0,
            paddle_height: 50.0,
            paddle_speed: 4.0,
            winning_score: 5,
            serve_delay_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AIConfig {
    // Which sides start under AI control
    pub left_enabled: bool,
    pub right_enabled: bool,

    // AI paddle movement in units per tick at full confidence
    pub speed: f32,

    // Reaction latency in seconds: starting value and redraw range
    pub initial_reaction_secs: f32,
    pub min_reaction_secs: f32,
    pub max_reaction_secs: f32,

    pub initial_confidence: f32,

    // Largest prediction bias, scaled down by confidence
    pub max_prediction_error: i32,

    // Chances out of 100 per target evaluation
    pub error_redraw_percent: i32,
    pub reaction_redraw_percent: i32,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            left_enabled: false,
            right_enabled: false,
            speed: 2.0,
            initial_reaction_secs: 0.2,
            min_reaction_secs: 0.2,
            max_reaction_secs: 0.5,
            initial_confidence: 0.8,
            max_prediction_error: 30,
            error_redraw_percent: 5,
            reaction_redraw_percent: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub target_fps: u64,

    // Frames a key press counts as held on terminals without release events
    pub key_hold_frames: u32,

    pub score_color: [u8; 3],
    pub paddle_color: [u8; 3],
    pub ball_color: [u8; 3],
    pub center_line_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: crate::TARGET_FPS,
            key_hold_frames: 8,
            score_color: [255, 255, 255],
            paddle_color: [255, 255, 255],
            ball_color: [255, 255, 255],
            center_line_color: [100, 100, 100],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_paddle_taller_than_field_rejected() {
        let mut config = Config::default();
        config.physics.paddle_height = config.physics.field_height + 1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds field height"));
    }

    #[test]
    fn test_inverted_reaction_range_rejected() {
        let mut config = Config::default();
        config.ai.min_reaction_secs = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_prediction_error_rejected() {
        let mut config = Config::default();
        config.ai.max_prediction_error = -5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("prediction error"));

        config.ai.max_prediction_error = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redraw_percents_bounded() {
        let mut config = Config::default();
        config.ai.error_redraw_percent = 101;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ai.reaction_redraw_percent = -1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ai.error_redraw_percent = 100;
        config.ai.reaction_redraw_percent = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ai_speed_must_be_positive_and_finite() {
        for speed in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let mut config = Config::default();
            config.ai.speed = speed;
            assert!(config.validate().is_err(), "speed {speed} accepted");
        }
    }

    #[test]
    fn test_ai_speed_must_settle_at_rest() {
        let mut config = Config::default();
        config.ai.speed = 4.0;
        assert!(config.validate().is_ok());
        config.ai.speed = 4.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("settle"));
    }

    #[test]
    fn test_negative_reaction_time_rejected() {
        let mut config = Config::default();
        config.ai.min_reaction_secs = -0.1;
        config.ai.initial_reaction_secs = 0.0;
        assert!(config.validate().is_err());
    }
}
