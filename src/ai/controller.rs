// Humanlike paddle controller: reaction latency, noisy prediction,
// confidence-scaled movement and idle drift

use crate::config::AIConfig;
use crate::env::RandomSource;
use crate::game::{Ball, Field, Paddle, Side};

use super::prediction::predict_intercept_y;

// Dead zones in field units
pub const IDLE_DEAD_ZONE: f32 = 1.0;
const TRACK_DEAD_ZONE: f32 = 2.0;
/// Idle drift moves at this fraction of the AI speed
pub const IDLE_SPEED_FACTOR: f32 = 0.5;
// Distance at which the paddle moves at full authority
const FULL_SPEED_DISTANCE: f32 = 100.0;

const BASE_CONFIDENCE: f32 = 0.5;
const DISTANCE_CONFIDENCE: f32 = 0.4;

/// Tuning shared by both controllers, taken from `[ai]` config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiTuning {
    pub speed: f32,
    pub initial_reaction_secs: f32,
    pub min_reaction_secs: f32,
    pub max_reaction_secs: f32,
    pub initial_confidence: f32,
    pub max_prediction_error: i32,
    pub error_redraw_percent: i32,
    pub reaction_redraw_percent: i32,
}

impl AiTuning {
    pub fn from_config(ai: &AIConfig) -> Self {
        Self {
            speed: ai.speed,
            initial_reaction_secs: ai.initial_reaction_secs,
            min_reaction_secs: ai.min_reaction_secs,
            max_reaction_secs: ai.max_reaction_secs,
            initial_confidence: ai.initial_confidence,
            max_prediction_error: ai.max_prediction_error,
            error_redraw_percent: ai.error_redraw_percent,
            reaction_redraw_percent: ai.reaction_redraw_percent,
        }
    }
}

impl Default for AiTuning {
    fn default() -> Self {
        Self::from_config(&AIConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMode {
    /// Ball heading away: drift back to the rest position
    Idle,
    /// Ball approaching: predict and chase
    Tracking,
}

/// Controller state for one side. Two instances exist and never interact.
#[derive(Debug, Clone, PartialEq)]
pub struct AiState {
    pub side: Side,
    pub reaction_time: f32,
    /// Time of the last target evaluation. Set into the future on entering
    /// `Tracking` so the first evaluation waits out the reaction time.
    pub last_reaction: f32,
    /// Predicted y for the paddle centre
    pub target_y: f32,
    pub prediction_error: f32,
    pub confidence: f32,
    pub active: bool,
    pub idle_position: f32,
    tuning: AiTuning,
}

impl AiState {
    pub fn new(side: Side, field: &Field, tuning: AiTuning) -> Self {
        let rest = field.paddle_rest_position();
        Self {
            side,
            reaction_time: tuning.initial_reaction_secs,
            last_reaction: 0.0,
            target_y: field.center_y(),
            prediction_error: 0.0,
            confidence: tuning.initial_confidence,
            active: false,
            idle_position: rest,
            tuning,
        }
    }

    pub fn mode(&self) -> AiMode {
        if self.active {
            AiMode::Tracking
        } else {
            AiMode::Idle
        }
    }

    /// Drive `paddle` for one tick. The caller clamps the paddle afterwards.
    pub fn update<R: RandomSource + ?Sized>(
        &mut self,
        paddle: &mut Paddle,
        ball: &Ball,
        field: &Field,
        rng: &mut R,
        now: f32,
    ) {
        if self.side.is_approached_by(ball.vx) {
            if !self.active {
                self.active = true;
                self.last_reaction = now + self.reaction_time;
            }
        } else {
            self.active = false;
        }

        if self.active {
            self.track(paddle, ball, field, rng, now);
        } else {
            self.drift_to_idle(paddle);
        }
    }

    fn track<R: RandomSource + ?Sized>(
        &mut self,
        paddle: &mut Paddle,
        ball: &Ball,
        field: &Field,
        rng: &mut R,
        now: f32,
    ) {
        let distance_factor = 1.0 - (field.edge_x(self.side) - ball.x).abs() / field.width;
        self.confidence =
            (BASE_CONFIDENCE + distance_factor * DISTANCE_CONFIDENCE).clamp(0.0, 1.0);

        if now - self.last_reaction > self.reaction_time {
            if let Some(target) = self.predict(ball, field, rng) {
                self.target_y = target;
            }
            self.last_reaction = now;

            if rng.uniform_int(0, 100) < self.tuning.reaction_redraw_percent {
                self.redraw_reaction_time(rng);
            }
            tracing::debug!(
                side = ?self.side,
                target_y = self.target_y,
                confidence = self.confidence,
                reaction_time = self.reaction_time,
                "ai re-evaluated target"
            );
        }

        let distance = self.target_y - paddle.center();
        let speed_factor = (distance.abs() / FULL_SPEED_DISTANCE).min(1.0);

        if distance.abs() > TRACK_DEAD_ZONE {
            let step = self.tuning.speed * speed_factor * self.confidence;
            paddle.position += step.copysign(distance);
        }
    }

    fn drift_to_idle(&self, paddle: &mut Paddle) {
        let distance = self.idle_position - paddle.position;
        if distance.abs() > IDLE_DEAD_ZONE {
            paddle.position += (self.tuning.speed * IDLE_SPEED_FACTOR).copysign(distance);
        }
    }

    /// Predicted intercept plus the stored bias, or `None` to hold the
    /// current target. Occasionally redraws the bias for the next call;
    /// higher confidence shrinks it.
    pub fn predict<R: RandomSource + ?Sized>(
        &mut self,
        ball: &Ball,
        field: &Field,
        rng: &mut R,
    ) -> Option<f32> {
        let intercept = predict_intercept_y(ball, self.side, field)?;
        let predicted = intercept + self.prediction_error;

        if rng.uniform_int(0, 100) < self.tuning.error_redraw_percent {
            let max = self.tuning.max_prediction_error.max(0);
            let raw = rng.uniform_int(-max, max).clamp(-max, max);
            self.prediction_error = raw as f32 * (1.0 - self.confidence);
        }

        Some(predicted)
    }

    fn redraw_reaction_time<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let min = self.tuning.min_reaction_secs;
        let max = self.tuning.max_reaction_secs;
        let fraction = rng.uniform_int(0, 100).clamp(0, 100) as f32 / 100.0;
        self.reaction_time = (min + fraction * (max - min)).clamp(min, max);
    }
}
