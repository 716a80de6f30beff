use crate::env::RandomSource;

use super::state::{Ball, Field, Side};

/// Countdown values at or below this count as elapsed. Absorbs the drift of
/// summing many f32 frame deltas.
pub const SERVE_EPSILON: f32 = 1e-4;

// Serve angles: base in [-45, 45], flipped toward the left half the time
const SERVE_SPREAD_DEG: i32 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the first serve of a match; waiting for the start key
    Ready,
    /// Ball and paddles live
    Active,
    /// Point scored; ball frozen while the serve delay counts down
    ServingWait,
    /// A side reached the winning score; frozen until reset
    MatchOver,
}

/// Scores, phase and serve countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub score_left: u8,
    pub score_right: u8,
    pub phase: Phase,
    pub serve_delay_remaining: f32,
    pub winning_score: u8,
    pub serve_delay: f32,
}

impl RoundState {
    pub fn new(winning_score: u8, serve_delay: f32) -> Self {
        Self {
            score_left: 0,
            score_right: 0,
            phase: Phase::Ready,
            serve_delay_remaining: 0.0,
            winning_score,
            serve_delay,
        }
    }

    pub fn waiting(&self) -> bool {
        self.phase == Phase::ServingWait
    }

    pub fn score(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.score_left,
            Side::Right => self.score_right,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        if self.score_left >= self.winning_score {
            Some(Side::Left)
        } else if self.score_right >= self.winning_score {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Move to `MatchOver` if a side has reached the winning score.
    pub fn check_match_over(&mut self) -> Option<Side> {
        let winner = self.winner()?;
        if self.phase != Phase::MatchOver {
            self.phase = Phase::MatchOver;
            self.serve_delay_remaining = 0.0;
        }
        Some(winner)
    }

    /// Leave `Ready` on the start key.
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Ready {
            self.phase = Phase::Active;
            true
        } else {
            false
        }
    }

    /// Score the ball if it has left the field horizontally.
    ///
    /// The side the ball exited past loses the point. Returns the scorer.
    pub fn check_point(&mut self, ball: &Ball, field: &Field) -> Option<Side> {
        let conceded = if ball.x < 0.0 {
            Side::Left
        } else if ball.x > field.width {
            Side::Right
        } else {
            return None;
        };
        let scorer = conceded.opponent();

        match scorer {
            Side::Left => self.score_left = self.score_left.saturating_add(1),
            Side::Right => self.score_right = self.score_right.saturating_add(1),
        }
        self.phase = Phase::ServingWait;
        self.serve_delay_remaining = self.serve_delay;
        self.check_match_over();
        Some(scorer)
    }

    /// Count down by `dt`. Re-serves the ball and returns `true` once the
    /// delay has elapsed.
    pub fn count_down<R: RandomSource + ?Sized>(
        &mut self,
        dt: f32,
        ball: &mut Ball,
        field: &Field,
        rng: &mut R,
    ) -> bool {
        if self.phase != Phase::ServingWait {
            return false;
        }
        self.serve_delay_remaining -= dt;
        if self.serve_delay_remaining <= SERVE_EPSILON {
            self.serve_delay_remaining = 0.0;
            serve(ball, field, rng);
            self.phase = Phase::Active;
            true
        } else {
            false
        }
    }
}

/// Random launch angle in degrees: [-45, 45] or [135, 225].
pub fn serve_angle<R: RandomSource + ?Sized>(rng: &mut R) -> f32 {
    let base = rng
        .uniform_int(0, 2 * SERVE_SPREAD_DEG)
        .clamp(0, 2 * SERVE_SPREAD_DEG)
        - SERVE_SPREAD_DEG;
    let flip = rng.uniform_int(0, 1) == 0;
    if flip {
        base as f32 + 180.0
    } else {
        base as f32
    }
}

/// Put the ball at the field centre with a fresh launch angle.
pub fn serve<R: RandomSource + ?Sized>(ball: &mut Ball, field: &Field, rng: &mut R) {
    let angle = serve_angle(rng);
    ball.launch(field.center_x(), field.center_y(), angle, field.ball_speed);
}
