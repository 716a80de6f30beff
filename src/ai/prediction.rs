// Trajectory prediction for the AI controller

use crate::game::{Ball, Field, Side};

/// Below this horizontal speed the ball is treated as never arriving.
pub const MIN_HORIZONTAL_SPEED: f32 = 1e-3;

/// Predict the ball's y when it reaches `side`'s paddle plane.
///
/// Straight-line extrapolation without wall bounces. Returns `None` when the
/// ball is not heading toward the plane or is too slow horizontally for a
/// finite arrival time.
///
/// # Arguments
/// * `ball` - Current ball position and per-tick velocity
/// * `side` - The paddle we're predicting for
/// * `field` - Geometry providing the paddle plane
pub fn predict_intercept_y(ball: &Ball, side: Side, field: &Field) -> Option<f32> {
    if ball.vx.abs() < MIN_HORIZONTAL_SPEED || !side.is_approached_by(ball.vx) {
        return None;
    }

    let distance = match side {
        Side::Left => ball.x - field.paddle_plane(Side::Left),
        Side::Right => field.paddle_plane(Side::Right) - ball.x,
    };
    let time_to_paddle = distance / ball.vx.abs();

    // Ball already behind the plane
    if time_to_paddle < 0.0 || !time_to_paddle.is_finite() {
        return None;
    }

    let predicted = ball.y + ball.vy * time_to_paddle;
    predicted.is_finite().then_some(predicted)
}
