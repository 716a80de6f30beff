use crate::env::RandomSource;

use super::state::{Ball, Field, Paddle, Side};

// Bounce angles are measured in degrees from the paddle's perpendicular
pub const MAX_BOUNCE_DEG: f32 = 45.0;
pub const MIN_BOUNCE_DEG: f32 = 15.0;
pub const BOUNCE_JITTER_DEG: i32 = 5;

/// Move the ball one tick along its velocity. The step is fixed per tick,
/// not scaled by elapsed time.
pub fn advance(ball: &mut Ball) {
    ball.x += ball.vx;
    ball.y += ball.vy;
}

/// Invert vertical velocity when the ball touches the top or bottom wall.
pub fn resolve_walls(ball: &mut Ball, field: &Field) -> bool {
    if ball.y - field.ball_radius <= 0.0 || ball.y + field.ball_radius >= field.height {
        ball.vy = -ball.vy;
        true
    } else {
        false
    }
}

/// Whether the ball has reached `paddle`'s face and lies within its span.
pub fn touches_paddle(ball: &Ball, paddle: &Paddle, field: &Field) -> bool {
    let reached = match paddle.side {
        Side::Left => ball.x - field.ball_radius <= field.paddle_plane(Side::Left),
        Side::Right => ball.x + field.ball_radius >= field.paddle_plane(Side::Right),
    };
    reached && paddle.spans(ball.y)
}

/// Return angle for a hit at `ball_y` with the given random perturbation.
///
/// Centre hits map to 0, edge hits to ±45; the result is then pushed out of
/// the ±15 dead zone and clamped to ±45.
pub fn bounce_angle(ball_y: f32, paddle: &Paddle, perturbation_deg: i32) -> f32 {
    let relative = paddle.center() - ball_y;
    let normalized = relative / (paddle.height / 2.0);
    let perturbation = perturbation_deg.clamp(-BOUNCE_JITTER_DEG, BOUNCE_JITTER_DEG) as f32;

    let mut angle = normalized * MAX_BOUNCE_DEG + perturbation;
    if angle.abs() < MIN_BOUNCE_DEG {
        angle = if angle > 0.0 {
            MIN_BOUNCE_DEG
        } else {
            -MIN_BOUNCE_DEG
        };
    }
    angle.clamp(-MAX_BOUNCE_DEG, MAX_BOUNCE_DEG)
}

/// Velocity leaving a paddle on `side` at `angle_deg`, with magnitude `speed`.
pub fn bounce_velocity(angle_deg: f32, side: Side, speed: f32) -> (f32, f32) {
    let theta = (90.0 - angle_deg).to_radians();
    let vx = side.away_sign() * (speed * theta.cos()).abs();
    let vy = -speed * theta.sin();
    (vx, vy)
}

/// Reflect the ball off `paddle` if they touch. Only the velocity changes.
pub fn resolve_paddle<R: RandomSource + ?Sized>(
    ball: &mut Ball,
    paddle: &Paddle,
    field: &Field,
    rng: &mut R,
) -> bool {
    if !touches_paddle(ball, paddle, field) {
        return false;
    }

    let perturbation = rng.uniform_int(-BOUNCE_JITTER_DEG, BOUNCE_JITTER_DEG);
    let angle = bounce_angle(ball.y, paddle, perturbation);
    let (vx, vy) = bounce_velocity(angle, paddle.side, field.ball_speed);
    ball.vx = vx;
    ball.vy = vy;
    true
}

/// Human control: `down - up` times the paddle speed.
pub fn move_paddle(paddle: &mut Paddle, up: bool, down: bool, speed: f32) {
    let direction = down as i32 - up as i32;
    paddle.position += direction as f32 * speed;
}
