use crate::ai::{AiState, AiTuning};
use crate::config::Config;
use crate::env::{Clock, RandomSource};

use super::input::TickInput;
use super::physics;
use super::round::{self, Phase, RoundState};
use super::state::{Ball, ControlMode, ControlModes, Field, Paddle, Side};

/// What happened during one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickEvents {
    pub started: bool,
    pub wall_bounce: bool,
    pub paddle_bounce: Option<Side>,
    pub point: Option<Side>,
    pub served: bool,
    pub match_over: Option<Side>,
    pub reset: bool,
    pub toggled: Option<Side>,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub field: Field,
    pub ball: Ball,
    pub left_paddle: f32,
    pub right_paddle: f32,
    pub score_left: u8,
    pub score_right: u8,
    pub phase: Phase,
    pub waiting: bool,
    pub winner: Option<Side>,
    pub left_ai: bool,
    pub right_ai: bool,
}

/// A whole match: every entity is owned here and advanced by `step`.
#[derive(Debug, Clone)]
pub struct Match {
    pub field: Field,
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub left_ai: AiState,
    pub right_ai: AiState,
    pub round: RoundState,
    pub controls: ControlModes,
    tuning: AiTuning,
    initial_controls: ControlModes,
}

impl Match {
    pub fn new<R: RandomSource + ?Sized>(config: &Config, rng: &mut R) -> Self {
        let field = Field::from_config(&config.physics);
        let tuning = AiTuning::from_config(&config.ai);
        let controls = ControlModes {
            left: ControlMode::from_enabled(config.ai.left_enabled),
            right: ControlMode::from_enabled(config.ai.right_enabled),
        };

        let mut ball = Ball::new(field.center_x(), field.center_y(), 0.0, 0.0);
        round::serve(&mut ball, &field, rng);

        Self {
            field,
            ball,
            left_paddle: Paddle::for_field(Side::Left, &field),
            right_paddle: Paddle::for_field(Side::Right, &field),
            left_ai: AiState::new(Side::Left, &field, tuning),
            right_ai: AiState::new(Side::Right, &field, tuning),
            round: RoundState::new(config.physics.winning_score, config.physics.serve_delay_secs),
            controls,
            tuning,
            initial_controls: controls,
        }
    }

    /// Re-initialize scores, ball, paddles and AI state. Control modes return
    /// to their configured starting values.
    pub fn reset<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let field = self.field;
        round::serve(&mut self.ball, &field, rng);
        self.left_paddle = Paddle::for_field(Side::Left, &field);
        self.right_paddle = Paddle::for_field(Side::Right, &field);
        self.left_ai = AiState::new(Side::Left, &field, self.tuning);
        self.right_ai = AiState::new(Side::Right, &field, self.tuning);
        self.round = RoundState::new(self.round.winning_score, self.round.serve_delay);
        self.controls = self.initial_controls;
    }

    /// Advance one tick.
    ///
    /// Order: toggles and start, match-over gate, serve countdown, paddles,
    /// clamp, then ball advance, scoring, walls and paddle bounces.
    pub fn step<R, C>(&mut self, input: &TickInput, rng: &mut R, clock: &C) -> TickEvents
    where
        R: RandomSource + ?Sized,
        C: Clock + ?Sized,
    {
        let mut events = TickEvents::default();

        if input.toggle_left_ai {
            self.controls.toggle(Side::Left);
            events.toggled = Some(Side::Left);
        }
        if input.toggle_right_ai {
            self.controls.toggle(Side::Right);
            events.toggled = Some(Side::Right);
        }

        if let Some(winner) = self.round.check_match_over() {
            if input.reset {
                self.reset(rng);
                events.reset = true;
            } else {
                events.match_over = Some(winner);
            }
            return events;
        }

        if input.start && self.round.start() {
            events.started = true;
        }

        if self.round.waiting() {
            let field = self.field;
            events.served =
                self.round
                    .count_down(clock.frame_delta(), &mut self.ball, &field, rng);
            return events;
        }

        self.update_paddle(Side::Left, input, rng, clock.now());
        self.update_paddle(Side::Right, input, rng, clock.now());
        self.left_paddle.clamp_to(self.field.height);
        self.right_paddle.clamp_to(self.field.height);

        if self.round.phase != Phase::Active {
            return events;
        }

        physics::advance(&mut self.ball);

        if let Some(scorer) = self.round.check_point(&self.ball, &self.field) {
            events.point = Some(scorer);
            events.match_over = self.round.winner();
            return events;
        }

        events.wall_bounce = physics::resolve_walls(&mut self.ball, &self.field);
        if physics::resolve_paddle(&mut self.ball, &self.left_paddle, &self.field, rng) {
            events.paddle_bounce = Some(Side::Left);
        }
        if physics::resolve_paddle(&mut self.ball, &self.right_paddle, &self.field, rng) {
            events.paddle_bounce = Some(Side::Right);
        }

        events
    }

    fn update_paddle<R: RandomSource + ?Sized>(
        &mut self,
        side: Side,
        input: &TickInput,
        rng: &mut R,
        now: f32,
    ) {
        let (paddle, ai, up, down) = match side {
            Side::Left => (
                &mut self.left_paddle,
                &mut self.left_ai,
                input.left_up,
                input.left_down,
            ),
            Side::Right => (
                &mut self.right_paddle,
                &mut self.right_ai,
                input.right_up,
                input.right_down,
            ),
        };

        match self.controls.get(side) {
            ControlMode::Ai => ai.update(paddle, &self.ball, &self.field, rng, now),
            ControlMode::Human => physics::move_paddle(paddle, up, down, self.field.paddle_speed),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field: self.field,
            ball: self.ball,
            left_paddle: self.left_paddle.position,
            right_paddle: self.right_paddle.position,
            score_left: self.round.score_left,
            score_right: self.round.score_right,
            phase: self.round.phase,
            waiting: self.round.waiting(),
            winner: self.round.winner(),
            left_ai: self.controls.left.is_ai(),
            right_ai: self.controls.right.is_ai(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedClock, ScriptedRandom, SeededRandom};
    use crate::FIXED_TIMESTEP;

    fn new_match(seed: u64) -> (Match, SeededRandom, FixedClock) {
        let mut rng = SeededRandom::from_seed(seed);
        let game = Match::new(&Config::default(), &mut rng);
        (game, rng, FixedClock::new(FIXED_TIMESTEP))
    }

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..TickInput::default()
        }
    }

    #[test]
    fn test_new_match_serves_from_center() {
        let (game, _, _) = new_match(1);
        assert_eq!(game.round.phase, Phase::Ready);
        assert_eq!((game.ball.x, game.ball.y), (480.0, 320.0));
        assert!((game.ball.speed() - 3.0).abs() < 1e-5);
        assert_eq!(game.left_paddle.position, 295.0);
        assert_eq!(game.right_paddle.position, 295.0);
    }

    #[test]
    fn test_ball_frozen_until_start() {
        let (mut game, mut rng, clock) = new_match(2);
        let before = game.ball;
        for _ in 0..30 {
            game.step(&TickInput::default(), &mut rng, &clock);
        }
        assert_eq!(game.ball, before);

        let events = game.step(&start(), &mut rng, &clock);
        assert!(events.started);
        assert_ne!(game.ball, before);
    }

    #[test]
    fn test_paddles_move_before_start() {
        let (mut game, mut rng, clock) = new_match(2);
        let input = TickInput {
            left_down: true,
            ..TickInput::default()
        };
        game.step(&input, &mut rng, &clock);
        assert_eq!(game.left_paddle.position, 299.0);
    }

    #[test]
    fn test_right_paddle_returns_centered_ball() {
        let (mut game, _, mut clock) = new_match(3);
        let mut rng = SeededRandom::from_seed(30);
        game.ball = Ball::new(480.0, 320.0, 3.0, 0.0);
        game.right_paddle.position = 320.0 - game.field.paddle_height / 2.0;
        game.step(&start(), &mut rng, &clock);

        let mut bounced_after = None;
        for tick in 2..=200 {
            clock.advance();
            let events = game.step(&TickInput::default(), &mut rng, &clock);
            assert!(events.point.is_none());
            if events.paddle_bounce == Some(Side::Right) {
                bounced_after = Some(tick);
                break;
            }
        }

        let tick = bounced_after.expect("ball never reached the right paddle");
        assert!(tick <= 160);
        assert!(game.ball.vx < 0.0);
        let angle = game.ball.vx.abs().atan2(game.ball.vy.abs()).to_degrees();
        assert!((15.0 - 1e-3..=45.0 + 1e-3).contains(&angle));
        assert!((game.ball.speed() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_conserved_over_long_rally() {
        let (mut game, mut rng, mut clock) = new_match(4);
        game.controls.left = ControlMode::Ai;
        game.controls.right = ControlMode::Ai;
        game.step(&start(), &mut rng, &clock);

        for _ in 0..20_000 {
            clock.advance();
            let events = game.step(&TickInput::default(), &mut rng, &clock);
            if game.round.phase == Phase::Active && !events.served {
                assert!((game.ball.speed() - 3.0).abs() < 1e-4);
            }
            if events.match_over.is_some() {
                break;
            }
        }
    }

    #[test]
    fn test_wall_reflection_inside_step() {
        let (mut game, mut rng, clock) = new_match(5);
        game.round.phase = Phase::Active;
        game.ball = Ball::new(480.0, 16.0, 2.0, -2.0);

        let events = game.step(&TickInput::default(), &mut rng, &clock);
        assert!(events.wall_bounce);
        assert_eq!(game.ball.vx, 2.0);
        assert_eq!(game.ball.vy, 2.0);
    }

    #[test]
    fn test_paddles_clamped_under_any_input() {
        let (mut game, mut rng, mut clock) = new_match(6);
        let up = TickInput {
            left_up: true,
            right_up: true,
            ..TickInput::default()
        };
        let down = TickInput {
            left_down: true,
            right_down: true,
            ..TickInput::default()
        };
        let max = game.field.max_paddle_position();

        for i in 0..400 {
            clock.advance();
            let input = if i < 200 { up } else { down };
            game.step(&input, &mut rng, &clock);
            for paddle in [&game.left_paddle, &game.right_paddle] {
                assert!(paddle.position >= 0.0 && paddle.position <= max);
            }
        }
        assert_eq!(game.left_paddle.position, max);

        game.controls.left = ControlMode::Ai;
        game.controls.right = ControlMode::Ai;
        game.round.phase = Phase::Active;
        for _ in 0..5000 {
            clock.advance();
            game.step(&TickInput::default(), &mut rng, &clock);
            for paddle in [&game.left_paddle, &game.right_paddle] {
                assert!(paddle.position >= 0.0 && paddle.position <= max);
            }
            if game.round.phase == Phase::MatchOver {
                break;
            }
        }
    }

    #[test]
    fn test_scoring_happens_before_paddle_bounce() {
        let (mut game, _, clock) = new_match(7);
        let mut rng = ScriptedRandom::new(vec![0]);
        game.round.phase = Phase::Active;
        game.right_paddle.position = 295.0;
        // Next advance puts the ball past the right edge while still level
        // with the paddle
        game.ball = Ball::new(959.0, 320.0, 3.0, 0.0);

        let events = game.step(&TickInput::default(), &mut rng, &clock);
        assert_eq!(events.point, Some(Side::Left));
        assert_eq!(events.paddle_bounce, None);
        assert_eq!(game.ball.vx, 3.0);
        assert!(game.round.waiting());
    }

    #[test]
    fn test_serve_delay_after_point() {
        let (mut game, mut rng, mut clock) = new_match(8);
        game.round.phase = Phase::Active;
        game.ball = Ball::new(1.0, 320.0, -3.0, 0.0);
        game.left_paddle.position = 0.0;

        let events = game.step(&TickInput::default(), &mut rng, &clock);
        assert_eq!(events.point, Some(Side::Right));
        let frozen_ball = game.ball;
        let frozen_paddle = game.left_paddle.position;

        let hold = TickInput {
            left_down: true,
            ..TickInput::default()
        };
        let mut served = false;
        for _ in 0..60 {
            clock.advance();
            let events = game.step(&hold, &mut rng, &clock);
            if events.served {
                served = true;
                break;
            }
            assert_eq!(game.ball, frozen_ball);
            assert_eq!(game.left_paddle.position, frozen_paddle);
        }
        assert!(served);
        assert!(!game.round.waiting());
        assert_eq!((game.ball.x, game.ball.y), (480.0, 320.0));
        assert_eq!(game.round.serve_delay_remaining, 0.0);
    }

    #[test]
    fn test_match_over_freezes_state() {
        let (mut game, mut rng, mut clock) = new_match(9);
        game.round.phase = Phase::Active;
        game.round.score_right = 4;
        game.ball = Ball::new(1.0, 600.0, -3.0, 0.0);
        game.left_paddle.position = 0.0;

        let events = game.step(&TickInput::default(), &mut rng, &clock);
        assert_eq!(events.match_over, Some(Side::Right));
        assert_eq!(game.round.phase, Phase::MatchOver);

        let ball = game.ball;
        let scores = (game.round.score_left, game.round.score_right);
        for _ in 0..300 {
            clock.advance();
            let events = game.step(&start(), &mut rng, &clock);
            assert_eq!(events.match_over, Some(Side::Right));
        }
        assert_eq!(game.ball, ball);
        assert_eq!((game.round.score_left, game.round.score_right), scores);
    }

    #[test]
    fn test_reset_after_match_over() {
        let (mut game, mut rng, clock) = new_match(10);
        game.round.score_left = 5;
        game.controls.right = ControlMode::Ai;
        game.left_paddle.position = 0.0;
        game.right_ai.active = true;

        let reset = TickInput {
            reset: true,
            ..TickInput::default()
        };
        let events = game.step(&reset, &mut rng, &clock);
        assert!(events.reset);
        assert_eq!(game.round.phase, Phase::Ready);
        assert_eq!((game.round.score_left, game.round.score_right), (0, 0));
        assert_eq!((game.ball.x, game.ball.y), (480.0, 320.0));
        assert_eq!(game.left_paddle.position, 295.0);
        assert!(!game.right_ai.active);
        assert_eq!(game.controls.right, ControlMode::Human);
    }

    #[test]
    fn test_reset_ignored_during_play() {
        let (mut game, mut rng, clock) = new_match(11);
        game.round.phase = Phase::Active;
        game.round.score_left = 3;
        let reset = TickInput {
            reset: true,
            ..TickInput::default()
        };
        let events = game.step(&reset, &mut rng, &clock);
        assert!(!events.reset);
        assert_eq!(game.round.score_left, 3);
    }

    #[test]
    fn test_ai_idle_convergence_in_match() {
        let (mut game, mut rng, mut clock) = new_match(12);
        game.controls.right = ControlMode::Ai;
        game.right_paddle.position = 0.0;
        // Ball frozen in Ready, heading away from the right side
        game.ball = Ball::new(480.0, 320.0, -3.0, 0.0);

        for _ in 0..400 {
            clock.advance();
            game.step(&TickInput::default(), &mut rng, &clock);
        }
        let idle = game.right_ai.idle_position;
        assert!((game.right_paddle.position - idle).abs() <= 1.0);

        let settled = game.right_paddle.position;
        for _ in 0..20 {
            clock.advance();
            game.step(&TickInput::default(), &mut rng, &clock);
        }
        assert_eq!(game.right_paddle.position, settled);
    }

    #[test]
    fn test_toggles_switch_control_modes() {
        let (mut game, mut rng, clock) = new_match(13);
        let toggle = TickInput {
            toggle_left_ai: true,
            ..TickInput::default()
        };
        let events = game.step(&toggle, &mut rng, &clock);
        assert_eq!(events.toggled, Some(Side::Left));
        assert!(game.snapshot().left_ai);
        assert!(!game.snapshot().right_ai);

        game.step(&toggle, &mut rng, &clock);
        assert!(!game.snapshot().left_ai);
    }

    #[test]
    fn test_seeded_matches_are_reproducible() {
        let play = |seed| {
            let (mut game, mut rng, mut clock) = new_match(seed);
            game.controls.left = ControlMode::Ai;
            game.controls.right = ControlMode::Ai;
            game.step(&start(), &mut rng, &clock);
            for _ in 0..3000 {
                clock.advance();
                game.step(&TickInput::default(), &mut rng, &clock);
            }
            game.snapshot()
        };
        assert_eq!(play(77), play(77));
    }
}
