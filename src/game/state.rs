use crate::config::PhysicsConfig;

/// Which end of the field a paddle (or AI, or scorer) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction pointing away from this side's goal: +1 or -1.
    pub fn away_sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Whether a ball with horizontal velocity `vx` is heading toward this side.
    pub fn is_approached_by(self, vx: f32) -> bool {
        match self {
            Side::Left => vx < 0.0,
            Side::Right => vx > 0.0,
        }
    }
}

/// Who drives a paddle. Toggled at runtime; the paddle itself is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Human,
    Ai,
}

impl ControlMode {
    pub fn from_enabled(ai: bool) -> Self {
        if ai {
            ControlMode::Ai
        } else {
            ControlMode::Human
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ControlMode::Human => ControlMode::Ai,
            ControlMode::Ai => ControlMode::Human,
        }
    }

    pub fn is_ai(self) -> bool {
        self == ControlMode::Ai
    }
}

/// Control mode for each side, carried by the match instead of globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlModes {
    pub left: ControlMode,
    pub right: ControlMode,
}

impl ControlModes {
    pub fn get(&self, side: Side) -> ControlMode {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn toggle(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.toggled(),
            Side::Right => self.right = self.right.toggled(),
        }
    }
}

/// Static geometry and speeds shared by every component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
}

impl Field {
    pub fn from_config(physics: &PhysicsConfig) -> Self {
        Self {
            width: physics.field_width,
            height: physics.field_height,
            ball_radius: physics.ball_radius,
            ball_speed: physics.ball_speed,
            paddle_width: physics.paddle_width,
            paddle_height: physics.paddle_height,
            paddle_speed: physics.paddle_speed,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Top-edge position that centres a paddle vertically.
    pub fn paddle_rest_position(&self) -> f32 {
        self.height / 2.0 - self.paddle_height / 2.0
    }

    pub fn max_paddle_position(&self) -> f32 {
        self.height - self.paddle_height
    }

    /// x of the paddle face the ball strikes.
    pub fn paddle_plane(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_width,
            Side::Right => self.width - self.paddle_width,
        }
    }

    /// x of the field edge behind a paddle.
    pub fn edge_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => 0.0,
            Side::Right => self.width,
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::from_config(&PhysicsConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self { x, y, vx, vy }
    }

    /// Place the ball at `(x, y)` moving at `angle_deg` with magnitude `speed`.
    pub fn launch(&mut self, x: f32, y: f32, angle_deg: f32, speed: f32) {
        let angle = angle_deg.to_radians();
        self.x = x;
        self.y = y;
        self.vx = speed * angle.cos();
        self.vy = speed * angle.sin();
    }

    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    /// y of the top edge
    pub position: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side, position: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "paddle must have positive size");
        Self {
            side,
            position,
            width,
            height,
        }
    }

    pub fn for_field(side: Side, field: &Field) -> Self {
        debug_assert!(field.paddle_height <= field.height, "paddle taller than field");
        Self::new(
            side,
            field.paddle_rest_position(),
            field.paddle_width,
            field.paddle_height,
        )
    }

    pub fn center(&self) -> f32 {
        self.position + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.position + self.height
    }

    /// Inclusive vertical span test.
    pub fn spans(&self, y: f32) -> bool {
        y >= self.position && y <= self.bottom()
    }

    /// Keep the paddle fully inside the field.
    pub fn clamp_to(&mut self, field_height: f32) {
        self.position = self.position.clamp(0.0, field_height - self.height);
    }
}
