// AI module for computer-controlled paddles

mod controller;
mod prediction;

pub use controller::{AiMode, AiState, AiTuning, IDLE_DEAD_ZONE, IDLE_SPEED_FACTOR};
pub use prediction::{predict_intercept_y, MIN_HORIZONTAL_SPEED};
