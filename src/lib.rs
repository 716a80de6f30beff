//! Two-paddle ball game with a deterministic simulation core.
//!
//! The core (`game`, `ai`, `env`) never touches the terminal. The front end
//! (`ui`, `game_modes`, `game::input`) feeds it per-tick inputs and draws
//! read-only snapshots.

pub mod ai;
pub mod config;
pub mod debug;
pub mod env;
pub mod game;
pub mod game_modes;
pub mod ui;

pub const TARGET_FPS: u64 = 60;
pub const FIXED_TIMESTEP: f32 = 1.0 / TARGET_FPS as f32;
