pub mod input;
pub mod physics;
pub mod round;
pub mod session;
pub mod state;

pub use input::{KeyMap, KeyTracker, TickInput};
pub use round::{Phase, RoundState};
pub use session::{Match, Snapshot, TickEvents};
pub use state::{Ball, ControlMode, ControlModes, Field, Paddle, Side};
