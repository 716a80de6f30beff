//! Helpers shared by game loops

use std::time::{Duration, Instant};

/// Frame duration for a target frame rate.
pub fn frame_duration(target_fps: u64) -> Duration {
    Duration::from_micros(1_000_000 / target_fps.max(1))
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// Call at the end of each loop iteration; sleeps for whatever is left of
/// `frame` since `frame_start`.
///
/// # Example
/// ```rust,no_run
/// use std::time::Instant;
/// # use duopong::game_modes::common::{frame_duration, limit_frame_rate};
/// let frame_start = Instant::now();
/// // ... game loop logic ...
/// limit_frame_rate(frame_start, frame_duration(60));
/// ```
pub fn limit_frame_rate(frame_start: Instant, frame: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        std::thread::sleep(frame - elapsed);
    }
}
