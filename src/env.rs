// Randomness and time sources consumed by the simulation

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Uniform integer in the closed range `[min, max]`.
    fn uniform_int(&mut self, min: i32, max: i32) -> i32;
}

/// Wall clock plus the elapsed time of the current frame, both in seconds.
pub trait Clock {
    fn now(&self) -> f32;
    fn frame_delta(&self) -> f32;
}

/// `StdRng`-backed source; seed it for reproducible matches.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Real-time clock. Call `tick` once at the start of every frame.
pub struct SystemClock {
    start: Instant,
    last_frame: Instant,
    delta: f32,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta: 0.0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f32 {
        self.last_frame.duration_since(self.start).as_secs_f32()
    }

    fn frame_delta(&self) -> f32 {
        self.delta
    }
}

/// Manually stepped clock: every `advance` moves time forward by one fixed delta.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: f32,
    delta: f32,
}

impl FixedClock {
    pub fn new(delta: f32) -> Self {
        Self { now: 0.0, delta }
    }

    pub fn advance(&mut self) {
        self.now += self.delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> f32 {
        self.now
    }

    fn frame_delta(&self) -> f32 {
        self.delta
    }
}

/// Replays a fixed list of values, cycling when exhausted. Each value is
/// clamped into the requested range.
#[cfg(test)]
pub struct ScriptedRandom {
    values: Vec<i32>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: Vec<i32>) -> Self {
        Self { values, cursor: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        if self.values.is_empty() {
            return min;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(min, max)
    }
}
