use std::thread;
use std::time::{Duration, Instant};

use crate::config::MAX_FRAME_DT;

/// Measures per-frame `dt` and sleeps off the rest of each frame budget.
pub struct FramePacer {
    budget: Duration,
    last_tick: Instant,
    frame_start: Instant,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            budget: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last_tick: now,
            frame_start: now,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Seconds since the previous tick, clamped.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = clamp_dt(now.duration_since(self.last_tick).as_secs_f64());
        self.last_tick = now;
        self.frame_start = now;
        dt
    }

    pub fn wait(&self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.budget {
            thread::sleep(self.budget - elapsed);
        }
    }
}

pub fn clamp_dt(dt: f64) -> f64 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}
