// src/clock.rs

//! Simulation time and frame pacing.

use log::trace;
use std::time::{Duration, Instant};

/// The curve parameter and its fixed per-frame increment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    pub s: f64,
    pub ds: f64,
}

impl SimulationClock {
    pub fn new(ds: f64) -> Self {
        Self { s: 0.0, ds }
    }

    pub fn advance(&mut self) {
        self.s += self.ds;
    }
}

/// Rate-limits the frame loop.
pub trait FrameClock {
    /// Blocks until the next frame may start at `fps` frames per second and
    /// returns the time since the previous tick. `fps == 0` never waits.
    fn tick(&mut self, fps: u32) -> Duration;
}

/// Sleeps the calling thread to hold a target frame rate.
#[derive(Debug, Default)]
pub struct SleepClock {
    last_tick: Option<Instant>,
}

impl SleepClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for SleepClock {
    fn tick(&mut self, fps: u32) -> Duration {
        let now = Instant::now();
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return Duration::ZERO;
        };

        if fps > 0 {
            let frame = Duration::from_secs_f64(1.0 / f64::from(fps));
            let elapsed = now.duration_since(last);
            if elapsed < frame {
                let wait = frame - elapsed;
                trace!("SleepClock: sleeping {:?}", wait);
                std::thread::sleep(wait);
            }
        }

        let now = Instant::now();
        self.last_tick = Some(now);
        now.duration_since(last)
    }
}
