//! Frame chaos
//!
//! Hosts do not call in at a steady rate. Frames jitter, and a backgrounded
//! tab can stall for hundreds of milliseconds. Elapsed-time driven playback
//! must skip ahead after a stall rather than replay what it missed.

use std::time::Duration;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How the host spaces its frames
#[derive(Clone, Debug)]
pub enum FrameSchedule {
    /// Fixed interval
    Steady { interval: Duration },
    /// Uniformly distributed interval
    Jittery { min_ms: u32, max_ms: u32 },
    /// Mostly steady, with occasional long stalls
    Stalling {
        interval: Duration,
        stall_prob: f64,
        stall_ms: (u32, u32),
    },
}

impl FrameSchedule {
    /// 60Hz display
    pub fn display_60hz() -> Self {
        FrameSchedule::Steady {
            interval: Duration::from_micros(16_667),
        }
    }

    /// Busy main thread
    pub fn uneven() -> Self {
        FrameSchedule::Jittery {
            min_ms: 8,
            max_ms: 40,
        }
    }

    /// Tab that keeps getting backgrounded
    pub fn backgrounded() -> Self {
        FrameSchedule::Stalling {
            interval: Duration::from_millis(16),
            stall_prob: 0.05,
            stall_ms: (200, 1000),
        }
    }
}

impl Default for FrameSchedule {
    fn default() -> Self {
        Self::display_60hz()
    }
}

/// Seeded frame interval generator
#[derive(Debug)]
pub struct FrameJitter {
    schedule: FrameSchedule,
    rng: StdRng,
    frames: u64,
    stalls: u64,
}

impl FrameJitter {
    pub fn new(schedule: FrameSchedule, seed: u64) -> Self {
        FrameJitter {
            schedule,
            rng: StdRng::seed_from_u64(seed),
            frames: 0,
            stalls: 0,
        }
    }

    pub fn steady(interval: Duration) -> Self {
        Self::new(FrameSchedule::Steady { interval }, 0)
    }

    /// Time until the next frame
    pub fn next_interval(&mut self) -> Duration {
        self.frames += 1;
        match &self.schedule {
            FrameSchedule::Steady { interval } => *interval,
            FrameSchedule::Jittery { min_ms, max_ms } => {
                let dist = Uniform::new_inclusive(*min_ms, (*max_ms).max(*min_ms));
                Duration::from_millis(dist.sample(&mut self.rng) as u64)
            }
            FrameSchedule::Stalling {
                interval,
                stall_prob,
                stall_ms,
            } => {
                if self.rng.gen_bool(stall_prob.clamp(0.0, 1.0)) {
                    self.stalls += 1;
                    let (lo, hi) = *stall_ms;
                    Duration::from_millis(self.rng.gen_range(lo..=hi.max(lo)) as u64)
                } else {
                    *interval
                }
            }
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Stalls produced so far
    pub fn stalls(&self) -> u64 {
        self.stalls
    }
}
