//! Tick sources — where the engine gets elapsed time from.
//!
//! The engine never reads a clock itself. A host hands it a [`Scheduler`]
//! through [`GameEngine::pump`](crate::engine::GameEngine::pump), and tests
//! use [`ManualClock`] to advance time synchronously.

use std::time::Instant;

/// Something that reports how many seconds passed since it was last asked.
pub trait Scheduler {
    fn elapsed_seconds(&mut self) -> f32;
}

/// Real time via `Instant`. Drift between polls is accepted.
#[derive(Debug, Clone)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for WallClock {
    fn elapsed_seconds(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        elapsed
    }
}

/// Test clock: time only moves when [`ManualClock::advance`] is called.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: f32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, seconds: f32) {
        self.pending += seconds.max(0.0);
    }
}

impl Scheduler for ManualClock {
    fn elapsed_seconds(&mut self) -> f32 {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_drains() {
        let mut clock = ManualClock::new();
        clock.advance(1.5);
        clock.advance(2.0);
        assert_eq!(clock.elapsed_seconds(), 3.5);
        assert_eq!(clock.elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_manual_clock_ignores_negative() {
        let mut clock = ManualClock::new();
        clock.advance(-4.0);
        assert_eq!(clock.elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_wall_clock_is_monotonic() {
        let mut clock = WallClock::new();
        assert!(clock.elapsed_seconds() >= 0.0);
        assert!(clock.elapsed_seconds() >= 0.0);
    }
}
