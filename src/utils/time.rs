#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Source of monotonic milliseconds for the tick loop.
///
/// The epoch is arbitrary; only differences matter.
pub trait TimeSource {
    fn now_ms(&mut self) -> u64;
}

/// Wall clock, counting from the moment it was created.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for SystemClock {
    fn now_ms(&mut self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Deterministic clock for tests and offline rendering.
///
/// Each read returns the current time and then advances by `step_ms`.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pub now_ms: u64,
    pub step_ms: u64,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            now_ms: start_ms,
            step_ms,
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&mut self) -> u64 {
        let now = self.now_ms;
        self.now_ms = self.now_ms.saturating_add(self.step_ms);
        now
    }
}

/// Frame timing statistics, fed with the tick loop's timestamps.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    start_ms: Option<u64>,
    last_ms: u64,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since the first tick
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now_ms: u64) {
        let start = *self.start_ms.get_or_insert(now_ms);
        let last = if self.frame_count == 0 { now_ms } else { self.last_ms };
        self.delta = Duration::from_millis(now_ms.saturating_sub(last));
        self.elapsed = Duration::from_millis(now_ms.saturating_sub(start));
        self.last_ms = now_ms;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_steps() {
        let mut clock = ManualClock::new(100, 16);
        assert_eq!(clock.now_ms(), 100);
        assert_eq!(clock.now_ms(), 116);
        clock.advance(1000);
        assert_eq!(clock.now_ms(), 1132);
    }

    #[test]
    fn test_timer_tracks_delta() {
        let mut timer = Timer::new();
        timer.tick(500);
        assert_eq!(timer.delta, Duration::ZERO);
        timer.tick(516);
        assert_eq!(timer.delta, Duration::from_millis(16));
        assert_eq!(timer.elapsed, Duration::from_millis(16));
        assert_eq!(timer.frame_count, 2);
    }
}
