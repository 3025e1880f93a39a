//! Frame loop.
//!
//! [`TickLoop`] replaces a self-rescheduling render callback with an explicit
//! loop over an injectable [`TimeSource`]. Between ticks the caller's hook
//! runs with mutable access to the engine, which is where input events are
//! applied; the hook always finishes before the next tick reads state.

pub mod input;

use std::ops::ControlFlow;
use std::time::Duration;

use crate::engine::Engine;
use crate::errors::Result;
use crate::renderer::Renderer;
use crate::utils::TimeSource;

pub use input::{InputEvent, InputResponse};

pub struct TickLoop<C: TimeSource> {
    clock: C,
    /// Sleep so that ticks are at least this far apart. `None` runs flat out.
    /// Meant for wall clocks: the clock is read a second time after each tick.
    frame_interval: Option<Duration>,
}

impl<C: TimeSource> TickLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            frame_interval: None,
        }
    }

    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Runs until `between_ticks` breaks. Returns the number of ticks run.
    ///
    /// `between_ticks` receives the time the coming tick will use.
    pub fn run<R, F>(&mut self, engine: &mut Engine, renderer: &mut R, mut between_ticks: F) -> Result<u64>
    where
        R: Renderer + ?Sized,
        F: FnMut(&mut Engine, u64) -> ControlFlow<()>,
    {
        let mut ticks = 0;
        loop {
            let now = self.clock.now_ms();
            if between_ticks(&mut *engine, now).is_break() {
                break;
            }
            engine.tick(now, renderer)?;
            ticks += 1;

            if let Some(interval) = self.frame_interval {
                let spent = Duration::from_millis(self.clock.now_ms().saturating_sub(now));
                if let Some(rest) = interval.checked_sub(spent) {
                    std::thread::sleep(rest);
                }
            }
        }
        log::debug!("Tick loop finished after {ticks} ticks");
        Ok(ticks)
    }

    /// Runs exactly `frames` ticks with no input.
    pub fn run_frames<R>(&mut self, engine: &mut Engine, renderer: &mut R, frames: u64) -> Result<u64>
    where
        R: Renderer + ?Sized,
    {
        let mut remaining = frames;
        self.run(engine, renderer, |_, _| {
            if remaining == 0 {
                return ControlFlow::Break(());
            }
            remaining -= 1;
            ControlFlow::Continue(())
        })
    }
}
