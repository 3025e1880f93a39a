//! Utility Module
//!
//! - [`time`]: time sources for the tick loop and frame timing

pub mod time;

pub use time::{ManualClock, SystemClock, TimeSource, Timer};
