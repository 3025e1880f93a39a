//! Saved animation I/O.
//!
//! The engine never blocks a tick on the file system. Reads run on a worker
//! thread and arrive through a [`LoadQueue`]; the engine applies them at the
//! start of its next tick.

pub mod io;

pub use io::{FileAnimationStorage, LoadQueue, LoadResult, LoadSender};
