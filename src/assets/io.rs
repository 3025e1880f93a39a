use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crate::errors::Result;

/// Outcome of an asynchronous animation read: the whole file, or why it failed.
pub type LoadResult = std::result::Result<Vec<u8>, String>;

/// Completed reads waiting for the next tick.
///
/// Any thread may send through a [`LoadSender`]; the engine drains the queue
/// at the start of a tick, so file I/O never runs inside one.
#[derive(Debug, Clone)]
pub struct LoadQueue {
    tx: flume::Sender<LoadResult>,
    rx: flume::Receiver<LoadResult>,
}

pub type LoadSender = flume::Sender<LoadResult>;

impl Default for LoadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadQueue {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self { tx, rx }
    }

    #[must_use]
    pub fn sender(&self) -> LoadSender {
        self.tx.clone()
    }

    /// Takes every completed read without blocking.
    pub fn drain(&self) -> impl Iterator<Item = LoadResult> + '_ {
        self.rx.try_iter()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

/// Reads and writes saved animations on the local file system.
pub struct FileAnimationStorage {
    root_path: PathBuf,
}

impl FileAnimationStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            root_path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Reads `name` on a worker thread and delivers the bytes to `sender`.
    pub fn spawn_load(&self, name: &str, sender: LoadSender) -> JoinHandle<()> {
        let path = self.root_path.join(name);
        std::thread::spawn(move || {
            let result = std::fs::read(&path).map_err(|e| format!("{}: {e}", path.display()));
            if sender.send(result).is_err() {
                log::warn!("Animation load for {} finished after the engine was dropped", path.display());
            }
        })
    }

    pub fn save(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.root_path.join(name);
        std::fs::write(&path, bytes)?;
        log::info!("Saved animation to {}", path.display());
        Ok(())
    }
}
