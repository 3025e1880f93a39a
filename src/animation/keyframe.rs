use crate::animation::codec;
use crate::animation::pose::PoseState;
use crate::errors::Result;

/// A timestamped snapshot of every joint angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    /// Capture time in milliseconds since an arbitrary epoch.
    pub timestamp_ms: u64,
    pub pose: PoseState,
}

impl Keyframe {
    #[must_use]
    pub fn new(timestamp_ms: u64, pose: PoseState) -> Self {
        Self { timestamp_ms, pose }
    }
}

/// Recorded keyframes in timeline order.
///
/// The store only grows by [`append`](Self::append) or is swapped out whole by
/// [`replace_all`](Self::replace_all); individual keyframes are never edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeStore {
    keyframes: Vec<Keyframe>,
}

impl KeyframeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a deep copy of `pose` at `timestamp_ms`.
    pub fn append(&mut self, timestamp_ms: u64, pose: &PoseState) {
        self.keyframes.push(Keyframe::new(timestamp_ms, pose.clone()));
        log::debug!(
            "Recorded keyframe #{} at {timestamp_ms} ms",
            self.keyframes.len()
        );
    }

    /// Replaces the whole timeline.
    pub fn replace_all(&mut self, keyframes: Vec<Keyframe>) {
        self.keyframes = keyframes;
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[must_use]
    pub fn first(&self) -> Option<&Keyframe> {
        self.keyframes.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Keyframe> {
        self.keyframes.last()
    }

    /// Encodes the timeline in the saved animation format.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        codec::encode(&self.keyframes)
    }

    /// Decodes a saved animation without touching any store.
    pub fn deserialize(bytes: &[u8], limb_count: usize) -> Result<Vec<Keyframe>> {
        codec::decode(bytes, limb_count)
    }

    /// Decodes `bytes` and, only if that succeeds, replaces the timeline.
    ///
    /// Returns the number of keyframes loaded.
    pub fn load(&mut self, bytes: &[u8], limb_count: usize) -> Result<usize> {
        let keyframes = Self::deserialize(bytes, limb_count)?;
        let count = keyframes.len();
        self.replace_all(keyframes);
        Ok(count)
    }
}
