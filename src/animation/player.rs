//! Keyframe playback.
//!
//! [`evaluate`] is the whole interpolation model: a pure function of the
//! keyframes, the playback start time, the current time and the speed. The
//! [`AnimationPlayer`] only remembers whether it is playing, since when, and
//! how fast.
//!
//! # Timeline model
//!
//! Keyframes are treated as evenly spaced. The segment duration is the
//! recorded span divided by the number of gaps, so uneven recording gaps are
//! flattened out. Playback loops forever over `[first, last]`.

use crate::animation::keyframe::{Keyframe, KeyframeStore};
use crate::animation::pose::PoseState;
use crate::animation::values::Interpolatable;
use crate::errors::{RigError, Result};

/// Where on the timeline a sample falls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelinePosition {
    /// Index of the keyframe the segment starts at; always `<= count - 2`.
    pub index: usize,
    /// Blend factor towards `index + 1`, in `[0, 1]`.
    pub factor: f32,
}

/// Length of one loop of the timeline in milliseconds: the recorded span.
///
/// `None` for fewer than two keyframes or a span that is not positive.
#[must_use]
pub fn cycle_length(keyframes: &[Keyframe]) -> Option<f64> {
    if keyframes.len() < 2 {
        return None;
    }
    let (first, last) = (keyframes.first()?, keyframes.last()?);
    let span = last.timestamp_ms as f64 - first.timestamp_ms as f64;
    (span.is_finite() && span > 0.0).then_some(span)
}

/// Uniform segment duration in milliseconds, or `None` for a degenerate timeline.
#[must_use]
pub fn segment_duration(keyframes: &[Keyframe]) -> Option<f64> {
    cycle_length(keyframes).map(|cycle| cycle / (keyframes.len() - 1) as f64)
}

/// Maps scaled elapsed time onto a keyframe segment.
///
/// The loop wraps on the recorded span itself, so an elapsed time that is a
/// whole number of cycles lands exactly on the first keyframe.
#[must_use]
pub fn locate(keyframes: &[Keyframe], elapsed_ms: f64) -> Option<TimelinePosition> {
    let cycle = cycle_length(keyframes)?;
    let segment = cycle / (keyframes.len() - 1) as f64;
    let last_segment = keyframes.len() - 2;

    let position = elapsed_ms.max(0.0) % cycle;
    // Rounding near a segment boundary can land one past the last segment.
    let index = ((position / segment).floor() as usize).min(last_segment);
    let factor = ((position - index as f64 * segment) / segment).clamp(0.0, 1.0);

    Some(TimelinePosition {
        index,
        factor: factor as f32,
    })
}

/// Computes the pose at `now_ms` for playback that started at `start_ms`.
///
/// Fails with [`RigError::InsufficientKeyframes`] if fewer than two keyframes
/// are stored, and with [`RigError::MalformedAnimation`] if the keyframes do
/// not all have the same limb count. A timeline whose keyframes all share one
/// timestamp yields the first keyframe's pose.
pub fn evaluate(
    store: &KeyframeStore,
    start_ms: u64,
    now_ms: u64,
    speed: f64,
) -> Result<PoseState> {
    let keyframes = store.keyframes();
    if keyframes.len() < 2 {
        return Err(RigError::InsufficientKeyframes {
            found: keyframes.len(),
        });
    }

    let limb_count = keyframes[0].pose.limb_count();
    if let Some(i) = keyframes
        .iter()
        .position(|kf| kf.pose.limb_count() != limb_count)
    {
        return Err(RigError::MalformedAnimation(format!(
            "keyframe {i} has {} limbs, keyframe 0 has {limb_count}",
            keyframes[i].pose.limb_count()
        )));
    }

    let elapsed = now_ms.saturating_sub(start_ms) as f64 * speed;
    match locate(keyframes, elapsed) {
        Some(TimelinePosition { index, factor }) => Ok(PoseState::interpolate_linear(
            &keyframes[index].pose,
            &keyframes[index + 1].pose,
            factor,
        )),
        None => Ok(keyframes[0].pose.clone()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing { start_ms: u64 },
}

/// Looping keyframe playback state.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    state: PlaybackState,
    speed: f64,
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self {
            state: PlaybackState::Stopped,
            speed: 1.0,
        }
    }
}

impl AnimationPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed(speed: f64) -> Result<Self> {
        let mut player = Self::new();
        player.set_speed(speed)?;
        Ok(player)
    }

    /// Starts looping playback from the first keyframe at `now_ms`.
    ///
    /// Calling this while already playing restarts from the beginning.
    pub fn play(&mut self, store: &KeyframeStore, now_ms: u64) -> Result<()> {
        if store.len() < 2 {
            return Err(RigError::InsufficientKeyframes { found: store.len() });
        }
        self.state = PlaybackState::Playing { start_ms: now_ms };
        log::info!(
            "Playing {} keyframes at {}x speed",
            store.len(),
            self.speed
        );
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.is_playing() {
            log::info!("Playback stopped");
        }
        self.state = PlaybackState::Stopped;
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    #[must_use]
    pub fn start_ms(&self) -> Option<u64> {
        match self.state {
            PlaybackState::Playing { start_ms } => Some(start_ms),
            PlaybackState::Stopped => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Sets the speed multiplier. Takes effect on the next sample; the start
    /// time is kept, so the playhead jumps.
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(RigError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// The pose for `now_ms`, or `None` when stopped.
    #[must_use]
    pub fn sample(&self, store: &KeyframeStore, now_ms: u64) -> Option<Result<PoseState>> {
        self.start_ms()
            .map(|start_ms| evaluate(store, start_ms, now_ms, self.speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(times: &[u64]) -> Vec<Keyframe> {
        times
            .iter()
            .map(|&t| Keyframe::new(t, PoseState::new(1)))
            .collect()
    }

    #[test]
    fn test_segment_duration_ignores_uneven_gaps() {
        let kfs = frames(&[0, 100, 900]);
        assert_eq!(segment_duration(&kfs), Some(450.0));
        assert_eq!(cycle_length(&kfs), Some(900.0));
    }

    #[test]
    fn test_locate_clamps_index() {
        let kfs = frames(&[0, 1000]);
        let pos = locate(&kfs, 999.999_999).unwrap();
        assert_eq!(pos.index, 0);
        assert!(pos.factor <= 1.0);
    }

    #[test]
    fn test_degenerate_timeline() {
        assert_eq!(segment_duration(&frames(&[50, 50])), None);
        assert_eq!(segment_duration(&frames(&[50])), None);
    }

    #[test]
    fn test_set_speed_rejects_non_positive() {
        let mut player = AnimationPlayer::new();
        assert!(player.set_speed(0.0).is_err());
        assert!(player.set_speed(f64::NAN).is_err());
        assert!(player.set_speed(2.5).is_ok());
        assert_eq!(player.speed(), 2.5);
    }
}
