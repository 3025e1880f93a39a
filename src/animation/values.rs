use crate::animation::pose::{JointAngles, PoseState};

/// Values that keyframe playback can blend between.
///
/// Blending is plain linear interpolation. Angles are not wrapped, so a
/// 350° → 10° transition sweeps through 180° rather than across 0°.
pub trait Interpolatable: Sized {
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    #[inline]
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for JointAngles {
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        Self {
            base: f32::interpolate_linear(&start.base, &end.base, t),
            mid: f32::interpolate_linear(&start.mid, &end.mid, t),
            tip: f32::interpolate_linear(&start.tip, &end.tip, t),
        }
    }
}

impl Interpolatable for PoseState {
    /// Both poses must have the same limb count; the result has the length of
    /// the shorter one otherwise.
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        let limbs = start
            .limbs()
            .iter()
            .zip(end.limbs())
            .map(|(a, b)| JointAngles::interpolate_linear(a, b, t))
            .collect();
        PoseState::from_limbs(limbs)
    }
}
