//! Affine transform helpers.
//!
//! Every function here is pure. Composition follows the column-vector
//! convention used throughout the engine: `multiply(a, b)` applies `b` first,
//! so a world matrix is always `parent_world * local`.

use glam::{Affine3A, Vec3};

use crate::errors::{RigError, Result};

/// Axes shorter than this are treated as degenerate.
const MIN_AXIS_LENGTH_SQUARED: f32 = 1e-12;

/// The identity transform.
#[inline]
#[must_use]
pub fn identity() -> Affine3A {
    Affine3A::IDENTITY
}

/// Composes two transforms. The result applies `b` first, then `a`.
#[inline]
#[must_use]
pub fn multiply(a: &Affine3A, b: &Affine3A) -> Affine3A {
    *a * *b
}

/// Post-multiplies `m` by a translation, i.e. translates in `m`'s local frame.
#[inline]
#[must_use]
pub fn translate(m: &Affine3A, offset: Vec3) -> Affine3A {
    *m * Affine3A::from_translation(offset)
}

/// Post-multiplies `m` by a rotation of `radians` about `axis`.
///
/// The axis does not need to be unit length; it is normalized here. A zero or
/// non-finite axis yields [`RigError::InvalidAxis`] instead of a NaN matrix.
pub fn rotate_around_axis(m: &Affine3A, axis: Vec3, radians: f32) -> Result<Affine3A> {
    let axis = normalized_axis(axis)?;
    Ok(*m * Affine3A::from_axis_angle(axis, radians))
}

/// Normalizes a rotation axis, rejecting degenerate input.
pub fn normalized_axis(axis: Vec3) -> Result<Vec3> {
    if !axis.is_finite() || axis.length_squared() < MIN_AXIS_LENGTH_SQUARED {
        return Err(RigError::invalid_axis(axis));
    }
    Ok(axis.normalize())
}

/// Degrees to radians, in `f32` like the rest of the pose data.
#[inline]
#[must_use]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}
