//! 4x4 homogeneous transform builders.
//!
//! Composition is always right-multiplication onto the accumulated matrix:
//! `translate(m, ..)` returns `m * T`. The operation applied last therefore
//! acts on object-space points first, i.e. it is the innermost transform.
//!
//! `Mat4` is `Copy`; builders take the accumulator by value and never touch
//! the caller's copy.

use glam::{Mat4, Vec3};

/// Orthographic projection mapping the view box onto the GL clip cube.
///
/// Pass `bottom > top` for a +Y-down pixel space, which is how the sprite
/// pipeline calls it: `orthographic(0.0, w, h, 0.0, -1.0, 1.0)`.
#[inline]
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(left, right, bottom, top, near, far)
}

/// Pure translation matrix.
#[inline]
pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(tx, ty, tz))
}

/// Pure scaling matrix.
#[inline]
pub fn scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(sx, sy, sz))
}

/// Returns `m * T(tx, ty, tz)`.
#[inline]
pub fn translate(m: Mat4, tx: f32, ty: f32, tz: f32) -> Mat4 {
    m * translation(tx, ty, tz)
}

/// Returns `m * S(sx, sy, sz)`.
#[inline]
pub fn scale(m: Mat4, sx: f32, sy: f32, sz: f32) -> Mat4 {
    m * scaling(sx, sy, sz)
}

/// Returns `m * Rz(theta)`, right-handed rotation about +Z (radians).
#[inline]
pub fn z_rotate(m: Mat4, theta: f32) -> Mat4 {
    m * Mat4::from_rotation_z(theta)
}
