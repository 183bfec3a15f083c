//! Per-draw transform derivation.
//!
//! A draw takes a sub-rectangle of a texture (source, texture pixels) and
//! places it on a screen rectangle (destination, surface pixels), optionally
//! rotating the texture about its own center first. Two matrices come out:
//!
//! - destination: `Ortho(0, W, H, 0, -1, 1) · T(dst) · S(dst_size)`, mapping the
//!   unit quad onto the destination rectangle in clip space
//! - texture: `S(1/tex) · T(tex/2) · Rz(θ) · T(-tex/2) · T(src) · S(src_size)`,
//!   mapping the unit quad's texcoords into normalized texture space
//!
//! The rotation pivot is the center of the whole texture, not of the source
//! sub-rectangle. For partial sub-rectangles this rotates the crop window
//! around the texture center; sprites always sample the whole texture, where
//! the two coincide.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::coords::transform::{orthographic, scale, scaling, translate, z_rotate};
use crate::coords::Viewport;

/// Draw request with optional fields.
///
/// Omitted fields resolve against the texture's native size in this order:
/// - `src_rotation` defaults to `0`
/// - `src_width`/`src_height` default to the texture size
/// - `dst_width`/`dst_height` default to the source size; when they do, the
///   source size falls back to the full texture
/// - `dst_x`/`dst_y` default to `src_x`/`src_y`; when they do, the source
///   origin falls back to `0`
/// - `src_x`/`src_y` default to `0`
///
/// So a request with only a source origin draws the whole texture at that
/// point, and a request with only a source size draws the whole texture
/// stretched to that size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DrawImageParams {
    pub src_x: Option<f32>,
    pub src_y: Option<f32>,
    pub src_width: Option<f32>,
    pub src_height: Option<f32>,
    pub dst_x: Option<f32>,
    pub dst_y: Option<f32>,
    pub dst_width: Option<f32>,
    pub dst_height: Option<f32>,
    pub src_rotation: Option<f32>,
}

impl DrawImageParams {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn src_origin(mut self, x: f32, y: f32) -> Self {
        self.src_x = Some(x);
        self.src_y = Some(y);
        self
    }

    #[inline]
    pub fn src_size(mut self, width: f32, height: f32) -> Self {
        self.src_width = Some(width);
        self.src_height = Some(height);
        self
    }

    #[inline]
    pub fn dst_origin(mut self, x: f32, y: f32) -> Self {
        self.dst_x = Some(x);
        self.dst_y = Some(y);
        self
    }

    #[inline]
    pub fn dst_size(mut self, width: f32, height: f32) -> Self {
        self.dst_width = Some(width);
        self.dst_height = Some(height);
        self
    }

    #[inline]
    pub fn rotation(mut self, radians: f32) -> Self {
        self.src_rotation = Some(radians);
        self
    }

    /// Fills every omitted field for a texture of `texture_size` pixels.
    pub fn resolve(&self, texture_size: Vec2) -> DrawImage {
        let (src_x, dst_x) = resolve_origin(self.src_x, self.dst_x);
        let (src_y, dst_y) = resolve_origin(self.src_y, self.dst_y);
        let (src_w, dst_w) = resolve_extent(self.src_width, self.dst_width, texture_size.x);
        let (src_h, dst_h) = resolve_extent(self.src_height, self.dst_height, texture_size.y);

        DrawImage {
            texture_size,
            src_origin: Vec2::new(src_x, src_y),
            src_size: Vec2::new(src_w, src_h),
            dst_origin: Vec2::new(dst_x, dst_y),
            dst_size: Vec2::new(dst_w, dst_h),
            src_rotation: self.src_rotation.unwrap_or(0.0),
        }
    }
}

/// Returns `(src, dst)` for one origin axis.
fn resolve_origin(src: Option<f32>, dst: Option<f32>) -> (f32, f32) {
    match dst {
        Some(dst) => (src.unwrap_or(0.0), dst),
        None => (0.0, src.unwrap_or(0.0)),
    }
}

/// Returns `(src, dst)` for one extent axis.
fn resolve_extent(src: Option<f32>, dst: Option<f32>, native: f32) -> (f32, f32) {
    let src = src.unwrap_or(native);
    match dst {
        Some(dst) => (src, dst),
        None => (native, src),
    }
}

/// Fully resolved draw parameters, all in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawImage {
    pub texture_size: Vec2,
    pub src_origin: Vec2,
    pub src_size: Vec2,
    pub dst_origin: Vec2,
    pub dst_size: Vec2,
    pub src_rotation: f32,
}

impl DrawImage {
    /// Places the unit quad on the destination rectangle, in clip space.
    pub fn destination_matrix(&self, viewport: Viewport) -> Mat4 {
        let m = orthographic(0.0, viewport.width, viewport.height, 0.0, -1.0, 1.0);
        let m = translate(m, self.dst_origin.x, self.dst_origin.y, 0.0);
        scale(m, self.dst_size.x, self.dst_size.y, 1.0)
    }

    /// Maps unit-quad texcoords into normalized texture space.
    pub fn texture_matrix(&self) -> Mat4 {
        let tex = self.texture_size;

        // Pixel space from here on.
        let m = scaling(1.0 / tex.x, 1.0 / tex.y, 1.0);

        let m = translate(m, tex.x * 0.5, tex.y * 0.5, 0.0);
        let m = z_rotate(m, self.src_rotation);
        let m = translate(m, tex.x * -0.5, tex.y * -0.5, 0.0);

        let m = translate(m, self.src_origin.x, self.src_origin.y, 0.0);
        scale(m, self.src_size.x, self.src_size.y, 1.0)
    }

    /// Both matrices packed for the sprite shader.
    pub fn uniforms(&self, viewport: Viewport) -> DrawUniforms {
        DrawUniforms {
            matrix: self.destination_matrix(viewport).to_cols_array_2d(),
            texture_matrix: self.texture_matrix().to_cols_array_2d(),
        }
    }
}

/// Uniform block consumed by `sprite.wgsl` (column-major, 128 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub matrix: [[f32; 4]; 4],
    pub texture_matrix: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use glam::Vec4;

    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{a} != {b}");
    }

    fn apply(m: Mat4, x: f32, y: f32) -> Vec4 {
        m * Vec4::new(x, y, 0.0, 1.0)
    }

    fn tex(w: f32, h: f32) -> Vec2 {
        Vec2::new(w, h)
    }

    // ── default resolution ────────────────────────────────────────────────

    #[test]
    fn empty_params_draw_native_size_at_origin() {
        let d = DrawImageParams::new().resolve(tex(64.0, 32.0));
        assert_eq!(d.src_origin, Vec2::ZERO);
        assert_eq!(d.dst_origin, Vec2::ZERO);
        assert_eq!(d.src_size, tex(64.0, 32.0));
        assert_eq!(d.dst_size, tex(64.0, 32.0));
        assert_eq!(d.src_rotation, 0.0);
    }

    #[test]
    fn lone_source_origin_becomes_destination() {
        let d = DrawImageParams::new().src_origin(10.0, 20.0).resolve(tex(64.0, 32.0));
        assert_eq!(d.dst_origin, Vec2::new(10.0, 20.0));
        assert_eq!(d.src_origin, Vec2::ZERO);
    }

    #[test]
    fn lone_source_size_becomes_destination_size() {
        let d = DrawImageParams::new().src_size(5.0, 6.0).resolve(tex(64.0, 32.0));
        assert_eq!(d.dst_size, Vec2::new(5.0, 6.0));
        assert_eq!(d.src_size, tex(64.0, 32.0));
    }

    #[test]
    fn fully_specified_params_are_kept() {
        let d = DrawImageParams::new()
            .src_origin(1.0, 2.0)
            .src_size(3.0, 4.0)
            .dst_origin(5.0, 6.0)
            .dst_size(7.0, 8.0)
            .rotation(0.5)
            .resolve(tex(64.0, 32.0));
        assert_eq!(d.src_origin, Vec2::new(1.0, 2.0));
        assert_eq!(d.src_size, Vec2::new(3.0, 4.0));
        assert_eq!(d.dst_origin, Vec2::new(5.0, 6.0));
        assert_eq!(d.dst_size, Vec2::new(7.0, 8.0));
        assert_eq!(d.src_rotation, 0.5);
    }

    #[test]
    fn axes_resolve_independently() {
        let params = DrawImageParams {
            dst_x: Some(3.0),
            src_x: Some(1.0),
            src_y: Some(9.0),
            ..DrawImageParams::default()
        };
        let d = params.resolve(tex(8.0, 8.0));
        assert_eq!(d.src_origin, Vec2::new(1.0, 0.0));
        assert_eq!(d.dst_origin, Vec2::new(3.0, 9.0));
    }

    // ── destination matrix ────────────────────────────────────────────────

    #[test]
    fn unit_quad_far_corner_lands_on_destination_corner() {
        let viewport = Viewport::new(300.0, 150.0);
        let d = DrawImageParams::new()
            .dst_origin(10.0, 20.0)
            .dst_size(5.0, 8.0)
            .resolve(tex(16.0, 16.0));

        let clip = apply(d.destination_matrix(viewport), 1.0, 1.0);
        let ortho = orthographic(0.0, viewport.width, viewport.height, 0.0, -1.0, 1.0);
        let screen = ortho.inverse() * clip;

        assert_close(screen.x, 15.0);
        assert_close(screen.y, 28.0);
        assert_close(clip.w, 1.0);
    }

    #[test]
    fn unit_quad_origin_lands_on_destination_origin_in_clip_space() {
        let viewport = Viewport::new(200.0, 100.0);
        let d = DrawImageParams::new().dst_origin(100.0, 50.0).resolve(tex(4.0, 4.0));
        let clip = apply(d.destination_matrix(viewport), 0.0, 0.0);
        assert_close(clip.x, 0.0);
        assert_close(clip.y, 0.0);
    }

    // ── texture matrix ────────────────────────────────────────────────────

    #[test]
    fn unrotated_full_texture_is_identity_on_unit_square() {
        let texture = tex(64.0, 32.0);
        let d = DrawImageParams::new().resolve(texture);
        let to_pixels = scaling(texture.x, texture.y, 1.0) * d.texture_matrix();

        for (u, v) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.25, 0.75)] {
            let p = apply(to_pixels, u, v);
            assert_close(p.x, u * texture.x);
            assert_close(p.y, v * texture.y);
        }
    }

    #[test]
    fn half_turn_flips_texture_about_its_center() {
        let d = DrawImageParams::new().rotation(PI).resolve(tex(64.0, 32.0));
        let m = d.texture_matrix();

        let p = apply(m, 0.0, 0.0);
        assert_close(p.x, 1.0);
        assert_close(p.y, 1.0);

        let c = apply(m, 0.5, 0.5);
        assert_close(c.x, 0.5);
        assert_close(c.y, 0.5);
    }

    #[test]
    fn sub_rectangle_is_cropped_in_normalized_space() {
        let d = DrawImageParams::new()
            .src_origin(16.0, 8.0)
            .src_size(32.0, 16.0)
            .dst_origin(0.0, 0.0)
            .resolve(tex(64.0, 32.0));
        let m = d.texture_matrix();

        let a = apply(m, 0.0, 0.0);
        assert_close(a.x, 0.25);
        assert_close(a.y, 0.25);

        let b = apply(m, 1.0, 1.0);
        assert_close(b.x, 0.75);
        assert_close(b.y, 0.75);
    }

    #[test]
    fn sub_rectangle_rotates_about_full_texture_center() {
        // Top-left quarter, half turn: the crop window swings to the
        // bottom-right quarter instead of spinning in place.
        let d = DrawImageParams::new()
            .src_origin(0.0, 0.0)
            .src_size(32.0, 16.0)
            .dst_origin(0.0, 0.0)
            .rotation(PI)
            .resolve(tex(64.0, 32.0));
        let m = d.texture_matrix();

        let a = apply(m, 0.0, 0.0);
        assert_close(a.x, 1.0);
        assert_close(a.y, 1.0);

        let b = apply(m, 1.0, 1.0);
        assert_close(b.x, 0.5);
        assert_close(b.y, 0.5);
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    #[test]
    fn uniform_block_is_two_column_major_matrices() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 128);

        let viewport = Viewport::new(100.0, 100.0);
        let d = DrawImageParams::new().dst_origin(10.0, 20.0).resolve(tex(2.0, 2.0));
        let u = d.uniforms(viewport);
        assert_eq!(Mat4::from_cols_array_2d(&u.matrix), d.destination_matrix(viewport));
        assert_eq!(Mat4::from_cols_array_2d(&u.texture_matrix), d.texture_matrix());
    }
}
