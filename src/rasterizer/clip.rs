//! Segment clipping: near plane in clip space, viewport rectangle in screen
//! space (Cohen-Sutherland).

use super::math::{Vec2, Vec3};

/// Clip a transformed edge against the plane `z = near`.
///
/// Must run before the screen mapping: the mapping divides by z and is
/// invalid at or behind the camera. Returns `None` when the whole edge lies
/// behind the plane (or no valid intersection exists); otherwise the clipped
/// endpoint sits exactly at `z = near`.
pub(crate) fn clip_near(a: Vec3, b: Vec3, near: f32) -> Option<(Vec3, Vec3)> {
    let a_out = a.z < near;
    let b_out = b.z < near;

    match (a_out, b_out) {
        (true, true) => None,
        (true, false) => Some((near_intersect(b, a, near)?, b)),
        (false, true) => Some((a, near_intersect(a, b, near)?)),
        (false, false) => Some((a, b)),
    }
}

/// Intersection of the segment with `z = near`, found by interpolating from
/// the kept endpoint toward the clipped one.
fn near_intersect(kept: Vec3, clipped: Vec3, near: f32) -> Option<Vec3> {
    let span = kept.z - clipped.z;
    if span == 0.0 {
        return None;
    }
    let ratio = (kept.z - near) / span;
    Some(Vec3::new(
        kept.x + (clipped.x - kept.x) * ratio,
        kept.y + (clipped.y - kept.y) * ratio,
        near,
    ))
}

const INSIDE: u8 = 0b0000;
const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

/// A segment crosses at most four boundaries; the bound guards against a
/// cycle on pathological input.
const MAX_CLIP_PASSES: u32 = 8;

/// One bit per violated boundary of `[0, width] x [0, height]`.
fn outcode(p: Vec2, width: f32, height: f32) -> u8 {
    let mut code = INSIDE;
    if p.x < 0.0 {
        code |= LEFT;
    } else if p.x > width {
        code |= RIGHT;
    }
    if p.y < 0.0 {
        code |= BOTTOM;
    } else if p.y > height {
        code |= TOP;
    }
    code
}

/// Cohen-Sutherland clip of a screen-space segment against the viewport.
///
/// Trivial accept when both outcodes are zero, trivial reject when the codes
/// share a violated boundary; otherwise the outside endpoint is moved to its
/// intersection with the violated boundary and reclassified. A segment fully
/// inside comes back unchanged.
pub(crate) fn clip_viewport(
    mut a: Vec2,
    mut b: Vec2,
    width: f32,
    height: f32,
) -> Option<(Vec2, Vec2)> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }

    let mut code_a = outcode(a, width, height);
    let mut code_b = outcode(b, width, height);

    for _ in 0..MAX_CLIP_PASSES {
        if (code_a | code_b) == INSIDE {
            return Some((a, b));
        }
        if (code_a & code_b) != INSIDE {
            return None;
        }

        // The tested outcode bit guarantees a non-zero denominator: the
        // endpoints cannot share that boundary's side.
        let out = if code_a != INSIDE { code_a } else { code_b };
        let p = if (out & TOP) != 0 {
            Vec2::new(
                a.x + (b.x - a.x) * (height - a.y) / (b.y - a.y),
                height,
            )
        } else if (out & BOTTOM) != 0 {
            Vec2::new(a.x + (b.x - a.x) * (0.0 - a.y) / (b.y - a.y), 0.0)
        } else if (out & RIGHT) != 0 {
            Vec2::new(width, a.y + (b.y - a.y) * (width - a.x) / (b.x - a.x))
        } else {
            Vec2::new(0.0, a.y + (b.y - a.y) * (0.0 - a.x) / (b.x - a.x))
        };

        if out == code_a {
            a = p;
            code_a = outcode(a, width, height);
        } else {
            b = p;
            code_b = outcode(b, width, height);
        }
    }

    None
}
