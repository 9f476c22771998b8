use super::tolerance::{approx_eq, norm2, EPS_POS};
use crate::model::Vec2;

#[inline]
pub fn mid_point(a: Vec2, b: Vec2) -> Vec2 {
    Vec2 { x: (a.x + b.x) * 0.5, y: (a.y + b.y) * 0.5 }
}

#[inline]
pub fn arc_point(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    Vec2 { x: center.x + radius * angle.cos(), y: center.y + radius * angle.sin() }
}

/// True when the segment runs along x or along y (or is a single point).
#[inline]
pub fn is_axis_aligned(a: Vec2, b: Vec2) -> bool {
    approx_eq(a.x, b.x, EPS_POS) || approx_eq(a.y, b.y, EPS_POS)
}

/// Points where a hump of diameter `hump` leaves and rejoins the segment
/// `a -> b`, centred on its midpoint. The first point lies toward `a`.
///
/// Panics when the segment is not axis aligned: every edge of a grid cell
/// is, so anything else means the grid itself is malformed.
pub fn hump_span(a: Vec2, b: Vec2, hump: f32) -> (Vec2, Vec2) {
    assert!(
        is_axis_aligned(a, b),
        "non-axis-aligned edge ({}, {}) -> ({}, {}): endpoints must share x or y",
        a.x, a.y, b.x, b.y
    );
    let mid = mid_point(a, b);
    let ((ux, uy), _) = norm2(b.x - a.x, b.y - a.y);
    let r = hump * 0.5;
    (
        Vec2 { x: mid.x - ux * r, y: mid.y - uy * r },
        Vec2 { x: mid.x + ux * r, y: mid.y + uy * r },
    )
}

/// Shoelace area of a closed polygon; positive for clockwise-on-screen order.
pub fn signed_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 { return 0.0; }
    let mut acc = 0.0f32;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    acc * 0.5
}
