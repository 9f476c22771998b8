//! Edge tracing shared by piece masks and the grid outline.
//!
//! Each call appends one cell edge to a path, starting at the builder's
//! current point. A non-zero sign replaces the middle `hump` units of the
//! edge with a half circle; a zero `hump` leaves it straight. Because both
//! the masks and the outline go through here, their humps are congruent.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::geometry::builder::PathBuilder;
use crate::geometry::math::{hump_span, mid_point};
use crate::model::{EdgeDirection, Vec2};

/// Start and end angle of the hump arc for an edge traced in `direction`.
/// The start angle always points back toward the edge's first endpoint.
pub fn hump_angles(direction: EdgeDirection) -> (f32, f32) {
    let quarter = FRAC_PI_2 * direction as u8 as f32;
    (PI + quarter, quarter)
}

/// Sweep lookup. Top/right edges run with the boundary's clockwise walk
/// from the piece's point of view, bottom/left ones against it, so the
/// same sign flips meaning between the two pairs.
pub fn hump_clockwise(direction: EdgeDirection, sign: i32) -> bool {
    match direction {
        EdgeDirection::Top | EdgeDirection::Right => sign > 0,
        EdgeDirection::Bottom | EdgeDirection::Left => sign < 0,
    }
}

/// Appends the edge from the current point to `to`.
///
/// Panics if the edge is not axis aligned.
pub fn tie_line(path: &mut PathBuilder, to: Vec2, sign: i32, direction: EdgeDirection, hump: f32) {
    let from = match path.current_point() {
        Some(p) if sign != 0 && hump > 0.0 => p,
        _ => {
            path.line_to(to);
            return;
        }
    };
    let (enter, _) = hump_span(from, to, hump);
    path.line_to(enter);
    let (start_angle, end_angle) = hump_angles(direction);
    path.arc(
        mid_point(from, to),
        hump * 0.5,
        start_angle,
        end_angle,
        hump_clockwise(direction, sign),
    );
    path.line_to(to);
}
