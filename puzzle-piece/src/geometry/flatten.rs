use std::f32::consts::{PI, TAU};

use crate::geometry::math::arc_point;
use crate::geometry::tolerance::{approx_eq, near_zero, EPS_LEN, EPS_POS, MAX_ARC_STEPS, MIN_ARC_STEPS};
use crate::model::{Path, PathCommand, Vec2};

/// End angle adjusted so that walking from `start` to it follows the
/// requested sweep direction. Returns the signed sweep in radians.
pub fn arc_sweep(start: f32, end: f32, clockwise: bool) -> f32 {
    let mut e = end;
    if clockwise {
        while e < start { e += TAU; }
    } else {
        while e > start { e -= TAU; }
    }
    e - start
}

pub fn flatten_arc(points: &mut Vec<Vec2>,
    center: Vec2, radius: f32, start: f32, end: f32, clockwise: bool, tol: f32)
{
    let sweep = arc_sweep(start, end, clockwise);
    if near_zero(radius, EPS_LEN) || near_zero(sweep, EPS_LEN) {
        points.push(arc_point(center, radius, start + sweep));
        return;
    }
    // Largest step whose chord stays within `tol` of the circle.
    let ratio = (1.0 - tol / radius).max(-1.0);
    let max_step = if ratio <= -1.0 { PI } else { 2.0 * ratio.acos() };
    let steps = ((sweep.abs() / max_step.max(EPS_LEN)).ceil() as u32)
        .clamp(MIN_ARC_STEPS, MAX_ARC_STEPS);
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        points.push(arc_point(center, radius, start + sweep * t));
    }
}

/// Flattens every contour of `path` into a polyline. The arc's start point
/// is emitted too when it differs from the current point, matching how
/// stroking APIs join a preceding segment to an arc.
pub fn flatten_path(path: &Path, tol: f32) -> Vec<Vec<Vec2>> {
    let mut contours: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    for cmd in &path.commands {
        match *cmd {
            PathCommand::MoveTo { to } => {
                if current.len() > 1 { contours.push(std::mem::take(&mut current)); }
                current.clear();
                current.push(to);
            }
            PathCommand::LineTo { to } => current.push(to),
            PathCommand::Arc { center, radius, start_angle, end_angle, clockwise } => {
                let s = arc_point(center, radius, start_angle);
                if current.last().map_or(true, |p| !approx_eq(p.x, s.x, EPS_POS) || !approx_eq(p.y, s.y, EPS_POS)) {
                    current.push(s);
                }
                flatten_arc(&mut current, center, radius, start_angle, end_angle, clockwise, tol);
            }
            PathCommand::Close => {
                if current.len() > 1 { contours.push(std::mem::take(&mut current)); }
            }
        }
    }
    if current.len() > 1 { contours.push(current); }
    contours
}
