use std::f32::consts::PI;
use std::fmt::Write;

use crate::geometry::flatten::arc_sweep;
use crate::geometry::math::arc_point;
use crate::geometry::tolerance::{approx_eq, EPS_POS};
use crate::layers::MaskLayer;
use crate::model::{Path, PathCommand, Vec2};

fn fmt_num(v: f32) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { "0".to_string() } else { format!("{}", r) }
}

/// SVG `d` attribute for `path`. Arcs become `A` commands; when an arc does
/// not start at the current point a joining `L` is emitted first.
pub fn to_svg_path(path: &Path) -> String {
    let mut d = String::new();
    let mut cur: Option<Vec2> = None;
    let mut start: Option<Vec2> = None;
    for cmd in &path.commands {
        if !d.is_empty() { d.push(' '); }
        match *cmd {
            PathCommand::MoveTo { to } => {
                let _ = write!(d, "M {} {}", fmt_num(to.x), fmt_num(to.y));
                cur = Some(to);
                start = Some(to);
            }
            PathCommand::LineTo { to } => {
                let _ = write!(d, "L {} {}", fmt_num(to.x), fmt_num(to.y));
                cur = Some(to);
            }
            PathCommand::Arc { center, radius, start_angle, end_angle, clockwise } => {
                let s = arc_point(center, radius, start_angle);
                let joined = cur.map_or(false, |c| approx_eq(c.x, s.x, EPS_POS) && approx_eq(c.y, s.y, EPS_POS));
                if !joined {
                    let _ = write!(d, "{} {} {} ", if cur.is_some() { "L" } else { "M" }, fmt_num(s.x), fmt_num(s.y));
                }
                let sweep = arc_sweep(start_angle, end_angle, clockwise);
                let e = arc_point(center, radius, start_angle + sweep);
                let _ = write!(
                    d,
                    "A {} {} 0 {} {} {} {}",
                    fmt_num(radius),
                    fmt_num(radius),
                    if sweep.abs() > PI + EPS_POS { 1 } else { 0 },
                    if clockwise { 1 } else { 0 },
                    fmt_num(e.x),
                    fmt_num(e.y)
                );
                cur = Some(e);
            }
            PathCommand::Close => {
                d.push('Z');
                cur = start;
            }
        }
    }
    d
}

/// One `d` string per revealed piece, in reveal order.
pub fn mask_to_svg_paths(mask: &MaskLayer) -> Vec<String> {
    mask.entries().iter().map(|e| to_svg_path(&e.path)).collect()
}
