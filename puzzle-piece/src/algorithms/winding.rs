//! Winding number calculation for point-in-piece testing.
//!
//! Piece outlines with notches are concave, so a plain bounding box test is
//! not enough; the non-zero rule handles them directly.

use crate::model::Vec2;

/// Signed number of times `polygon` winds around `(px, py)`; zero outside.
pub fn winding_number(px: f32, py: f32, polygon: &[Vec2]) -> i32 {
    if polygon.len() < 3 {
        return 0;
    }

    let mut winding = 0i32;
    let n = polygon.len();

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];

        if p1.y <= py {
            if p2.y > py && cross_product(p1.x - px, p1.y - py, p2.x - px, p2.y - py) > 0.0 {
                winding += 1;
            }
        } else if p2.y <= py && cross_product(p1.x - px, p1.y - py, p2.x - px, p2.y - py) < 0.0 {
            winding -= 1;
        }
    }

    winding
}

#[inline]
pub fn point_in_polygon_nonzero(px: f32, py: f32, polygon: &[Vec2]) -> bool {
    winding_number(px, py, polygon) != 0
}

#[inline]
fn cross_product(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ax * by - ay * bx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notched() -> Vec<Vec2> {
        // 10x10 square with a 4-wide rectangular notch cut from the top
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(7.0, 4.0),
            Vec2::new(7.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn notch_is_outside() {
        let poly = notched();
        assert!(point_in_polygon_nonzero(1.0, 1.0, &poly));
        assert!(!point_in_polygon_nonzero(5.0, 2.0, &poly));
        assert!(point_in_polygon_nonzero(5.0, 6.0, &poly));
        assert!(!point_in_polygon_nonzero(11.0, 5.0, &poly));
    }
}
