// Centralized tolerances for piece geometry

pub const EPS_POS: f32 = 1e-4;            // point coincidence threshold (px)
pub const EPS_LEN: f32 = 1e-6;            // zero-length vector threshold
pub const EPS_AREA: f32 = 1e-2;           // tiny contour area threshold (px^2)

// Default flattening tolerance for arcs (max chord deviation, px)
pub const DEFAULT_FLATTEN_TOL: f32 = 0.25;

// Arc flattening caps
pub const MIN_ARC_STEPS: u32 = 4;
pub const MAX_ARC_STEPS: u32 = 256;

#[inline] pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 { x.max(lo).min(hi) }
#[inline] pub fn near_zero(x: f32, eps: f32) -> bool { x.abs() <= eps }
#[inline] pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool { (a - b).abs() <= eps }

#[inline]
pub fn norm2(mut x: f32, mut y: f32) -> ((f32,f32), f32) {
    let len = (x*x + y*y).sqrt();
    if len > EPS_LEN { x/=len; y/=len; ((x,y), len) } else { ((0.0,0.0), 0.0) }
}
