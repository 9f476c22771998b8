// Centralized bounds for values that arrive from the host (data source / JSON config)

// Grid size caps; custom matrices beyond this are rejected by the binding
pub const MAX_GRID_LINES: usize = 512;

// Numeric bounds
pub const COORD_MAX: f32 = 10_000_000.0;
pub const HUMP_MAX: f32 = 10_000.0;
pub const WIDTH_MAX: f32 = 10_000.0;
pub const FLATTEN_TOL_MIN: f32 = 0.01;
pub const FLATTEN_TOL_MAX: f32 = 10.0;

#[inline]
pub fn in_size_bounds(x: f32) -> bool { x.is_finite() && x >= 0.0 && x <= COORD_MAX }

#[inline]
pub fn in_hump_bounds(h: f32) -> bool { h.is_finite() && h >= 0.0 && h <= HUMP_MAX }

#[inline]
pub fn in_width_bounds(w: f32) -> bool { w.is_finite() && w > 0.0 && w <= WIDTH_MAX }

#[inline]
pub fn in_unit_bounds(a: f32) -> bool { a.is_finite() && (0.0..=1.0).contains(&a) }

/// Hump width the view actually draws with: non-finite or negative values
/// give straight edges, oversized ones are capped.
#[inline]
pub fn sanitize_hump(h: f32) -> f32 { if h.is_finite() { h.clamp(0.0, HUMP_MAX) } else { 0.0 } }
