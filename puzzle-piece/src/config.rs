use serde::{Deserialize, Serialize};

use crate::geometry::limits;
use crate::geometry::tolerance::{clamp, DEFAULT_FLATTEN_TOL};
use crate::model::Color;

/// Styling and tuning knobs for a puzzle view. Every field is optional in
/// JSON; missing ones take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Grid outline stroke.
    pub line_color: Color,
    pub line_width: f32,
    /// Opacity of the dark overlay above the background image.
    pub dim_alpha: f32,
    /// Max chord deviation when flattening humps for hit testing.
    pub flatten_tolerance: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            line_color: Color { r: 51, g: 51, b: 51, a: 128 },
            line_width: 0.5,
            dim_alpha: 0.8,
            flatten_tolerance: DEFAULT_FLATTEN_TOL,
        }
    }
}

impl ViewConfig {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<ViewConfig>(s).map(ViewConfig::sanitized)
    }

    /// Replaces out-of-range values with defaults (or clamps them).
    pub fn sanitized(mut self) -> Self {
        let d = ViewConfig::default();
        if !limits::in_width_bounds(self.line_width) {
            self.line_width = d.line_width;
        }
        if !limits::in_unit_bounds(self.dim_alpha) {
            self.dim_alpha = if self.dim_alpha.is_finite() { clamp(self.dim_alpha, 0.0, 1.0) } else { d.dim_alpha };
        }
        self.flatten_tolerance = if self.flatten_tolerance.is_finite() {
            clamp(self.flatten_tolerance, limits::FLATTEN_TOL_MIN, limits::FLATTEN_TOL_MAX)
        } else {
            d.flatten_tolerance
        };
        self
    }
}
