/// Same-origin mirrors of the upstream datasets (served by choropleth-server).
pub const COUNTIES_URL: &str = "/data/counties.json";
pub const EDUCATION_URL: &str = "/data/education.json";

/// SVG user-space size. The county topology is pre-projected into this box.
pub const CANVAS_WIDTH: f64 = 960.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Theme cross-fade length in milliseconds.
pub const THEME_TRANSITION_MS: f64 = 500.0;

/// Tooltip offset from the pointer, in CSS pixels.
pub const TOOLTIP_OFFSET: (f64, f64) = (16.0, -8.0);
