//! CSS class names shared between the renderer and the stylesheet.

pub const COUNTY: &str = "county";
pub const STATE: &str = "state";
pub const LEGEND_RECT: &str = "legend-rect";
pub const LEGEND_AXIS: &str = "legend-axis";
pub const HIGHLIGHT: &str = "highlight";
pub const FADE: &str = "fade";
pub const LOCKED: &str = "locked";
pub const TOOLTIP: &str = "tooltip";
pub const COLOR_TOGGLE: &str = "color-toggle";
