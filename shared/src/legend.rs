use crate::scale::{BUCKET_COUNT, LegendBucket, LegendScale, PositionScale};
use crate::stats::format_percent;

pub const AXIS_HEIGHT: f64 = 200.0;
pub const RECT_WIDTH: f64 = 20.0;
pub const RECT_HEIGHT: f64 = AXIS_HEIGHT / BUCKET_COUNT as f64;
pub const PADDING_BOTTOM: f64 = 10.0;
pub const PADDING_RIGHT: f64 = 40.0;
/// Horizontal offset of the axis line from the swatch column's right edge.
pub const AXIS_OFFSET: f64 = 5.0;

/// Placement of the legend in the bottom-right corner of the map canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendLayout {
    pub canvas_width: f64,
    pub canvas_height: f64,
}

/// A positioned swatch for one bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendRect {
    pub index: usize,
    pub bucket: LegendBucket,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LegendRect {
    /// Value whose color fills the swatch.
    pub fn swatch_value(&self) -> f64 {
        self.bucket.upper_inclusive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

impl LegendLayout {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
        }
    }

    /// Legend values to pixel rows, stacked bottom-up.
    pub fn position_scale(&self, legend: &LegendScale) -> PositionScale {
        let bottom = self.canvas_height - PADDING_BOTTOM;
        PositionScale::new(
            (legend.min, legend.max),
            bottom,
            bottom - RECT_HEIGHT * BUCKET_COUNT as f64,
        )
    }

    pub fn axis_x(&self) -> f64 {
        self.canvas_width - PADDING_RIGHT + AXIS_OFFSET
    }

    pub fn rect_x(&self) -> f64 {
        self.canvas_width - RECT_WIDTH - PADDING_RIGHT
    }

    pub fn rects(&self, legend: &LegendScale) -> Vec<LegendRect> {
        let scale = self.position_scale(legend);
        legend
            .buckets
            .iter()
            .enumerate()
            .map(|(index, bucket)| LegendRect {
                index,
                bucket: *bucket,
                x: self.rect_x(),
                y: scale.position(bucket.upper),
                width: RECT_WIDTH,
                height: RECT_HEIGHT,
            })
            .collect()
    }

    pub fn ticks(&self, legend: &LegendScale) -> Vec<AxisTick> {
        let scale = self.position_scale(legend);
        legend
            .ticks()
            .into_iter()
            .map(|value| AxisTick {
                value,
                y: scale.position(value),
                label: format_percent(value),
            })
            .collect()
    }
}
