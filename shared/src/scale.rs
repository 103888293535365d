//! Continuous color scale and the discretized legend derived from the observed
//! value range.

use crate::colors::{Rgb, lerp_rgb};
use crate::error::MapError;

pub const BUCKET_COUNT: usize = 8;

/// Gap left below each bucket's upper edge so a value sitting on a boundary
/// is claimed by the bucket above it only.
pub const BUCKET_EDGE_GAP: f64 = 0.01;

/// Target tick count for the legend axis.
pub const AXIS_TICK_COUNT: usize = 10;

/// `[min, max]` of the observed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Extent of `values`, skipping NaN. `None` when nothing is left.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    /// Position of `value` within the range, clamped to `0..=1`.
    /// A degenerate range maps everything to the middle.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Linear color scale from `low` at `range.min` to `high` at `range.max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub range: ValueRange,
    pub low: Rgb,
    pub high: Rgb,
}

impl ColorScale {
    pub fn new(range: ValueRange, low: Rgb, high: Rgb) -> Self {
        Self { range, low, high }
    }

    pub fn color_of(&self, value: f64) -> Rgb {
        lerp_rgb(self.low, self.high, self.range.normalize(value))
    }

    /// Same domain, different endpoints.
    pub fn with_endpoints(&self, low: Rgb, high: Rgb) -> Self {
        Self {
            range: self.range,
            low,
            high,
        }
    }
}

/// One legend swatch: `[lower, upper)` for layout, `[lower, upper - 0.01]`
/// for membership.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendBucket {
    pub lower: f64,
    pub upper: f64,
}

impl LegendBucket {
    /// Highest value still counted as a member.
    pub fn upper_inclusive(&self) -> f64 {
        self.upper - BUCKET_EDGE_GAP
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper_inclusive()
    }
}

/// Legend domain rounded out to multiples of ten, and its equal-width buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub buckets: Vec<LegendBucket>,
}

impl LegendScale {
    pub fn from_range(range: ValueRange) -> Self {
        let min = 10.0 * (range.min / 10.0).floor();
        let mut max = 10.0 * (range.max / 10.0).ceil();
        if max <= min {
            max = min + 10.0;
        }
        let step = (max - min) / BUCKET_COUNT as f64;
        let buckets = (0..BUCKET_COUNT)
            .map(|i| {
                let lower = min + step * i as f64;
                LegendBucket {
                    lower,
                    upper: lower + step,
                }
            })
            .collect();
        Self {
            min,
            max,
            step,
            buckets,
        }
    }

    /// Index of the bucket claiming `value`, if any.
    pub fn bucket_of(&self, value: f64) -> Option<usize> {
        self.buckets.iter().position(|b| b.contains(value))
    }

    /// Axis tick values over the legend domain.
    pub fn ticks(&self) -> Vec<f64> {
        ticks(self.min, self.max, AXIS_TICK_COUNT)
    }
}

/// Maps legend values onto a vertical pixel span, larger values higher up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionScale {
    pub domain: (f64, f64),
    /// `(bottom_px, top_px)`; bottom is the larger screen coordinate.
    pub range: (f64, f64),
}

impl PositionScale {
    pub fn new(domain: (f64, f64), bottom_px: f64, top_px: f64) -> Self {
        Self {
            domain,
            range: (bottom_px, top_px),
        }
    }

    pub fn position(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Everything derived from the statistic values in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    pub range: ValueRange,
    pub color: ColorScale,
    pub legend: LegendScale,
}

impl Scales {
    pub fn build(
        values: impl IntoIterator<Item = f64>,
        low: Rgb,
        high: Rgb,
    ) -> Result<Self, MapError> {
        let range = ValueRange::from_values(values)
            .ok_or_else(|| MapError::DataUnavailable("no statistic values to scale".into()))?;
        Ok(Self {
            range,
            color: ColorScale::new(range, low, high),
            legend: LegendScale::from_range(range),
        })
    }
}

/// "Nice" ticks covering `[start, stop]` with roughly `count` entries, using
/// increments of 1, 2 or 5 times a power of ten.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi, reversed) = if stop < start {
        (stop, start, true)
    } else {
        (start, stop, false)
    };

    let inc = tick_increment(lo, hi, count);
    let (first, last) = if inc > 0.0 {
        ((lo / inc).ceil(), (hi / inc).floor())
    } else {
        ((lo * -inc).ceil(), (hi * -inc).floor())
    };
    let n = (last - first + 1.0).max(0.0) as usize;
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let k = first + i as f64;
            if inc > 0.0 { k * inc } else { k / -inc }
        })
        .collect();
    if reversed {
        out.reverse();
    }
    out
}

/// Positive: the step. Negative: the reciprocal of the step (keeps small
/// steps exact).
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}
