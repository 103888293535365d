use std::fmt;

use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from HSL components (h: 0..360, s: 0..1, l: 0..1).
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Self { r, g, b }
    }

    /// CSS functional notation, e.g. `rgb(0, 97, 0)`.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Convert HSL to RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    if s.abs() < f64::EPSILON {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Linear per-channel interpolation in RGB space. `t` is clamped to `0..=1`.
pub fn lerp_rgb(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    Rgb {
        r: lerp_u8(from.r, to.r, t),
        g: lerp_u8(from.g, to.g, t),
        b: lerp_u8(from.b, to.b, t),
    }
}

fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    let value = a as f64 + (b as f64 - a as f64) * t;
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::{Rgb, hsl_to_rgb, lerp_rgb};

    #[test]
    fn hsl_to_rgb_pure_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
    }

    #[test]
    fn hsl_to_rgb_gray_ignores_hue() {
        assert_eq!(hsl_to_rgb(42.0, 0.0, 0.5), (128, 128, 128));
        assert_eq!(hsl_to_rgb(300.0, 0.0, 1.0), (255, 255, 255));
    }

    #[test]
    fn dark_theme_hues_convert() {
        assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.19), Rgb::new(0, 97, 0));
        assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.19), Rgb::new(97, 0, 0));
        assert_eq!(Rgb::from_hsl(209.0, 1.0, 0.19), Rgb::new(0, 50, 97));
    }

    #[test]
    fn lerp_rgb_endpoints_and_midpoint() {
        let from = Rgb::WHITE;
        let to = Rgb::new(0, 97, 0);
        assert_eq!(lerp_rgb(from, to, 0.0), from);
        assert_eq!(lerp_rgb(from, to, 1.0), to);
        assert_eq!(lerp_rgb(from, to, 0.5), Rgb::new(128, 176, 128));
    }

    #[test]
    fn lerp_rgb_clamps_parameter() {
        let from = Rgb::new(10, 20, 30);
        let to = Rgb::new(200, 100, 0);
        assert_eq!(lerp_rgb(from, to, -3.0), from);
        assert_eq!(lerp_rgb(from, to, 7.5), to);
    }

    #[test]
    fn css_and_display_formats() {
        let color = Rgb::new(0, 97, 255);
        assert_eq!(color.css(), "rgb(0, 97, 255)");
        assert_eq!(color.to_string(), "#0061ff");
    }
}
