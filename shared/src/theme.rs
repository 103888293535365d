use crate::colors::Rgb;

/// The fixed hue cycle, as HSL triples (h: 0..360, s: 0..1, l: 0..1).
pub const THEME_HSL: [(f64, f64, f64); 3] = [
    (120.0, 1.0, 0.19),
    (209.0, 1.0, 0.19),
    (0.0, 1.0, 0.19),
];

/// Color used for the low end of every theme.
pub const LOW_COLOR: Rgb = Rgb::WHITE;

/// One entry of the theme cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTheme {
    Green,
    Blue,
    Red,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 3] = [ColorTheme::Green, ColorTheme::Blue, ColorTheme::Red];

    pub fn index(self) -> usize {
        match self {
            ColorTheme::Green => 0,
            ColorTheme::Blue => 1,
            ColorTheme::Red => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// High-end color of the continuous scale for this theme.
    pub fn hue(self) -> Rgb {
        let (h, s, l) = THEME_HSL[self.index()];
        Rgb::from_hsl(h, s, l)
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Current position in the theme cycle. Lives for the page session only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeCycle {
    current: ColorTheme,
}

impl Default for ThemeCycle {
    fn default() -> Self {
        Self {
            current: ColorTheme::Green,
        }
    }
}

impl ThemeCycle {
    pub fn current(&self) -> ColorTheme {
        self.current
    }

    /// Step to the next theme, wrapping after the last one.
    pub fn advance(&mut self) -> ColorTheme {
        self.current = self.current.next();
        self.current
    }

    /// `(low, high)` endpoint colors of the active theme.
    pub fn endpoints(&self) -> (Rgb, Rgb) {
        (LOW_COLOR, self.current.hue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_starts_green_and_wraps() {
        let mut cycle = ThemeCycle::default();
        assert_eq!(cycle.current(), ColorTheme::Green);
        assert_eq!(cycle.advance(), ColorTheme::Blue);
        assert_eq!(cycle.advance(), ColorTheme::Red);
        assert_eq!(cycle.advance(), ColorTheme::Green);
        assert_eq!(cycle.current().index(), 0);
    }

    #[test]
    fn hues_are_distinct() {
        let hues: Vec<Rgb> = ColorTheme::ALL.iter().map(|t| t.hue()).collect();
        assert_ne!(hues[0], hues[1]);
        assert_ne!(hues[1], hues[2]);
        assert_ne!(hues[0], hues[2]);
    }

    #[test]
    fn endpoints_use_white_low() {
        let cycle = ThemeCycle::default();
        assert_eq!(cycle.endpoints(), (Rgb::WHITE, Rgb::new(0, 97, 0)));
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(ColorTheme::from_index(3), ColorTheme::Green);
        assert_eq!(ColorTheme::from_index(5), ColorTheme::Red);
    }
}
