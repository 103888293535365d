use choropleth_shared::Rgb;
use choropleth_shared::colors::lerp_rgb;

/// A linear cross-fade of the scale's high endpoint.
///
/// Every fill is `lerp(white, hue, s)`, so fading each element from its old
/// to its new color is the same as fading the hue itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueTransition {
    pub from: Rgb,
    pub to: Rgb,
    pub start_time: f64,
    pub duration: f64, // milliseconds
}

impl HueTransition {
    pub fn new(from: Rgb, to: Rgb, start_time: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start_time,
            duration,
        }
    }

    /// Start a transition toward `to` from whatever `current` is showing at
    /// `now`. A running transition is overridden, not queued.
    pub fn retarget(
        current: Option<&HueTransition>,
        resting: Rgb,
        to: Rgb,
        now: f64,
        duration: f64,
    ) -> Self {
        let from = current.map(|t| t.color_at(now)).unwrap_or(resting);
        Self::new(from, to, now, duration)
    }

    /// Interpolated hue at `now`; holds the final color once finished.
    pub fn color_at(&self, now: f64) -> Rgb {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (now - self.start_time) / self.duration;
        lerp_rgb(self.from, self.to, t)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.start_time >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Rgb = Rgb::new(0, 97, 0);
    const BLUE: Rgb = Rgb::new(0, 50, 97);
    const RED: Rgb = Rgb::new(97, 0, 0);

    #[test]
    fn starts_at_from_and_holds_final_color() {
        let t = HueTransition::new(GREEN, BLUE, 1_000.0, 500.0);
        assert_eq!(t.color_at(1_000.0), GREEN);
        assert_eq!(t.color_at(1_500.0), BLUE);
        assert_eq!(t.color_at(9_999.0), BLUE);
        assert!(!t.is_finished(1_499.0));
        assert!(t.is_finished(1_500.0));
    }

    #[test]
    fn interpolates_linearly() {
        let t = HueTransition::new(GREEN, RED, 0.0, 500.0);
        assert_eq!(t.color_at(250.0), Rgb::new(49, 49, 0));
    }

    #[test]
    fn retarget_starts_from_displayed_color() {
        let running = HueTransition::new(GREEN, BLUE, 0.0, 500.0);
        let next = HueTransition::retarget(Some(&running), BLUE, RED, 250.0, 500.0);
        assert_eq!(next.from, running.color_at(250.0));
        assert_eq!(next.to, RED);
        assert_eq!(next.start_time, 250.0);

        let idle = HueTransition::retarget(None, BLUE, RED, 10.0, 500.0);
        assert_eq!(idle.from, BLUE);
    }

    #[test]
    fn zero_duration_jumps() {
        let t = HueTransition::new(GREEN, RED, 0.0, 0.0);
        assert_eq!(t.color_at(0.0), RED);
        assert!(t.is_finished(0.0));
    }
}
