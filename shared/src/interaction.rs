//! Hover, lock, fade and highlight behavior across the two linked element
//! collections (counties and legend buckets).
//!
//! All mutable view state lives in [`MapSession`]. The render surface turns
//! DOM events into a [`Target`] plus an [`Input`], calls
//! [`MapSession::dispatch`], and repaints whatever the returned [`Reaction`]
//! names. Elements refer back to their data by index only.

use crate::classes;
use crate::join::CombinedRegion;
use crate::scale::{LegendBucket, LegendScale};
use crate::stats::format_percent;
use crate::theme::{ColorTheme, ThemeCycle};

/// Independent per-element flags. Both may be set at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisualState {
    pub highlighted: bool,
    pub faded: bool,
}

impl VisualState {
    /// Extra CSS classes for the current flags.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(2);
        if self.highlighted {
            out.push(classes::HIGHLIGHT);
        }
        if self.faded {
            out.push(classes::FADE);
        }
        out
    }
}

/// Keyboard modifiers held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };
    pub const SHIFT_CTRL: Modifiers = Modifiers {
        shift: true,
        ctrl: true,
    };

    pub fn bucket_action(self) -> BucketAction {
        match (self.shift, self.ctrl) {
            (true, true) => BucketAction::Isolate,
            (true, false) => BucketAction::ToggleFade,
            // ctrl alone behaves like a plain click
            (false, _) => BucketAction::ToggleHighlight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketAction {
    /// Fade everything except the clicked bucket and its counties.
    Isolate,
    ToggleFade,
    ToggleHighlight,
}

/// Element role an input was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    County(usize),
    LegendBucket(usize),
    ThemeControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    PointerEnter,
    Click(Modifiers),
}

/// What the render surface has to repaint after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    None,
    Tooltip,
    Classes,
    Theme(ColorTheme),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub name: String,
    pub parent_name: String,
    pub value: f64,
}

impl TooltipContent {
    fn from_region(region: &CombinedRegion) -> Self {
        Self {
            name: region.statistic.name.clone(),
            parent_name: region.statistic.parent_name.clone(),
            value: region.statistic.value,
        }
    }

    /// Display lines: `"Autauga County,"`, `"AL"`, `"21.9%"`.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("{},", self.name),
            self.parent_name.clone(),
            format_percent(self.value),
        ]
    }
}

/// The single page-wide tooltip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    pub locked: bool,
    pub content: Option<TooltipContent>,
}

#[derive(Debug, Clone, PartialEq)]
struct CountyEntry {
    value: f64,
    tooltip: TooltipContent,
    state: VisualState,
}

#[derive(Debug, Clone, PartialEq)]
struct BucketEntry {
    bucket: LegendBucket,
    /// Indices of member counties, ascending.
    members: Vec<usize>,
    state: VisualState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSession {
    counties: Vec<CountyEntry>,
    buckets: Vec<BucketEntry>,
    tooltip: TooltipState,
    theme: ThemeCycle,
}

/// Whether `value` counts toward `bucket`.
pub fn is_in_bucket(value: f64, bucket: &LegendBucket) -> bool {
    bucket.contains(value)
}

impl MapSession {
    /// County `i` here is `regions[i]`; bucket `b` is `legend.buckets[b]`.
    pub fn new(regions: &[CombinedRegion], legend: &LegendScale) -> Self {
        let counties: Vec<CountyEntry> = regions
            .iter()
            .map(|region| CountyEntry {
                value: region.value(),
                tooltip: TooltipContent::from_region(region),
                state: VisualState::default(),
            })
            .collect();
        let buckets = legend
            .buckets
            .iter()
            .map(|bucket| BucketEntry {
                bucket: *bucket,
                members: counties
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| is_in_bucket(c.value, bucket))
                    .map(|(i, _)| i)
                    .collect(),
                state: VisualState::default(),
            })
            .collect();
        Self {
            counties,
            buckets,
            tooltip: TooltipState::default(),
            theme: ThemeCycle::default(),
        }
    }

    pub fn county_count(&self) -> usize {
        self.counties.len()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn county_state(&self, index: usize) -> VisualState {
        self.counties
            .get(index)
            .map(|c| c.state)
            .unwrap_or_default()
    }

    pub fn bucket_state(&self, index: usize) -> VisualState {
        self.buckets
            .get(index)
            .map(|b| b.state)
            .unwrap_or_default()
    }

    pub fn bucket_members(&self, index: usize) -> &[usize] {
        self.buckets
            .get(index)
            .map(|b| b.members.as_slice())
            .unwrap_or(&[])
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn theme(&self) -> ColorTheme {
        self.theme.current()
    }

    /// Route an input to the handler registered for the target's role.
    pub fn dispatch(&mut self, target: Target, input: Input) -> Reaction {
        match (target, input) {
            (Target::County(i), Input::PointerEnter) => self.enter_county(i),
            (Target::County(i), Input::Click(_)) => self.click_county(i),
            (Target::LegendBucket(b), Input::Click(modifiers)) => self.click_bucket(b, modifiers),
            (Target::ThemeControl, Input::Click(_)) => Reaction::Theme(self.toggle_theme()),
            (Target::LegendBucket(_), Input::PointerEnter)
            | (Target::ThemeControl, Input::PointerEnter) => Reaction::None,
        }
    }

    /// Show the county in the tooltip unless the tooltip is locked.
    pub fn enter_county(&mut self, index: usize) -> Reaction {
        if self.tooltip.locked {
            return Reaction::None;
        }
        let Some(county) = self.counties.get(index) else {
            return Reaction::None;
        };
        self.tooltip.content = Some(county.tooltip.clone());
        Reaction::Tooltip
    }

    /// Any county click flips the page-wide tooltip lock.
    pub fn click_county(&mut self, index: usize) -> Reaction {
        if index >= self.counties.len() {
            return Reaction::None;
        }
        self.tooltip.locked = !self.tooltip.locked;
        Reaction::Tooltip
    }

    pub fn click_bucket(&mut self, index: usize, modifiers: Modifiers) -> Reaction {
        if index >= self.buckets.len() {
            return Reaction::None;
        }
        match modifiers.bucket_action() {
            BucketAction::Isolate => self.isolate(index),
            BucketAction::ToggleFade => self.toggle(index, |s| &mut s.faded),
            BucketAction::ToggleHighlight => self.toggle(index, |s| &mut s.highlighted),
        }
        Reaction::Classes
    }

    pub fn toggle_theme(&mut self) -> ColorTheme {
        self.theme.advance()
    }

    fn isolate(&mut self, index: usize) {
        for (b, bucket) in self.buckets.iter_mut().enumerate() {
            bucket.state.faded = b != index;
        }
        for county in &mut self.counties {
            county.state.faded = true;
        }
        for &member in &self.buckets[index].members {
            self.counties[member].state.faded = false;
        }
    }

    fn toggle(&mut self, index: usize, flag: impl Fn(&mut VisualState) -> &mut bool) {
        let bucket = &mut self.buckets[index];
        let f = flag(&mut bucket.state);
        *f = !*f;
        for &member in &bucket.members {
            let f = flag(&mut self.counties[member].state);
            *f = !*f;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ValueRange;
    use crate::stats::RegionStatistic;
    use crate::topology::{RegionGeometry, Shape};

    fn region(id: u32, value: f64) -> CombinedRegion {
        CombinedRegion {
            statistic: RegionStatistic {
                id,
                parent_name: "AL".into(),
                name: format!("County {id}"),
                value,
            },
            geometry: RegionGeometry {
                id,
                shape: Shape::Empty,
            },
        }
    }

    /// Legend 10..80 in 8.75-wide buckets.
    fn session() -> MapSession {
        let regions = vec![
            region(1, 10.8),
            region(2, 12.0),
            region(3, 45.0),
            region(4, 44.9),
            region(5, 74.7),
            region(6, 50.0),
        ];
        let legend = LegendScale::from_range(ValueRange {
            min: 10.8,
            max: 74.7,
        });
        MapSession::new(&regions, &legend)
    }

    fn county_flags(session: &MapSession) -> Vec<VisualState> {
        (0..session.county_count())
            .map(|i| session.county_state(i))
            .collect()
    }

    fn bucket_flags(session: &MapSession) -> Vec<VisualState> {
        (0..session.bucket_count())
            .map(|i| session.bucket_state(i))
            .collect()
    }

    #[test]
    fn membership_is_precomputed_per_bucket() {
        let s = session();
        assert_eq!(s.bucket_members(0), &[0, 1]);
        assert_eq!(s.bucket_members(3), &[3]);
        assert_eq!(s.bucket_members(4), &[2, 5]);
        assert_eq!(s.bucket_members(7), &[4]);
        assert!(s.bucket_members(1).is_empty());
        assert!(s.bucket_members(99).is_empty());
    }

    #[test]
    fn boundary_value_is_in_exactly_one_bucket() {
        let legend = LegendScale::from_range(ValueRange {
            min: 10.8,
            max: 74.7,
        });
        let owners: Vec<usize> = legend
            .buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| is_in_bucket(45.0, b))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(owners, vec![4]);
    }

    #[test]
    fn plain_click_toggles_highlight_on_bucket_and_members() {
        let mut s = session();
        let reaction = s.dispatch(Target::LegendBucket(4), Input::Click(Modifiers::NONE));
        assert_eq!(reaction, Reaction::Classes);
        assert!(s.bucket_state(4).highlighted);
        assert!(s.county_state(2).highlighted);
        assert!(s.county_state(5).highlighted);
        assert!(!s.county_state(3).highlighted);
        assert!(!s.bucket_state(3).highlighted);
    }

    #[test]
    fn double_highlight_restores_original_flags() {
        let mut s = session();
        s.click_bucket(0, Modifiers::SHIFT);
        let before_counties = county_flags(&s);
        let before_buckets = bucket_flags(&s);

        s.click_bucket(4, Modifiers::NONE);
        s.click_bucket(4, Modifiers::NONE);

        assert_eq!(county_flags(&s), before_counties);
        assert_eq!(bucket_flags(&s), before_buckets);
    }

    #[test]
    fn shift_click_toggles_fade_only() {
        let mut s = session();
        s.click_bucket(0, Modifiers::SHIFT);
        assert!(s.bucket_state(0).faded);
        assert!(s.county_state(0).faded && s.county_state(1).faded);
        assert!(!s.county_state(2).faded);
        assert!(county_flags(&s).iter().all(|f| !f.highlighted));

        s.click_bucket(0, Modifiers::SHIFT);
        assert!(county_flags(&s).iter().all(|f| !f.faded));
        assert!(!s.bucket_state(0).faded);
    }

    #[test]
    fn ctrl_alone_is_a_plain_click() {
        let mut s = session();
        s.click_bucket(7, Modifiers { shift: false, ctrl: true });
        assert!(s.bucket_state(7).highlighted);
        assert!(!s.bucket_state(7).faded);
    }

    #[test]
    fn isolate_fades_everything_else() {
        let mut s = session();
        s.click_bucket(4, Modifiers::SHIFT_CTRL);
        for b in 0..s.bucket_count() {
            assert_eq!(s.bucket_state(b).faded, b != 4, "bucket {b}");
        }
        let faded: Vec<bool> = county_flags(&s).iter().map(|f| f.faded).collect();
        assert_eq!(faded, vec![true, true, false, true, true, false]);
    }

    #[test]
    fn isolate_is_idempotent_regardless_of_prior_fade() {
        let mut fresh = session();
        fresh.click_bucket(0, Modifiers::SHIFT_CTRL);

        let mut messy = session();
        messy.click_bucket(0, Modifiers::SHIFT);
        messy.click_bucket(4, Modifiers::SHIFT);
        messy.click_bucket(7, Modifiers::SHIFT_CTRL);
        messy.click_bucket(0, Modifiers::SHIFT_CTRL);
        messy.click_bucket(0, Modifiers::SHIFT_CTRL);

        assert_eq!(county_flags(&messy), county_flags(&fresh));
        assert_eq!(bucket_flags(&messy), bucket_flags(&fresh));
    }

    #[test]
    fn highlight_and_fade_coexist() {
        let mut s = session();
        s.click_bucket(4, Modifiers::NONE);
        s.click_bucket(4, Modifiers::SHIFT);
        let state = s.county_state(2);
        assert!(state.highlighted && state.faded);
        assert_eq!(state.classes(), vec!["highlight", "fade"]);
        assert!(s.county_state(0).classes().is_empty());
    }

    #[test]
    fn pointer_enter_fills_tooltip_until_locked() {
        let mut s = session();
        assert_eq!(
            s.dispatch(Target::County(2), Input::PointerEnter),
            Reaction::Tooltip
        );
        let content = s.tooltip().content.clone().expect("tooltip content");
        assert_eq!(
            content.lines(),
            ["County 3,".to_string(), "AL".to_string(), "45%".to_string()]
        );

        assert_eq!(
            s.dispatch(Target::County(2), Input::Click(Modifiers::NONE)),
            Reaction::Tooltip
        );
        assert!(s.tooltip().locked);
        assert_eq!(
            s.dispatch(Target::County(0), Input::PointerEnter),
            Reaction::None
        );
        assert_eq!(s.tooltip().content.as_ref().map(|c| c.value), Some(45.0));

        // any county unlocks
        s.dispatch(Target::County(5), Input::Click(Modifiers::SHIFT));
        assert!(!s.tooltip().locked);
        s.dispatch(Target::County(0), Input::PointerEnter);
        assert_eq!(s.tooltip().content.as_ref().map(|c| c.value), Some(10.8));
    }

    #[test]
    fn theme_control_cycles_and_wraps() {
        let mut s = session();
        let click = Input::Click(Modifiers::NONE);
        assert_eq!(
            s.dispatch(Target::ThemeControl, click),
            Reaction::Theme(ColorTheme::Blue)
        );
        assert_eq!(
            s.dispatch(Target::ThemeControl, click),
            Reaction::Theme(ColorTheme::Red)
        );
        assert_eq!(
            s.dispatch(Target::ThemeControl, click),
            Reaction::Theme(ColorTheme::Green)
        );
        assert_eq!(s.theme(), ColorTheme::Green);
    }

    #[test]
    fn out_of_range_targets_are_ignored() {
        let mut s = session();
        let before = s.clone();
        assert_eq!(
            s.dispatch(Target::County(100), Input::PointerEnter),
            Reaction::None
        );
        assert_eq!(
            s.dispatch(Target::County(100), Input::Click(Modifiers::NONE)),
            Reaction::None
        );
        assert_eq!(
            s.dispatch(Target::LegendBucket(8), Input::Click(Modifiers::SHIFT_CTRL)),
            Reaction::None
        );
        assert_eq!(
            s.dispatch(Target::LegendBucket(0), Input::PointerEnter),
            Reaction::None
        );
        assert_eq!(s, before);
    }
}
