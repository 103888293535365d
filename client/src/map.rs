use std::sync::Arc;

use choropleth_shared::path::{svg_path, union, view_box};
use choropleth_shared::theme::LOW_COLOR;
use choropleth_shared::{
    ColorTheme, Input, MapModel, MapSession, Modifiers, Reaction, Rgb, Target, ThemeCycle,
    classes,
};
use geo::{Coord, Rect};
use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::animation::HueTransition;
use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, THEME_TRANSITION_MS};
use crate::legend::Legend;
use crate::render_loop::{FrameLoop, now_ms};
use crate::tooltip::Tooltip;

/// Shared handles for every component drawn inside the map.
///
/// The session itself is not reactive. Each dispatch bumps only the revision
/// its [`Reaction`] names, so a hover repaints the tooltip without touching
/// the six thousand class bindings on the paths.
#[derive(Clone, Copy)]
pub(crate) struct MapContext {
    pub model: StoredValue<Arc<MapModel>>,
    pub session: StoredValue<MapSession>,
    pub classes_rev: RwSignal<u64>,
    pub tooltip_rev: RwSignal<u64>,
    pub theme: RwSignal<ColorTheme>,
    /// High endpoint of the color scale as currently displayed.
    pub hue: RwSignal<Rgb>,
    /// Last pointer position in client coordinates.
    pub pointer: RwSignal<(f64, f64)>,
}

impl MapContext {
    pub fn dispatch(&self, target: Target, input: Input) -> Reaction {
        let reaction = self
            .session
            .try_update_value(|s| s.dispatch(target, input))
            .unwrap_or(Reaction::None);
        match reaction {
            Reaction::Classes => self.classes_rev.update(|r| *r = r.wrapping_add(1)),
            Reaction::Tooltip => self.tooltip_rev.update(|r| *r = r.wrapping_add(1)),
            Reaction::Theme(theme) => self.theme.set(theme),
            Reaction::None => {}
        }
        reaction
    }

    /// Fill for `value` under the displayed hue. Tracks `hue`.
    pub fn fill(&self, value: f64) -> String {
        let high = self.hue.get();
        self.model
            .with_value(|m| m.scales.color.with_endpoints(LOW_COLOR, high).color_of(value))
            .css()
    }

    pub fn tooltip_locked(&self) -> bool {
        self.session.with_value(|s| s.tooltip().locked)
    }
}

pub(crate) fn modifiers_of(ev: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: ev.shift_key(),
        ctrl: ev.ctrl_key(),
    }
}

#[component]
pub fn ChoroplethMap(model: Arc<MapModel>) -> impl IntoView {
    let session = MapSession::new(&model.regions, &model.scales.legend);
    let ctx = MapContext {
        model: StoredValue::new(model.clone()),
        session: StoredValue::new(session),
        classes_rev: RwSignal::new(0),
        tooltip_rev: RwSignal::new(0),
        theme: RwSignal::new(ThemeCycle::default().current()),
        hue: RwSignal::new(ThemeCycle::default().endpoints().1),
        pointer: RwSignal::new((0.0, 0.0)),
    };
    provide_context(ctx);

    let transition: StoredValue<Option<HueTransition>> = StoredValue::new(None);
    let frames = FrameLoop::new(move |now| {
        let Some(t) = transition.get_value() else {
            return false;
        };
        ctx.hue.set(t.color_at(now));
        if t.is_finished(now) {
            transition.set_value(None);
            return false;
        }
        true
    });

    let on_theme_click = move |_: MouseEvent| {
        let reaction = ctx.dispatch(Target::ThemeControl, Input::Click(Modifiers::NONE));
        let Reaction::Theme(theme) = reaction else {
            return;
        };
        let now = now_ms();
        let running = transition.get_value();
        let next = HueTransition::retarget(
            running.as_ref(),
            ctx.hue.get_untracked(),
            theme.hue(),
            now,
            THEME_TRANSITION_MS,
        );
        transition.set_value(Some(next));
        frames.start();
    };

    let on_pointer_move = move |ev: MouseEvent| {
        if !ctx.tooltip_locked() {
            ctx.pointer.set((f64::from(ev.client_x()), f64::from(ev.client_y())));
        }
    };

    let canvas = Rect::new(
        Coord { x: 0.0, y: 0.0 },
        Coord {
            x: CANVAS_WIDTH,
            y: CANVAS_HEIGHT,
        },
    );
    // Never clip geometry that spills past the nominal canvas.
    let view_box = view_box(&model.bounds.map_or(canvas, |b| union(&canvas, &b)));

    let counties = model
        .regions
        .iter()
        .enumerate()
        .map(|(i, region)| {
            let value = region.value();
            view! {
                <path
                    class=classes::COUNTY
                    class:highlight=move || {
                        ctx.classes_rev.track();
                        ctx.session.with_value(|s| s.county_state(i).highlighted)
                    }
                    class:fade=move || {
                        ctx.classes_rev.track();
                        ctx.session.with_value(|s| s.county_state(i).faded)
                    }
                    d=svg_path(&region.geometry.shape)
                    fill=move || ctx.fill(value)
                    data-fips=region.id().to_string()
                    data-state=region.statistic.parent_name.clone()
                    data-area_name=region.statistic.name.clone()
                    data-bachelors_or_higher=value.to_string()
                    on:mouseover=move |_: MouseEvent| {
                        ctx.dispatch(Target::County(i), Input::PointerEnter);
                    }
                    on:click=move |ev: MouseEvent| {
                        ctx.dispatch(Target::County(i), Input::Click(modifiers_of(&ev)));
                    }
                />
            }
        })
        .collect_view();

    let states = model
        .states
        .iter()
        .map(|state| {
            view! { <path class=classes::STATE d=svg_path(&state.shape) data-id=state.id.to_string() /> }
        })
        .collect_view();

    view! {
        <div class="map-frame">
            <button class=classes::COLOR_TOGGLE on:click=on_theme_click>
                {move || theme_button_label(ctx.theme.get())}
            </button>
            <svg
                class="map"
                viewBox=view_box
                preserveAspectRatio="xMidYMid meet"
                on:mousemove=on_pointer_move
            >
                <g class="counties">{counties}</g>
                <g class="states">{states}</g>
                <Legend />
            </svg>
            <Tooltip />
        </div>
    }
}

fn theme_button_label(current: ColorTheme) -> &'static str {
    match current.next() {
        ColorTheme::Green => "Switch to green",
        ColorTheme::Blue => "Switch to blue",
        ColorTheme::Red => "Switch to red",
    }
}
