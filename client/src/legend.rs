use choropleth_shared::legend::LegendLayout;
use choropleth_shared::{Input, Target, classes};
use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::map::{MapContext, modifiers_of};

const TICK_SIZE: f64 = 6.0;

/// Bucket swatches plus the vertical percentage axis beside them.
#[component]
pub fn Legend() -> impl IntoView {
    let ctx = expect_context::<MapContext>();
    let layout = LegendLayout::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let (rects, ticks, domain) = ctx.model.with_value(|m| {
        let legend = &m.scales.legend;
        let scale = layout.position_scale(legend);
        (
            layout.rects(legend),
            layout.ticks(legend),
            (scale.position(legend.min), scale.position(legend.max)),
        )
    });

    let swatches = rects
        .into_iter()
        .map(|rect| {
            let b = rect.index;
            let swatch = rect.swatch_value();
            view! {
                <rect
                    class=classes::LEGEND_RECT
                    class:highlight=move || {
                        ctx.classes_rev.track();
                        ctx.session.with_value(|s| s.bucket_state(b).highlighted)
                    }
                    class:fade=move || {
                        ctx.classes_rev.track();
                        ctx.session.with_value(|s| s.bucket_state(b).faded)
                    }
                    x=rect.x.to_string()
                    y=rect.y.to_string()
                    width=rect.width.to_string()
                    height=rect.height.to_string()
                    fill=move || ctx.fill(swatch)
                    data-lower=rect.bucket.lower.to_string()
                    data-upper=rect.bucket.upper.to_string()
                    on:click=move |ev: MouseEvent| {
                        ctx.dispatch(Target::LegendBucket(b), Input::Click(modifiers_of(&ev)));
                    }
                />
            }
        })
        .collect_view();

    let tick_marks = ticks
        .into_iter()
        .map(|tick| {
            view! {
                <g class="tick" transform=format!("translate(0,{})", tick.y)>
                    <line x2=TICK_SIZE.to_string() stroke="currentColor" />
                    <text x=(TICK_SIZE + 3.0).to_string() dy="0.32em" fill="currentColor">
                        {tick.label}
                    </text>
                </g>
            }
        })
        .collect_view();

    let (bottom, top) = domain;
    view! {
        <g class="legend">
            {swatches}
            <g class=classes::LEGEND_AXIS transform=format!("translate({},0)", layout.axis_x())>
                <path
                    class="domain"
                    d=format!("M{TICK_SIZE},{bottom}H0V{top}H{TICK_SIZE}")
                    stroke="currentColor"
                    fill="none"
                />
                {tick_marks}
            </g>
        </g>
    }
}
