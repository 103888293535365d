use choropleth_shared::classes;
use leptos::prelude::*;

use crate::config::TOOLTIP_OFFSET;
use crate::map::MapContext;

#[component]
pub fn Tooltip() -> impl IntoView {
    let ctx = expect_context::<MapContext>();

    let content = move || {
        ctx.tooltip_rev.track();
        ctx.session.with_value(|s| s.tooltip().content.clone())
    };
    let locked = move || {
        ctx.tooltip_rev.track();
        ctx.tooltip_locked()
    };

    view! {
        <div
            class=classes::TOOLTIP
            class:locked=locked
            style:display=move || if content().is_some() { "block" } else { "none" }
            style:left=move || format!("{}px", ctx.pointer.get().0 + TOOLTIP_OFFSET.0)
            style:top=move || format!("{}px", ctx.pointer.get().1 + TOOLTIP_OFFSET.1)
        >
            {move || {
                content()
                    .map(|c| {
                        let [name, parent, value] = c.lines();
                        view! {
                            <span class="tooltip-name">{name}</span>
                            <br />
                            <span class="tooltip-parent">{parent}</span>
                            <br />
                            <br />
                            <span class="tooltip-value">{value}</span>
                        }
                    })
            }}
        </div>
    }
}
