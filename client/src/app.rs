use std::sync::Arc;

use choropleth_shared::MapModel;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::loader;
use crate::map::ChoroplethMap;

#[derive(Clone)]
pub(crate) enum LoadState {
    Loading,
    Ready(Arc<MapModel>),
    Failed(String),
}

fn set_loading_shell_step(step: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    if let Some(step_el) = document.get_element_by_id("app-loading-step") {
        step_el.set_text_content(Some(step));
    }
}

/// Root application component. Loads both datasets once, then hands the
/// joined model to the map.
#[component]
pub fn App() -> impl IntoView {
    let load: RwSignal<LoadState> = RwSignal::new(LoadState::Loading);

    Effect::new(move || {
        set_loading_shell_step("Fetching county boundaries and statistics");
        spawn_local(async move {
            match loader::load_map().await {
                Ok(model) => {
                    web_sys::console::info_1(
                        &format!("joined {} counties", model.regions.len()).into(),
                    );
                    load.set(LoadState::Ready(Arc::new(model)));
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("Map load failed: {e}").into());
                    load.set(LoadState::Failed(e.to_string()));
                }
            }
        });
    });

    view! {
        <main class="page">
            <h1 id="title">"United States Educational Attainment"</h1>
            <p id="description">
                "Percentage of adults age 25 and older with a bachelor's degree or higher (2010-2014)"
            </p>
            {move || match load.get() {
                LoadState::Loading => {
                    view! { <p id="app-loading-step" class="loading">"Loading map data\u{2026}"</p> }
                        .into_any()
                }
                LoadState::Ready(model) => view! { <ChoroplethMap model=model /> }.into_any(),
                LoadState::Failed(message) => {
                    view! {
                        <div class="load-error" role="alert">
                            "The map could not be drawn: "
                            {message}
                        </div>
                    }
                        .into_any()
                }
            }}
        </main>
    }
}
