use choropleth_shared::{MapError, MapModel, RegionStatistic, Topology, load_together};
use serde::de::DeserializeOwned;

use crate::config::{COUNTIES_URL, EDUCATION_URL};

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, MapError> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| MapError::DataUnavailable(format!("fetch error: {e}")))?;
    if !resp.ok() {
        return Err(MapError::DataUnavailable(format!(
            "HTTP {} for {url}",
            resp.status()
        )));
    }
    resp.json::<T>()
        .await
        .map_err(|e| MapError::DataUnavailable(format!("parse error: {e}")))
}

/// Fetch the topology and the statistics together. Either failure fails the
/// whole load; nothing is decoded until both have arrived.
pub async fn load_map() -> Result<MapModel, MapError> {
    let model = load_together(
        fetch_json::<Topology>(COUNTIES_URL),
        fetch_json::<Vec<RegionStatistic>>(EDUCATION_URL),
    )
    .await?;
    web_sys::console::info_1(
        &format!(
            "built map with {} counties and {} states",
            model.regions.len(),
            model.states.len()
        )
        .into(),
    );
    Ok(model)
}
