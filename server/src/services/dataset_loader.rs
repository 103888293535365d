use bytes::Bytes;
use chrono::Utc;
use choropleth_shared::MapError;
use choropleth_shared::model::{COUNTIES_OBJECT, STATES_OBJECT};
use choropleth_shared::stats::parse_statistics;
use choropleth_shared::topology::Topology;
use tracing::{info, warn};

use crate::config::dataset_refresh_interval;
use crate::state::{AppState, CachedDataset, Dataset};

pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(dataset_refresh_interval());

    // First tick fires immediately, so the cache fills at startup.
    loop {
        interval.tick().await;
        refresh_all(&state).await;
    }
}

/// Fetch both datasets concurrently. A failed or invalid payload leaves the
/// previous copy in place.
pub async fn refresh_all(state: &AppState) {
    let (counties, education) = futures::join!(
        refresh(state, Dataset::Counties),
        refresh(state, Dataset::Education),
    );
    state.observability.record_refresh();
    for (dataset, result) in [(Dataset::Counties, counties), (Dataset::Education, education)] {
        if let Err(e) = result {
            state.observability.record_upstream_error();
            warn!(dataset = dataset.name(), error = %e, "dataset refresh failed");
        }
    }
}

async fn refresh(state: &AppState, dataset: Dataset) -> Result<(), MapError> {
    let url = state.upstreams.url(dataset);
    let body = fetch_bytes(&state.http_client, url).await?;
    validate(dataset, &body)?;

    let cached = CachedDataset::new(body, Utc::now());
    let unchanged = state
        .cached(dataset)
        .is_some_and(|previous| previous.etag == cached.etag);
    info!(
        dataset = dataset.name(),
        bytes = cached.body.len(),
        etag = %cached.etag,
        unchanged,
        "dataset loaded"
    );
    state.store(dataset, cached);
    Ok(())
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Bytes, MapError> {
    let resp = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| MapError::DataUnavailable(format!("fetch error: {e}")))?;
    resp.bytes()
        .await
        .map_err(|e| MapError::DataUnavailable(format!("read error: {e}")))
}

/// Decode the payload with the same types the client uses, so a broken
/// upstream never replaces a good cached copy.
pub fn validate(dataset: Dataset, body: &[u8]) -> Result<(), MapError> {
    match dataset {
        Dataset::Counties => {
            let topology = Topology::from_slice(body)?;
            for object in [COUNTIES_OBJECT, STATES_OBJECT] {
                if !topology.has_object(object) {
                    return Err(MapError::DataUnavailable(format!(
                        "topology has no `{object}` object"
                    )));
                }
            }
        }
        Dataset::Education => {
            if parse_statistics(body)?.is_empty() {
                return Err(MapError::DataUnavailable(
                    "statistics feed is empty".into(),
                ));
            }
        }
    }
    Ok(())
}
