use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::config::DATASET_CACHE_CONTROL;
use crate::state::{AppState, Dataset};

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    let datasets: serde_json::Map<String, serde_json::Value> = Dataset::ALL
        .into_iter()
        .map(|dataset| {
            let entry = match state.cached(dataset) {
                Some(cached) => serde_json::json!({
                    "loaded": true,
                    "bytes": cached.body.len(),
                    "etag": cached.etag,
                    "fetched_at": cached.fetched_at.to_rfc3339(),
                }),
                None => serde_json::json!({ "loaded": false }),
            };
            (dataset.name().to_owned(), entry)
        })
        .collect();
    let ready = Dataset::ALL
        .into_iter()
        .all(|dataset| state.datasets.contains_key(&dataset));

    Json(serde_json::json!({
        "status": if ready { "ok" } else { "degraded" },
        "datasets": datasets,
        "observability": observability,
    }))
}

pub async fn get_counties(State(state): State<AppState>, headers: HeaderMap) -> Response {
    serve_dataset(&state, &headers, Dataset::Counties)
}

pub async fn get_education(State(state): State<AppState>, headers: HeaderMap) -> Response {
    serve_dataset(&state, &headers, Dataset::Education)
}

/// Serve the cached upstream bytes as-is; they were validated when fetched.
fn serve_dataset(state: &AppState, headers: &HeaderMap, dataset: Dataset) -> Response {
    state.observability.record_dataset_request();
    let Some(cached) = state.cached(dataset) else {
        state.observability.record_unavailable();
        return unavailable_response(dataset);
    };

    if if_none_match_matches(headers, &cached.etag) {
        state.observability.record_not_modified();
        return not_modified_response(DATASET_CACHE_CONTROL, Some(cached.etag.as_str()));
    }

    json_bytes_response(
        (*cached.body).clone(),
        DATASET_CACHE_CONTROL,
        Some(cached.etag.as_str()),
    )
}

fn unavailable_response(dataset: Dataset) -> Response {
    let body = serde_json::json!({
        "error": format!("{} dataset has not been loaded yet", dataset.name()),
    });
    let mut response = (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    response
}

fn json_bytes_response(body: Bytes, cache_control: &'static str, etag: Option<&str>) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn not_modified_response(cache_control: &'static str, etag: Option<&str>) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn normalize_etag(candidate: &str) -> &str {
    candidate.strip_prefix("W/").unwrap_or(candidate).trim()
}

fn if_none_match_matches(headers: &HeaderMap, etag: &str) -> bool {
    let Some(value) = headers.get(header::IF_NONE_MATCH) else {
        return false;
    };
    let Ok(raw) = value.to_str() else {
        return false;
    };

    raw.split(',').any(|candidate| {
        let candidate = candidate.trim();
        candidate == "*" || normalize_etag(candidate) == normalize_etag(etag)
    })
}
