use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::warn;

use crate::config::{
    counties_url, education_url, static_dir, upstream_connect_timeout, upstream_http_timeout,
};

/// The two documents the map is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Counties,
    Education,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::Counties, Dataset::Education];

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Counties => "counties",
            Dataset::Education => "education",
        }
    }
}

/// Where each dataset is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstreams {
    pub counties: String,
    pub education: String,
}

impl Upstreams {
    pub fn from_env() -> Self {
        Self {
            counties: counties_url(),
            education: education_url(),
        }
    }

    pub fn url(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Counties => &self.counties,
            Dataset::Education => &self.education,
        }
    }
}

/// A validated upstream payload, kept as the exact bytes served to clients.
#[derive(Debug, Clone)]
pub struct CachedDataset {
    pub body: Arc<Bytes>,
    pub etag: String,
    pub fetched_at: DateTime<Utc>,
}

impl CachedDataset {
    pub fn new(body: Bytes, fetched_at: DateTime<Utc>) -> Self {
        let etag = format!("\"{:08x}\"", crc32fast::hash(&body));
        Self {
            body: Arc::new(body),
            etag,
            fetched_at,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub datasets: Arc<DashMap<Dataset, CachedDataset>>,
    pub upstreams: Arc<Upstreams>,
    pub static_dir: Arc<str>,
    pub http_client: reqwest::Client,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    dataset_requests_total: AtomicU64,
    not_modified_total: AtomicU64,
    unavailable_total: AtomicU64,
    upstream_errors_total: AtomicU64,
    refreshes_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObservabilitySnapshot {
    pub dataset_requests_total: u64,
    pub not_modified_total: u64,
    pub unavailable_total: u64,
    pub upstream_errors_total: u64,
    pub refreshes_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            dataset_requests_total: self.dataset_requests_total.load(Ordering::Relaxed),
            not_modified_total: self.not_modified_total.load(Ordering::Relaxed),
            unavailable_total: self.unavailable_total.load(Ordering::Relaxed),
            upstream_errors_total: self.upstream_errors_total.load(Ordering::Relaxed),
            refreshes_total: self.refreshes_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_dataset_request(&self) {
        self.dataset_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_modified(&self) {
        self.not_modified_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unavailable(&self) {
        self.unavailable_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_upstream_error(&self) {
        self.upstream_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_refresh(&self) {
        self.refreshes_total.fetch_add(1, Ordering::Relaxed);
    }
}

impl AppState {
    pub fn new(upstreams: Upstreams, static_dir: impl Into<Arc<str>>) -> Self {
        let request_timeout = upstream_http_timeout();
        let connect_timeout = upstream_connect_timeout();
        let http_client = reqwest::Client::builder()
            .user_agent("choropleth-map/0.1")
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    error = %e,
                    "failed to build configured HTTP client, falling back to defaults"
                );
                reqwest::Client::new()
            });
        Self {
            datasets: Arc::new(DashMap::new()),
            upstreams: Arc::new(upstreams),
            static_dir: static_dir.into(),
            http_client,
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(Upstreams::from_env(), static_dir())
    }

    pub fn cached(&self, dataset: Dataset) -> Option<CachedDataset> {
        self.datasets.get(&dataset).map(|entry| entry.value().clone())
    }

    pub fn store(&self, dataset: Dataset, cached: CachedDataset) {
        self.datasets.insert(dataset, cached);
    }
}
