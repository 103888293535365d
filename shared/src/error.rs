use thiserror::Error;

/// Failures that stop the map pipeline before anything is painted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// A dataset could not be fetched or decoded.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// The statistics and geometry identifier sets disagree.
    #[error(
        "join mismatch: {} statistic id(s) without geometry, {} geometry id(s) without statistic, {} duplicated id(s)",
        .missing_geometry.len(),
        .missing_statistic.len(),
        .duplicated.len()
    )]
    JoinMismatch {
        missing_geometry: Vec<u32>,
        missing_statistic: Vec<u32>,
        duplicated: Vec<u32>,
    },
}

/// Failures while decoding a topology document into shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("topology has no object named `{0}`")]
    MissingObject(String),

    #[error("object `{0}` is not a GeometryCollection")]
    NotACollection(String),

    #[error("arc index {index} out of range ({count} arcs)")]
    ArcOutOfRange { index: i64, count: usize },

    #[error("unsupported geometry type `{0}`")]
    UnsupportedGeometry(String),

    #[error("geometry without a numeric id")]
    MissingId,
}

impl From<TopologyError> for MapError {
    fn from(err: TopologyError) -> Self {
        MapError::DataUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::DataUnavailable(format!("parse error: {err}"))
    }
}
