use std::future::Future;

use geo::Rect;

use crate::error::MapError;
use crate::join::{CombinedRegion, join_regions};
use crate::path::bounds;
use crate::scale::Scales;
use crate::stats::RegionStatistic;
use crate::theme::ThemeCycle;
use crate::topology::{RegionGeometry, Topology, feature_collection};

pub const COUNTIES_OBJECT: &str = "counties";
pub const STATES_OBJECT: &str = "states";

/// Everything the first paint needs, built from the two fetched documents.
#[derive(Debug, Clone, PartialEq)]
pub struct MapModel {
    /// Joined counties, ascending by id.
    pub regions: Vec<CombinedRegion>,
    pub states: Vec<RegionGeometry>,
    pub scales: Scales,
    pub bounds: Option<Rect<f64>>,
}

impl MapModel {
    pub fn build(topology: &Topology, statistics: Vec<RegionStatistic>) -> Result<Self, MapError> {
        let counties = feature_collection(topology, COUNTIES_OBJECT)?;
        let states = feature_collection(topology, STATES_OBJECT)?;

        let regions = join_regions(statistics, counties)?;
        let (low, high) = ThemeCycle::default().endpoints();
        let scales = Scales::build(regions.iter().map(CombinedRegion::value), low, high)?;
        let bounds = bounds(regions.iter().map(|r| &r.geometry.shape));

        Ok(Self {
            regions,
            states,
            scales,
            bounds,
        })
    }
}

/// Await both documents together and build the model once both are in.
/// The first failure wins and nothing is decoded.
pub async fn load_together<T, S>(topology: T, statistics: S) -> Result<MapModel, MapError>
where
    T: Future<Output = Result<Topology, MapError>>,
    S: Future<Output = Result<Vec<RegionStatistic>, MapError>>,
{
    let (topology, statistics) = futures::try_join!(topology, statistics)?;
    MapModel::build(&topology, statistics)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    use super::*;
    use crate::scale::BUCKET_COUNT;

    const TOPOLOGY: &str = r#"{
        "type": "Topology",
        "arcs": [
            [[1, 0], [1, 1]],
            [[1, 1], [0, 1], [0, 0], [1, 0]],
            [[1, 0], [2, 0], [2, 1], [1, 1]]
        ],
        "objects": {
            "counties": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": 1003, "arcs": [[2, -1]]},
                    {"type": "Polygon", "id": 1001, "arcs": [[0, 1]]}
                ]
            },
            "states": {
                "type": "GeometryCollection",
                "geometries": [{"type": "Polygon", "id": 1, "arcs": [[1, 2]]}]
            }
        }
    }"#;

    fn statistics(ids: &[u32]) -> Vec<RegionStatistic> {
        ids.iter()
            .enumerate()
            .map(|(i, &id)| RegionStatistic {
                id,
                parent_name: "AL".into(),
                name: format!("County {id}"),
                value: 10.8 + 63.9 * i as f64,
            })
            .collect()
    }

    #[test]
    fn builds_joined_model() {
        let topology = Topology::from_slice(TOPOLOGY.as_bytes()).expect("parse");
        let model = MapModel::build(&topology, statistics(&[1003, 1001])).expect("build");
        assert_eq!(model.regions.len(), 2);
        assert_eq!(model.regions[0].id(), 1001);
        assert_eq!(model.regions[0].geometry.id, 1001);
        assert_eq!(model.states.len(), 1);
        assert_eq!(model.scales.legend.buckets.len(), BUCKET_COUNT);
        let bounds = model.bounds.expect("bounds");
        assert_eq!((bounds.width(), bounds.height()), (2.0, 1.0));
    }

    #[test]
    fn mismatched_ids_fail_the_build() {
        let topology = Topology::from_slice(TOPOLOGY.as_bytes()).expect("parse");
        let err = MapModel::build(&topology, statistics(&[1001, 1005])).expect_err("should fail");
        assert!(matches!(err, MapError::JoinMismatch { .. }));
    }

    #[test]
    fn missing_states_object_is_data_unavailable() {
        let doc = TOPOLOGY.replace("\"states\"", "\"nation\"");
        let topology = Topology::from_slice(doc.as_bytes()).expect("parse");
        let err = MapModel::build(&topology, statistics(&[1001, 1003])).expect_err("should fail");
        assert!(matches!(err, MapError::DataUnavailable(_)));
    }

    #[test]
    fn empty_statistics_against_counties_is_join_mismatch() {
        let topology = Topology::from_slice(TOPOLOGY.as_bytes()).expect("parse");
        let err = MapModel::build(&topology, Vec::new()).expect_err("should fail");
        let MapError::JoinMismatch { missing_statistic, .. } = err else {
            panic!("expected JoinMismatch, got {err:?}");
        };
        assert_eq!(missing_statistic, vec![1001, 1003]);
    }

    #[test]
    fn load_together_builds_when_both_arrive() {
        let topology = Topology::from_slice(TOPOLOGY.as_bytes()).expect("parse");
        let model = block_on(load_together(
            ready(Ok(topology)),
            ready(Ok(statistics(&[1001, 1003]))),
        ))
        .expect("load");
        assert_eq!(model.regions.len(), 2);
    }

    #[test]
    fn load_together_fails_fast_on_either_side() {
        let err = block_on(load_together(
            pending::<Result<Topology, MapError>>(),
            ready(Err(MapError::DataUnavailable("HTTP 404".into()))),
        ))
        .expect_err("statistics failure should end the load");
        assert_eq!(err, MapError::DataUnavailable("HTTP 404".into()));

        let err = block_on(load_together(
            ready(Err(MapError::DataUnavailable("parse error".into()))),
            pending::<Result<Vec<RegionStatistic>, MapError>>(),
        ))
        .expect_err("topology failure should end the load");
        assert_eq!(err, MapError::DataUnavailable("parse error".into()));
    }
}
