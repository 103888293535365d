use std::collections::{BTreeSet, HashMap};

use crate::error::MapError;
use crate::stats::RegionStatistic;
use crate::topology::RegionGeometry;

/// A statistic paired with the boundary that shares its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRegion {
    pub statistic: RegionStatistic,
    pub geometry: RegionGeometry,
}

impl CombinedRegion {
    pub fn id(&self) -> u32 {
        self.statistic.id
    }

    pub fn value(&self) -> f64 {
        self.statistic.value
    }
}

/// Pair every statistic with the geometry of the same id.
///
/// Both sides must carry exactly the same identifier set with no duplicates;
/// otherwise nothing is paired and [`MapError::JoinMismatch`] lists the
/// offending ids. Output is ordered by ascending id.
pub fn join_regions(
    statistics: Vec<RegionStatistic>,
    geometries: Vec<RegionGeometry>,
) -> Result<Vec<CombinedRegion>, MapError> {
    let mut duplicated = BTreeSet::new();

    let mut by_id: HashMap<u32, RegionGeometry> = HashMap::with_capacity(geometries.len());
    for geometry in geometries {
        let id = geometry.id;
        if by_id.insert(id, geometry).is_some() {
            duplicated.insert(id);
        }
    }

    let mut seen = BTreeSet::new();
    for statistic in &statistics {
        if !seen.insert(statistic.id) {
            duplicated.insert(statistic.id);
        }
    }

    let missing_geometry: Vec<u32> = seen
        .iter()
        .copied()
        .filter(|id| !by_id.contains_key(id))
        .collect();
    let mut missing_statistic: Vec<u32> = by_id
        .keys()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();
    missing_statistic.sort_unstable();

    if !missing_geometry.is_empty() || !missing_statistic.is_empty() || !duplicated.is_empty() {
        return Err(MapError::JoinMismatch {
            missing_geometry,
            missing_statistic,
            duplicated: duplicated.into_iter().collect(),
        });
    }

    let mut combined: Vec<CombinedRegion> = statistics
        .into_iter()
        .filter_map(|statistic| {
            let geometry = by_id.remove(&statistic.id)?;
            Some(CombinedRegion {
                statistic,
                geometry,
            })
        })
        .collect();
    combined.sort_by_key(CombinedRegion::id);
    Ok(combined)
}
