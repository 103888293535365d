//! Topology documents: boundary arcs stored once and referenced by index from
//! every region that shares them. [`feature_collection`] resolves those
//! references into closed per-region rings.

use std::collections::HashMap;

use geo::{BoundingRect, Coord, LineString, MultiLineString, MultiPolygon, Polygon, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TopologyError;

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    #[serde(default)]
    pub transform: Option<Transform>,
    pub arcs: Vec<Vec<Vec<f64>>>,
    pub objects: HashMap<String, TopoGeometry>,
}

/// Quantization transform. When present, arc positions are delta-encoded
/// integers that must be accumulated, then scaled and translated.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeometryId {
    Number(u64),
    Text(String),
}

impl GeometryId {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            GeometryId::Number(n) => u32::try_from(*n).ok(),
            GeometryId::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A geometry object as stored in the document. `arcs` nesting depends on
/// `kind`, so it is kept raw until decode.
#[derive(Debug, Clone, Deserialize)]
pub struct TopoGeometry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<GeometryId>,
    #[serde(default)]
    pub arcs: Value,
    #[serde(default)]
    pub geometries: Vec<TopoGeometry>,
}

/// Decoded geometry of one region, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Shape {
    #[default]
    Empty,
    Polygons(MultiPolygon<f64>),
    Lines(MultiLineString<f64>),
}

impl Shape {
    pub fn is_empty(&self) -> bool {
        match self {
            Shape::Empty => true,
            Shape::Polygons(polygons) => polygons.0.is_empty(),
            Shape::Lines(lines) => lines.0.is_empty(),
        }
    }

    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            Shape::Empty => None,
            Shape::Polygons(polygons) => polygons.bounding_rect(),
            Shape::Lines(lines) => lines.bounding_rect(),
        }
    }
}

/// One decoded region boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGeometry {
    pub id: u32,
    pub shape: Shape,
}

impl Topology {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Absolute positions of every arc, with the quantization transform applied.
    pub fn decoded_arcs(&self) -> Vec<LineString<f64>> {
        self.arcs
            .iter()
            .map(|arc| decode_arc(arc, self.transform.as_ref()))
            .collect()
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }
}

fn decode_arc(arc: &[Vec<f64>], transform: Option<&Transform>) -> LineString<f64> {
    let mut out = Vec::with_capacity(arc.len());
    let (mut x, mut y) = (0.0, 0.0);
    for position in arc {
        let px = position.first().copied().unwrap_or(0.0);
        let py = position.get(1).copied().unwrap_or(0.0);
        match transform {
            Some(t) => {
                x += px;
                y += py;
                out.push(Coord {
                    x: x * t.scale[0] + t.translate[0],
                    y: y * t.scale[1] + t.translate[1],
                });
            }
            None => out.push(Coord { x: px, y: py }),
        }
    }
    LineString::new(out)
}

/// Decode the named object into one [`RegionGeometry`] per member geometry.
pub fn feature_collection(
    topology: &Topology,
    name: &str,
) -> Result<Vec<RegionGeometry>, TopologyError> {
    let object = topology
        .objects
        .get(name)
        .ok_or_else(|| TopologyError::MissingObject(name.to_string()))?;
    if object.kind.as_deref() != Some("GeometryCollection") {
        return Err(TopologyError::NotACollection(name.to_string()));
    }

    let arcs = topology.decoded_arcs();
    object
        .geometries
        .iter()
        .map(|geometry| {
            let id = geometry
                .id
                .as_ref()
                .and_then(GeometryId::as_u32)
                .ok_or(TopologyError::MissingId)?;
            Ok(RegionGeometry {
                id,
                shape: decode_shape(geometry, &arcs)?,
            })
        })
        .collect()
}

fn decode_shape(geometry: &TopoGeometry, arcs: &[LineString<f64>]) -> Result<Shape, TopologyError> {
    let Some(kind) = geometry.kind.as_deref() else {
        return Ok(Shape::Empty);
    };
    match kind {
        "Polygon" => {
            let rings: Vec<Vec<i64>> = arc_refs(&geometry.arcs, kind)?;
            Ok(Shape::Polygons(MultiPolygon::new(vec![polygon(&rings, arcs)?])))
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<Vec<i64>>> = arc_refs(&geometry.arcs, kind)?;
            let polygons = polygons
                .iter()
                .map(|rings| polygon(rings, arcs))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Shape::Polygons(MultiPolygon::new(polygons)))
        }
        "LineString" => {
            let indices: Vec<i64> = arc_refs(&geometry.arcs, kind)?;
            Ok(Shape::Lines(MultiLineString::new(vec![line(&indices, arcs)?])))
        }
        "MultiLineString" => {
            let lines: Vec<Vec<i64>> = arc_refs(&geometry.arcs, kind)?;
            let lines = lines
                .iter()
                .map(|indices| line(indices, arcs))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Shape::Lines(MultiLineString::new(lines)))
        }
        other => Err(TopologyError::UnsupportedGeometry(other.to_string())),
    }
}

fn arc_refs<T: serde::de::DeserializeOwned + Default>(
    raw: &Value,
    kind: &str,
) -> Result<T, TopologyError> {
    if raw.is_null() {
        return Ok(T::default());
    }
    T::deserialize(raw).map_err(|_| TopologyError::UnsupportedGeometry(format!("malformed {kind}")))
}

/// First ring is the exterior, the rest are holes.
fn polygon(rings: &[Vec<i64>], arcs: &[LineString<f64>]) -> Result<Polygon<f64>, TopologyError> {
    let mut rings = rings
        .iter()
        .map(|indices| ring(indices, arcs))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Ok(Polygon::new(exterior, rings.collect()))
}

/// A closed ring: degenerate rings are padded so they still close.
fn ring(indices: &[i64], arcs: &[LineString<f64>]) -> Result<LineString<f64>, TopologyError> {
    Ok(LineString::new(pad(stitch(indices, arcs)?, 4)))
}

/// An open line of at least two positions.
fn line(indices: &[i64], arcs: &[LineString<f64>]) -> Result<LineString<f64>, TopologyError> {
    Ok(LineString::new(pad(stitch(indices, arcs)?, 2)))
}

fn pad(mut points: Vec<Coord<f64>>, min_len: usize) -> Vec<Coord<f64>> {
    if let Some(&first) = points.first() {
        while points.len() < min_len {
            points.push(first);
        }
    }
    points
}

/// Concatenate arcs; consecutive arcs share their junction vertex, which is
/// kept only once. Negative index `i` means arc `!i` walked backwards.
fn stitch(indices: &[i64], arcs: &[LineString<f64>]) -> Result<Vec<Coord<f64>>, TopologyError> {
    let mut points: Vec<Coord<f64>> = Vec::new();
    for &index in indices {
        let (arc_index, reversed) = if index < 0 { (!index, true) } else { (index, false) };
        let arc = usize::try_from(arc_index)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or(TopologyError::ArcOutOfRange {
                index,
                count: arcs.len(),
            })?;
        if !points.is_empty() {
            points.pop();
        }
        if reversed {
            points.extend(arc.0.iter().rev().copied());
        } else {
            points.extend(arc.0.iter().copied());
        }
    }
    Ok(points)
}
