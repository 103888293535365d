use std::fmt::Write;

use geo::{Coord, LineString, Rect};

use crate::topology::Shape;

/// Smallest rect covering both.
pub fn union(a: &Rect<f64>, b: &Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        },
    )
}

/// SVG `viewBox` attribute value covering `rect`.
pub fn view_box(rect: &Rect<f64>) -> String {
    format!(
        "{} {} {} {}",
        rect.min().x,
        rect.min().y,
        rect.width(),
        rect.height()
    )
}

/// Bounds over every shape; `None` when there are no positions.
pub fn bounds<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Option<Rect<f64>> {
    shapes
        .into_iter()
        .filter_map(Shape::bounding_rect)
        .reduce(|acc, rect| union(&acc, &rect))
}

/// SVG path data with an identity projection: positions are already in
/// screen space. Rings are closed with `Z` and their repeated end vertex is
/// not emitted; lines stay open.
pub fn svg_path(shape: &Shape) -> String {
    let mut d = String::new();
    match shape {
        Shape::Empty => {}
        Shape::Polygons(polygons) => {
            for polygon in &polygons.0 {
                ring_to_path(&mut d, polygon.exterior());
                for interior in polygon.interiors() {
                    ring_to_path(&mut d, interior);
                }
            }
        }
        Shape::Lines(lines) => {
            for line in &lines.0 {
                write_coords(&mut d, &line.0);
            }
        }
    }
    d
}

fn ring_to_path(d: &mut String, ring: &LineString<f64>) {
    let coords = &ring.0;
    let n = if coords.len() > 1 && ring.is_closed() {
        coords.len() - 1
    } else {
        coords.len()
    };
    if n == 0 {
        return;
    }
    write_coords(d, &coords[..n]);
    d.push('Z');
}

fn write_coords(d: &mut String, coords: &[Coord<f64>]) {
    for (i, Coord { x, y }) in coords.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{x},{y}");
    }
}
