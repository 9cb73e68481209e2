use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::point_in_polygon;
use crate::math::Point2;

use super::Segment;

/// A closed polygon: the last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    id: String,
    points: Vec<Point2>,
    style: Option<String>,
    /// Set by enclosure classification when another polygon of the same
    /// shape fully contains this one.
    pub enclosed: bool,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// A trailing vertex equal to the first is dropped, closure is implicit.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if fewer than 3 distinct points remain.
    pub fn new(id: impl Into<String>, mut points: Vec<Point2>, style: Option<String>) -> Result<Self> {
        let id = id.into();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if count_distinct(&points, 3) < 3 {
            return Err(GeometryError::Degenerate(format!(
                "polygon {id} has fewer than 3 distinct points"
            ))
            .into());
        }
        Ok(Self {
            id,
            points,
            style,
            enclosed: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Number of edges, including the closing edge.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.points.len()
    }

    /// Iterates the edges in order, ending with the closing edge back to the first point.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Crossing-number containment test against this polygon.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        point_in_polygon(p, &self.points)
    }
}

/// Counts distinct points, stopping early once `limit` is reached.
fn count_distinct(points: &[Point2], limit: usize) -> usize {
    let mut seen: Vec<&Point2> = Vec::with_capacity(limit);
    for p in points {
        if !seen.contains(&p) {
            seen.push(p);
            if seen.len() >= limit {
                break;
            }
        }
    }
    seen.len()
}

/// The polygons read from one input outline: a primary polygon followed by
/// zero or more holes.
#[derive(Debug, Clone)]
pub struct Shape {
    id: String,
    polygons: Vec<Polygon>,
}

impl Shape {
    /// Creates a shape. The first polygon is the primary one.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `polygons` is empty.
    pub fn new(id: impl Into<String>, polygons: Vec<Polygon>) -> Result<Self> {
        let id = id.into();
        if polygons.is_empty() {
            return Err(GeometryError::Degenerate(format!("shape {id} has no polygons")).into());
        }
        Ok(Self { id, polygons })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The primary (outer) polygon.
    #[must_use]
    pub fn primary(&self) -> &Polygon {
        &self.polygons[0]
    }

    /// The cutout polygons, in input order.
    #[must_use]
    pub fn holes(&self) -> &[Polygon] {
        &self.polygons[1..]
    }

    /// Style token of the shape, taken from its primary polygon.
    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.primary().style()
    }
}
