use crate::math::{is_close, points_within, Point2};

/// A straight edge between two points.
///
/// Stored with a direction, but matching treats it as undirected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point2,
    pub to: Point2,
}

/// Direction class of an edge, decided with [`is_close`] on its coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeDirection {
    Vertical,
    Horizontal,
    /// Neither axis-aligned; carries the angle to the horizontal in degrees,
    /// `atan(dy / dx)`, so it lies in `(-90, 90)`.
    Sloped { theta: f64 },
}

impl Segment {
    #[must_use]
    pub fn new(from: Point2, to: Point2) -> Self {
        Self { from, to }
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.to - self.from).norm()
    }

    /// Returns `true` if `a`/`b` match this segment in either direction,
    /// each coordinate within `tolerance`.
    #[must_use]
    pub fn matches(&self, a: &Point2, b: &Point2, tolerance: f64) -> bool {
        (points_within(a, &self.from, tolerance) && points_within(b, &self.to, tolerance))
            || (points_within(a, &self.to, tolerance) && points_within(b, &self.from, tolerance))
    }

    /// Classifies the edge direction. Vertical wins over horizontal for
    /// zero-length edges.
    #[must_use]
    pub fn direction(&self) -> EdgeDirection {
        if is_close(self.from.x, self.to.x) {
            EdgeDirection::Vertical
        } else if is_close(self.from.y, self.to.y) {
            EdgeDirection::Horizontal
        } else {
            let slope = (self.to.y - self.from.y) / (self.to.x - self.from.x);
            EdgeDirection::Sloped {
                theta: slope.atan().to_degrees(),
            }
        }
    }
}
