use std::collections::BTreeMap;

use crate::math::{Point2, MARKER_TOLERANCE};

use super::Segment;

/// Cell edge length of the lookup grid. Twice the match tolerance, so any
/// point within tolerance of an indexed endpoint lies in a neighbouring cell.
const CELL_SIZE: f64 = 2.0 * MARKER_TOLERANCE;

type Cell = (i64, i64);

/// Read-only index of marker edges.
///
/// Built once from every marker element of a run and shared by reference
/// with each shape. Both endpoints of every segment are bucketed on a grid
/// keyed by quantised coordinates, so a lookup only inspects the segments
/// whose endpoints sit near the queried edge.
#[derive(Debug, Clone, Default)]
pub struct MarkerIndex {
    segments: Vec<Segment>,
    cells: BTreeMap<Cell, Vec<usize>>,
}

impl MarkerIndex {
    /// Builds the index from marker segments.
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        let mut cells: BTreeMap<Cell, Vec<usize>> = BTreeMap::new();
        for (i, seg) in segments.iter().enumerate() {
            let from = cell_of(&seg.from);
            let to = cell_of(&seg.to);
            cells.entry(from).or_default().push(i);
            if to != from {
                cells.entry(to).or_default().push(i);
            }
        }
        Self { segments, cells }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if some marker segment matches `a`–`b` in either
    /// direction, each coordinate within [`MARKER_TOLERANCE`].
    #[must_use]
    pub fn contains(&self, a: &Point2, b: &Point2) -> bool {
        let (cx, cy) = cell_of(a);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(candidates) = self.cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                if candidates
                    .iter()
                    .any(|&i| self.segments[i].matches(a, b, MARKER_TOLERANCE))
                {
                    return true;
                }
            }
        }
        false
    }
}

impl FromIterator<Segment> for MarkerIndex {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn cell_of(p: &Point2) -> Cell {
    (
        (p.x / CELL_SIZE).floor() as i64,
        (p.y / CELL_SIZE).floor() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    fn linear_scan(segments: &[Segment], a: &Point2, b: &Point2) -> bool {
        segments.iter().any(|s| s.matches(a, b, MARKER_TOLERANCE))
    }

    #[test]
    fn empty_index_matches_nothing() {
        let index = MarkerIndex::default();
        assert!(index.is_empty());
        assert!(!index.contains(&Point2::new(0.0, 0.0), &Point2::new(1.0, 0.0)));
    }

    #[test]
    fn matches_reversed_within_tolerance() {
        let index = MarkerIndex::new(vec![seg(0.0, 0.0, 10.0, 0.0)]);
        assert_eq!(index.len(), 1);
        assert!(index.contains(&Point2::new(10.0009, 0.0), &Point2::new(0.0, -0.0009)));
        assert!(index.contains(&Point2::new(0.0, 0.0), &Point2::new(10.0, 0.0)));
        assert!(!index.contains(&Point2::new(0.0, 0.0), &Point2::new(10.0, 0.0015)));
    }

    #[test]
    fn tolerance_across_cell_boundary() {
        // Endpoint sits just below a cell edge, the query just above it.
        let index = MarkerIndex::new(vec![seg(0.0019999, 5.0, 3.0, 5.0)]);
        assert!(index.contains(&Point2::new(0.0029, 5.0), &Point2::new(3.0, 5.0)));
    }

    #[test]
    fn agrees_with_linear_scan() {
        let segments = vec![
            seg(0.0, 0.0, 10.0, 0.0),
            seg(10.0, 0.0, 10.0, 10.0),
            seg(-3.5, 2.25, 4.0, -1.0),
            seg(100.0, 100.0, 100.0005, 100.0),
        ];
        let index: MarkerIndex = segments.iter().copied().collect();
        let queries = [
            (Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)),
            (Point2::new(10.0, 10.0), Point2::new(10.0, 0.0)),
            (Point2::new(4.0005, -1.0005), Point2::new(-3.5, 2.25)),
            (Point2::new(4.0, -1.0), Point2::new(-3.5, 2.252)),
            (Point2::new(100.0, 100.0), Point2::new(100.0, 100.0)),
            (Point2::new(5.0, 5.0), Point2::new(6.0, 6.0)),
        ];
        for (a, b) in &queries {
            assert_eq!(index.contains(a, b), linear_scan(&segments, a, b), "{a:?} {b:?}");
        }
    }
}
