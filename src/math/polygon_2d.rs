use super::Point2;

/// An axis-aligned bounding box in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    pub min: Point2,
    pub max: Point2,
}

impl Aabb2 {
    /// Returns `true` if `p` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Computes the bounding box of a point sequence, `None` when empty.
#[must_use]
pub fn bounding_box(points: &[Point2]) -> Option<Aabb2> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(Aabb2 { min, max })
}

/// Crossing-number (ray casting) point-in-polygon test.
///
/// The polygon is implicitly closed. Points outside the bounding box are
/// rejected before the crossing count. Points exactly on the boundary get
/// whatever the crossing count says.
#[must_use]
pub fn point_in_polygon(p: &Point2, polygon: &[Point2]) -> bool {
    let Some(bbox) = bounding_box(polygon) else {
        return false;
    };
    if !bbox.contains(p) {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for (i, vi) in polygon.iter().enumerate() {
        let vj = &polygon[j];
        if (vi.y > p.y) != (vj.y > p.y) && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Returns `true` if every vertex of `inner` tests inside `outer`.
#[must_use]
pub fn polygon_inside_polygon(inner: &[Point2], outer: &[Point2]) -> bool {
    inner.iter().all(|p| point_in_polygon(p, outer))
}
