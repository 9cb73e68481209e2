use tracing::trace;

use crate::geometry::Polygon;
use crate::math::polygon_2d::polygon_inside_polygon;

/// Marks every polygon that lies entirely inside another polygon of the
/// same shape as `enclosed`.
///
/// A polygon is enclosed when all of its vertices test inside some other
/// polygon. Only that single flag is computed, no nesting depth.
/// Runs in `O(n² · m)` for `n` polygons of `m` vertices.
pub fn classify_enclosure(polygons: &mut [Polygon]) {
    if polygons.len() < 2 {
        return;
    }

    let flags: Vec<bool> = polygons
        .iter()
        .enumerate()
        .map(|(i, inner)| {
            polygons
                .iter()
                .enumerate()
                .any(|(j, outer)| i != j && polygon_inside_polygon(inner.points(), outer.points()))
        })
        .collect();

    for (polygon, enclosed) in polygons.iter_mut().zip(flags) {
        trace!(polygon = polygon.id(), enclosed, "classified enclosure");
        polygon.enclosed = enclosed;
    }
}
