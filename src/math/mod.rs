pub mod intersect_2d;
pub mod polygon_2d;

use approx::relative_eq;
use nalgebra::Rotation2;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Relative tolerance used by [`is_close`].
pub const REL_TOLERANCE: f64 = 1e-9;

/// Absolute per-coordinate tolerance for matching marker edges.
pub const MARKER_TOLERANCE: f64 = 0.001;

/// Relative closeness test with no absolute floor.
///
/// Two values are close when their difference is within [`REL_TOLERANCE`]
/// of the larger magnitude, so `is_close(x, 0.0)` only holds for `x == 0.0`.
#[must_use]
pub fn is_close(a: f64, b: f64) -> bool {
    relative_eq!(a, b, epsilon = 0.0, max_relative = REL_TOLERANCE)
}

/// Absolute closeness of two points, coordinate by coordinate.
#[must_use]
pub fn points_within(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}

/// Rotates `point` about `center` by `degrees` (positive turns +x toward +y).
#[must_use]
pub fn rotate_about(point: &Point2, center: &Point2, degrees: f64) -> Point2 {
    let rotation = Rotation2::new(degrees.to_radians());
    center + rotation * (point - center)
}
