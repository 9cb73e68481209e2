use super::Point2;

/// Crossing test between segment `a1→a2` and segment `b1→b2`.
///
/// Solves the two infinite lines for a single parameter `t` and reports
/// whether `t` lies in `[0, 1]`; the parameter of the other line is never
/// checked. Parallel lines (`td == 0.0`, compared exactly) never intersect,
/// so collinear overlapping segments report `false`.
///
/// The test is one-sided on purpose: tab repair converges against exactly
/// this predicate, and a symmetric test would change when height reduction
/// kicks in.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn segments_intersect(a1: &Point2, a2: &Point2, b1: &Point2, b2: &Point2) -> bool {
    let td = (a1.x - a2.x) * (b1.y - b2.y) - (a1.y - a2.y) * (b1.x - b2.x);
    if td == 0.0 {
        return false;
    }
    let t = ((a1.x - b1.x) * (b1.y - b2.y) - (a1.y - b1.y) * (b1.x - b2.x)) / td;
    (0.0..=1.0).contains(&t)
}
