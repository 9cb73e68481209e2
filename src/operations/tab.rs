use tracing::trace;

use crate::config::TabConfig;
use crate::geometry::{EdgeDirection, Polygon, Segment};
use crate::math::intersect_2d::segments_intersect;
use crate::math::{rotate_about, Point2, Vector2};

/// Height of the orientation sample tab, as a fraction of the tab height.
const SAMPLE_HEIGHT_RATIO: f64 = 0.001;

/// Side angle of the orientation sample tab, in degrees.
const SAMPLE_ANGLE: f64 = 1.0;

/// Largest side angle tried while widening a self-intersecting tab.
const MAX_REPAIR_ANGLE: f64 = 88.0;

/// Number of equal steps the height is cut into during repair.
const HEIGHT_STEPS: u32 = 5;

/// A trapezoidal glue tab on one polygon edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tab {
    /// Apex next to the edge start.
    pub apex1: Point2,
    /// Apex next to the edge end.
    pub apex2: Point2,
    /// Height the apexes were built with.
    pub height: f64,
    /// Side angle the apexes were built with, in degrees.
    pub angle: f64,
    /// Number of repair adjustments made.
    pub repairs: u32,
    /// `true` if no adjustment removed the self-intersection. The tab is then
    /// the last one tried: the smallest height step at the configured angle,
    /// legs crossing.
    pub exhausted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepairPhase {
    Angle,
    Height,
}

/// Axis-aligned construction frame of an edge.
///
/// Apexes are offset by `normal * h` and `along * h / tan(angle)` from their
/// base point, then turned by `rotation` degrees about it for sloped edges.
#[derive(Debug, Clone, Copy)]
struct TabFrame {
    along: Vector2,
    normal: Vector2,
    rotation: Option<f64>,
}

impl TabFrame {
    fn of(edge: &Segment) -> Self {
        let (p1, p2) = (&edge.from, &edge.to);
        let x_sign = if p1.x < p2.x { 1.0 } else { -1.0 };
        match edge.direction() {
            EdgeDirection::Vertical => Self {
                along: Vector2::new(0.0, if p1.y < p2.y { 1.0 } else { -1.0 }),
                normal: Vector2::new(1.0, 0.0),
                rotation: None,
            },
            EdgeDirection::Horizontal => Self {
                along: Vector2::new(x_sign, 0.0),
                normal: Vector2::new(0.0, -1.0),
                rotation: None,
            },
            EdgeDirection::Sloped { theta } => Self {
                along: Vector2::new(x_sign, 0.0),
                normal: Vector2::new(0.0, -1.0),
                rotation: Some(theta),
            },
        }
    }

    fn mirrored(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Builds the tab for one edge of a polygon.
///
/// # Algorithm
///
/// 1. Try the canonical side with a tiny, shallow tab and mirror the frame
///    if the sample points into material: inside an outer polygon, or outside
///    a cutout.
/// 2. Build the full tab with the configured height and angle.
/// 3. While the two tab legs cross, widen the angle by 1° up to 88°, then go
///    back to the configured angle and cut the height by a fifth of the
///    configured height per step. When the height runs out the attempt is
///    exhausted and the last tab tried is returned, legs still crossing.
///
/// Only the two legs of this tab are kept apart; the tab may still overlap
/// tabs on neighbouring edges.
#[derive(Debug)]
pub struct MakeTab<'a> {
    polygon: &'a Polygon,
    edge: Segment,
    height: f64,
    angle: f64,
}

impl<'a> MakeTab<'a> {
    /// Creates a new tab operation for `edge`, an edge of `polygon`.
    #[must_use]
    pub fn new(polygon: &'a Polygon, edge: Segment, config: &TabConfig) -> Self {
        Self {
            polygon,
            edge,
            height: config.height(),
            angle: config.angle(),
        }
    }

    /// Executes the tab synthesis.
    #[must_use]
    pub fn execute(&self) -> Tab {
        let frame = self.oriented_frame();

        let mut height = self.height;
        let mut angle = self.angle;
        let mut phase = RepairPhase::Angle;
        let mut height_step = 0;
        let mut repairs = 0;

        loop {
            let (apex1, apex2) = self.apexes(&frame, height, angle);
            let tried = Tab {
                apex1,
                apex2,
                height,
                angle,
                repairs,
                exhausted: false,
            };
            if !segments_intersect(&self.edge.from, &apex1, &self.edge.to, &apex2) {
                return tried;
            }

            repairs += 1;
            if phase == RepairPhase::Angle {
                angle += 1.0;
                if angle > MAX_REPAIR_ANGLE {
                    angle = self.angle;
                    phase = RepairPhase::Height;
                }
            }
            if phase == RepairPhase::Height {
                height_step += 1;
                height = self.height * f64::from(HEIGHT_STEPS - height_step)
                    / f64::from(HEIGHT_STEPS);
                if height <= 0.0 {
                    return Tab {
                        repairs,
                        exhausted: true,
                        ..tried
                    };
                }
            }
            trace!(repairs, angle, height, "tab legs cross, adjusting");
        }
    }

    /// Picks the tab side from a sample tab on the canonical side.
    fn oriented_frame(&self) -> TabFrame {
        let frame = TabFrame::of(&self.edge);
        let (sample1, sample2) =
            self.apexes(&frame, self.height * SAMPLE_HEIGHT_RATIO, SAMPLE_ANGLE);
        let inside1 = self.polygon.contains(&sample1);
        let inside2 = self.polygon.contains(&sample2);

        let into_material = if self.polygon.enclosed {
            !inside1 && !inside2
        } else {
            inside1 || inside2
        };

        if into_material {
            frame.mirrored()
        } else {
            frame
        }
    }

    fn apexes(&self, frame: &TabFrame, height: f64, angle: f64) -> (Point2, Point2) {
        let run = height / angle.to_radians().tan();
        let rise = frame.normal * height;
        let apex1 = self.edge.from + rise + frame.along * run;
        let apex2 = self.edge.to + rise - frame.along * run;

        match frame.rotation {
            Some(theta) => (
                rotate_about(&apex1, &self.edge.from, theta),
                rotate_about(&apex2, &self.edge.to, theta),
            ),
            None => (apex1, apex2),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f64 = 1e-9;

    fn polygon(coords: &[(f64, f64)], enclosed: bool) -> Polygon {
        let points = coords.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let mut poly = Polygon::new("p", points, None).unwrap();
        poly.enclosed = enclosed;
        poly
    }

    fn square(min: f64, max: f64, enclosed: bool) -> Polygon {
        polygon(&[(min, min), (max, min), (max, max), (min, max)], enclosed)
    }

    fn tab_on(poly: &Polygon, edge_index: usize, angle: f64, height: f64) -> Tab {
        let config = TabConfig::new(angle, height).unwrap();
        let edge = poly.edges().nth(edge_index).unwrap();
        MakeTab::new(poly, edge, &config).execute()
    }

    fn assert_point(p: Point2, x: f64, y: f64) {
        assert_abs_diff_eq!(p.x, x, epsilon = EPS);
        assert_abs_diff_eq!(p.y, y, epsilon = EPS);
    }

    #[test]
    fn square_tabs_point_outward() {
        let sq = square(0.0, 10.0, false);
        let expected = [
            ((2.0, -2.0), (8.0, -2.0)),
            ((12.0, 2.0), (12.0, 8.0)),
            ((8.0, 12.0), (2.0, 12.0)),
            ((-2.0, 8.0), (-2.0, 2.0)),
        ];
        for (i, ((x1, y1), (x2, y2))) in expected.into_iter().enumerate() {
            let tab = tab_on(&sq, i, 45.0, 2.0);
            assert!(!tab.exhausted);
            assert_eq!(tab.repairs, 0);
            assert_point(tab.apex1, x1, y1);
            assert_point(tab.apex2, x2, y2);
        }
    }

    #[test]
    fn cutout_tabs_point_into_the_hole() {
        let hole = square(3.0, 7.0, true);
        let tab = tab_on(&hole, 0, 45.0, 1.0);
        assert_point(tab.apex1, 4.0, 4.0);
        assert_point(tab.apex2, 6.0, 4.0);
    }

    #[test]
    fn meeting_legs_widen_the_angle() {
        // A 4-unit edge with a 45° tab of height 2: both legs meet at one apex.
        let hole = square(3.0, 7.0, true);
        let tab = tab_on(&hole, 0, 45.0, 2.0);
        assert!(!tab.exhausted);
        assert_eq!(tab.repairs, 1);
        assert_abs_diff_eq!(tab.angle, 46.0);
        assert_abs_diff_eq!(tab.height, 2.0);
        assert!(tab.apex1.x < tab.apex2.x);
    }

    #[test]
    fn narrow_edge_widens_angle_until_legs_part() {
        // 1-unit edge, height 2: the legs part once h / tan(angle) < 0.5, at 76°.
        let rect = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 20.0), (0.0, 20.0)], false);
        let tab = tab_on(&rect, 0, 45.0, 2.0);
        assert!(!tab.exhausted);
        assert_eq!(tab.repairs, 31);
        assert_abs_diff_eq!(tab.angle, 76.0);
        assert_abs_diff_eq!(tab.height, 2.0);
    }

    #[test]
    fn height_reduction_after_angle_limit() {
        // Starting at 85°, widening to 88° is not enough for height 20, so the
        // height drops in steps of 4 at the configured angle until 4 fits.
        let rect = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 20.0), (0.0, 20.0)], false);
        let tab = tab_on(&rect, 0, 85.0, 20.0);
        assert!(!tab.exhausted);
        assert_eq!(tab.repairs, 7);
        assert_abs_diff_eq!(tab.angle, 85.0);
        assert_abs_diff_eq!(tab.height, 4.0);
    }

    #[test]
    fn exhausted_repair_keeps_last_tab_tried() {
        let sliver = polygon(&[(0.0, 0.0), (0.1, 0.0), (0.1, 5.0), (0.0, 5.0)], false);
        let tab = tab_on(&sliver, 0, 45.0, 10.0);
        assert!(tab.exhausted);
        // 44 angle steps (45°..=88°) and 4 further height cuts before the fifth runs out.
        assert_eq!(tab.repairs, 48);
        // The last pass used the smallest height step at the configured angle.
        assert_abs_diff_eq!(tab.height, 2.0);
        assert_abs_diff_eq!(tab.angle, 45.0);
        assert_point(tab.apex1, 2.0, -2.0);
        assert_point(tab.apex2, 0.1 - 2.0, -2.0);
    }

    #[test]
    fn repair_loop_is_bounded() {
        let sliver = polygon(&[(0.0, 0.0), (0.01, 0.0), (0.01, 5.0), (0.0, 5.0)], false);
        for angle in [0.5, 1.0, 30.0, 45.0, 87.5, 89.9] {
            let tab = tab_on(&sliver, 0, angle, 50.0);
            assert!(tab.repairs <= 94, "angle {angle}: {} repairs", tab.repairs);
            assert!(tab.exhausted);
        }
    }

    #[test]
    fn sloped_edge_tab_geometry() {
        // Right triangle with a hypotenuse from (10, 0) to (0, 10).
        let tri = polygon(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], false);
        let tab = tab_on(&tri, 1, 45.0, 1.0);
        let edge = tri.edges().nth(1).unwrap();
        let dir = (edge.to - edge.from).normalize();
        let normal = Vector2::new(-dir.y, dir.x);

        for (apex, base, toward) in [
            (tab.apex1, edge.from, 1.0),
            (tab.apex2, edge.to, -1.0),
        ] {
            let offset = apex - base;
            // Perpendicular distance equals the height, along-edge run equals h / tan(45°).
            assert_abs_diff_eq!(offset.dot(&normal).abs(), 1.0, epsilon = EPS);
            assert_abs_diff_eq!(offset.dot(&dir) * toward, 1.0, epsilon = EPS);
            assert!(!tri.contains(&apex));
        }
    }

    #[test]
    fn sloped_edge_of_cutout_points_into_hole() {
        // Hypotenuse x + y = 12 of a triangular cutout; the hole is on the x + y < 12 side.
        let hole = polygon(&[(4.0, 4.0), (8.0, 4.0), (4.0, 8.0)], true);
        let tab = tab_on(&hole, 1, 45.0, 0.5);
        for apex in [tab.apex1, tab.apex2] {
            assert!(apex.x + apex.y < 12.0 - 0.5, "{apex:?}");
        }
    }

    #[test]
    fn apexes_are_distinct() {
        let shapes = [
            square(0.0, 10.0, false),
            polygon(&[(0.0, 0.0), (10.0, 0.0), (3.0, 7.0)], false),
            polygon(&[(2.0, 1.0), (9.0, 3.0), (6.0, 9.0), (1.0, 6.0)], false),
        ];
        for poly in &shapes {
            for i in 0..poly.edge_count() {
                let tab = tab_on(poly, i, 45.0, 1.5);
                let edge = poly.edges().nth(i).unwrap();
                for apex in [tab.apex1, tab.apex2] {
                    assert_ne!(apex, edge.from);
                    assert_ne!(apex, edge.to);
                }
                assert_ne!(tab.apex1, tab.apex2);
            }
        }
    }
}
