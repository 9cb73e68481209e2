use crate::geometry::Segment;
use crate::math::{is_close, Point2, Vector2};

/// Generates score-line marks along an edge.
///
/// A dash cycle is a gap of `dash_length` followed by a mark of
/// `dash_length`, starting from one end of the edge. Cycles stop while a
/// cushion of one dash length still separates them from the far end; the
/// remainder is left unmarked. A zero dash length yields one solid mark
/// covering the whole edge.
#[derive(Debug, Clone, Copy)]
pub struct ScoreLine {
    edge: Segment,
    dash_length: f64,
}

impl ScoreLine {
    /// Creates a new score-line operation.
    #[must_use]
    pub fn new(edge: Segment, dash_length: f64) -> Self {
        Self { edge, dash_length }
    }

    /// Executes the operation, returning one segment per mark.
    #[must_use]
    pub fn execute(&self) -> Vec<Segment> {
        let (p1, p2) = (self.edge.from, self.edge.to);
        let dash = self.dash_length;

        if is_close(dash, 0.0) {
            return vec![self.edge];
        }

        if is_close(p1.y, p2.y) {
            let (start, far) = if p1.x < p2.x { (p1, p2.x) } else { (p2, p1.x) };
            axis_marks(start.x, far, dash)
                .into_iter()
                .map(|(a, b)| Segment::new(Point2::new(a, start.y), Point2::new(b, start.y)))
                .collect()
        } else if is_close(p1.x, p2.x) {
            let (start, far) = if p1.y < p2.y { (p1, p2.y) } else { (p2, p1.y) };
            axis_marks(start.y, far, dash)
                .into_iter()
                .map(|(a, b)| Segment::new(Point2::new(start.x, a), Point2::new(start.x, b)))
                .collect()
        } else {
            self.sloped_marks()
        }
    }

    /// Walks from the endpoint with the larger y toward the other one.
    fn sloped_marks(&self) -> Vec<Segment> {
        let dash = self.dash_length;
        let (top, bottom) = if self.edge.from.y > self.edge.to.y {
            (self.edge.from, self.edge.to)
        } else {
            (self.edge.to, self.edge.from)
        };

        let m = (top.y - bottom.y) / (top.x - bottom.x);
        let theta = m.atan();
        let (sin, cos) = theta.sin_cos();
        let sign = if m > 0.0 {
            1.0
        } else if m < 0.0 {
            -1.0
        } else {
            0.0
        };

        let y_cushion = bottom.y + dash * sin;
        let x_cushion = bottom.x + sign * dash * cos;
        let step = Vector2::new(sign * dash * cos, sign * dash * sin);

        let mut marks = Vec::new();
        let mut pos = top;
        loop {
            let next_y = pos.y - dash * 2.0 * sin;
            let next_x = pos.x - sign * dash * 2.0 * cos;
            let x_ok = (m < 0.0 && next_x <= x_cushion) || (m > 0.0 && next_x >= x_cushion);
            if !(next_y >= y_cushion && x_ok) {
                break;
            }
            pos -= step;
            let mark_start = pos;
            pos -= step;
            marks.push(Segment::new(mark_start, pos));
        }
        marks
    }
}

/// Dash marks along one axis from `start` toward `far` as `(from, to)` coordinates.
fn axis_marks(start: f64, far: f64, dash: f64) -> Vec<(f64, f64)> {
    let cushion = far - dash;
    let mut pos = start;
    let mut marks = Vec::new();
    while pos + dash * 2.0 <= cushion {
        pos += dash;
        let mark_start = pos;
        pos += dash;
        marks.push((mark_start, pos));
    }
    marks
}
