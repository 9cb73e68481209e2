use std::mem;

use tracing::trace;

use crate::error::{ContourError, Result};
use crate::math::Point2;

use super::{EdgeCommand, ElementRole};

/// One subpath read from an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    /// Points in drawing order. A closed subpath ends with its start point.
    pub points: Vec<Point2>,
    pub closed: bool,
    /// Zero-based count of move-to commands before this subpath's own,
    /// dropped subpaths included.
    pub ordinal: usize,
}

/// Parser state between two edge commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContourState {
    /// Nothing read yet.
    #[default]
    Idle,
    /// An outline subpath is open.
    Collecting(Vec<Point2>),
    /// The last subpath was closed; drawing commands are ignored until the next move-to.
    Closed,
    /// A marker subpath is open. Markers may end without closing.
    MarkerOpen(Vec<Point2>),
}

/// Reads absolute edge commands of one element into subpaths.
///
/// Straight edges only. A subpath closes on an explicit close command or
/// when a segment ends exactly on the subpath start.
#[derive(Debug)]
pub struct ContourReader<'a> {
    element: &'a str,
    role: ElementRole,
    state: ContourState,
    subpaths: Vec<Subpath>,
    moves: usize,
}

impl<'a> ContourReader<'a> {
    #[must_use]
    pub fn new(element: &'a str, role: ElementRole) -> Self {
        Self {
            element,
            role,
            state: ContourState::Idle,
            subpaths: Vec::new(),
            moves: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ContourState {
        &self.state
    }

    /// Feeds one command.
    ///
    /// # Errors
    ///
    /// Returns `ContourError::UnsupportedEdgeCommand` for curve and arc
    /// commands, and `ContourError::MissingMoveTo` for a drawing command
    /// before the first move-to.
    pub fn feed(&mut self, command: &EdgeCommand) -> Result<()> {
        match *command {
            EdgeCommand::Unsupported(letter) => Err(ContourError::UnsupportedEdgeCommand {
                element: self.element.to_owned(),
                letter,
            }
            .into()),
            EdgeCommand::MoveTo(p) => {
                self.start_subpath(p);
                Ok(())
            }
            EdgeCommand::LineTo(p) => self.draw(command, |_, _| p),
            EdgeCommand::HorizontalTo(x) => {
                self.draw(command, |_, current| Point2::new(x, current.y))
            }
            EdgeCommand::VerticalTo(y) => {
                self.draw(command, |_, current| Point2::new(current.x, y))
            }
            EdgeCommand::ClosePath => self.draw(command, |start, _| start),
        }
    }

    /// Ends the input and returns every subpath read.
    ///
    /// # Errors
    ///
    /// Returns `ContourError::OpenContour` if an outline subpath is still open.
    pub fn finish(mut self) -> Result<Vec<Subpath>> {
        match mem::take(&mut self.state) {
            ContourState::Collecting(_) => Err(ContourError::OpenContour {
                element: self.element.to_owned(),
            }
            .into()),
            ContourState::MarkerOpen(points) => {
                let ordinal = self.ordinal();
                self.subpaths.push(Subpath {
                    points,
                    closed: false,
                    ordinal,
                });
                Ok(self.subpaths)
            }
            ContourState::Idle | ContourState::Closed => Ok(self.subpaths),
        }
    }

    fn start_subpath(&mut self, p: Point2) {
        let previous = mem::take(&mut self.state);
        let ordinal = self.ordinal();
        match previous {
            ContourState::MarkerOpen(points) => self.subpaths.push(Subpath {
                points,
                closed: false,
                ordinal,
            }),
            // An outline subpath left open is dropped when the next one starts.
            ContourState::Collecting(points) => {
                trace!(element = self.element, points = points.len(), "dropped open subpath");
            }
            ContourState::Idle | ContourState::Closed => {}
        }
        self.moves += 1;
        self.state = match self.role {
            ElementRole::Outline => ContourState::Collecting(vec![p]),
            ElementRole::Marker => ContourState::MarkerOpen(vec![p]),
        };
    }

    /// Appends the point `next(start, current)` to the open subpath.
    fn draw(
        &mut self,
        command: &EdgeCommand,
        next: impl FnOnce(Point2, Point2) -> Point2,
    ) -> Result<()> {
        let points = match &mut self.state {
            ContourState::Collecting(points) | ContourState::MarkerOpen(points) => points,
            ContourState::Closed => {
                trace!(element = self.element, command = %command.letter(), "ignored after close");
                return Ok(());
            }
            ContourState::Idle => {
                return Err(ContourError::MissingMoveTo {
                    element: self.element.to_owned(),
                }
                .into());
            }
        };
        let (Some(&start), Some(&current)) = (points.first(), points.last()) else {
            return Err(ContourError::MissingMoveTo {
                element: self.element.to_owned(),
            }
            .into());
        };

        let next = next(start, current);
        let is_close_path = matches!(command, EdgeCommand::ClosePath);
        if !(is_close_path && current == start) {
            points.push(next);
        }
        if is_close_path || next == start {
            self.close_subpath();
        }
        Ok(())
    }

    fn close_subpath(&mut self) {
        if let ContourState::Collecting(points) | ContourState::MarkerOpen(points) =
            mem::replace(&mut self.state, ContourState::Closed)
        {
            let ordinal = self.ordinal();
            self.subpaths.push(Subpath {
                points,
                closed: true,
                ordinal,
            });
        }
    }

    /// Ordinal of the subpath opened by the latest move-to.
    fn ordinal(&self) -> usize {
        self.moves.saturating_sub(1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TabcraftError;

    fn read(role: ElementRole, commands: &[EdgeCommand]) -> Result<Vec<Subpath>> {
        let mut reader = ContourReader::new("p1", role);
        for c in commands {
            reader.feed(c)?;
        }
        reader.finish()
    }

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn explicit_close() {
        let subpaths = read(
            ElementRole::Outline,
            &[
                EdgeCommand::MoveTo(pt(0.0, 0.0)),
                EdgeCommand::HorizontalTo(4.0),
                EdgeCommand::VerticalTo(3.0),
                EdgeCommand::ClosePath,
            ],
        )
        .unwrap();
        assert_eq!(subpaths.len(), 1);
        assert!(subpaths[0].closed);
        assert_eq!(
            subpaths[0].points,
            vec![pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 3.0), pt(0.0, 0.0)]
        );
    }

    #[test]
    fn return_to_start_closes() {
        let mut reader = ContourReader::new("p1", ElementRole::Outline);
        for c in [
            EdgeCommand::MoveTo(pt(0.0, 0.0)),
            EdgeCommand::LineTo(pt(4.0, 0.0)),
            EdgeCommand::LineTo(pt(4.0, 3.0)),
            EdgeCommand::LineTo(pt(0.0, 0.0)),
        ] {
            reader.feed(&c).unwrap();
        }
        assert_eq!(reader.state(), &ContourState::Closed);

        // A trailing close after the explicit return is ignored.
        reader.feed(&EdgeCommand::ClosePath).unwrap();
        let subpaths = reader.finish().unwrap();
        assert_eq!(subpaths.len(), 1);
        assert_eq!(subpaths[0].points.len(), 4);
    }

    #[test]
    fn several_subpaths() {
        let subpaths = read(
            ElementRole::Outline,
            &[
                EdgeCommand::MoveTo(pt(0.0, 0.0)),
                EdgeCommand::LineTo(pt(10.0, 0.0)),
                EdgeCommand::LineTo(pt(10.0, 10.0)),
                EdgeCommand::ClosePath,
                EdgeCommand::MoveTo(pt(3.0, 3.0)),
                EdgeCommand::LineTo(pt(7.0, 3.0)),
                EdgeCommand::LineTo(pt(7.0, 7.0)),
                EdgeCommand::ClosePath,
            ],
        )
        .unwrap();
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[1].points[0], pt(3.0, 3.0));
    }

    #[test]
    fn dropped_subpath_keeps_its_ordinal() {
        let subpaths = read(
            ElementRole::Outline,
            &[
                EdgeCommand::MoveTo(pt(0.0, 0.0)),
                EdgeCommand::LineTo(pt(9.0, 0.0)),
                EdgeCommand::MoveTo(pt(0.0, 0.0)),
                EdgeCommand::LineTo(pt(10.0, 0.0)),
                EdgeCommand::LineTo(pt(10.0, 10.0)),
                EdgeCommand::ClosePath,
                EdgeCommand::MoveTo(pt(3.0, 3.0)),
                EdgeCommand::LineTo(pt(7.0, 3.0)),
                EdgeCommand::LineTo(pt(7.0, 7.0)),
                EdgeCommand::ClosePath,
            ],
        )
        .unwrap();
        let ordinals: Vec<usize> = subpaths.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, [1, 2]);
    }

    #[test]
    fn open_outline_is_rejected() {
        let err = read(
            ElementRole::Outline,
            &[EdgeCommand::MoveTo(pt(0.0, 0.0)), EdgeCommand::LineTo(pt(1.0, 0.0))],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TabcraftError::Contour(ContourError::OpenContour { .. })
        ));
    }

    #[test]
    fn open_marker_is_accepted() {
        let subpaths = read(
            ElementRole::Marker,
            &[
                EdgeCommand::MoveTo(pt(0.0, 0.0)),
                EdgeCommand::LineTo(pt(1.0, 0.0)),
                EdgeCommand::MoveTo(pt(5.0, 5.0)),
                EdgeCommand::VerticalTo(8.0),
            ],
        )
        .unwrap();
        assert_eq!(subpaths.len(), 2);
        assert!(subpaths.iter().all(|s| !s.closed));
        assert_eq!(subpaths[1].points, vec![pt(5.0, 5.0), pt(5.0, 8.0)]);
    }

    #[test]
    fn drawing_before_move_to() {
        let err = read(ElementRole::Outline, &[EdgeCommand::LineTo(pt(1.0, 1.0))]).unwrap_err();
        assert!(matches!(
            err,
            TabcraftError::Contour(ContourError::MissingMoveTo { .. })
        ));
    }

    #[test]
    fn curves_are_unsupported() {
        let err = read(
            ElementRole::Outline,
            &[EdgeCommand::MoveTo(pt(0.0, 0.0)), EdgeCommand::Unsupported('C')],
        )
        .unwrap_err();
        match err {
            TabcraftError::Contour(ContourError::UnsupportedEdgeCommand { element, letter }) => {
                assert_eq!(element, "p1");
                assert_eq!(letter, 'C');
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_reads_nothing() {
        assert!(read(ElementRole::Outline, &[]).unwrap().is_empty());
    }
}
