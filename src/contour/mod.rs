mod reader;

pub use reader::{ContourReader, ContourState, Subpath};

use tracing::debug;

use crate::error::Result;
use crate::geometry::{Polygon, Segment, Shape};
use crate::math::Point2;

/// An absolute edge command of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeCommand {
    MoveTo(Point2),
    LineTo(Point2),
    /// Horizontal line to `x`, keeping the current y.
    HorizontalTo(f64),
    /// Vertical line to `y`, keeping the current x.
    VerticalTo(f64),
    ClosePath,
    /// Any other command (curves, arcs), identified by its path letter.
    Unsupported(char),
}

impl EdgeCommand {
    /// Path-data letter of the command.
    #[must_use]
    pub fn letter(&self) -> char {
        match self {
            Self::MoveTo(_) => 'M',
            Self::LineTo(_) => 'L',
            Self::HorizontalTo(_) => 'H',
            Self::VerticalTo(_) => 'V',
            Self::ClosePath => 'Z',
            Self::Unsupported(letter) => *letter,
        }
    }
}

/// What an input element contributes to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// A shape to receive tabs.
    Outline,
    /// Marker edges selecting where tabs go.
    Marker,
}

/// One input element: a path already reduced to absolute edge commands.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub id: String,
    /// Opaque style token, copied to the output.
    pub style: Option<String>,
    pub role: ElementRole,
    pub commands: Vec<EdgeCommand>,
}

impl PathElement {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        style: Option<String>,
        role: ElementRole,
        commands: Vec<EdgeCommand>,
    ) -> Self {
        Self {
            id: id.into(),
            style,
            role,
            commands,
        }
    }

    /// Reads the commands into subpaths using this element's role.
    ///
    /// # Errors
    ///
    /// Returns a `ContourError` if the commands are not straight, closed edges
    /// (open subpaths are allowed for markers).
    pub fn subpaths(&self) -> Result<Vec<Subpath>> {
        let mut reader = ContourReader::new(&self.id, self.role);
        for command in &self.commands {
            reader.feed(command)?;
        }
        reader.finish()
    }

    /// Reads the element as a shape. Polygon ids follow the move-to count:
    /// `<id>` for the first subpath, then `<id>-1`, `<id>-2`, …. An open
    /// subpath dropped by the reader still uses up its id. The first subpath
    /// kept becomes the primary polygon.
    ///
    /// # Errors
    ///
    /// Returns a `ContourError` for unreadable commands and
    /// `GeometryError::Degenerate` for an empty element or a subpath with
    /// fewer than 3 distinct points.
    pub fn to_shape(&self) -> Result<Shape> {
        let polygons = self
            .subpaths()?
            .into_iter()
            .map(|subpath| {
                let id = match subpath.ordinal {
                    0 => self.id.clone(),
                    n => format!("{}-{n}", self.id),
                };
                Polygon::new(id, subpath.points, self.style.clone())
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(element = %self.id, polygons = polygons.len(), "read shape");
        Shape::new(self.id.clone(), polygons)
    }

    /// Reads the element as marker edges: consecutive point pairs of every
    /// subpath, the closing edge included for closed subpaths.
    ///
    /// # Errors
    ///
    /// Returns a `ContourError` for unreadable commands.
    pub fn marker_segments(&self) -> Result<Vec<Segment>> {
        let segments: Vec<Segment> = self
            .subpaths()?
            .iter()
            .flat_map(|subpath| {
                subpath
                    .points
                    .windows(2)
                    .map(|pair| Segment::new(pair[0], pair[1]))
            })
            .collect();
        debug!(element = %self.id, segments = segments.len(), "read marker edges");
        Ok(segments)
    }
}
