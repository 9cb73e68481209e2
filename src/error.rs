use thiserror::Error;

/// Top-level error type for tab generation.
#[derive(Debug, Error)]
pub enum TabcraftError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Contour(#[from] ContourError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Run(#[from] RunError),
}

/// Invalid tab, score, or run configuration. Reported before any shape is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{parameter} = {value} is out of range ({min}, {max})")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unrecognized {option} value {value:?}")]
    UnknownOption { option: &'static str, value: String },
}

/// Errors raised while reading edge commands into contours.
#[derive(Debug, Error)]
pub enum ContourError {
    #[error("element {element}: unsupported edge command {letter:?}, only straight edges are handled")]
    UnsupportedEdgeCommand { element: String, letter: char },

    #[error("element {element}: contour is not closed, only tab markers can be open paths")]
    OpenContour { element: String },

    #[error("element {element}: drawing command before the first move-to")]
    MissingMoveTo { element: String },
}

/// Errors related to geometric inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by the run driver.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("nothing selected: no outline elements in the input")]
    NothingSelected,

    #[error("shape {element} failed")]
    ShapeFailed {
        element: String,
        #[source]
        source: Box<TabcraftError>,
    },
}

/// Convenience type alias for results using [`TabcraftError`].
pub type Result<T> = std::result::Result<T, TabcraftError>;
