use tracing::{debug, warn};

use crate::config::{RunConfig, ScoreConfig, ShapeErrorPolicy, TabConfig};
use crate::contour::{ElementRole, PathElement};
use crate::error::{Result, RunError, TabcraftError};
use crate::geometry::MarkerIndex;
use crate::operations::{AssembleShape, ShapeOutput};

/// A shape that could not be processed.
#[derive(Debug)]
pub struct ShapeFailure {
    pub element: String,
    pub error: TabcraftError,
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunOutput {
    /// Assembled shapes in input order.
    pub shapes: Vec<ShapeOutput>,
    /// Shapes skipped because of an error.
    pub failures: Vec<ShapeFailure>,
    /// Ids of the marker elements read. The caller may remove them from the drawing.
    pub consumed: Vec<String>,
}

/// Runs tab generation over a list of input elements.
///
/// # Algorithm
///
/// 1. Read every marker element into one [`MarkerIndex`], recording its id
///    as consumed.
/// 2. Read each outline element into a shape and assemble it, in input
///    order. The position among outline elements numbers grouped output.
/// 3. A failing shape is recorded and skipped, or ends the run, depending
///    on the configured [`ShapeErrorPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct TabRun {
    tab: TabConfig,
    score: ScoreConfig,
    run: RunConfig,
}

impl TabRun {
    #[must_use]
    pub fn new(tab: TabConfig, score: ScoreConfig, run: RunConfig) -> Self {
        Self { tab, score, run }
    }

    /// Executes the run.
    ///
    /// # Errors
    ///
    /// Returns `RunError::NothingSelected` if `elements` holds no outline
    /// element. A marker element that cannot be read, or a failing shape
    /// under `ShapeErrorPolicy::AbortRun`, ends the run with
    /// `RunError::ShapeFailed`.
    pub fn execute(&self, elements: &[PathElement]) -> Result<RunOutput> {
        if !elements.iter().any(|e| e.role == ElementRole::Outline) {
            return Err(RunError::NothingSelected.into());
        }

        let mut output = RunOutput::default();
        let markers = read_markers(elements, &mut output.consumed)?;
        debug!(
            marker_elements = output.consumed.len(),
            marker_edges = markers.len(),
            "built marker index"
        );

        let outlines = elements.iter().filter(|e| e.role == ElementRole::Outline);
        for (sequence, element) in outlines.enumerate() {
            match self.process(element, &markers, sequence) {
                Ok(shape) => output.shapes.push(shape),
                Err(error) => match self.run.on_shape_error {
                    ShapeErrorPolicy::SkipShape => {
                        warn!(element = %element.id, %error, "skipping shape");
                        output.failures.push(ShapeFailure {
                            element: element.id.clone(),
                            error,
                        });
                    }
                    ShapeErrorPolicy::AbortRun => {
                        return Err(shape_failed(&element.id, error));
                    }
                },
            }
        }

        debug!(
            shapes = output.shapes.len(),
            failures = output.failures.len(),
            "run finished"
        );
        Ok(output)
    }

    fn process(
        &self,
        element: &PathElement,
        markers: &MarkerIndex,
        sequence: usize,
    ) -> Result<ShapeOutput> {
        let shape = element.to_shape()?;
        Ok(AssembleShape::new(
            &shape,
            &self.tab,
            &self.score,
            markers,
            self.run.delivery,
            sequence,
        )
        .execute())
    }
}

/// Reads every marker element into one index, recording the ids read.
fn read_markers(elements: &[PathElement], consumed: &mut Vec<String>) -> Result<MarkerIndex> {
    let mut segments = Vec::new();
    for element in elements.iter().filter(|e| e.role == ElementRole::Marker) {
        let read = element
            .marker_segments()
            .map_err(|error| shape_failed(&element.id, error))?;
        segments.extend(read);
        consumed.push(element.id.clone());
    }
    Ok(MarkerIndex::new(segments))
}

fn shape_failed(element: &str, error: TabcraftError) -> TabcraftError {
    RunError::ShapeFailed {
        element: element.to_owned(),
        source: Box::new(error),
    }
    .into()
}
