use tracing::{debug, trace, warn};

use crate::config::{DeliveryMode, ScoreConfig, TabConfig};
use crate::geometry::{MarkerIndex, Segment, Shape};
use crate::math::Point2;

use super::classify::classify_enclosure;
use super::eligibility::EdgeEligibility;
use super::score::ScoreLine;
use super::tab::MakeTab;

/// A tab whose repair loop ran out of adjustments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhaustedTab {
    pub polygon: String,
    /// Index of the edge within its polygon, the closing edge being last.
    pub edge: usize,
}

/// Labels attached to a shape's output geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Model and score as two sibling geometries under one group.
    Grouped {
        group: String,
        model: String,
        /// `None` when the shape has no score marks.
        score: Option<String>,
    },
    /// A single geometry holding score marks followed by model outlines.
    Combined { label: String },
}

/// Assembled papercraft geometry of one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOutput {
    pub id: String,
    /// Style token of the input element, passed through untouched.
    pub style: Option<String>,
    /// Closed outlines with tabs inserted, primary polygon first. The last
    /// point of each outline repeats its first.
    pub outlines: Vec<Vec<Point2>>,
    /// Score marks of every tabbed edge, in edge order.
    pub score: Vec<Segment>,
    pub delivery: Delivery,
    pub tab_count: usize,
    pub exhausted: Vec<ExhaustedTab>,
}

impl ShapeOutput {
    /// Subpaths in the order a combined geometry lists them: every score mark
    /// as an open two-point path, then the closed outlines.
    #[must_use]
    pub fn combined_subpaths(&self) -> Vec<Vec<Point2>> {
        self.score
            .iter()
            .map(|mark| vec![mark.from, mark.to])
            .chain(self.outlines.iter().cloned())
            .collect()
    }
}

/// Turns one shape into its papercraft model and score geometry.
///
/// # Algorithm
///
/// 1. Classify which polygons of the shape are cutouts.
/// 2. Walk every polygon from its first point. For each edge the filter
///    admits, insert the two tab apexes before the edge end and collect the
///    edge's score marks. Other edges stay straight.
/// 3. Close each outline and label the result for the delivery mode.
///    `sequence` numbers grouped output and is ignored for combined output.
#[derive(Debug)]
pub struct AssembleShape<'a> {
    shape: &'a Shape,
    tab: &'a TabConfig,
    score: &'a ScoreConfig,
    markers: &'a MarkerIndex,
    delivery: DeliveryMode,
    sequence: usize,
}

impl<'a> AssembleShape<'a> {
    /// Creates a new assembly operation.
    ///
    /// `DeliveryMode::Auto` is resolved here against `score`.
    #[must_use]
    pub fn new(
        shape: &'a Shape,
        tab: &'a TabConfig,
        score: &'a ScoreConfig,
        markers: &'a MarkerIndex,
        delivery: DeliveryMode,
        sequence: usize,
    ) -> Self {
        Self {
            shape,
            tab,
            score,
            markers,
            delivery: delivery.resolve(score),
            sequence,
        }
    }

    /// Executes the assembly.
    #[must_use]
    pub fn execute(&self) -> ShapeOutput {
        let mut polygons = self.shape.polygons().to_vec();
        classify_enclosure(&mut polygons);

        let filter = EdgeEligibility::new(self.tab, self.markers);
        let mut outlines = Vec::with_capacity(polygons.len());
        let mut score = Vec::new();
        let mut tab_count = 0;
        let mut exhausted = Vec::new();

        for polygon in &polygons {
            let mut outline = Vec::with_capacity(polygon.edge_count() * 3 + 1);
            outline.push(polygon.points()[0]);

            for (index, edge) in polygon.edges().enumerate() {
                if filter.admits(&edge, polygon.enclosed) {
                    let tab = MakeTab::new(polygon, edge, self.tab).execute();
                    trace!(
                        polygon = polygon.id(),
                        edge = index,
                        repairs = tab.repairs,
                        "placed tab"
                    );
                    if tab.exhausted {
                        warn!(
                            polygon = polygon.id(),
                            edge = index,
                            "tab legs still cross after all adjustments"
                        );
                        exhausted.push(ExhaustedTab {
                            polygon: polygon.id().to_owned(),
                            edge: index,
                        });
                    }
                    outline.push(tab.apex1);
                    outline.push(tab.apex2);
                    score.extend(ScoreLine::new(edge, self.score.dash_length()).execute());
                    tab_count += 1;
                }
                outline.push(edge.to);
            }
            outlines.push(outline);
        }

        debug!(
            shape = self.shape.id(),
            polygons = polygons.len(),
            enclosed = polygons.iter().filter(|p| p.enclosed).count(),
            tabs = tab_count,
            marks = score.len(),
            "assembled shape"
        );

        ShapeOutput {
            id: self.shape.id().to_owned(),
            style: self.shape.style().map(str::to_owned),
            outlines,
            delivery: self.delivery_labels(!score.is_empty()),
            score,
            tab_count,
            exhausted,
        }
    }

    fn delivery_labels(&self, has_score: bool) -> Delivery {
        let n = self.sequence;
        match self.delivery {
            DeliveryMode::Combined => Delivery::Combined {
                label: format!("{}ms", self.shape.id()),
            },
            DeliveryMode::Grouped | DeliveryMode::Auto => Delivery::Grouped {
                group: format!("group{n}ms"),
                model: format!("model{n}"),
                score: has_score.then(|| format!("score{n}")),
            },
        }
    }
}
