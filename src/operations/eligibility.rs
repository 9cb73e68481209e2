use crate::config::{MarkerMode, TabConfig};
use crate::geometry::{MarkerIndex, Segment};

/// Decides per edge whether a tab is requested.
///
/// Combines the tab set policy (by enclosure status) with the optional
/// marker gate. Without a marker mode the marker index is never consulted.
#[derive(Debug, Clone, Copy)]
pub struct EdgeEligibility<'a> {
    config: &'a TabConfig,
    markers: &'a MarkerIndex,
}

impl<'a> EdgeEligibility<'a> {
    #[must_use]
    pub fn new(config: &'a TabConfig, markers: &'a MarkerIndex) -> Self {
        Self { config, markers }
    }

    /// Returns `true` if `edge` of a polygon with the given enclosure status gets a tab.
    #[must_use]
    pub fn admits(&self, edge: &Segment, enclosed: bool) -> bool {
        self.config.policy().admits(enclosed) && self.marker_gate(edge)
    }

    fn marker_gate(&self, edge: &Segment) -> bool {
        match self.config.marker_mode() {
            None => true,
            Some(mode) => {
                let marked = self.markers.contains(&edge.from, &edge.to);
                if marked {
                    mode == MarkerMode::TabsOnMarked
                } else {
                    mode == MarkerMode::TabsExceptMarked
                }
            }
        }
    }
}
