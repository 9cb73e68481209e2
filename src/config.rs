use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, Result};
use crate::math::is_close;

/// Which polygons of a shape are candidates for tabs, by enclosure status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabSetPolicy {
    #[default]
    Both,
    /// Only cutouts (polygons enclosed by another polygon of the shape).
    InsideOnly,
    /// Only polygons not enclosed by any other.
    OutsideOnly,
}

impl TabSetPolicy {
    /// Returns `true` if a polygon with the given enclosure status may receive tabs.
    #[must_use]
    pub fn admits(self, enclosed: bool) -> bool {
        match self {
            Self::Both => true,
            Self::InsideOnly => enclosed,
            Self::OutsideOnly => !enclosed,
        }
    }
}

impl FromStr for TabSetPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "both" => Ok(Self::Both),
            "inside" => Ok(Self::InsideOnly),
            "outside" => Ok(Self::OutsideOnly),
            _ => Err(ConfigError::UnknownOption {
                option: "tab set policy",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for TabSetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Both => "both",
            Self::InsideOnly => "inside",
            Self::OutsideOnly => "outside",
        })
    }
}

/// How marker edges select tab placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerMode {
    /// Tabs only on edges that match a marker edge.
    TabsOnMarked,
    /// Tabs on every edge except those matching a marker edge.
    TabsExceptMarked,
}

impl MarkerMode {
    /// Maps the "put tabs where the markers are" checkbox to a mode.
    #[must_use]
    pub fn from_tab_marker(tabs_on_marked: bool) -> Self {
        if tabs_on_marked {
            Self::TabsOnMarked
        } else {
            Self::TabsExceptMarked
        }
    }
}

impl FromStr for MarkerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "on-marked" => Ok(Self::TabsOnMarked),
            "except-marked" => Ok(Self::TabsExceptMarked),
            _ => Err(ConfigError::UnknownOption {
                option: "marker mode",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for MarkerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TabsOnMarked => "on-marked",
            Self::TabsExceptMarked => "except-marked",
        })
    }
}

/// How model and score geometry of a shape are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Grouped for solid score lines, combined for dashed ones.
    #[default]
    Auto,
    /// Model and score as sibling geometries in one group.
    Grouped,
    /// One geometry holding score marks and model outlines.
    Combined,
}

impl DeliveryMode {
    /// Resolves `Auto` against the score configuration. Explicit modes are returned as is.
    #[must_use]
    pub fn resolve(self, score: &ScoreConfig) -> Self {
        match self {
            Self::Auto if score.is_solid() => Self::Grouped,
            Self::Auto => Self::Combined,
            explicit => explicit,
        }
    }
}

impl FromStr for DeliveryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "grouped" => Ok(Self::Grouped),
            "combined" => Ok(Self::Combined),
            _ => Err(ConfigError::UnknownOption {
                option: "delivery mode",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Grouped => "grouped",
            Self::Combined => "combined",
        })
    }
}

/// What the run driver does when one shape fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeErrorPolicy {
    /// Record the failure and keep processing the remaining shapes.
    #[default]
    SkipShape,
    /// Stop the run with the shape's error.
    AbortRun,
}

/// Tab geometry and placement parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabConfig {
    angle: f64,
    height: f64,
    policy: TabSetPolicy,
    marker_mode: Option<MarkerMode>,
}

impl TabConfig {
    /// Creates a tab configuration with policy `Both` and no marker mode.
    ///
    /// * `angle` - Angle of the tab sides in degrees, strictly between 0 and 90.
    /// * `height` - Tab height in drawing units, strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` if either value is out of range.
    pub fn new(angle: f64, height: f64) -> Result<Self> {
        if !(angle > 0.0 && angle < 90.0) {
            return Err(ConfigError::OutOfRange {
                parameter: "tab angle",
                value: angle,
                min: 0.0,
                max: 90.0,
            }
            .into());
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(ConfigError::OutOfRange {
                parameter: "tab height",
                value: height,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(Self {
            angle,
            height,
            policy: TabSetPolicy::Both,
            marker_mode: None,
        })
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TabSetPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_marker_mode(mut self, marker_mode: Option<MarkerMode>) -> Self {
        self.marker_mode = marker_mode;
        self
    }

    /// Returns the tab side angle in degrees.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn policy(&self) -> TabSetPolicy {
        self.policy
    }

    #[must_use]
    pub fn marker_mode(&self) -> Option<MarkerMode> {
        self.marker_mode
    }
}

impl Default for TabConfig {
    fn default() -> Self {
        Self {
            angle: 45.0,
            height: 0.4,
            policy: TabSetPolicy::Both,
            marker_mode: None,
        }
    }
}

/// Score-line parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreConfig {
    dash_length: f64,
}

impl ScoreConfig {
    /// Creates a score configuration. A dash length of zero draws solid lines.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` if `dash_length` is negative or not finite.
    pub fn new(dash_length: f64) -> Result<Self> {
        if !dash_length.is_finite() || dash_length < 0.0 {
            return Err(ConfigError::OutOfRange {
                parameter: "dash length",
                value: dash_length,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(Self { dash_length })
    }

    #[must_use]
    pub fn dash_length(&self) -> f64 {
        self.dash_length
    }

    /// Returns `true` if score lines are drawn solid.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        is_close(self.dash_length, 0.0)
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self { dash_length: 0.1 }
    }
}

/// Output and failure-handling options of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunConfig {
    pub delivery: DeliveryMode,
    pub on_shape_error: ShapeErrorPolicy,
}

impl RunConfig {
    #[must_use]
    pub fn with_delivery(mut self, delivery: DeliveryMode) -> Self {
        self.delivery = delivery;
        self
    }

    #[must_use]
    pub fn with_shape_error_policy(mut self, on_shape_error: ShapeErrorPolicy) -> Self {
        self.on_shape_error = on_shape_error;
        self
    }

    /// Resolves `Auto` delivery against the score configuration.
    #[must_use]
    pub fn resolved_delivery(&self, score: &ScoreConfig) -> DeliveryMode {
        self.delivery.resolve(score)
    }
}
