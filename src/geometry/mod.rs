pub mod marker;
pub mod polygon;
pub mod segment;

pub use marker::MarkerIndex;
pub use polygon::{Polygon, Shape};
pub use segment::{EdgeDirection, Segment};
