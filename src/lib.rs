pub mod config;
pub mod contour;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod pipeline;

pub use error::{Result, TabcraftError};
