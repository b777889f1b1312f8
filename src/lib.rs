//! segcensus - Segmentation census and overlay compositing
//!
//! Turns the color-coded raster of a semantic-segmentation classifier into a
//! per-class pixel census and a translucent overlay sized for display.

pub mod compositor;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod model;
pub mod palette;
pub mod resolver;

pub use compositor::{Compositor, CompositorOptions, ExecutionMode, SegmentationReport, analyze};
pub use config::{CensusConfig, ConfigError, LogLevel};
pub use error::{CensusError, Result};
pub use model::{ClassCensus, Color, Legend, OverlayRaster, RasterDimensions, SegmentationRaster};
pub use resolver::{DuplicatePolicy, LegendResolver};
