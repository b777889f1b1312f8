//! Data models for legends, rasters, and census results.

mod census;
mod color;
mod legend;
mod raster;

pub use census::ClassCensus;
pub use color::Color;
pub use legend::Legend;
pub use raster::{OverlayRaster, RasterDimensions, SegmentationRaster};
