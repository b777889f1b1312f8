//! Behavioural tests for the census and overlay passes.
//!
//! These tests exercise the public compositor API end to end on small,
//! hand-built rasters.

mod scenario_tests;

use crate::model::{Legend, SegmentationRaster};

/// Legend with four distinct colors used across the tests.
pub(super) fn quad_legend() -> Legend {
    Legend::new()
        .with("dog", [0, 128, 0])
        .with("cat", [128, 0, 0])
        .with("bird", [128, 128, 0])
        .with("horse", [0, 0, 128])
}

/// Build an explicitly sized raster from `(r, g, b)` pixels in row-major order.
pub(super) fn raster_from(pixels: &[[u8; 3]], width: u32, height: u32) -> SegmentationRaster {
    let data = pixels
        .iter()
        .flat_map(|&[r, g, b]| [r, g, b, 255])
        .collect();
    SegmentationRaster::with_dimensions(data, width, height)
}
