//! Global constants for segmentation census and overlay compositing

/// Bytes per pixel in both the segmentation raster and the overlay (R, G, B, A)
pub const RGBA_STRIDE: usize = 4;

/// Overlay alpha written for matched pixels (out of 255)
pub const DEFAULT_OVERLAY_ALPHA: u8 = 150;

/// Alpha written for pixels whose sampled source color has no legend entry
pub const TRANSPARENT_ALPHA: u8 = 0;

/// Target pixel count below which the parallel path runs sequentially
pub const DEFAULT_PARALLEL_MIN_PIXELS: usize = 65_536;
