//! File and image I/O around the core.
//!
//! This module provides:
//! - Segmentation raster decoding from image files (PNG, JPEG)
//! - Overlay encoding to RGBA images
//! - Legend and census JSON files
//!
//! The core itself never touches the filesystem; these helpers exist for
//! callers such as the command-line tool.

mod image_io;
mod json_io;

pub use image_io::{decode_segmentation, display_dimensions, load_segmentation, save_overlay};
pub use json_io::{read_legend, write_census};
