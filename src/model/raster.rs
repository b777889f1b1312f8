//! Segmentation and overlay raster buffers.

use crate::constants::RGBA_STRIDE;
use crate::error::{CensusError, Result};

use super::Color;

/// Width and height of a raster in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterDimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl RasterDimensions {
    /// Create dimensions without validating them.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Create dimensions, rejecting a zero width or height.
    ///
    /// `what` names the raster in the error message (e.g. "target").
    pub fn checked(width: u32, height: u32, what: &str) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CensusError::invalid_dimensions(format!(
                "{} dimensions must be positive, got {}x{}",
                what, width, height
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of RGBA bytes, or `None` if it overflows `usize`.
    pub fn byte_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(RGBA_STRIDE)
    }

    /// Row stride in bytes.
    pub fn row_stride(&self) -> usize {
        self.width as usize * RGBA_STRIDE
    }
}

impl std::fmt::Display for RasterDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Classifier output: row-major RGBA samples, optionally with explicit dimensions.
///
/// Alpha is carried but never used for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationRaster {
    data: Vec<u8>,
    dimensions: Option<RasterDimensions>,
}

impl SegmentationRaster {
    /// Wrap RGBA samples whose dimensions the producer did not report.
    ///
    /// Resampling then assumes a square raster; see
    /// [`SegmentationRaster::resolve_dimensions`].
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            dimensions: None,
        }
    }

    /// Wrap RGBA samples with explicit dimensions.
    pub fn with_dimensions(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            dimensions: Some(RasterDimensions::new(width, height)),
        }
    }

    /// Raw RGBA samples.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Dimensions reported by the producer, if any.
    pub fn declared_dimensions(&self) -> Option<RasterDimensions> {
        self.dimensions
    }

    /// Number of whole RGBA pixels in the buffer.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / RGBA_STRIDE
    }

    /// Check the buffer against the RGBA stride and any declared dimensions.
    pub fn validate(&self) -> Result<()> {
        let len = self.data.len();
        if len % RGBA_STRIDE != 0 {
            return Err(CensusError::malformed_raster(format!(
                "length {} is not a multiple of {}",
                len, RGBA_STRIDE
            )));
        }

        if let Some(dims) = self.dimensions {
            let dims = RasterDimensions::checked(dims.width, dims.height, "segmentation")?;
            if dims.byte_len() != Some(len) {
                return Err(CensusError::malformed_raster(format!(
                    "length {} does not match declared {} RGBA raster",
                    len, dims
                )));
            }
        }

        Ok(())
    }

    /// Dimensions used for resampling.
    ///
    /// Declared dimensions win. Without them the raster is assumed square,
    /// so `len / 4` must be a non-zero perfect square; anything else is
    /// reported rather than guessed.
    pub fn resolve_dimensions(&self) -> Result<RasterDimensions> {
        self.validate()?;

        if let Some(dims) = self.dimensions {
            return Ok(dims);
        }

        let pixels = self.pixel_count();
        if pixels == 0 {
            return Err(CensusError::invalid_dimensions(
                "cannot derive dimensions of an empty segmentation raster",
            ));
        }

        let side = pixels.isqrt();
        if side * side != pixels {
            return Err(CensusError::malformed_raster(format!(
                "{} pixels without declared dimensions is not a square raster",
                pixels
            )));
        }

        let side = u32::try_from(side).map_err(|_| {
            CensusError::malformed_raster(format!("square side {} exceeds u32", side))
        })?;

        log::warn!(
            "Segmentation raster has no declared dimensions, assuming {}x{}",
            side,
            side
        );
        Ok(RasterDimensions::new(side, side))
    }

    /// Iterate pixel colors in row-major order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.data.chunks_exact(RGBA_STRIDE).map(Color::from_rgba)
    }

    /// Color at `(x, y)` for a raster of the given width.
    ///
    /// The caller guarantees `(x, y)` lies inside validated dimensions.
    #[inline]
    pub(crate) fn color_at(&self, width: u32, x: u32, y: u32) -> Color {
        let idx = (y as usize * width as usize + x as usize) * RGBA_STRIDE;
        Color::from_rgba(&self.data[idx..idx + RGBA_STRIDE])
    }
}

/// Translucent RGBA buffer at the display resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRaster {
    dimensions: RasterDimensions,
    data: Vec<u8>,
}

impl OverlayRaster {
    /// Create a fully transparent overlay.
    pub(crate) fn transparent(dimensions: RasterDimensions) -> Self {
        Self {
            dimensions,
            data: vec![0; dimensions.pixel_count() * RGBA_STRIDE],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// Overlay dimensions.
    pub fn dimensions(&self) -> RasterDimensions {
        self.dimensions
    }

    /// Raw RGBA samples.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the overlay, returning its RGBA samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`, or `None` outside the overlay.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.dimensions.width || y >= self.dimensions.height {
            return None;
        }
        let idx = (y as usize * self.dimensions.width as usize + x as usize) * RGBA_STRIDE;
        let px = &self.data[idx..idx + RGBA_STRIDE];
        Some([px[0], px[1], px[2], px[3]])
    }
}
