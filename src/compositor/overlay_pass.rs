//! Overlay pass: nearest-neighbor resample of the classified raster to the
//! display resolution.
//!
//! Every target pixel samples exactly one source pixel. There is no
//! interpolation, so upscaled edges stay blocky and edge classification
//! matches the source raster.

use rayon::prelude::*;

use crate::constants::RGBA_STRIDE;
use crate::model::{OverlayRaster, RasterDimensions, SegmentationRaster};
use crate::resolver::LegendResolver;

/// Source coordinate sampled by target coordinate `dst`.
///
/// `floor(dst * src_len / dst_len)`, clamped to the last source index.
/// Both lengths must be non-zero.
#[inline]
fn sample_coord(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    let scaled = u64::from(dst) * u64::from(src_len) / u64::from(dst_len);
    // scaled < src_len whenever dst < dst_len; the clamp covers callers outside that range
    u32::try_from(scaled).map_or(src_len - 1, |s| s.min(src_len - 1))
}

/// Borrowed inputs shared by every row.
struct RowSampler<'a> {
    resolver: &'a LegendResolver,
    raster: &'a SegmentationRaster,
    source: RasterDimensions,
    target: RasterDimensions,
    columns: Vec<u32>,
    alpha: u8,
}

impl<'a> RowSampler<'a> {
    fn new(
        resolver: &'a LegendResolver,
        raster: &'a SegmentationRaster,
        source: RasterDimensions,
        target: RasterDimensions,
        alpha: u8,
    ) -> Self {
        let columns = (0..target.width)
            .map(|x| sample_coord(x, source.width, target.width))
            .collect();
        Self {
            resolver,
            raster,
            source,
            target,
            columns,
            alpha,
        }
    }

    /// Fill one target row. `row` starts fully transparent.
    fn fill_row(&self, y: u32, row: &mut [u8]) {
        let seg_y = sample_coord(y, self.source.height, self.target.height);
        for (out, &seg_x) in row.chunks_exact_mut(RGBA_STRIDE).zip(&self.columns) {
            let sampled = self.raster.color_at(self.source.width, seg_x, seg_y);
            if let Some(class) = self.resolver.class_of(sampled) {
                let color = self.resolver.color(class);
                out.copy_from_slice(&[color.r, color.g, color.b, self.alpha]);
            }
        }
    }
}

/// Composite the overlay one row at a time.
///
/// `source` must be the validated dimensions of `raster`.
pub(super) fn composite_sequential(
    resolver: &LegendResolver,
    raster: &SegmentationRaster,
    source: RasterDimensions,
    target: RasterDimensions,
    alpha: u8,
) -> OverlayRaster {
    let sampler = RowSampler::new(resolver, raster, source, target, alpha);
    let mut overlay = OverlayRaster::transparent(target);
    let stride = target.row_stride();

    for (y, row) in overlay.data_mut().chunks_exact_mut(stride).enumerate() {
        sampler.fill_row(y as u32, row);
    }

    overlay
}

/// Composite the overlay with disjoint target rows written concurrently.
pub(super) fn composite_parallel(
    resolver: &LegendResolver,
    raster: &SegmentationRaster,
    source: RasterDimensions,
    target: RasterDimensions,
    alpha: u8,
) -> OverlayRaster {
    let sampler = RowSampler::new(resolver, raster, source, target, alpha);
    let mut overlay = OverlayRaster::transparent(target);
    let stride = target.row_stride();

    overlay
        .data_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| sampler.fill_row(y as u32, row));

    overlay
}
