//! Segmentation raster decoding and overlay encoding with the `image` crate.

use std::path::Path;

use image::RgbaImage;

use crate::error::{CensusError, Result};
use crate::model::{OverlayRaster, RasterDimensions, SegmentationRaster};

impl SegmentationRaster {
    /// Wrap a decoded RGBA image, keeping its dimensions.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::with_dimensions(img.into_raw(), width, height)
    }
}

impl OverlayRaster {
    /// Copy the overlay into an `RgbaImage` for encoding or display.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width(), self.height(), self.data().to_vec()).ok_or_else(|| {
            CensusError::malformed_raster(format!(
                "overlay buffer does not fit {}",
                self.dimensions()
            ))
        })
    }
}

/// Decode a segmentation raster from encoded image bytes.
pub fn decode_segmentation(data: &[u8]) -> Result<SegmentationRaster> {
    let img = image::load_from_memory(data)?.to_rgba8();
    log::trace!(
        "Decoded {}x{} segmentation raster",
        img.width(),
        img.height()
    );
    Ok(SegmentationRaster::from_rgba_image(img))
}

/// Load a segmentation raster from an image file.
pub fn load_segmentation(path: &Path) -> Result<SegmentationRaster> {
    let img = image::open(path)?.to_rgba8();
    log::debug!(
        "Loaded {}x{} segmentation raster from {:?}",
        img.width(),
        img.height(),
        path
    );
    Ok(SegmentationRaster::from_rgba_image(img))
}

/// Dimensions of the image the overlay will be displayed on.
pub fn display_dimensions(path: &Path) -> Result<RasterDimensions> {
    let (width, height) = image::image_dimensions(path)?;
    Ok(RasterDimensions::new(width, height))
}

/// Encode an overlay to an image file; the format follows the extension.
pub fn save_overlay(overlay: &OverlayRaster, path: &Path) -> Result<()> {
    overlay.to_rgba_image()?.save(path)?;
    log::debug!("Saved {} overlay to {:?}", overlay.dimensions(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Compositor;
    use crate::model::Legend;
    use crate::resolver::LegendResolver;
    use image::Rgba;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("segcensus-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_from_rgba_image_keeps_dimensions() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let raster = SegmentationRaster::from_rgba_image(img);
        assert_eq!(
            raster.declared_dimensions(),
            Some(RasterDimensions::new(3, 2))
        );
        assert_eq!(raster.data().len(), 3 * 2 * 4);
    }

    #[test]
    fn test_png_roundtrip_through_compositor() {
        let path = temp_path("segmentation.png");
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 128, 0, 255]));
        img.save(&path).unwrap();

        let raster = load_segmentation(&path).unwrap();
        let legend = Legend::new().with("dog", [0, 128, 0]);
        let resolver = LegendResolver::new(&legend).unwrap();
        let census = Compositor::new(&resolver).census(&raster).unwrap();
        assert_eq!(census.get("dog"), Some(1));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_decode_segmentation_from_bytes() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([128, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let raster = decode_segmentation(&bytes).unwrap();
        assert_eq!(raster.resolve_dimensions().unwrap(), RasterDimensions::new(2, 2));
    }

    #[test]
    fn test_decode_garbage_is_image_error() {
        let err = decode_segmentation(&[0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, CensusError::Image(_)));
    }

    #[test]
    fn test_save_overlay() {
        let path = temp_path("overlay.png");
        let legend = Legend::new().with("cat", [128, 0, 0]);
        let resolver = LegendResolver::new(&legend).unwrap();
        let raster = SegmentationRaster::with_dimensions(vec![128, 0, 0, 255], 1, 1);
        let overlay = Compositor::new(&resolver)
            .overlay(&raster, RasterDimensions::new(3, 2))
            .unwrap();

        save_overlay(&overlay, &path).unwrap();

        assert_eq!(
            display_dimensions(&path).unwrap(),
            RasterDimensions::new(3, 2)
        );
        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.get_pixel(2, 1), &Rgba([128, 0, 0, 150]));

        let _ = std::fs::remove_file(&path);
    }
}
