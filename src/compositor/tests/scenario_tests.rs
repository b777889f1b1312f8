//! End-to-end tests through `analyze`.

use super::{quad_legend, raster_from};
use crate::compositor::{CompositorOptions, ExecutionMode, analyze};
use crate::error::CensusError;
use crate::model::{Legend, RasterDimensions, SegmentationRaster};
use crate::resolver::DuplicatePolicy;

fn pets() -> Legend {
    Legend::new().with("dog", [0, 128, 0]).with("cat", [128, 0, 0])
}

#[test]
fn test_two_pixel_scenario() {
    let raster = SegmentationRaster::with_dimensions(vec![0, 128, 0, 255, 128, 0, 0, 255], 2, 1);

    let report = analyze(
        &pets(),
        &raster,
        RasterDimensions::new(2, 1),
        &CompositorOptions::default(),
    )
    .unwrap();

    assert_eq!(report.census.get("dog"), Some(1));
    assert_eq!(report.census.get("cat"), Some(1));
    assert_eq!(report.census.len(), 2);
    assert_eq!(report.overlay.data(), &[0, 128, 0, 150, 128, 0, 0, 150]);
}

#[test]
fn test_repeated_invocations_are_identical() {
    let legend = quad_legend();
    let pixels: Vec<[u8; 3]> = (0..9 * 7)
        .map(|i| match i % 4 {
            0 => [0, 128, 0],
            1 => [128, 0, 0],
            2 => [7, 7, 7],
            _ => [0, 0, 128],
        })
        .collect();
    let raster = raster_from(&pixels, 9, 7);
    let target = RasterDimensions::new(23, 31);

    for options in [
        CompositorOptions::default(),
        CompositorOptions::new().execution(ExecutionMode::Parallel { min_pixels: 0 }),
    ] {
        let first = analyze(&legend, &raster, target, &options).unwrap();
        let second = analyze(&legend, &raster, target, &options).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.census.to_json().unwrap(), second.census.to_json().unwrap());
    }
}

#[test]
fn test_zero_target_width_rejected() {
    let raster = SegmentationRaster::with_dimensions(vec![0, 128, 0, 255], 1, 1);

    let err = analyze(
        &pets(),
        &raster,
        RasterDimensions::new(0, 1),
        &CompositorOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, CensusError::InvalidDimensions { .. }));
    assert!(err.is_input_error());
}

#[test]
fn test_length_five_raster_rejected() {
    let raster = SegmentationRaster::new(vec![0, 128, 0, 255, 0]);

    let err = analyze(
        &pets(),
        &raster,
        RasterDimensions::new(2, 2),
        &CompositorOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, CensusError::MalformedRaster { .. }));
}

#[test]
fn test_shared_color_legend_rejected() {
    let legend = Legend::new()
        .with("deer", [10, 20, 30])
        .with("goat", [10, 20, 30]);
    let raster = raster_from(&[[10, 20, 30]], 1, 1);

    let err = analyze(
        &legend,
        &raster,
        RasterDimensions::new(1, 1),
        &CompositorOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, CensusError::Configuration { .. }));
}

#[test]
fn test_shared_color_legend_with_opt_in() {
    let legend = Legend::new()
        .with("deer", [10, 20, 30])
        .with("goat", [10, 20, 30]);
    let raster = raster_from(&[[10, 20, 30]], 1, 1);
    let options = CompositorOptions::new().duplicate_policy(DuplicatePolicy::FirstSeenWins);

    let report = analyze(&legend, &raster, RasterDimensions::new(1, 1), &options).unwrap();

    assert_eq!(report.census.get("deer"), Some(1));
    assert_eq!(report.census.get("goat"), Some(0));
    assert_eq!(report.overlay.data(), &[10, 20, 30, 150]);
}

#[test]
fn test_no_detections_is_not_an_error() {
    let raster = raster_from(&[[1, 1, 1], [2, 2, 2]], 2, 1);

    let report = analyze(
        &pets(),
        &raster,
        RasterDimensions::new(4, 2),
        &CompositorOptions::default(),
    )
    .unwrap();

    assert!(report.census.detected().is_empty());
    assert_eq!(report.census.len(), 2);
    assert!(report.overlay.data().chunks_exact(4).all(|px| px[3] == 0));
}
