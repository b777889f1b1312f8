//! Census and overlay compositing over a segmentation raster.
//!
//! Two independent traversals share one pre-indexed [`LegendResolver`]:
//!
//! - **Census**: every segmentation pixel is classified and counted.
//! - **Overlay**: every *target* pixel samples one segmentation pixel by
//!   nearest-neighbor scaling and takes that class's legend color at a fixed
//!   alpha, or stays fully transparent when nothing matches.
//!
//! Both passes are pure: identical inputs give byte-identical outputs, on the
//! sequential and the parallel path alike.
//!
//! ## Usage
//!
//! ```rust
//! use segcensus::{analyze, CompositorOptions, Legend, RasterDimensions, SegmentationRaster};
//!
//! let legend = Legend::new().with("dog", [0, 128, 0]).with("cat", [128, 0, 0]);
//! let raster = SegmentationRaster::with_dimensions(vec![0, 128, 0, 255, 128, 0, 0, 255], 2, 1);
//!
//! let report = analyze(&legend, &raster, RasterDimensions::new(2, 1), &CompositorOptions::default())?;
//! assert_eq!(report.census.get("dog"), Some(1));
//! assert_eq!(report.overlay.data(), &[0, 128, 0, 150, 128, 0, 0, 150]);
//! # Ok::<(), segcensus::CensusError>(())
//! ```

mod census_pass;
mod overlay_pass;

#[cfg(test)]
mod tests;

use crate::constants::{DEFAULT_OVERLAY_ALPHA, DEFAULT_PARALLEL_MIN_PIXELS};
use crate::error::Result;
use crate::model::{ClassCensus, Legend, OverlayRaster, RasterDimensions, SegmentationRaster};
use crate::resolver::{DuplicatePolicy, LegendResolver};

/// How the passes are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Single-threaded traversal
    #[default]
    Sequential,
    /// Rayon traversal over disjoint chunks; inputs smaller than
    /// `min_pixels` still run sequentially
    Parallel {
        /// Pixel count below which the sequential path is used
        min_pixels: usize,
    },
}

impl ExecutionMode {
    /// Parallel execution with the default size threshold.
    pub fn parallel() -> Self {
        Self::Parallel {
            min_pixels: DEFAULT_PARALLEL_MIN_PIXELS,
        }
    }

    fn runs_parallel(self, pixels: usize) -> bool {
        match self {
            Self::Sequential => false,
            Self::Parallel { min_pixels } => pixels >= min_pixels,
        }
    }
}

/// Options for a compositing invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositorOptions {
    /// Alpha written for matched overlay pixels.
    pub overlay_alpha: u8,

    /// Duplicate legend color handling, used when the resolver is built here.
    pub duplicate_policy: DuplicatePolicy,

    /// Sequential or parallel scheduling.
    pub execution: ExecutionMode,
}

impl Default for CompositorOptions {
    fn default() -> Self {
        Self {
            overlay_alpha: DEFAULT_OVERLAY_ALPHA,
            duplicate_policy: DuplicatePolicy::default(),
            execution: ExecutionMode::default(),
        }
    }
}

impl CompositorOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overlay alpha.
    pub fn overlay_alpha(mut self, alpha: u8) -> Self {
        self.overlay_alpha = alpha;
        self
    }

    /// Set the duplicate-color policy.
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set the execution mode.
    pub fn execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }
}

/// Both outputs of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationReport {
    /// Pixel count per legend label
    pub census: ClassCensus,
    /// Translucent overlay at the target resolution
    pub overlay: OverlayRaster,
}

/// Runs the census and overlay passes against a prebuilt resolver.
#[derive(Debug, Clone)]
pub struct Compositor<'a> {
    resolver: &'a LegendResolver,
    options: CompositorOptions,
}

impl<'a> Compositor<'a> {
    /// Create a compositor with default options.
    pub fn new(resolver: &'a LegendResolver) -> Self {
        Self::with_options(resolver, CompositorOptions::default())
    }

    /// Create a compositor with explicit options.
    ///
    /// `options.duplicate_policy` is ignored; it was applied when the
    /// resolver was built.
    pub fn with_options(resolver: &'a LegendResolver, options: CompositorOptions) -> Self {
        Self { resolver, options }
    }

    /// Options in effect.
    pub fn options(&self) -> &CompositorOptions {
        &self.options
    }

    /// Count segmentation pixels per legend label.
    ///
    /// Unmatched pixels are skipped. The census has one entry per legend
    /// label, zero counts included.
    pub fn census(&self, raster: &SegmentationRaster) -> Result<ClassCensus> {
        raster.validate()?;

        let samples = raster.data();
        let pixels = raster.pixel_count();
        let counts = if self.options.execution.runs_parallel(pixels) {
            census_pass::count_parallel(self.resolver, samples)
        } else {
            census_pass::count_sequential(self.resolver, samples)
        };

        let census = ClassCensus::from_counts(self.resolver.labels(), &counts);
        log::debug!(
            "Census: {} of {} pixels matched, {} of {} classes detected",
            census.total_matched(),
            pixels,
            census.detected().len(),
            census.len()
        );
        Ok(census)
    }

    /// Composite the overlay at `target` resolution.
    ///
    /// Work is proportional to the target pixel count, not the raster size.
    pub fn overlay(
        &self,
        raster: &SegmentationRaster,
        target: RasterDimensions,
    ) -> Result<OverlayRaster> {
        let target = RasterDimensions::checked(target.width, target.height, "target")?;
        let source = raster.resolve_dimensions()?;
        let alpha = self.options.overlay_alpha;

        let overlay = if self.options.execution.runs_parallel(target.pixel_count()) {
            overlay_pass::composite_parallel(self.resolver, raster, source, target, alpha)
        } else {
            overlay_pass::composite_sequential(self.resolver, raster, source, target, alpha)
        };

        log::debug!("Overlay: composited {} source onto {} target", source, target);
        Ok(overlay)
    }

    /// Run both passes.
    ///
    /// Inputs are validated before either pass runs, so an error never
    /// comes with partial output.
    pub fn run(
        &self,
        raster: &SegmentationRaster,
        target: RasterDimensions,
    ) -> Result<SegmentationReport> {
        RasterDimensions::checked(target.width, target.height, "target")?;
        raster.resolve_dimensions()?;

        let census = self.census(raster)?;
        let overlay = self.overlay(raster, target)?;
        Ok(SegmentationReport { census, overlay })
    }
}

/// Index `legend` and run both passes over `raster`.
///
/// Fails with a configuration error for ambiguous legends (unless
/// `options.duplicate_policy` opts into first-seen-wins), an invalid
/// dimensions error for zero sizes, and a malformed raster error for
/// buffers that do not fit the RGBA stride or their declared size.
pub fn analyze(
    legend: &Legend,
    raster: &SegmentationRaster,
    target: RasterDimensions,
    options: &CompositorOptions,
) -> Result<SegmentationReport> {
    let resolver = LegendResolver::with_policy(legend, options.duplicate_policy)?;
    Compositor::with_options(&resolver, options.clone()).run(raster, target)
}
