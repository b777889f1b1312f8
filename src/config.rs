//! Configuration file support.
//!
//! A JSON document holding the compositing defaults, the log level, and
//! the classes a caller cares about. Every field is optional on input.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compositor::{CompositorOptions, ExecutionMode};
use crate::constants::{DEFAULT_OVERLAY_ALPHA, DEFAULT_PARALLEL_MIN_PIXELS};
use crate::palette::default_tracked_classes;
use crate::resolver::DuplicatePolicy;

/// Log level setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Census configuration that can be loaded from and saved to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Alpha written for matched overlay pixels
    #[serde(default = "default_overlay_alpha")]
    pub overlay_alpha: u8,

    /// Handling of legends where two labels share a color
    #[serde(default)]
    pub duplicate_colors: DuplicatePolicy,

    /// Run the passes on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,

    /// Pixel count below which the parallel path runs sequentially
    #[serde(default = "default_parallel_min_pixels")]
    pub parallel_min_pixels: usize,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Labels reported as detections
    #[serde(default = "default_tracked_classes")]
    pub tracked_classes: Vec<String>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_overlay_alpha() -> u8 {
    DEFAULT_OVERLAY_ALPHA
}

fn default_parallel_min_pixels() -> usize {
    DEFAULT_PARALLEL_MIN_PIXELS
}

impl CensusConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            overlay_alpha: default_overlay_alpha(),
            duplicate_colors: DuplicatePolicy::default(),
            parallel: false,
            parallel_min_pixels: default_parallel_min_pixels(),
            log_level: LogLevel::default(),
            tracked_classes: default_tracked_classes(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        if config.tracked_classes.iter().any(|c| c.is_empty()) {
            return Err(ConfigError::InvalidValue(
                "tracked_classes contains an empty label".to_string(),
            ));
        }

        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a JSON file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Runtime options for the compositor.
    pub fn compositor_options(&self) -> CompositorOptions {
        let execution = if self.parallel {
            ExecutionMode::Parallel {
                min_pixels: self.parallel_min_pixels,
            }
        } else {
            ExecutionMode::Sequential
        };

        CompositorOptions::new()
            .overlay_alpha(self.overlay_alpha)
            .duplicate_policy(self.duplicate_colors)
            .execution(execution)
    }
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        /// Version found in the file
        file_version: u32,
        /// Highest version this build understands
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A field holds a value outside its allowed range
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
