//! Error types for census and overlay operations.

use thiserror::Error;

/// Errors that can occur while resolving a legend or compositing a raster.
#[derive(Error, Debug)]
pub enum CensusError {
    /// Legend maps one color to more than one label
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the ambiguity
        message: String,
    },

    /// A source or target dimension is zero
    #[error("Invalid dimensions: {message}")]
    InvalidDimensions {
        /// Description of the offending dimensions
        message: String,
    },

    /// Raster length does not fit the RGBA stride or the declared size
    #[error("Malformed raster: {message}")]
    MalformedRaster {
        /// Description of the inconsistency
        message: String,
    },

    /// I/O error while reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CensusError {
    /// Create a configuration error with a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid dimensions error with a message.
    pub fn invalid_dimensions(message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            message: message.into(),
        }
    }

    /// Create a malformed raster error with a message.
    pub fn malformed_raster(message: impl Into<String>) -> Self {
        Self::MalformedRaster {
            message: message.into(),
        }
    }

    /// Whether this error was caused by the legend, raster, or dimensions
    /// handed to the core, as opposed to the surrounding file I/O.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::InvalidDimensions { .. } | Self::MalformedRaster { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CensusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_distinguished() {
        assert!(CensusError::configuration("dup").is_input_error());
        assert!(CensusError::invalid_dimensions("zero").is_input_error());
        assert!(CensusError::malformed_raster("len").is_input_error());

        let io = CensusError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!io.is_input_error());
    }

    #[test]
    fn test_display_messages() {
        let err = CensusError::invalid_dimensions("target width is 0");
        assert_eq!(err.to_string(), "Invalid dimensions: target width is 0");

        let err = CensusError::malformed_raster("length 5 is not a multiple of 4");
        assert_eq!(
            err.to_string(),
            "Malformed raster: length 5 is not a multiple of 4"
        );
    }
}
