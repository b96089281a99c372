//! AccessTC Library
//!
//! Public-transport accessibility scores for Belgian addresses. A fixed grid of
//! scored cells expressed in Belgian Lambert 2008 coordinates is loaded once at
//! startup and queried for every address lookup.
//!
//! This library provides tools for:
//! - Loading semicolon-delimited, comma-decimal grid files in two format variants
//! - Resolving a projected point to the grid cell that contains it
//! - Classifying headline and per-mode scores into readable labels
//! - Geocoding addresses through Nominatim and projecting them to Lambert 2008
//! - Serving the whole pipeline over a small HTTP API

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod accessibility_resolver;
        pub mod address_lookup;
        pub mod grid_loader;
        pub mod score_classifier;
        pub mod spatial_index;
    }
    pub mod adapters {
        pub mod geocoder;
        pub mod http_api;
        pub mod projection;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Cell, GridVariant, HeadlineScore};
pub use app::services::accessibility_resolver::{AccessibilityReport, AccessibilityResolver};
pub use app::services::spatial_index::SpatialIndex;
pub use config::Config;

/// Result type alias for AccessTC
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for grid loading, resolution and the service boundary
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Grid file structure error (no header, missing columns)
    #[error("Grid format error in '{file}': {message}")]
    GridFormat { file: String, message: String },

    /// No usable cell in the grid source
    #[error("No valid cell found in grid '{file}'")]
    EmptyGrid { file: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Point outside every loaded cell
    #[error("Point ({x}, {y}) is outside the grid coverage")]
    NotCovered { x: f64, y: f64 },

    /// Geocoder returned no result
    #[error("Address not found: {address}")]
    AddressNotFound { address: String },

    /// Geocoder request or response failure
    #[error("Geocoding error: {message}")]
    Geocoding { message: String },

    /// Coordinate projection failure
    #[error("Projection error: {message}")]
    Projection { message: String },

    /// HTTP server failure
    #[error("Server error: {message}")]
    Server { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a grid format error
    pub fn grid_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GridFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an empty grid error
    pub fn empty_grid(file: impl Into<String>) -> Self {
        Self::EmptyGrid { file: file.into() }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a not covered error for a projected point
    pub fn not_covered(x: f64, y: f64) -> Self {
        Self::NotCovered { x, y }
    }

    /// Create an address not found error
    pub fn address_not_found(address: impl Into<String>) -> Self {
        Self::AddressNotFound {
            address: address.into(),
        }
    }

    /// Create a geocoding error
    pub fn geocoding(message: impl Into<String>) -> Self {
        Self::Geocoding {
            message: message.into(),
        }
    }

    /// Create a projection error
    pub fn projection(message: impl Into<String>) -> Self {
        Self::Projection {
            message: message.into(),
        }
    }

    /// Create a server error
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// True for outcomes that are expected negatives rather than failures
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotCovered { .. } | Self::AddressNotFound { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Geocoding {
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid TOML: {}", error),
        }
    }
}
