//! Error types for the geodist crate.

use crate::{DistanceUnit, EarthModel};
use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// No radius entry for the requested model/unit combination
    #[error("Unsupported earth model: no radius for {model} in {unit}")]
    UnsupportedEarthModel {
        model: EarthModel,
        unit: DistanceUnit,
    },

    /// Unknown distance unit name
    #[error("Invalid distance unit: {0}")]
    InvalidUnit(String),

    /// Unknown earth model name
    #[error("Invalid earth model: {0}")]
    InvalidModel(String),

    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Numeric error code for callers that report errors by number.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10002,
    /// Unsupported model/unit combination
    UnsupportedEarthModel = 10004,
    /// Unknown unit name
    InvalidUnit = 10005,
    /// Unknown model name
    InvalidModel = 10006,
    /// Configuration read or parse failure
    Config = 10007,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::UnsupportedEarthModel { .. } => GeoErrorCode::UnsupportedEarthModel,
            GeoError::InvalidUnit(_) => GeoErrorCode::InvalidUnit,
            GeoError::InvalidModel(_) => GeoErrorCode::InvalidModel,
            GeoError::Config(_) | GeoError::Toml(_) => GeoErrorCode::Config,
        }
    }
}
