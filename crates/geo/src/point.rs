//! Validated geographic points.

use crate::error::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A geographic point with latitude and longitude in decimal degrees.
///
/// Points are validated on construction and immutable afterwards, so any
/// `GeoPoint` handed to the engine is known to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawPoint> for GeoPoint {
    type Error = GeoError;

    fn try_from(raw: RawPoint) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Creates a new point.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    ///
    /// # Errors
    /// Returns [`GeoError::InvalidCoordinate`] for out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidCoordinate(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }
        Ok(Self { latitude, longitude })
    }

    /// Latitude in degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl TryFrom<(f64, f64)> for GeoPoint {
    type Error = GeoError;

    fn try_from((lat, lng): (f64, f64)) -> Result<Self> {
        Self::new(lat, lng)
    }
}

/// Parses `"lat,lon"`, e.g. `"52.3676, 4.9041"`.
impl FromStr for GeoPoint {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| GeoError::InvalidCoordinate(format!("expected \"lat,lon\", got {:?}", s)))?;

        let parse = |part: &str, name: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| GeoError::InvalidCoordinate(format!("{} {:?}: {}", name, part.trim(), e)))
        };

        Self::new(parse(lat, "latitude")?, parse(lng, "longitude")?)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
