//! Distance units, Earth models and the radius lookup table.

use crate::error::{GeoError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Output unit for distances.
///
/// Serializes as its [`symbol`](Self::symbol); deserializes through [`FromStr`],
/// so config files accept the same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
    Meters,
    NauticalMiles,
    Feet,
}

impl DistanceUnit {
    /// All supported units.
    pub const ALL: [DistanceUnit; 5] = [
        DistanceUnit::Kilometers,
        DistanceUnit::Miles,
        DistanceUnit::Meters,
        DistanceUnit::NauticalMiles,
        DistanceUnit::Feet,
    ];

    /// Multiplier converting kilometers into this unit.
    pub const fn per_kilometer(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => 1.0,
            DistanceUnit::Miles => 0.621371,
            DistanceUnit::Meters => 1000.0,
            DistanceUnit::NauticalMiles => 0.539957,
            DistanceUnit::Feet => 3280.84,
        }
    }

    /// Short symbol, also accepted by [`FromStr`].
    pub const fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Meters => "m",
            DistanceUnit::NauticalMiles => "nmi",
            DistanceUnit::Feet => "ft",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for DistanceUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl TryFrom<String> for DistanceUnit {
    type Error = GeoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for DistanceUnit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" => Ok(DistanceUnit::Kilometers),
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            "m" | "meter" | "meters" => Ok(DistanceUnit::Meters),
            "nmi" | "nm" | "nautical_miles" | "nautical-miles" => Ok(DistanceUnit::NauticalMiles),
            "ft" | "foot" | "feet" => Ok(DistanceUnit::Feet),
            other => Err(GeoError::InvalidUnit(other.to_string())),
        }
    }
}

/// Assumed Earth shape used to scale the central angle into a distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum EarthModel {
    /// Plain sphere with the conventional 6371 km radius.
    Spherical,
    /// Mean radius of the WGS84 ellipsoid.
    #[default]
    Wgs84,
    /// Mean radius of the GRS80 ellipsoid.
    Grs80,
}

impl EarthModel {
    /// All supported models.
    pub const ALL: [EarthModel; 3] = [EarthModel::Spherical, EarthModel::Wgs84, EarthModel::Grs80];

    /// Mean radius in kilometers.
    pub const fn mean_radius_km(self) -> f64 {
        match self {
            EarthModel::Spherical => 6371.0,
            EarthModel::Wgs84 => 6371.0088,
            EarthModel::Grs80 => 6371.0087714,
        }
    }

    /// Lowercase name, also accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            EarthModel::Spherical => "spherical",
            EarthModel::Wgs84 => "wgs84",
            EarthModel::Grs80 => "grs80",
        }
    }
}

impl fmt::Display for EarthModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for EarthModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl TryFrom<String> for EarthModel {
    type Error = GeoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for EarthModel {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spherical" | "sphere" => Ok(EarthModel::Spherical),
            "wgs84" | "wgs-84" => Ok(EarthModel::Wgs84),
            "grs80" | "grs-80" => Ok(EarthModel::Grs80),
            other => Err(GeoError::InvalidModel(other.to_string())),
        }
    }
}

/// Earth radius per `(model, unit)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusTable {
    radii: HashMap<(EarthModel, DistanceUnit), f64>,
}

impl RadiusTable {
    /// Creates a table with no entries; every lookup fails until populated.
    pub fn empty() -> Self {
        Self { radii: HashMap::new() }
    }

    /// Sets the radius for a combination, replacing any previous entry.
    pub fn insert(&mut self, model: EarthModel, unit: DistanceUnit, radius: f64) -> &mut Self {
        self.radii.insert((model, unit), radius);
        self
    }

    /// Looks up the radius for a combination.
    ///
    /// # Errors
    /// Returns [`GeoError::UnsupportedEarthModel`] when the table has no entry.
    pub fn radius(&self, model: EarthModel, unit: DistanceUnit) -> Result<f64> {
        self.radii
            .get(&(model, unit))
            .copied()
            .ok_or(GeoError::UnsupportedEarthModel { model, unit })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

impl Default for RadiusTable {
    /// Every model in every unit, derived from the mean radius in kilometers.
    fn default() -> Self {
        let mut table = Self::empty();
        for model in EarthModel::ALL {
            for unit in DistanceUnit::ALL {
                table.insert(model, unit, model.mean_radius_km() * unit.per_kilometer());
            }
        }
        table
    }
}
