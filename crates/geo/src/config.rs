//! Engine configuration loading

use crate::error::{GeoError, Result};
use crate::units::{DistanceUnit, EarthModel, RadiusTable};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files searched, in order, when no explicit path is given.
const CONFIG_CANDIDATES: [&str; 2] = ["geodist.toml", ".geodist.toml"];

/// Distance engine configuration.
///
/// ```toml
/// default_unit = "mi"
/// default_model = "spherical"
/// cache_capacity = 10000
///
/// [radii]
/// spherical = { km = 6371.0, mi = 3958.76 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Unit used when none is given
    pub default_unit: DistanceUnit,
    /// Earth model used when none is given
    pub default_model: EarthModel,
    /// Maximum trig cache entries (None = unbounded)
    pub cache_capacity: Option<usize>,
    /// Radius overrides as `model -> unit -> radius`.
    /// When present, this replaces the built-in table entirely.
    pub radii: Option<BTreeMap<String, BTreeMap<String, f64>>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_unit: DistanceUnit::Kilometers,
            default_model: EarthModel::Wgs84,
            cache_capacity: None,
            radii: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a file path, a file in the working directory, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).or_else(find_config_file);

        match config_path {
            Some(p) => {
                let config = load_config_file(&p)?;
                tracing::debug!(path = %p.display(), "Loaded engine configuration");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the radius table this configuration describes.
    pub fn radius_table(&self) -> Result<RadiusTable> {
        let Some(radii) = &self.radii else {
            return Ok(RadiusTable::default());
        };

        let mut table = RadiusTable::empty();
        for (model, units) in radii {
            let model: EarthModel = model.parse()?;
            for (unit, radius) in units {
                if !radius.is_finite() || *radius <= 0.0 {
                    return Err(GeoError::Config(format!(
                        "radius for {} in {} must be positive, got {}",
                        model, unit, radius
                    )));
                }
                table.insert(model, unit.parse()?, *radius);
            }
        }
        if table.is_empty() {
            return Err(GeoError::Config("[radii] is present but has no entries".to_string()));
        }
        Ok(table)
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| GeoError::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| GeoError::Config(format!("Failed to parse config file {}: {}", path.display(), e)))
}
