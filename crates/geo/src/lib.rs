//! Great-circle distance calculations with memoized trigonometry.
//!
//! This crate provides:
//! - Validated geographic points
//! - Haversine distance in several units and Earth models
//! - A thread-safe cache for `to_radians`/`sin`/`cos` intermediates
//! - Batch processing with optional parallelism
//! - TOML configuration of defaults, cache bounds and radii
//!
//! # Example
//!
//! ```
//! use geodist::{DistanceEngine, DistanceUnit, EarthModel, GeoPoint};
//!
//! let engine = DistanceEngine::new();
//! let new_york = GeoPoint::new(40.7128, -74.0060)?;
//! let london = GeoPoint::new(51.5074, -0.1278)?;
//!
//! let miles = engine.distance(&new_york, &london, DistanceUnit::Miles, EarthModel::Wgs84)?;
//! assert!((miles - 3461.0).abs() < 20.0);
//! assert!(engine.cache_size() > 0);
//!
//! engine.clear_cache();
//! assert_eq!(engine.cache_size(), 0);
//! # Ok::<(), geodist::GeoError>(())
//! ```

mod cache;
mod config;
mod error;
mod haversine;
mod point;
mod units;

pub use cache::{CacheStats, TrigCache, TrigFn};
pub use config::EngineConfig;
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::DistanceEngine;
pub use point::GeoPoint;
pub use units::{DistanceUnit, EarthModel, RadiusTable};
