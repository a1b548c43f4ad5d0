//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. [`DistanceEngine`] runs it
//! over a [`TrigCache`] so repeated coordinates skip the trigonometry.

use crate::cache::{CacheStats, TrigCache};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::units::{DistanceUnit, EarthModel, RadiusTable};
use crate::GeoPoint;

/// Great-circle distance calculator with memoized trigonometry.
///
/// # Example
/// ```
/// use geodist::{DistanceEngine, DistanceUnit, EarthModel, GeoPoint};
///
/// let engine = DistanceEngine::new();
/// let berlin = GeoPoint::new(52.5200, 13.4050)?;
/// let paris = GeoPoint::new(48.8566, 2.3522)?;
///
/// let km = engine.distance(&berlin, &paris, DistanceUnit::Kilometers, EarthModel::Wgs84)?;
/// assert!((km - 878.0).abs() < 10.0);
/// # Ok::<(), geodist::GeoError>(())
/// ```
#[derive(Debug)]
pub struct DistanceEngine {
    cache: TrigCache,
    radii: RadiusTable,
    default_unit: DistanceUnit,
    default_model: EarthModel,
}

impl Default for DistanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceEngine {
    /// Creates an engine with an unbounded cache, the full radius table,
    /// and kilometers on WGS84 as defaults.
    pub fn new() -> Self {
        Self {
            cache: TrigCache::new(),
            radii: RadiusTable::default(),
            default_unit: DistanceUnit::default(),
            default_model: EarthModel::default(),
        }
    }

    /// Creates an engine from configuration.
    ///
    /// # Errors
    /// Fails if the configured radius table names an unknown unit or model.
    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        let cache = match config.cache_capacity {
            Some(capacity) => TrigCache::with_capacity(capacity),
            None => TrigCache::new(),
        };

        let engine = Self {
            cache,
            radii: config.radius_table()?,
            default_unit: config.default_unit,
            default_model: config.default_model,
        };

        tracing::debug!(
            unit = %engine.default_unit,
            model = %engine.default_model,
            capacity = ?engine.cache.capacity(),
            radii = engine.radii.len(),
            "Distance engine configured"
        );

        Ok(engine)
    }

    /// Replaces the radius table.
    pub fn with_radius_table(mut self, radii: RadiusTable) -> Self {
        self.radii = radii;
        self
    }

    /// Bounds the trig cache. Existing entries are discarded.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = TrigCache::with_capacity(capacity);
        self
    }

    /// Sets the unit and model used by the `*_default` methods.
    pub fn with_defaults(mut self, unit: DistanceUnit, model: EarthModel) -> Self {
        self.default_unit = unit;
        self.default_model = model;
        self
    }

    /// Unit used by the `*_default` methods.
    pub fn default_unit(&self) -> DistanceUnit {
        self.default_unit
    }

    /// Earth model used by the `*_default` methods.
    pub fn default_model(&self) -> EarthModel {
        self.default_model
    }

    /// Earth radius for a model in a unit.
    ///
    /// # Errors
    /// Returns [`crate::GeoError::UnsupportedEarthModel`] when the table has no entry.
    #[inline]
    pub fn radius(&self, model: EarthModel, unit: DistanceUnit) -> Result<f64> {
        self.radii.radius(model, unit)
    }

    /// Calculates the great-circle distance between two points.
    ///
    /// Identical points return exactly `0.0` without touching the cache.
    ///
    /// # Errors
    /// Returns [`crate::GeoError::UnsupportedEarthModel`] if `(model, unit)`
    /// has no radius entry.
    pub fn distance(
        &self,
        from: &GeoPoint,
        to: &GeoPoint,
        unit: DistanceUnit,
        model: EarthModel,
    ) -> Result<f64> {
        let radius = self.radius(model, unit)?;
        Ok(self.distance_with_radius(from, to, radius))
    }

    /// Calculates the distance using the engine's default unit and model.
    pub fn distance_default(&self, from: &GeoPoint, to: &GeoPoint) -> Result<f64> {
        self.distance(from, to, self.default_unit, self.default_model)
    }

    /// Central angle between two points in radians, in `[0, π]`.
    pub fn central_angle(&self, from: &GeoPoint, to: &GeoPoint) -> f64 {
        if from == to {
            return 0.0;
        }

        let lat1 = self.cache.to_radians(from.latitude());
        let lon1 = self.cache.to_radians(from.longitude());
        let lat2 = self.cache.to_radians(to.latitude());
        let lon2 = self.cache.to_radians(to.longitude());

        let d_lat = lat2 - lat1;
        let d_lon = lon2 - lon1;

        let sin_d_lat = self.cache.sin(d_lat / 2.0);
        let sin_d_lon = self.cache.sin(d_lon / 2.0);

        let h = sin_d_lat * sin_d_lat
            + self.cache.cos(lat1) * self.cache.cos(lat2) * sin_d_lon * sin_d_lon;

        // Rounding can push h just past 1 for antipodal points.
        2.0 * h.clamp(0.0, 1.0).sqrt().asin()
    }

    /// Distances for many pairs, in input order.
    ///
    /// The radius is looked up once for the whole batch. With the `parallel`
    /// feature the pairs are processed on the rayon pool.
    ///
    /// # Errors
    /// Returns [`crate::GeoError::UnsupportedEarthModel`] if `(model, unit)`
    /// has no radius entry.
    pub fn batch_distance(
        &self,
        pairs: &[(GeoPoint, GeoPoint)],
        unit: DistanceUnit,
        model: EarthModel,
    ) -> Result<Vec<f64>> {
        let radius = self.radius(model, unit)?;
        tracing::debug!(pairs = pairs.len(), %unit, %model, "Calculating batch distances");

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            Ok(pairs
                .par_iter()
                .map(|(from, to)| self.distance_with_radius(from, to, radius))
                .collect())
        }

        #[cfg(not(feature = "parallel"))]
        {
            Ok(pairs
                .iter()
                .map(|(from, to)| self.distance_with_radius(from, to, radius))
                .collect())
        }
    }

    /// Batch distances using the engine's default unit and model.
    pub fn batch_distance_default(&self, pairs: &[(GeoPoint, GeoPoint)]) -> Result<Vec<f64>> {
        self.batch_distance(pairs, self.default_unit, self.default_model)
    }

    /// Empties the trig cache and resets its counters.
    pub fn clear_cache(&self) {
        let dropped = self.cache.len();
        self.cache.clear();
        tracing::debug!(dropped, "Trig cache cleared");
    }

    /// Number of memoized trig entries (not the number of distance calls).
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Hit, miss and size counters of the trig cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    #[inline]
    fn distance_with_radius(&self, from: &GeoPoint, to: &GeoPoint, radius: f64) -> f64 {
        self.central_angle(from, to) * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoError;
    use std::f64::consts::PI;

    fn point(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn km(engine: &DistanceEngine, a: &GeoPoint, b: &GeoPoint) -> f64 {
        engine
            .distance(a, b, DistanceUnit::Kilometers, EarthModel::Wgs84)
            .unwrap()
    }

    #[test]
    fn test_amsterdam_short_hop() {
        let engine = DistanceEngine::new();
        let d = km(&engine, &point(52.3676, 4.9041), &point(52.3736, 4.9101));
        assert!(d > 0.7 && d < 0.9, "Amsterdam hop: {}", d);
    }

    #[test]
    fn test_new_york_to_london() {
        let engine = DistanceEngine::new();
        let d = km(&engine, &point(40.7128, -74.0060), &point(51.5074, -0.1278));
        assert!(d > 5500.0 && d < 5600.0, "NYC-London: {}", d);
    }

    #[test]
    fn test_equatorial_antipodes() {
        let engine = DistanceEngine::new();
        let d = km(&engine, &point(0.0, 0.0), &point(0.0, 180.0));
        assert!(d.is_finite());
        assert!(d > 20000.0 && d < 20050.0, "Antipodes: {}", d);
    }

    #[test]
    fn test_pole_to_pole() {
        let engine = DistanceEngine::new();
        let north = point(90.0, 0.0);
        let south = point(-90.0, 0.0);
        let d = km(&engine, &north, &south);
        assert!(d.is_finite());
        assert!(d > 20000.0 && d < 20050.0, "Pole to pole: {}", d);
        assert!((engine.central_angle(&north, &south) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_same_point_exact_zero() {
        let engine = DistanceEngine::new();
        let p = point(48.8566, 2.3522);
        let d = engine
            .distance(&p, &p, DistanceUnit::Miles, EarthModel::Spherical)
            .unwrap();
        assert_eq!(d, 0.0);
        assert_eq!(engine.cache_size(), 0);
    }

    #[test]
    fn test_identical_points_skip_cache_in_batch() {
        let engine = DistanceEngine::new();
        let p = point(-33.8688, 151.2093);

        assert_eq!(engine.central_angle(&p, &p), 0.0);
        let results = engine
            .batch_distance(&[(p, p), (p, p)], DistanceUnit::Feet, EarthModel::Grs80)
            .unwrap();
        assert_eq!(results, vec![0.0, 0.0]);
        assert_eq!(engine.cache_size(), 0);
        assert_eq!(engine.cache_stats().misses, 0);
    }

    #[test]
    fn test_sub_meter_is_positive() {
        let engine = DistanceEngine::new();
        let d = engine
            .distance(
                &point(52.0, 13.0),
                &point(52.000001, 13.0),
                DistanceUnit::Meters,
                EarthModel::Wgs84,
            )
            .unwrap();
        assert!(d > 0.0 && d < 1.0, "Sub-meter: {}", d);
    }

    #[test]
    fn test_symmetry() {
        let engine = DistanceEngine::new();
        let a = point(35.6762, 139.6503);
        let b = point(-33.8688, 151.2093);
        assert_eq!(km(&engine, &a, &b), km(&engine, &b, &a));
    }

    #[test]
    fn test_cache_fills_and_repeats_do_not_grow() {
        let engine = DistanceEngine::new();
        let a = point(52.5200, 13.4050);
        let b = point(48.8566, 2.3522);

        let first = km(&engine, &a, &b);
        let size = engine.cache_size();
        assert!(size > 0);

        let second = km(&engine, &a, &b);
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(engine.cache_size(), size);
        assert!(engine.cache_stats().hits > 0);
    }

    #[test]
    fn test_clear_cache() {
        let engine = DistanceEngine::new();
        let a = point(40.7128, -74.0060);
        let b = point(51.5074, -0.1278);
        let before = km(&engine, &a, &b);

        engine.clear_cache();
        assert_eq!(engine.cache_size(), 0);
        assert_eq!(km(&engine, &a, &b), before);
    }

    #[test]
    fn test_batch_matches_single_calls() {
        let engine = DistanceEngine::new();
        let a = point(52.3676, 4.9041);
        let b = point(40.7128, -74.0060);

        let results = engine
            .batch_distance(&[(a, b), (a, a)], DistanceUnit::Kilometers, EarthModel::Wgs84)
            .unwrap();
        assert_eq!(results, vec![km(&engine, &a, &b), 0.0]);
    }

    #[test]
    fn test_batch_empty() {
        let engine = DistanceEngine::new();
        assert!(engine.batch_distance_default(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unsupported_combination() {
        let mut radii = RadiusTable::empty();
        radii.insert(EarthModel::Spherical, DistanceUnit::Kilometers, 6371.0);
        let engine = DistanceEngine::new().with_radius_table(radii);
        let p = point(1.0, 1.0);

        // Even the zero-distance fast path reports the bad combination.
        let err = engine
            .distance(&p, &p, DistanceUnit::Miles, EarthModel::Wgs84)
            .unwrap_err();
        assert!(matches!(err, GeoError::UnsupportedEarthModel { .. }));

        let batch = engine.batch_distance(&[(p, p)], DistanceUnit::Feet, EarthModel::Grs80);
        assert!(batch.is_err());

        assert!(engine
            .distance(&p, &p, DistanceUnit::Kilometers, EarthModel::Spherical)
            .is_ok());
    }

    #[test]
    fn test_units_scale_consistently() {
        let engine = DistanceEngine::new();
        let a = point(52.5200, 13.4050);
        let b = point(48.8566, 2.3522);
        let km = engine.distance(&a, &b, DistanceUnit::Kilometers, EarthModel::Grs80).unwrap();
        let mi = engine.distance(&a, &b, DistanceUnit::Miles, EarthModel::Grs80).unwrap();
        let m = engine.distance(&a, &b, DistanceUnit::Meters, EarthModel::Grs80).unwrap();

        assert!(((mi - km * 0.621371) / mi).abs() < 1e-6);
        assert!(((m - km * 1000.0) / m).abs() < 1e-9);
    }

    #[test]
    fn test_defaults() {
        let engine = DistanceEngine::new().with_defaults(DistanceUnit::Miles, EarthModel::Spherical);
        let a = point(52.5200, 13.4050);
        let b = point(48.8566, 2.3522);
        assert_eq!(
            engine.distance_default(&a, &b).unwrap(),
            engine.distance(&a, &b, DistanceUnit::Miles, EarthModel::Spherical).unwrap()
        );
    }

    #[test]
    fn test_bounded_cache_same_results() {
        let bounded = DistanceEngine::new().with_cache_capacity(3);
        let unbounded = DistanceEngine::new();
        let a = point(35.6762, 139.6503);
        let b = point(40.7128, -74.0060);

        assert_eq!(km(&bounded, &a, &b), km(&unbounded, &a, &b));
        assert!(bounded.cache_size() <= 3);
        assert!(bounded.cache_stats().rejected > 0);
    }
}
