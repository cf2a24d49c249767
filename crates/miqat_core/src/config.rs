//! Engine configuration.

use miqat_calendar::MAX_ADJUSTMENT;
use miqat_types::{GeoCoordinate, MiqatError, PrayerParams};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Location, twilight angles and Hijri offset used by the local engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Observer location. Default: Mecca.
    pub coords: GeoCoordinate,
    pub params: PrayerParams,
    /// Hijri day offset for local moon sighting. Clamped to [-30, 30].
    pub hijri_adjustment: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coords: GeoCoordinate::default(),
            params: PrayerParams::default(),
            hijri_adjustment: 0,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coords(mut self, coords: GeoCoordinate) -> Self {
        self.coords = coords;
        self
    }

    pub fn params(mut self, params: PrayerParams) -> Self {
        self.params = params;
        self
    }

    pub fn hijri_adjustment(mut self, adjustment: i64) -> Self {
        self.hijri_adjustment = adjustment.clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT);
        self
    }

    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for malformed JSON or out-of-range values.
    #[instrument(skip(json), level = "debug")]
    pub fn from_json(json: &str) -> Result<Self, MiqatError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MiqatError::invalid_config(format!("malformed config: {}", e)))?;
        config.validate()?;
        debug!(coords = %config.coords, adjustment = config.hijri_adjustment, "loaded engine config");
        Ok(config)
    }

    /// Checks coordinates, angles and adjustment bounds.
    pub fn validate(&self) -> Result<(), MiqatError> {
        GeoCoordinate::new(self.coords.lat, self.coords.lng)
            .map_err(|e| MiqatError::invalid_config(e.to_string()))?;
        self.params.validate()?;
        if self.hijri_adjustment.abs() > MAX_ADJUSTMENT {
            return Err(MiqatError::invalid_config(format!(
                "Hijri adjustment {} outside [-{}, {}]",
                self.hijri_adjustment, MAX_ADJUSTMENT, MAX_ADJUSTMENT
            )));
        }
        Ok(())
    }
}

/// Builder with validation for `EngineConfig`.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    coords: Option<(f64, f64)>,
    params: Option<PrayerParams>,
    adjustment: Option<i64>,
    strict_adjustment: bool,
}

impl EngineConfigBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn location(mut self, lat: f64, lng: f64) -> Self { self.coords = Some((lat, lng)); self }
    pub fn params(mut self, params: PrayerParams) -> Self { self.params = Some(params); self }
    pub fn hijri_adjustment(mut self, adjustment: i64) -> Self { self.adjustment = Some(adjustment); self }

    /// Enables strict adjustment bounds [-2, 2].
    pub fn strict_adjustment(mut self, strict: bool) -> Self { self.strict_adjustment = strict; self }

    /// Builds and validates.
    pub fn build(self) -> Result<EngineConfig, MiqatError> {
        let coords = match self.coords {
            Some((lat, lng)) => GeoCoordinate::new(lat, lng)?,
            None => GeoCoordinate::default(),
        };

        let params = self.params.unwrap_or_default();
        params.validate()?;

        let adjustment = self.adjustment.unwrap_or(0);
        if self.strict_adjustment && !(-2..=2).contains(&adjustment) {
            return Err(MiqatError::invalid_config(format!(
                "Adjustment {} outside strict bounds [-2, 2]",
                adjustment
            )));
        }

        Ok(EngineConfig {
            coords,
            params,
            hijri_adjustment: adjustment.clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.coords, GeoCoordinate::MECCA);
        assert_eq!(config.params, PrayerParams::default());
        assert_eq!(config.hijri_adjustment, 0);
    }

    #[test]
    fn test_fluent_setters_clamp_adjustment() {
        let config = EngineConfig::new().hijri_adjustment(99);
        assert_eq!(config.hijri_adjustment, 30);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{ "coords": { "lat": 30.0444, "lng": 31.2357 }, "params": { "fajr_angle": -19.5 } }"#).unwrap();
        assert_eq!(config.coords.lat, 30.0444);
        assert_eq!(config.params.fajr_angle, -19.5);
        assert_eq!(config.params.isha_angle, -17.0);
        assert_eq!(config.hijri_adjustment, 0);
    }

    #[test]
    fn test_from_json_empty_object_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let bad_lat = EngineConfig::from_json(r#"{ "coords": { "lat": 95.0, "lng": 0.0 } }"#);
        assert!(matches!(bad_lat, Err(MiqatError::InvalidConfiguration { .. })));

        let bad_adjustment = EngineConfig::from_json(r#"{ "hijri_adjustment": 45 }"#);
        assert!(bad_adjustment.is_err());

        assert!(EngineConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::new().hijri_adjustment(-1).params(PrayerParams::new(-20.0, -18.0));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfigBuilder::new()
            .location(-6.2088, 106.8456)
            .hijri_adjustment(1)
            .build()
            .unwrap();
        assert_eq!(config.coords.lng, 106.8456);
        assert_eq!(config.hijri_adjustment, 1);

        assert!(EngineConfigBuilder::new().location(0.0, 200.0).build().is_err());
        assert!(EngineConfigBuilder::new().params(PrayerParams::new(3.0, -17.0)).build().is_err());
    }

    #[test]
    fn test_builder_strict_adjustment() {
        let result = EngineConfigBuilder::new().hijri_adjustment(3).strict_adjustment(true).build();
        assert!(matches!(result, Err(MiqatError::InvalidConfiguration { .. })));
        assert!(EngineConfigBuilder::new().hijri_adjustment(3).build().is_ok());
    }
}
