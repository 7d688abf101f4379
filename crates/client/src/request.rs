//! Validated simulation requests and their wire encoding.

use impact_core::constants::DEFAULT_PROPAGATE_DAYS;
use impact_core::geo::{valid_latitude, valid_longitude};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced while validating user-supplied request parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestError {
    #[error("asteroid id must not be empty")]
    EmptyAsteroidId,
    #[error("impact latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("impact longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// One simulation request. Serializes directly to the service's JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRequest {
    asteroid_id: String,
    impact_lat: f64,
    impact_lon: f64,
    propagate_days: u32,
}

impl SimulationRequest {
    /// Validate user input and build a request with the default horizon.
    pub fn new(
        asteroid_id: impl Into<String>,
        impact_lat: f64,
        impact_lon: f64,
    ) -> Result<Self, RequestError> {
        let asteroid_id = asteroid_id.into().trim().to_string();
        if asteroid_id.is_empty() {
            return Err(RequestError::EmptyAsteroidId);
        }
        if !valid_latitude(impact_lat) {
            return Err(RequestError::LatitudeOutOfRange(impact_lat));
        }
        if !valid_longitude(impact_lon) {
            return Err(RequestError::LongitudeOutOfRange(impact_lon));
        }
        Ok(Self {
            asteroid_id,
            impact_lat,
            impact_lon,
            propagate_days: DEFAULT_PROPAGATE_DAYS,
        })
    }

    /// Catalog id of the target asteroid.
    pub fn asteroid_id(&self) -> &str {
        &self.asteroid_id
    }

    /// Impact latitude in degrees.
    pub fn impact_lat(&self) -> f64 {
        self.impact_lat
    }

    /// Impact longitude in degrees.
    pub fn impact_lon(&self) -> f64 {
        self.impact_lon
    }

    /// Propagation horizon in days.
    pub fn propagate_days(&self) -> u32 {
        self.propagate_days
    }
}
