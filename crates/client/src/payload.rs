//! Result payload returned by the simulation service.
//!
//! Only the fields the projectors read are typed; each of them decodes
//! leniently so a malformed sub-object shows up as "absent" rather than
//! failing the whole response. Everything else is kept in `extra`.

use impact_core::vector::Vector3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Body of a successful `/api/simulate` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationResponse {
    pub output: SimulationResult,
}

/// Simulation output with optional, independently decoded sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub impact_location: Option<ImpactLocation>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub crater: Option<Crater>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub heliocentric_coordinates: Option<HeliocentricCoordinates>,
    /// Service fields the viewer does not interpret (asteroid, orbit, energy, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Geographic impact site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactLocation {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub elevation_m: Option<f64>,
}

/// Crater descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Crater {
    #[serde(default, deserialize_with = "lenient")]
    pub diameter_km: Option<f64>,
}

/// Current and propagated heliocentric positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeliocentricCoordinates {
    #[serde(
        default,
        deserialize_with = "lenient_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub current: Option<Vector3>,
    #[serde(
        default,
        deserialize_with = "lenient_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub future: Option<Vector3>,
}

impl SimulationResult {
    pub fn current_position(&self) -> Option<Vector3> {
        self.heliocentric_coordinates.and_then(|c| c.current)
    }

    pub fn future_position(&self) -> Option<Vector3> {
        self.heliocentric_coordinates.and_then(|c| c.future)
    }
}

/// Positions arrive either as `[x, y, z]` or as `{ "x_AU": .., "y_AU": .., "z_AU": .. }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PositionRepr {
    Array(Vector3),
    Components {
        #[serde(rename = "x_AU", alias = "x")]
        x: f64,
        #[serde(rename = "y_AU", alias = "y")]
        y: f64,
        #[serde(rename = "z_AU", alias = "z")]
        z: f64,
    },
}

impl From<PositionRepr> for Vector3 {
    fn from(repr: PositionRepr) -> Self {
        match repr {
            PositionRepr::Array(v) => v,
            PositionRepr::Components { x, y, z } => [x, y, z],
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn lenient_position<'de, D>(deserializer: D) -> Result<Option<Vector3>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr: Option<PositionRepr> = lenient(deserializer)?;
    Ok(repr.map(Vector3::from))
}
