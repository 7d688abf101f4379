//! Pure projections from a session snapshot to per-view models.
//!
//! Both projectors are total: any snapshot, in any phase, maps to a model.
//! Missing payload sections yield the neutral model for that view.

use impact_core::units::crater_radius_m;
use impact_core::vector::{self, Vector3};
use impact_session::{Phase, SimulationSession};
use serde::Serialize;

pub mod layout;

pub use layout::{
    Color, MapCircle, MapLayout, MapMarker, MapSurface, PointLight, ScenePoint, SceneLayout,
    SceneSurface, render_map, render_scene,
};

/// What the geospatial map needs from a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MapViewModel {
    pub has_impact: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_meters: f64,
    pub crater_diameter_km: f64,
    pub crater_radius_meters: f64,
}

/// What the 3D orbital scene needs from a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SceneViewModel {
    pub has_current: bool,
    pub current_position: Option<Vector3>,
    pub has_future: bool,
    pub future_position: Option<Vector3>,
}

/// Project a session onto the map view.
pub fn project_for_map(session: &SimulationSession) -> MapViewModel {
    let Some(result) = succeeded_result(session) else {
        return MapViewModel::default();
    };
    let Some(impact) = result.impact_location else {
        return MapViewModel::default();
    };
    if !impact.lat.is_finite() || !impact.lon.is_finite() {
        return MapViewModel::default();
    }

    let crater_diameter_km = result
        .crater
        .and_then(|crater| crater.diameter_km)
        .filter(|d| d.is_finite())
        .unwrap_or(0.0);

    MapViewModel {
        has_impact: true,
        latitude: impact.lat,
        longitude: impact.lon,
        elevation_meters: impact
            .elevation_m
            .filter(|e| e.is_finite())
            .unwrap_or(0.0),
        crater_diameter_km,
        crater_radius_meters: crater_radius_m(crater_diameter_km),
    }
}

/// Project a session onto the orbital scene.
pub fn project_for_scene(session: &SimulationSession) -> SceneViewModel {
    let Some(result) = succeeded_result(session) else {
        return SceneViewModel::default();
    };
    let current_position = result.current_position().filter(vector::is_finite);
    let future_position = result.future_position().filter(vector::is_finite);

    SceneViewModel {
        has_current: current_position.is_some(),
        current_position,
        has_future: future_position.is_some(),
        future_position,
    }
}

fn succeeded_result(session: &SimulationSession) -> Option<&impact_session::SimulationResult> {
    match session.phase() {
        Phase::Succeeded => session.last_result(),
        _ => None,
    }
}

impl SceneViewModel {
    /// Displacement from the current to the projected position, when both are known.
    pub fn displacement(&self) -> Option<f64> {
        match (self.current_position, self.future_position) {
            (Some(current), Some(future)) => Some(vector::norm(&vector::sub(&future, &current))),
            _ => None,
        }
    }
}
