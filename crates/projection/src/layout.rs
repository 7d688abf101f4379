//! Draw descriptions handed to rendering surfaces.
//!
//! Surfaces are opaque sinks: a map widget or a 3D scene implements
//! [`MapSurface`] / [`SceneSurface`] and receives a fully resolved layout.

use impact_core::vector::{ORIGIN, Vector3};
use impact_session::SimulationSession;
use serde::Serialize;

use crate::{MapViewModel, SceneViewModel, project_for_map, project_for_scene};

const ZOOM_WORLD: u8 = 2;
const ZOOM_IMPACT: u8 = 6;
const CRATER_FILL_OPACITY: f32 = 0.3;
const SUN_RADIUS: f64 = 0.1;
const BODY_RADIUS: f64 = 0.05;
const AMBIENT_INTENSITY: f32 = 0.5;
const POINT_LIGHT_POSITION: Vector3 = [10.0, 10.0, 10.0];

/// Named marker colours understood by both surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Blue,
    Yellow,
}

impl Color {
    /// CSS-style colour name.
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }
}

/// Marker pinned at the impact site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub position: (f64, f64),
    pub popup: String,
}

/// Crater footprint circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCircle {
    pub center: (f64, f64),
    pub radius_m: f64,
    pub stroke: Color,
    pub fill_opacity: f32,
}

/// Everything a map surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    pub center: (f64, f64),
    pub zoom: u8,
    pub marker: Option<MapMarker>,
    pub circle: Option<MapCircle>,
}

impl MapLayout {
    /// World view when there is no impact, otherwise centred on the site.
    pub fn from_view(view: &MapViewModel) -> Self {
        if !view.has_impact {
            return Self {
                center: (0.0, 0.0),
                zoom: ZOOM_WORLD,
                marker: None,
                circle: None,
            };
        }
        let site = (view.latitude, view.longitude);
        Self {
            center: site,
            zoom: ZOOM_IMPACT,
            marker: Some(MapMarker {
                position: site,
                popup: format!(
                    "Impact Site\nElevation: {:.2} m\nCrater: {:.2} km",
                    view.elevation_meters, view.crater_diameter_km
                ),
            }),
            circle: Some(MapCircle {
                center: site,
                radius_m: view.crater_radius_meters,
                stroke: Color::Red,
                fill_opacity: CRATER_FILL_OPACITY,
            }),
        }
    }
}

/// One sphere in the orbital scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenePoint {
    pub label: &'static str,
    pub position: Vector3,
    pub radius: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointLight {
    pub position: Vector3,
}

/// Everything a scene surface needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneLayout {
    pub points: Vec<ScenePoint>,
    pub ambient_intensity: f32,
    pub point_light: PointLight,
}

impl SceneLayout {
    /// The Sun at the origin, plus whichever asteroid positions are known.
    pub fn from_view(view: &SceneViewModel) -> Self {
        let mut points = vec![ScenePoint {
            label: "sun",
            position: ORIGIN,
            radius: SUN_RADIUS,
            color: Color::Yellow,
        }];
        if let Some(position) = view.current_position {
            points.push(ScenePoint {
                label: "current",
                position,
                radius: BODY_RADIUS,
                color: Color::Red,
            });
        }
        if let Some(position) = view.future_position {
            points.push(ScenePoint {
                label: "future",
                position,
                radius: BODY_RADIUS,
                color: Color::Blue,
            });
        }
        Self {
            points,
            ambient_intensity: AMBIENT_INTENSITY,
            point_light: PointLight {
                position: POINT_LIGHT_POSITION,
            },
        }
    }
}

/// Sink for map layouts.
pub trait MapSurface {
    fn draw_map(&mut self, layout: &MapLayout);
}

/// Sink for scene layouts.
pub trait SceneSurface {
    fn draw_scene(&mut self, layout: &SceneLayout);
}

/// Project `session` for the map and draw it on `surface`.
pub fn render_map<S: MapSurface + ?Sized>(session: &SimulationSession, surface: &mut S) {
    let layout = MapLayout::from_view(&project_for_map(session));
    surface.draw_map(&layout);
}

/// Project `session` for the scene and draw it on `surface`.
pub fn render_scene<S: SceneSurface + ?Sized>(session: &SimulationSession, surface: &mut S) {
    let layout = SceneLayout::from_view(&project_for_scene(session));
    surface.draw_scene(&layout);
}
