use std::sync::Arc;

use impact_viewer::client::SimulationResult;
use impact_viewer::projection::{
    Color, MapLayout, MapSurface, MapViewModel, SceneLayout, SceneSurface, SceneViewModel,
    project_for_map, project_for_scene, render_map, render_scene,
};
use impact_viewer::session::{ErrorKind, SessionError, SimulationSession};
use serde_json::{Value, json};

fn succeeded(output: Value) -> SimulationSession {
    let result: SimulationResult = serde_json::from_value(output).expect("result payload");
    SimulationSession::succeeded(1, Arc::new(result))
}

fn full_output() -> Value {
    json!({
        "impact_location": { "lat": 29.1, "lon": -89.0, "elevation_m": 12.3 },
        "crater": { "diameter_km": 1.4 },
        "heliocentric_coordinates": {
            "current": [0.95, 0.21, -0.01],
            "future": [0.81, 0.55, 0.02]
        }
    })
}

fn all_phases() -> Vec<SimulationSession> {
    vec![
        SimulationSession::idle(),
        SimulationSession::running(3),
        SimulationSession::failed(
            2,
            SessionError {
                kind: ErrorKind::Network,
                message: "network error: connection refused".into(),
            },
        ),
        succeeded(json!({})),
        succeeded(full_output()),
    ]
}

#[test]
fn map_projection_of_reference_payload() {
    let map = project_for_map(&succeeded(full_output()));
    assert_eq!(
        map,
        MapViewModel {
            has_impact: true,
            latitude: 29.1,
            longitude: -89.0,
            elevation_meters: 12.3,
            crater_diameter_km: 1.4,
            crater_radius_meters: 700.0,
        }
    );
}

#[test]
fn projectors_are_total_and_neutral_outside_success() {
    let phases = all_phases();
    for session in &phases[..3] {
        assert_eq!(project_for_map(session), MapViewModel::default());
        assert_eq!(project_for_scene(session), SceneViewModel::default());
    }
    let empty = &phases[3];
    assert!(!project_for_map(empty).has_impact);
    assert!(!project_for_scene(empty).has_current);
    assert!(!project_for_scene(empty).has_future);
}

#[test]
fn projection_is_idempotent() {
    for session in all_phases() {
        assert_eq!(project_for_map(&session), project_for_map(&session));
        assert_eq!(project_for_scene(&session), project_for_scene(&session));
    }
}

#[test]
fn missing_future_vector_leaves_current_intact() {
    let session = succeeded(json!({
        "heliocentric_coordinates": { "current": [1.0, 0.0, 0.0] }
    }));
    let scene = project_for_scene(&session);
    assert!(scene.has_current);
    assert_eq!(scene.current_position, Some([1.0, 0.0, 0.0]));
    assert!(!scene.has_future);
    assert_eq!(scene.future_position, None);
    assert_eq!(scene.displacement(), None);
}

#[test]
fn missing_current_vector_leaves_future_intact() {
    let session = succeeded(json!({
        "heliocentric_coordinates": { "future": { "x_AU": 0.5, "y_AU": 0.5, "z_AU": 0.0 } }
    }));
    let scene = project_for_scene(&session);
    assert!(!scene.has_current);
    assert!(scene.has_future);
    assert_eq!(scene.future_position, Some([0.5, 0.5, 0.0]));
}

#[test]
fn impact_without_crater_or_elevation_still_has_marker() {
    let map = project_for_map(&succeeded(json!({
        "impact_location": { "lat": -12.0, "lon": 130.5 }
    })));
    assert!(map.has_impact);
    assert_eq!(map.elevation_meters, 0.0);
    assert_eq!(map.crater_diameter_km, 0.0);
    assert_eq!(map.crater_radius_meters, 0.0);
}

#[test]
fn ill_typed_elevation_only_degrades_the_elevation() {
    let map = project_for_map(&succeeded(json!({
        "impact_location": { "lat": 29.1, "lon": -89.0, "elevation_m": "n/a" },
        "crater": { "diameter_km": 1.4 }
    })));
    assert!(map.has_impact);
    assert_eq!((map.latitude, map.longitude), (29.1, -89.0));
    assert_eq!(map.elevation_meters, 0.0);
    assert_eq!(map.crater_radius_meters, 700.0);
}

#[test]
fn world_view_layout_without_impact() {
    let layout = MapLayout::from_view(&MapViewModel::default());
    assert_eq!(layout.center, (0.0, 0.0));
    assert_eq!(layout.zoom, 2);
    assert!(layout.marker.is_none());
    assert!(layout.circle.is_none());
}

#[test]
fn impact_layout_has_marker_popup_and_crater_circle() {
    let layout = MapLayout::from_view(&project_for_map(&succeeded(full_output())));
    assert_eq!(layout.center, (29.1, -89.0));
    assert_eq!(layout.zoom, 6);

    let marker = layout.marker.expect("marker");
    assert_eq!(marker.position, (29.1, -89.0));
    assert_eq!(
        marker.popup,
        "Impact Site\nElevation: 12.30 m\nCrater: 1.40 km"
    );

    let circle = layout.circle.expect("circle");
    assert_eq!(circle.radius_m, 700.0);
    assert_eq!(circle.stroke, Color::Red);
    assert_eq!(circle.fill_opacity, 0.3);
}

#[test]
fn scene_layout_always_contains_the_sun() {
    let layout = SceneLayout::from_view(&SceneViewModel::default());
    assert_eq!(layout.points.len(), 1);
    assert_eq!(layout.points[0].color, Color::Yellow);
    assert_eq!(layout.points[0].position, [0.0, 0.0, 0.0]);

    let layout = SceneLayout::from_view(&project_for_scene(&succeeded(full_output())));
    let colors: Vec<_> = layout.points.iter().map(|p| p.color).collect();
    assert_eq!(colors, vec![Color::Yellow, Color::Red, Color::Blue]);
    assert_eq!(layout.point_light.position, [10.0, 10.0, 10.0]);
}

#[derive(Default)]
struct Recorder {
    maps: Vec<MapLayout>,
    scenes: Vec<SceneLayout>,
}

impl MapSurface for Recorder {
    fn draw_map(&mut self, layout: &MapLayout) {
        self.maps.push(layout.clone());
    }
}

impl SceneSurface for Recorder {
    fn draw_scene(&mut self, layout: &SceneLayout) {
        self.scenes.push(layout.clone());
    }
}

#[test]
fn render_helpers_feed_surfaces_one_layout_each() {
    let mut recorder = Recorder::default();
    let session = succeeded(full_output());
    render_map(&session, &mut recorder);
    render_scene(&session, &mut recorder);
    render_map(&SimulationSession::idle(), &mut recorder);

    assert_eq!(recorder.maps.len(), 2);
    assert_eq!(recorder.maps[0].zoom, 6);
    assert_eq!(recorder.maps[1].zoom, 2);
    assert_eq!(recorder.scenes.len(), 1);
    assert_eq!(recorder.scenes[0].points.len(), 3);
}
