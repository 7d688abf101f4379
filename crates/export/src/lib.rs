//! Export helpers for simulation session artifacts.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use impact_projection::{
    MapLayout, MapViewModel, SceneLayout, SceneViewModel, project_for_map, project_for_scene,
};
use impact_session::{SessionError, SimulationResult, SimulationSession};
use serde::Serialize;
use serde_json::to_writer_pretty;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode export: {0}")]
    Json(#[from] serde_json::Error),
}

/// Files produced by [`write_sidecars`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarPaths {
    pub session: PathBuf,
    pub map: PathBuf,
    pub scene: PathBuf,
}

#[derive(Serialize)]
struct SessionSidecar<'a> {
    exported_at_utc: String,
    phase: &'static str,
    generation: u64,
    error: Option<&'a SessionError>,
    result: Option<&'a SimulationResult>,
}

#[derive(Serialize)]
struct MapSidecar {
    view: MapViewModel,
    layout: MapLayout,
}

#[derive(Serialize)]
struct SceneSidecar {
    view: SceneViewModel,
    layout: SceneLayout,
}

/// Write `{stem}_session.json`, `{stem}_map.json` and `{stem}_scene.json`
/// next to `output`.
pub fn write_sidecars(
    output: &Path,
    session: &SimulationSession,
) -> Result<SidecarPaths, ExportError> {
    let parent = output.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
    }
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("simulation");

    let paths = SidecarPaths {
        session: parent.join(format!("{stem}_session.json")),
        map: parent.join(format!("{stem}_map.json")),
        scene: parent.join(format!("{stem}_scene.json")),
    };

    let session_doc = SessionSidecar {
        exported_at_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        phase: session.phase().label(),
        generation: session.generation(),
        error: session.last_error(),
        result: session.last_result(),
    };
    write_json(&paths.session, &session_doc)?;

    let map = project_for_map(session);
    write_json(
        &paths.map,
        &MapSidecar {
            view: map,
            layout: MapLayout::from_view(&map),
        },
    )?;

    let scene = project_for_scene(session);
    write_json(
        &paths.scene,
        &SceneSidecar {
            view: scene,
            layout: SceneLayout::from_view(&scene),
        },
    )?;

    Ok(paths)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let writer = BufWriter::new(File::create(path)?);
    to_writer_pretty(writer, value)?;
    Ok(())
}
