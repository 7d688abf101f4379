//! Run one impact simulation against the remote service and print both views.

use std::path::PathBuf;

use clap::Parser;
use impact_viewer::client::SimulationClient;
use impact_viewer::config::load_or_default;
use impact_viewer::export::write_sidecars;
use impact_viewer::projection::{
    MapLayout, MapSurface, SceneLayout, SceneSurface, project_for_scene, render_map,
    render_scene,
};
use impact_viewer::session::SessionStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Request an asteroid impact simulation and render its map and orbit views"
)]
struct Cli {
    /// YAML or TOML config file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation service base URL (overrides config)
    #[arg(long)]
    service_url: Option<String>,

    /// Asteroid catalog id (e.g. NASA SPK-ID)
    #[arg(long)]
    asteroid: Option<String>,

    /// Impact latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Impact longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write `{stem}_session.json`, `{stem}_map.json` and `{stem}_scene.json` next to this path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.service_url {
        config.service.base_url = url;
    }
    if let Some(timeout) = cli.timeout_secs {
        config.service.timeout_secs = Some(timeout);
    }
    let asteroid = cli
        .asteroid
        .unwrap_or_else(|| config.defaults.asteroid_id.clone());
    let lat = cli.lat.unwrap_or(config.defaults.impact_lat);
    let lon = cli.lon.unwrap_or(config.defaults.impact_lon);

    let client = SimulationClient::new(&config.service)?;
    info!(endpoint = client.endpoint(), "using simulation service");

    let store = SessionStore::new(client, &config.session);
    store.on_change(|session| {
        println!("[{}] run #{}", session.phase().label(), session.generation());
    });

    store.start(&asteroid, lat, lon);
    let session = store.settled().await;

    if let Some(error) = session.last_error() {
        anyhow::bail!("{}", error.message);
    }

    println!("\n=== Impact Map ===");
    render_map(&session, &mut TextMap);
    println!("\n=== Orbit Scene ===");
    render_scene(&session, &mut TextScene);
    if let Some(displacement) = project_for_scene(&session).displacement() {
        println!("Displacement    : {displacement:.6} over the propagation horizon");
    }

    if let Some(output) = cli.output {
        let paths = write_sidecars(&output, &session)?;
        for path in [paths.session, paths.map, paths.scene] {
            println!("[export] {}", path.display());
        }
    }

    Ok(())
}

struct TextMap;

impl MapSurface for TextMap {
    fn draw_map(&mut self, layout: &MapLayout) {
        println!(
            "Center          : ({:.4}, {:.4}) zoom {}",
            layout.center.0, layout.center.1, layout.zoom
        );
        match (&layout.marker, &layout.circle) {
            (Some(marker), Some(circle)) => {
                for line in marker.popup.lines() {
                    println!("  {line}");
                }
                println!(
                    "Crater circle   : r = {:.1} m ({}, fill {:.1})",
                    circle.radius_m,
                    circle.stroke.name(),
                    circle.fill_opacity
                );
            }
            _ => println!("No impact site in result"),
        }
    }
}

struct TextScene;

impl SceneSurface for TextScene {
    fn draw_scene(&mut self, layout: &SceneLayout) {
        for point in &layout.points {
            let [x, y, z] = point.position;
            println!(
                "{:<16}: X={x:.6} Y={y:.6} Z={z:.6} ({})",
                point.label,
                point.color.name()
            );
        }
    }
}
