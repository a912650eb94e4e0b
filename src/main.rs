use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use knoll_world::{Terrain, TerrainParams, load_params_from_path};

mod app;
mod camera;

const DEFAULT_CONFIG: &str = "terrain.toml";

#[derive(Parser, Debug)]
#[command(name = "knoll", about = "Procedural voxel island with a free-fly camera")]
struct Args {
    /// Terrain config (TOML). Defaults to ./terrain.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid edge length in columns (overrides the config).
    #[arg(long)]
    size: Option<usize>,

    /// Noise seed (overrides the config).
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i32>,

    /// Generate, log terrain statistics, and exit without opening a window.
    #[arg(long)]
    headless: bool,
}

fn resolve_params(args: &Args) -> Result<TerrainParams, Box<dyn std::error::Error>> {
    let mut params = match &args.config {
        Some(path) => load_params_from_path(path)
            .map_err(|e| format!("config {}: {}", path.display(), e))?,
        None => {
            let path = Path::new(DEFAULT_CONFIG);
            if path.exists() {
                load_params_from_path(path)
                    .map_err(|e| format!("config {}: {}", path.display(), e))?
            } else {
                log::info!("{} not found; using built-in terrain defaults", DEFAULT_CONFIG);
                TerrainParams::default()
            }
        }
    };
    if let Some(size) = args.size {
        params = params.with_size(size);
    }
    if let Some(seed) = args.seed {
        params = params.with_seed(seed);
    }
    params.validate()?;
    Ok(params)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let params = match resolve_params(&args) {
        Ok(p) => p,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let terrain = Terrain::build(params);
    if args.headless {
        let s = terrain.stats;
        log::info!(
            "columns={} solid={} placements={} culled={} max_height={} ring_mean={:.2} center_mean={:.2}",
            s.columns,
            s.solid_voxels,
            s.placements,
            s.culled(),
            s.max_height,
            s.ring_mean,
            s.center_mean
        );
        return ExitCode::SUCCESS;
    }

    let (mut rl, thread) = raylib::init().size(1024, 768).title("3D Terrain").build();
    rl.set_target_fps(60);

    let mut app = match app::App::new(&mut rl, &thread, &terrain) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    // Placements now live on the GPU side; the CPU copy is no longer needed.
    drop(terrain);

    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        app.step(&mut rl, dt);
        app.render(&mut rl, &thread);
    }
    ExitCode::SUCCESS
}
