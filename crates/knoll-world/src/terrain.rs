use std::time::Instant;

use knoll_geom::Aabb;

use crate::heightfield::{HeightField, generate_heightfield};
use crate::noise::FractalNoise;
use crate::surface::{SurfaceVoxels, extract_surface};
use crate::worldgen::TerrainParams;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TerrainStats {
    pub columns: usize,
    pub solid_voxels: usize,
    pub placements: usize,
    pub max_height: i32,
    pub ring_mean: f32,
    pub center_mean: f32,
}

impl TerrainStats {
    pub fn measure(hf: &HeightField, surface: &SurfaceVoxels) -> Self {
        Self {
            columns: hf.size() * hf.size(),
            solid_voxels: hf.solid_voxels(),
            placements: surface.len(),
            max_height: hf.max_height(),
            ring_mean: hf.ring_mean(),
            center_mean: hf.center_mean(),
        }
    }

    /// Voxels dropped as interior.
    pub fn culled(&self) -> usize {
        self.solid_voxels - self.placements
    }
}

/// Generated island ready for rendering. The height field is dropped once
/// the surface has been extracted.
pub struct Terrain {
    pub params: TerrainParams,
    pub surface: SurfaceVoxels,
    pub stats: TerrainStats,
    pub bounds: Option<Aabb>,
}

impl Terrain {
    pub fn build(params: TerrainParams) -> Self {
        log::info!(
            target: "worldgen",
            "generating {}x{} terrain: {:?} seed={} freq={} octaves={} lacunarity={} gain={}",
            params.size,
            params.size,
            params.noise.kind,
            params.noise.seed,
            params.noise.frequency,
            params.noise.octaves,
            params.noise.lacunarity,
            params.noise.gain
        );
        let noise = FractalNoise::new(params.noise);

        let t0 = Instant::now();
        let hf = generate_heightfield(&params, &noise);
        let gen_time = t0.elapsed();

        let t1 = Instant::now();
        let surface = extract_surface(&hf);
        let extract_time = t1.elapsed();

        let stats = TerrainStats::measure(&hf, &surface);
        log::info!(
            target: "worldgen",
            "height field in {:.2?} (max {}), {} cubes kept / {} culled in {:.2?}",
            gen_time,
            stats.max_height,
            stats.placements,
            stats.culled(),
            extract_time
        );
        let bounds = Aabb::around_cells(surface.iter().map(|p| p.position()));
        Self {
            params,
            surface,
            stats,
            bounds,
        }
    }
}
