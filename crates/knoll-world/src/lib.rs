//! Island terrain: fractal height field, radial falloff, and surface voxel extraction.
#![forbid(unsafe_code)]

pub mod heightfield;
pub mod noise;
pub mod surface;
pub mod terrain;
pub mod worldgen;

pub use heightfield::{HeightField, column_height, generate_heightfield};
pub use noise::{FractalNoise, Noise2D};
pub use surface::{SurfaceVoxels, VoxelPlacement, column_exposure, extract_surface};
pub use terrain::{Terrain, TerrainStats};
pub use worldgen::{
    NoiseConfig, NoiseKind, TerrainConfig, TerrainParams, load_params_from_path, parse_params,
};
