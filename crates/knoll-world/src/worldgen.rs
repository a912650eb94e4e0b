use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Largest grid edge accepted from configuration; keeps column coordinates well inside `i32`.
pub const MAX_TERRAIN_SIZE: usize = 4096;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TerrainConfig {
    #[serde(default)]
    pub terrain: Grid,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub noise: Noise,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Grid {
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_cube_size")]
    pub cube_size: f32,
}
fn default_size() -> usize {
    64
}
fn default_cube_size() -> f32 {
    1.0
}
impl Default for Grid {
    fn default() -> Self {
        Self {
            size: default_size(),
            cube_size: default_cube_size(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Shape {
    #[serde(default = "default_sample_scale")]
    pub sample_scale: f32,
    #[serde(default = "default_height_scale")]
    pub height_scale: f32,
    #[serde(default = "default_falloff")]
    pub falloff: f32,
}
fn default_sample_scale() -> f32 {
    3.0
}
fn default_height_scale() -> f32 {
    30.0
}
fn default_falloff() -> f32 {
    1.4
}
impl Default for Shape {
    fn default() -> Self {
        Self {
            sample_scale: default_sample_scale(),
            height_scale: default_height_scale(),
            falloff: default_falloff(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    OpenSimplex2,
    OpenSimplex2S,
    Perlin,
    Value,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default = "default_kind")]
    pub kind: NoiseKind,
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default = "default_gain")]
    pub gain: f32,
}
fn default_kind() -> NoiseKind {
    NoiseKind::OpenSimplex2
}
// FastNoiseLite's own default seed.
fn default_seed() -> i32 {
    1337
}
fn default_frequency() -> f32 {
    0.03
}
fn default_octaves() -> i32 {
    4
}
fn default_lacunarity() -> f32 {
    2.0
}
fn default_gain() -> f32 {
    0.4
}
impl Default for Noise {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            seed: default_seed(),
            frequency: default_frequency(),
            octaves: default_octaves(),
            lacunarity: default_lacunarity(),
            gain: default_gain(),
        }
    }
}

/// Fractal noise settings handed to the noise backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseConfig {
    pub kind: NoiseKind,
    pub seed: i32,
    pub frequency: f32,
    pub octaves: i32,
    pub lacunarity: f32,
    pub gain: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        NoiseConfig::from(&Noise::default())
    }
}

impl From<&Noise> for NoiseConfig {
    fn from(n: &Noise) -> Self {
        Self {
            kind: n.kind,
            seed: n.seed,
            frequency: n.frequency,
            octaves: n.octaves,
            lacunarity: n.lacunarity,
            gain: n.gain,
        }
    }
}

// Flattened params used in the per-column loops (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    pub size: usize,
    pub cube_size: f32,
    pub sample_scale: f32,
    pub height_scale: f32,
    pub falloff: f32,
    pub noise: NoiseConfig,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self::from_config(&TerrainConfig::default())
    }
}

impl TerrainParams {
    pub fn from_config(cfg: &TerrainConfig) -> Self {
        Self {
            size: cfg.terrain.size,
            cube_size: cfg.terrain.cube_size,
            sample_scale: cfg.shape.sample_scale,
            height_scale: cfg.shape.height_scale,
            falloff: cfg.shape.falloff,
            noise: NoiseConfig::from(&cfg.noise),
        }
    }

    /// Same parameters on a different grid edge; used by tests and the `--size` override.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.noise.seed = seed;
        self
    }

    /// Integer center offset applied to grid coordinates (`size / 2`, truncating).
    #[inline]
    pub fn half_extent(&self) -> i32 {
        self.size as i32 / 2
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.size == 0 {
            return Err("terrain.size must be at least 1".into());
        }
        if self.size > MAX_TERRAIN_SIZE {
            return Err(format!(
                "terrain.size {} exceeds the maximum of {}",
                self.size, MAX_TERRAIN_SIZE
            )
            .into());
        }
        if !self.cube_size.is_finite() || self.cube_size <= 0.0 {
            return Err(format!("terrain.cube_size must be positive, got {}", self.cube_size).into());
        }
        for (name, v) in [
            ("shape.sample_scale", self.sample_scale),
            ("shape.height_scale", self.height_scale),
            ("shape.falloff", self.falloff),
            ("noise.frequency", self.noise.frequency),
            ("noise.lacunarity", self.noise.lacunarity),
            ("noise.gain", self.noise.gain),
        ] {
            if !v.is_finite() {
                return Err(format!("{} must be finite, got {}", name, v).into());
            }
        }
        if self.noise.octaves < 1 {
            return Err(format!("noise.octaves must be at least 1, got {}", self.noise.octaves).into());
        }
        Ok(())
    }
}

pub fn parse_params(toml_str: &str) -> Result<TerrainParams, Box<dyn Error>> {
    let cfg: TerrainConfig = toml::from_str(toml_str)?;
    let params = TerrainParams::from_config(&cfg);
    params.validate()?;
    Ok(params)
}

pub fn load_params_from_path(path: &Path) -> Result<TerrainParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    parse_params(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let p = parse_params("").unwrap();
        assert_eq!(p, TerrainParams::default());
        assert_eq!(p.size, 64);
        assert_eq!(p.noise.kind, NoiseKind::OpenSimplex2);
        assert_eq!(p.noise.seed, 1337);
        assert_eq!(p.noise.octaves, 4);
        assert!((p.noise.frequency - 0.03).abs() < 1e-6);
        assert!((p.noise.gain - 0.4).abs() < 1e-6);
        assert!((p.falloff - 1.4).abs() < 1e-6);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let p = parse_params(
            r#"
            [terrain]
            size = 32

            [noise]
            kind = "perlin"
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(p.size, 32);
        assert_eq!(p.noise.kind, NoiseKind::Perlin);
        assert_eq!(p.noise.seed, 7);
        assert!((p.height_scale - 30.0).abs() < 1e-6);
        assert!((p.cube_size - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(parse_params("[terrain]\nsize = 0\n").is_err());
        assert!(parse_params("[terrain]\ncube_size = -1.0\n").is_err());
        assert!(parse_params("[noise]\noctaves = 0\n").is_err());
        assert!(parse_params("[noise]\nkind = \"cellular\"\n").is_err());
        let too_big = format!("[terrain]\nsize = {}\n", MAX_TERRAIN_SIZE + 1);
        assert!(parse_params(&too_big).is_err());
    }

    #[test]
    fn half_extent_truncates() {
        let p = TerrainParams::default();
        assert_eq!(p.clone().with_size(64).half_extent(), 32);
        assert_eq!(p.clone().with_size(5).half_extent(), 2);
        assert_eq!(p.with_size(1).half_extent(), 0);
    }
}
