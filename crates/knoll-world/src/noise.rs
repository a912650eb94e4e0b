use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::worldgen::{NoiseConfig, NoiseKind};

/// Band-limited 2D noise sampled by the height-field generator.
///
/// Implementations must be pure: the same `(x, z)` always yields the same value,
/// and values stay within `[-1, 1]`.
pub trait Noise2D: Sync {
    fn sample(&self, x: f32, z: f32) -> f32;
}

impl<F> Noise2D for F
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// FBm fractal noise backed by FastNoiseLite.
pub struct FractalNoise {
    inner: FastNoiseLite,
    cfg: NoiseConfig,
}

impl FractalNoise {
    pub fn new(cfg: NoiseConfig) -> Self {
        let mut inner = FastNoiseLite::with_seed(cfg.seed);
        inner.set_noise_type(Some(noise_type(cfg.kind)));
        inner.set_frequency(Some(cfg.frequency));
        inner.set_fractal_type(Some(FractalType::FBm));
        inner.set_fractal_octaves(Some(cfg.octaves));
        inner.set_fractal_lacunarity(Some(cfg.lacunarity));
        inner.set_fractal_gain(Some(cfg.gain));
        Self { inner, cfg }
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.cfg
    }
}

impl Noise2D for FractalNoise {
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        self.inner.get_noise_2d(x, z)
    }
}

fn noise_type(kind: NoiseKind) -> NoiseType {
    match kind {
        NoiseKind::OpenSimplex2 => NoiseType::OpenSimplex2,
        NoiseKind::OpenSimplex2S => NoiseType::OpenSimplex2S,
        NoiseKind::Perlin => NoiseType::Perlin,
        NoiseKind::Value => NoiseType::Value,
    }
}
