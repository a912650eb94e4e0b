use rayon::prelude::*;

use crate::noise::Noise2D;
use crate::worldgen::TerrainParams;

/// Square grid of column heights, indexed `x * size + z`.
///
/// A column of height `h` holds the solid layers `0..=h`, so even `h == 0`
/// is one voxel tall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightField {
    size: usize,
    heights: Vec<i32>,
}

impl HeightField {
    /// Builds a field from a per-column function; negative results are clamped to zero.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> i32) -> Self {
        let mut heights = Vec::with_capacity(size * size);
        for x in 0..size {
            for z in 0..size {
                heights.push(f(x, z).max(0));
            }
        }
        Self { size, heights }
    }

    /// Builds a field from rows where `rows[x][z]` is the column height.
    ///
    /// Panics if the rows do not form a square.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Self {
        let size = rows.len();
        assert!(
            rows.iter().all(|r| r.len() == size),
            "height rows must form a {}x{} square",
            size,
            size
        );
        Self::from_fn(size, |x, z| rows[x][z])
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn idx(&self, x: usize, z: usize) -> usize {
        x * self.size + z
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> i32 {
        self.heights[self.idx(x, z)]
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.heights
    }

    /// Columns in x-major order as `(x, z, height)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        let size = self.size;
        self.heights
            .iter()
            .enumerate()
            .map(move |(i, &h)| (i / size, i % size, h))
    }

    pub fn max_height(&self) -> i32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Total voxels in the solid mass (each column contributes `h + 1`).
    pub fn solid_voxels(&self) -> usize {
        self.heights.iter().map(|&h| h as usize + 1).sum()
    }

    /// Mean height of the outermost ring of columns.
    pub fn ring_mean(&self) -> f32 {
        let last = self.size.saturating_sub(1);
        let (sum, n) = self
            .iter()
            .filter(|&(x, z, _)| x == 0 || z == 0 || x == last || z == last)
            .fold((0i64, 0usize), |(s, n), (_, _, h)| (s + h as i64, n + 1));
        if n == 0 { 0.0 } else { sum as f32 / n as f32 }
    }

    /// Mean height of the 3x3 block around `(size / 2, size / 2)`, clipped to the grid.
    pub fn center_mean(&self) -> f32 {
        let c = (self.size / 2) as i64;
        let (sum, n) = self
            .iter()
            .filter(|&(x, z, _)| (x as i64 - c).abs() <= 1 && (z as i64 - c).abs() <= 1)
            .fold((0i64, 0usize), |(s, n), (_, _, h)| (s + h as i64, n + 1));
        if n == 0 { 0.0 } else { sum as f32 / n as f32 }
    }
}

/// Height of one column: fractal noise lifted to `[0, 2 * height_scale]`,
/// scaled down by distance from the grid center, truncated and floored at zero.
#[inline]
pub fn column_height<N: Noise2D + ?Sized>(
    params: &TerrainParams,
    noise: &N,
    x: usize,
    z: usize,
) -> i32 {
    let size = params.size as f32;
    let half = params.half_extent();
    let nx = (x as i32 - half) as f32 / size;
    let nz = (z as i32 - half) as f32 / size;
    let dist_from_center = (nx * nx + nz * nz).sqrt() * params.falloff;

    let n = noise.sample(x as f32 * params.sample_scale, z as f32 * params.sample_scale);
    let mut h = (n + 1.0) * params.height_scale;
    h *= 1.0 - dist_from_center;
    (h as i32).max(0)
}

/// Samples every column of a `params.size` square grid.
///
/// Rows along x are computed in parallel; the result is identical to a serial pass.
pub fn generate_heightfield<N: Noise2D + ?Sized>(params: &TerrainParams, noise: &N) -> HeightField {
    let size = params.size;
    let mut heights = vec![0i32; size * size];
    if size > 0 {
        heights
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(x, row)| {
                for (z, h) in row.iter_mut().enumerate() {
                    *h = column_height(params, noise, x, z);
                }
                log::trace!(target: "worldgen", "row x={} max={}", x, row.iter().max().unwrap_or(&0));
            });
    }
    HeightField { size, heights }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(size: usize) -> TerrainParams {
        TerrainParams::default().with_size(size)
    }

    #[test]
    fn constant_noise_matches_hand_computed_heights() {
        let p = params(64);
        let zero = |_x: f32, _z: f32| 0.0;
        let hf = generate_heightfield(&p, &zero);
        // Center column: distance 0, h = 30.
        assert_eq!(hf.get(32, 32), 30);
        // (0, 32): nx = -0.5, dist = 0.7, h = 30 * 0.3 = 9.0 (f32 may land just below).
        let edge = hf.get(0, 32);
        assert!(edge == 8 || edge == 9, "edge height {}", edge);
        // Corner (0, 0): dist ~= 0.99, h < 1.
        assert_eq!(hf.get(0, 0), 0);
    }

    #[test]
    fn negative_falloff_is_clamped() {
        // Strong falloff drives the corners below zero before clamping.
        let mut p = params(16);
        p.falloff = 4.0;
        let hf = generate_heightfield(&p, &|_x: f32, _z: f32| 1.0);
        assert_eq!(hf.get(0, 0), 0);
        assert!(hf.as_slice().iter().all(|&h| h >= 0));
        assert!(hf.get(8, 8) > 0);
    }

    #[test]
    fn noise_is_sampled_at_scaled_grid_coords() {
        let p = params(8);
        let probe = |x: f32, z: f32| {
            // Only grid points scaled by 3 are expected; anything else would be a bug.
            assert_eq!(x % 3.0, 0.0);
            assert_eq!(z % 3.0, 0.0);
            -1.0
        };
        let hf = generate_heightfield(&p, &probe);
        assert!(hf.as_slice().iter().all(|&h| h == 0));
    }

    #[test]
    fn from_fn_clamps_and_indexes_x_major() {
        let hf = HeightField::from_fn(3, |x, z| x as i32 * 10 + z as i32 - 1);
        assert_eq!(hf.get(0, 0), 0);
        assert_eq!(hf.get(0, 2), 1);
        assert_eq!(hf.get(2, 1), 20);
        let cols: Vec<_> = hf.iter().take(4).collect();
        assert_eq!(cols, vec![(0, 0, 0), (0, 1, 0), (0, 2, 1), (1, 0, 9)]);
    }

    #[test]
    fn solid_voxels_counts_inclusive_layers() {
        let hf = HeightField::from_rows(vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(hf.solid_voxels(), 1 + 2 + 3 + 4);
        assert_eq!(hf.max_height(), 3);
    }

    #[test]
    fn zero_size_field_is_empty() {
        let hf = generate_heightfield(&params(0), &|_x: f32, _z: f32| 0.0);
        assert_eq!(hf.size(), 0);
        assert_eq!(hf.max_height(), 0);
        assert_eq!(hf.ring_mean(), 0.0);
    }
}
