use knoll_geom::IVec3;
use rayon::prelude::*;

use crate::heightfield::HeightField;

/// World-space center of one unit cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelPlacement(pub IVec3);

impl VoxelPlacement {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    #[inline]
    pub fn position(self) -> IVec3 {
        self.0
    }
}

/// Cubes kept after interior culling, in no particular order.
#[derive(Clone, Debug, Default)]
pub struct SurfaceVoxels {
    pub size: usize,
    pub placements: Vec<VoxelPlacement>,
}

impl SurfaceVoxels {
    #[inline]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoxelPlacement> {
        self.placements.iter()
    }
}

/// Whether layer `y` of column `(x, z)` is kept as a surface voxel.
///
/// True for the column top, or when an existing cardinal neighbor is no taller
/// than `y`. Missing neighbors at the grid edge never count as open air, so
/// buried voxels of edge columns are culled.
#[inline]
pub fn column_exposure(hf: &HeightField, x: usize, z: usize, y: i32) -> bool {
    let size = hf.size();
    y == hf.get(x, z)
        || (x > 0 && y >= hf.get(x - 1, z))
        || (x + 1 < size && y >= hf.get(x + 1, z))
        || (z > 0 && y >= hf.get(x, z - 1))
        || (z + 1 < size && y >= hf.get(x, z + 1))
}

fn extract_column(hf: &HeightField, half: i32, x: usize, z: usize, out: &mut Vec<VoxelPlacement>) {
    let height = hf.get(x, z);
    for y in 0..=height {
        if column_exposure(hf, x, z, y) {
            out.push(VoxelPlacement::new(x as i32 - half, y, z as i32 - half));
        }
    }
}

/// Walks every column bottom-up and keeps the voxels touching open air.
pub fn extract_surface(hf: &HeightField) -> SurfaceVoxels {
    let size = hf.size();
    let half = size as i32 / 2;
    let placements: Vec<VoxelPlacement> = (0..size)
        .into_par_iter()
        .flat_map_iter(|x| {
            let mut row = Vec::new();
            for z in 0..size {
                extract_column(hf, half, x, z, &mut row);
            }
            row
        })
        .collect();
    log::debug!(
        target: "worldgen",
        "extracted {} surface voxels from {} solid",
        placements.len(),
        hf.solid_voxels()
    );
    SurfaceVoxels { size, placements }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_count(sv: &SurfaceVoxels, hf: &HeightField, x: usize, z: usize) -> usize {
        let half = hf.size() as i32 / 2;
        sv.iter()
            .filter(|p| p.0.x == x as i32 - half && p.0.z == z as i32 - half)
            .count()
    }

    #[test]
    fn pit_center_keeps_only_its_top() {
        // Center is two layers (0 and 1) below five-layer neighbors.
        let hf = HeightField::from_rows(vec![vec![5, 5, 5], vec![5, 1, 5], vec![5, 5, 5]]);
        let sv = extract_surface(&hf);
        assert_eq!(column_count(&sv, &hf, 1, 1), 1);
        assert!(sv.placements.contains(&VoxelPlacement::new(0, 1, 0)));
        assert!(!sv.placements.contains(&VoxelPlacement::new(0, 0, 0)));
        // Edge column (1, 0): layers 1..=5 face the pit, layer 0 is buried.
        assert_eq!(column_count(&sv, &hf, 1, 0), 5);
        // Corner (0, 0) only borders tall columns: just its top.
        assert_eq!(column_count(&sv, &hf, 0, 0), 1);
    }

    #[test]
    fn flat_two_by_two_keeps_every_top() {
        let hf = HeightField::from_rows(vec![vec![0, 0], vec![0, 0]]);
        let mut got: Vec<_> = extract_surface(&hf).placements;
        got.sort();
        let mut want = vec![
            VoxelPlacement::new(-1, 0, -1),
            VoxelPlacement::new(-1, 0, 0),
            VoxelPlacement::new(0, 0, -1),
            VoxelPlacement::new(0, 0, 0),
        ];
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn single_column_grid_keeps_only_top() {
        let hf = HeightField::from_rows(vec![vec![3]]);
        let sv = extract_surface(&hf);
        assert_eq!(sv.placements, vec![VoxelPlacement::new(0, 3, 0)]);
    }

    #[test]
    fn edge_column_buried_layers_are_culled() {
        // Column (0, 1) sits on the west edge; its existing neighbors are all taller.
        let hf = HeightField::from_rows(vec![vec![6, 2, 6], vec![6, 6, 6], vec![6, 6, 6]]);
        let sv = extract_surface(&hf);
        assert_eq!(column_count(&sv, &hf, 0, 1), 1);
    }

    #[test]
    fn step_exposes_layers_down_to_neighbor_height() {
        let hf = HeightField::from_rows(vec![vec![4, 1], vec![4, 1]]);
        // Column (0, 0) height 4 next to (0, 1) height 1: layers 1..=4 exposed.
        for y in 0..=4 {
            assert_eq!(column_exposure(&hf, 0, 0, y), y >= 1, "layer {}", y);
        }
    }
}
