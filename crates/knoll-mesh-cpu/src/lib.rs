//! CPU-side mesh building for the terrain cube (engine-only, no GPU types).
#![forbid(unsafe_code)]

use knoll_geom::Vec3;

mod face;

pub use face::{Face, FaceShade};

/// Vertex count of the shared cube mesh (4 per face, no sharing across faces).
pub const CUBE_VERTICES: usize = 24;
/// Index count of the shared cube mesh (2 triangles per face).
pub const CUBE_INDICES: usize = 36;

#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u16>,
    pub col: Vec<u8>,
}

impl MeshBuild {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    /// Appends a quad `a b c d` (perimeter order). Vertices are reordered so
    /// the triangles wind counter-clockwise when viewed from the side `n` points to.
    pub fn add_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, n: Vec3, rgba: [u8; 4]) {
        let base = self.vertex_count() as u16;
        let mut vs = [a, d, c, b];
        let mut uvs = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
        let e1 = vs[1] - vs[0];
        let e2 = vs[2] - vs[0];
        if e1.cross(e2).dot(n) < 0.0 {
            vs.swap(1, 3);
            uvs.swap(1, 3);
        }
        for i in 0..4 {
            self.pos.extend_from_slice(&[vs[i].x, vs[i].y, vs[i].z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.uv.extend_from_slice(&[uvs[i].0, uvs[i].1]);
            self.col.extend_from_slice(&rgba);
        }
        self.idx.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn add_face(&mut self, face: Face, edge: f32) {
        let [a, b, c, d] = face.corners(edge);
        self.add_quad(a, b, c, d, face.normal(), face.shade().rgba());
    }

    /// Position of vertex `i`.
    #[inline]
    pub fn vertex(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos[i * 3], self.pos[i * 3 + 1], self.pos[i * 3 + 2])
    }
}

/// Unit cube centered at the origin with one flat gray shade per opposite-face pair.
pub fn unit_cube() -> MeshBuild {
    let mut mb = MeshBuild::default();
    for face in Face::ALL {
        mb.add_face(face, 1.0);
    }
    mb
}
