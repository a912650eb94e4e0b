//! Raylib-based GPU rendering: conversions, cube mesh upload, per-placement draw.
// Unsafe is required for Raylib mesh/model upload operations in this crate.

use knoll_mesh_cpu::MeshBuild;
use knoll_world::SurfaceVoxels;
use raylib::prelude::*;

pub mod conv {
    use knoll_geom::{Aabb, IVec3, Vec3};

    pub fn vec3_to_rl(v: Vec3) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(v.x, v.y, v.z)
    }

    pub fn ivec3_to_rl(v: IVec3) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(v.x as f32, v.y as f32, v.z as f32)
    }

    pub fn aabb_to_rl(bb: Aabb) -> raylib::core::math::BoundingBox {
        raylib::core::math::BoundingBox::new(vec3_to_rl(bb.min), vec3_to_rl(bb.max))
    }
}

/// Uploads a small indexed mesh and wraps it in a model using the default material.
pub fn upload_mesh(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    mb: &MeshBuild,
) -> Option<raylib::core::models::Model> {
    let v_count = mb.vertex_count();
    if v_count == 0 || mb.idx.is_empty() {
        return None;
    }
    let mut raw: raylib::ffi::Mesh = unsafe { std::mem::zeroed() };
    raw.vertexCount = v_count as i32;
    raw.triangleCount = mb.triangle_count() as i32;
    unsafe {
        let vbytes = (v_count * 3 * std::mem::size_of::<f32>()) as u32;
        let nbytes = (v_count * 3 * std::mem::size_of::<f32>()) as u32;
        let tbytes = (v_count * 2 * std::mem::size_of::<f32>()) as u32;
        let cbytes = (v_count * 4 * std::mem::size_of::<u8>()) as u32;
        let ibytes = (mb.idx.len() * std::mem::size_of::<u16>()) as u32;
        raw.vertices = raylib::ffi::MemAlloc(vbytes) as *mut f32;
        raw.normals = raylib::ffi::MemAlloc(nbytes) as *mut f32;
        raw.texcoords = raylib::ffi::MemAlloc(tbytes) as *mut f32;
        raw.colors = raylib::ffi::MemAlloc(cbytes) as *mut u8;
        raw.indices = raylib::ffi::MemAlloc(ibytes) as *mut u16;
        std::ptr::copy_nonoverlapping(mb.pos.as_ptr(), raw.vertices, v_count * 3);
        std::ptr::copy_nonoverlapping(mb.norm.as_ptr(), raw.normals, v_count * 3);
        std::ptr::copy_nonoverlapping(mb.uv.as_ptr(), raw.texcoords, v_count * 2);
        std::ptr::copy_nonoverlapping(mb.col.as_ptr(), raw.colors, v_count * 4);
        std::ptr::copy_nonoverlapping(mb.idx.as_ptr(), raw.indices, mb.idx.len());
    }
    let mut mesh = unsafe { raylib::core::models::Mesh::from_raw(raw) };
    unsafe {
        mesh.upload(false);
    }
    rl.load_model_from_mesh(thread, unsafe { mesh.make_weak() })
        .ok()
}

/// Draws every surface cube with one shared model, translated to the cube
/// position and scaled by the configured cube size.
pub struct TerrainRender {
    pub model: raylib::core::models::Model,
    pub positions: Vec<Vector3>,
    pub cube_size: f32,
    pub bbox: Option<raylib::core::math::BoundingBox>,
}

impl TerrainRender {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        cube: &MeshBuild,
        surface: &SurfaceVoxels,
        cube_size: f32,
        bounds: Option<knoll_geom::Aabb>,
    ) -> Option<Self> {
        let model = upload_mesh(rl, thread, cube)?;
        let positions: Vec<Vector3> = surface
            .iter()
            .map(|p| conv::ivec3_to_rl(p.position()))
            .collect();
        log::info!(
            "uploaded cube mesh ({} verts, {} tris); {} placements",
            cube.vertex_count(),
            cube.triangle_count(),
            positions.len()
        );
        Some(Self {
            model,
            positions,
            cube_size,
            bbox: bounds.map(conv::aabb_to_rl),
        })
    }

    pub fn draw<D: RaylibDraw3D>(&self, d3: &mut D, wireframe: bool) {
        for &p in &self.positions {
            if wireframe {
                d3.draw_model_wires(&self.model, p, self.cube_size, Color::DARKGRAY);
            } else {
                d3.draw_model(&self.model, p, self.cube_size, Color::WHITE);
            }
        }
    }

    pub fn draw_bounds<D: RaylibDraw3D>(&self, d3: &mut D) {
        if let Some(bb) = self.bbox {
            d3.draw_bounding_box(bb, Color::new(255, 64, 32, 200));
        }
    }
}
