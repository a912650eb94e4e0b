use raylib::prelude::*;

use crate::camera::FlyCamera;
use knoll_render_raylib::TerrainRender;
use knoll_world::{Terrain, TerrainStats};

/// Display toggles owned by the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub wireframe: bool,
    pub show_bounds: bool,
}

impl ViewState {
    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
        log::info!(target: "input", "wireframe {}", if self.wireframe { "on" } else { "off" });
    }

    pub fn toggle_bounds(&mut self) {
        self.show_bounds = !self.show_bounds;
        log::info!(target: "input", "bounds {}", if self.show_bounds { "on" } else { "off" });
    }
}

pub struct App {
    pub cam: FlyCamera,
    pub view: ViewState,
    pub render: TerrainRender,
    pub stats: TerrainStats,
}

impl App {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        terrain: &Terrain,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let cube = knoll_mesh_cpu::unit_cube();
        let render = TerrainRender::new(
            rl,
            thread,
            &cube,
            &terrain.surface,
            terrain.params.cube_size,
            terrain.bounds,
        )
        .ok_or("failed to upload cube mesh")?;
        rl.disable_cursor();
        Ok(Self {
            cam: FlyCamera::default(),
            view: ViewState::default(),
            render,
            stats: terrain.stats,
        })
    }

    pub fn step(&mut self, rl: &mut RaylibHandle, dt: f32) {
        if rl.is_key_pressed(KeyboardKey::KEY_ENTER) {
            self.view.toggle_wireframe();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_B) {
            self.view.toggle_bounds();
        }
        self.cam.update(rl, dt);
    }

    pub fn render(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let camera3d = self.cam.to_camera3d();
        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::WHITE);
        {
            let mut d3 = d.begin_mode3D(camera3d);
            self.render.draw(&mut d3, self.view.wireframe);
            if self.view.show_bounds {
                self.render.draw_bounds(&mut d3);
            }
        }

        let hud = format!(
            "Tab capture, WASD move, Space/Shift up/down, Ctrl x{:.0}, Enter wireframe, B bounds | {} cubes ({} culled)",
            self.cam.speed_multiplier,
            self.stats.placements,
            self.stats.culled(),
        );
        d.draw_text(&hud, 12, 12, 18, Color::DARKGRAY);
        d.draw_fps(12, 36);
    }
}
