use knoll_geom::Vec3;
use knoll_render_raylib::conv::vec3_to_rl;
use raylib::prelude::*;

const MOUSE_SENSITIVITY: f32 = 0.1;
const MOVE_SPEED: f32 = 5.0;
const BOOST_MULTIPLIER: f32 = 3.0;
const PITCH_LIMIT: f32 = 89.0;
const FOV_Y: f32 = 45.0;

/// Held movement keys and pointer motion for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlyInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub boost: bool,
    pub look_dx: f32,
    pub look_dy: f32,
}

impl FlyInput {
    pub fn poll(rl: &RaylibHandle) -> Self {
        let md = rl.get_mouse_delta();
        Self {
            forward: rl.is_key_down(KeyboardKey::KEY_W),
            back: rl.is_key_down(KeyboardKey::KEY_S),
            left: rl.is_key_down(KeyboardKey::KEY_A),
            right: rl.is_key_down(KeyboardKey::KEY_D),
            up: rl.is_key_down(KeyboardKey::KEY_SPACE),
            down: rl.is_key_down(KeyboardKey::KEY_LEFT_SHIFT),
            boost: rl.is_key_down(KeyboardKey::KEY_LEFT_CONTROL),
            look_dx: md.x,
            look_dy: md.y,
        }
    }
}

pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,   // degrees
    pub pitch: f32, // degrees
    pub speed_multiplier: f32,
    pub captured: bool,
    // Swallow the first pointer delta after (re)capture; it carries the cursor jump.
    first_look: bool,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 20.0, 10.0))
    }
}

impl FlyCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: -90.0,
            pitch: 0.0,
            speed_multiplier: 1.0,
            captured: true,
            first_look: true,
        }
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D::perspective(
            vec3_to_rl(self.position),
            vec3_to_rl(self.position + self.forward()),
            vec3_to_rl(Vec3::UP),
            FOV_Y,
        )
    }

    pub fn forward(&self) -> Vec3 {
        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        Vec3::new(
            yaw_rad.cos() * pitch_rad.cos(),
            pitch_rad.sin(),
            yaw_rad.sin() * pitch_rad.cos(),
        )
        .normalized()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::UP).normalized()
    }

    /// Turns by a pointer delta in pixels (y grows downward on screen).
    pub fn look(&mut self, dx: f32, dy: f32) {
        if self.first_look {
            self.first_look = false;
            return;
        }
        self.yaw += dx * MOUSE_SENSITIVITY;
        self.pitch -= dy * MOUSE_SENSITIVITY;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Moves along the held axes. Axis contributions add up, so diagonals are faster.
    pub fn advance(&mut self, input: &FlyInput, dt: f32) {
        self.speed_multiplier = if input.boost { BOOST_MULTIPLIER } else { 1.0 };
        let speed = MOVE_SPEED * dt * self.speed_multiplier;
        let f = self.forward();
        let r = self.right();
        if input.forward {
            self.position += f * speed;
        }
        if input.back {
            self.position -= f * speed;
        }
        if input.left {
            self.position -= r * speed;
        }
        if input.right {
            self.position += r * speed;
        }
        if input.up {
            self.position += Vec3::UP * speed;
        }
        if input.down {
            self.position -= Vec3::UP * speed;
        }
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
        if captured {
            self.first_look = true;
        }
    }

    pub fn apply(&mut self, input: &FlyInput, dt: f32) {
        if self.captured {
            self.look(input.look_dx, input.look_dy);
        }
        self.advance(input, dt);
    }

    pub fn update(&mut self, rl: &mut RaylibHandle, dt: f32) {
        // Toggle mouse capture with Tab
        if rl.is_key_pressed(KeyboardKey::KEY_TAB) {
            self.set_captured(!self.captured);
            if self.captured {
                rl.disable_cursor();
            } else {
                rl.enable_cursor();
            }
            log::info!(target: "input", "pointer capture {}", if self.captured { "on" } else { "off" });
        }
        let input = FlyInput::poll(rl);
        self.apply(&input, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn looking() -> FlyCamera {
        let mut cam = FlyCamera::default();
        cam.look(0.0, 0.0);
        cam
    }

    #[test]
    fn starts_looking_down_negative_z() {
        let cam = FlyCamera::default();
        let f = cam.forward();
        assert!(approx(f.x, 0.0) && approx(f.y, 0.0) && approx(f.z, -1.0));
        let r = cam.right();
        assert!(approx(r.x, 1.0) && approx(r.z, 0.0));
        assert_eq!(cam.position, Vec3::new(0.0, 20.0, 10.0));
    }

    #[test]
    fn first_pointer_delta_is_ignored() {
        let mut cam = FlyCamera::default();
        cam.look(500.0, -300.0);
        assert_eq!(cam.yaw, -90.0);
        assert_eq!(cam.pitch, 0.0);
        cam.look(10.0, -20.0);
        assert!(approx(cam.yaw, -89.0));
        assert!(approx(cam.pitch, 2.0));
    }

    #[test]
    fn recapture_rearms_first_look() {
        let mut cam = looking();
        cam.set_captured(false);
        cam.set_captured(true);
        cam.look(100.0, 0.0);
        assert_eq!(cam.yaw, -90.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = looking();
        cam.look(0.0, -10_000.0);
        assert_eq!(cam.pitch, 89.0);
        cam.look(0.0, 10_000.0);
        assert_eq!(cam.pitch, -89.0);
    }

    #[test]
    fn boost_triples_speed() {
        let mut walk = looking();
        let mut run = looking();
        let fwd = FlyInput { forward: true, ..Default::default() };
        walk.advance(&fwd, 0.5);
        run.advance(&FlyInput { boost: true, ..fwd }, 0.5);
        assert!(approx(walk.position.z, 10.0 - 2.5));
        assert!(approx(run.position.z, 10.0 - 7.5));
        assert_eq!(run.speed_multiplier, 3.0);
        walk.advance(&FlyInput::default(), 0.5);
        assert_eq!(walk.speed_multiplier, 1.0);
    }

    #[test]
    fn vertical_and_strafe_axes() {
        let mut cam = looking();
        cam.advance(&FlyInput { up: true, right: true, ..Default::default() }, 1.0);
        assert!(approx(cam.position.y, 25.0));
        assert!(approx(cam.position.x, 5.0));
        cam.advance(&FlyInput { down: true, left: true, ..Default::default() }, 1.0);
        assert!(approx(cam.position.y, 20.0));
        assert!(approx(cam.position.x, 0.0));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut cam = looking();
        cam.advance(&FlyInput { forward: true, back: true, ..Default::default() }, 1.0);
        assert_eq!(cam.position, Vec3::new(0.0, 20.0, 10.0));
    }

    #[test]
    fn uncaptured_pointer_does_not_turn() {
        let mut cam = looking();
        cam.captured = false;
        cam.apply(&FlyInput { look_dx: 50.0, ..Default::default() }, 0.016);
        assert_eq!(cam.yaw, -90.0);
    }
}
