//! Demo scene: two colored boxes and an imported crystal, with a free-fly
//! camera (WASD to move, left-drag to look).

use basalt_app::{App, BasaltApp, FrameContext, KeyCode, MouseButton, Vec3, Vec4};
use basalt_renderer::geometry::{box_mesh, geosphere, load_obj};

/// Degrees of rotation per pixel of mouse travel.
const LOOK_SENSITIVITY: f32 = 0.1;
/// World units per second.
const MOVE_SPEED: f32 = 5.0;
/// Keep the camera short of straight up/down so yaw stays meaningful.
const PITCH_LIMIT: f32 = 89.0;

const BLUE: Vec4 = Vec4::new(0.2, 0.3, 0.9, 1.0);
const GREEN: Vec4 = Vec4::new(0.2, 0.9, 0.3, 1.0);
const RED: Vec4 = Vec4::new(0.9, 0.2, 0.2, 1.0);

#[derive(Default)]
struct Viewer {
    /// Accumulated camera pitch in degrees, clamped to ±[`PITCH_LIMIT`].
    pitch: f32,
}

impl BasaltApp for Viewer {
    fn setup(&mut self, ctx: &mut FrameContext) {
        let renderer = &mut *ctx.renderer;

        let cube = renderer.upload_mesh("Box", &box_mesh(2.0, 2.0, 2.0, 0));
        renderer.add_item(cube.clone(), Vec3::new(5.0, 0.0, 1.0), BLUE);
        renderer.add_item(cube, Vec3::ZERO, GREEN);

        // The crystal ships separately; a geosphere stands in when absent.
        let crystal = match load_obj("objects/crystal.obj") {
            Ok(data) => data,
            Err(e) => {
                log::warn!("crystal unavailable ({e}), using a geosphere instead");
                geosphere(2.0, 5)
            }
        };
        let crystal = renderer.upload_mesh("Crystal", &crystal);
        renderer.add_item(crystal, Vec3::new(10.0, 0.0, 0.0), RED);

        renderer
            .camera
            .transform_mut()
            .set_position(Vec3::new(0.0, 0.0, -1.0));
    }

    fn update(&mut self, ctx: &mut FrameContext) {
        if ctx.input.is_key_down(KeyCode::Escape) {
            ctx.request_exit();
            return;
        }

        let (dx, dy) = ctx.input.take_mouse_delta();
        let looking = ctx.input.is_button_down(MouseButton::Left);

        let camera = ctx.renderer.camera.transform_mut();
        if looking && (dx != 0.0 || dy != 0.0) {
            let wanted = dy * LOOK_SENSITIVITY;
            let clamped = (self.pitch + wanted).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            let pitch = clamped - self.pitch;
            self.pitch = clamped;
            camera.rotate(pitch, dx * LOOK_SENSITIVITY, 0.0);
        }

        let mut wish = Vec3::ZERO;
        if ctx.input.is_key_down(KeyCode::KeyW) {
            wish += camera.forward();
        }
        if ctx.input.is_key_down(KeyCode::KeyS) {
            wish -= camera.forward();
        }
        if ctx.input.is_key_down(KeyCode::KeyD) {
            wish += camera.right();
        }
        if ctx.input.is_key_down(KeyCode::KeyA) {
            wish -= camera.right();
        }
        if ctx.input.is_key_down(KeyCode::KeyE) {
            wish += camera.up();
        }
        if ctx.input.is_key_down(KeyCode::KeyQ) {
            wish -= camera.up();
        }
        if wish != Vec3::ZERO {
            let step = wish.normalize() * MOVE_SPEED * ctx.time.delta;
            camera.set_position(camera.position() + step);
        }
    }
}

fn main() -> anyhow::Result<()> {
    App::new(Viewer::default())
        .with_title("Basalt Viewer")
        .with_size(800, 600)
        .with_msaa(4)
        .run()
}
