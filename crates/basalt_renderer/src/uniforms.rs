//! The constant records uploaded each frame.
//!
//! Both records are `repr(C)` POD so they can be copied byte-for-byte into
//! an [`UploadBuffer`](crate::upload::UploadBuffer) slot.  Matrix fields go
//! through [`gpu_mat4`] — the one place where the CPU math convention is
//! adapted to the shader's storage convention.

use basalt_core::{Camera, Projection, Time};
use glam::{Mat4, Vec3, Vec4};

/// Adapts a CPU-side matrix to the shader's storage layout.
///
/// glam and WGSL both store column-major, so this is currently a plain
/// reinterpretation; a backend whose shading language disagrees would
/// transpose here and nowhere else.
#[inline]
pub fn gpu_mat4(m: Mat4) -> [[f32; 4]; 4] {
    m.to_cols_array_2d()
}

/// Per-object constants: world matrix plus material color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectConstants {
    pub world: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl ObjectConstants {
    pub fn new(world: Mat4, color: Vec4) -> Self {
        Self {
            world: gpu_mat4(world),
            color: color.to_array(),
        }
    }
}

/// Per-pass constants, recomputed once per frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PassConstants {
    pub view: [[f32; 4]; 4],
    pub inv_view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub inv_proj: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    pub eye_pos: [f32; 3],
    pub _pad0: f32,
    pub render_target_size: [f32; 2],
    pub inv_render_target_size: [f32; 2],
    pub near_z: f32,
    pub far_z: f32,
    pub total_time: f32,
    pub delta_time: f32,
}

impl PassConstants {
    /// Builds the frame's pass record.  The camera's cached matrix must be
    /// current (call [`Camera::update`] first).
    pub fn build(
        camera: &Camera,
        projection: &Projection,
        width: u32,
        height: u32,
        time: Time,
    ) -> Self {
        let view = camera.view_matrix();
        let proj = projection.matrix();
        let view_proj = proj * view;

        let w = width.max(1) as f32;
        let h = height.max(1) as f32;

        Self {
            view: gpu_mat4(view),
            inv_view: gpu_mat4(view.inverse()),
            proj: gpu_mat4(proj),
            inv_proj: gpu_mat4(proj.inverse()),
            view_proj: gpu_mat4(view_proj),
            inv_view_proj: gpu_mat4(view_proj.inverse()),
            eye_pos: camera.transform().position().to_array(),
            _pad0: 0.0,
            render_target_size: [w, h],
            inv_render_target_size: [1.0 / w, 1.0 / h],
            near_z: projection.znear,
            far_z: projection.zfar,
            total_time: time.total,
            delta_time: time.delta,
        }
    }

    /// World position the view matrix was built around.
    pub fn eye(&self) -> Vec3 {
        Vec3::from_array(self.eye_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basalt_core::Transform;

    const TOL: f32 = 1e-5;

    fn mat(rows: [[f32; 4]; 4]) -> Mat4 {
        Mat4::from_cols_array_2d(&rows)
    }

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        assert!(
            (a - b).abs_diff_eq(Mat4::ZERO, TOL),
            "matrices differ:\n{a}\nvs\n{b}"
        );
    }

    #[test]
    fn identity_object_record_is_identity() {
        let mut t = Transform::identity();
        t.update_matrix();
        let rec = ObjectConstants::new(t.matrix(), Vec4::ONE);
        assert_mat_eq(mat(rec.world), Mat4::IDENTITY);
    }

    #[test]
    fn view_is_inverse_of_camera_translation() {
        // Camera at (0,0,-1), identity rotation, looking down +Z.
        let mut camera = Camera::new();
        camera
            .transform_mut()
            .set_position(Vec3::new(0.0, 0.0, -1.0));
        camera.update();
        let projection = Projection::new(45f32.to_radians(), 800, 600, 0.1, 1000.0);
        let time = Time::default();

        let pc = PassConstants::build(&camera, &projection, 800, 600, time);

        let expected_view = Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0)).inverse();
        assert_mat_eq(mat(pc.view), expected_view);
        assert_mat_eq(mat(pc.inv_view) * mat(pc.view), Mat4::IDENTITY);
        assert_mat_eq(mat(pc.view_proj), projection.matrix() * expected_view);
        assert_eq!(pc.eye(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(pc.render_target_size, [800.0, 600.0]);
        assert!((pc.inv_render_target_size[0] - 1.0 / 800.0).abs() < TOL);
        assert_eq!(pc.near_z, 0.1);
        assert_eq!(pc.far_z, 1000.0);
    }

    #[test]
    fn pass_record_layout_matches_shader_struct() {
        // Six mat4s, eye + pad, two vec2s, four scalars.
        assert_eq!(std::mem::size_of::<PassConstants>(), 6 * 64 + 16 + 16 + 16);
        assert_eq!(std::mem::size_of::<ObjectConstants>(), 64 + 16);
    }
}
