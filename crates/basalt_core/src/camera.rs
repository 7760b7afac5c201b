//! Free-fly camera and perspective projection.
//!
//! `Camera` is a thin holder of a mutable [`Transform`] — the transform's
//! matrix maps camera space into the world, so the view matrix the renderer
//! needs is its *inverse*.  Projection parameters live in [`Projection`] so
//! the aspect ratio can be recomputed on resize without touching the camera.

use glam::Mat4;

use crate::transform::Transform;

/// The view frame: a transform placed in the world.
#[derive(Debug, Default, Clone)]
pub struct Camera {
    transform: Transform,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Folds pending transform mutations into the cached matrix.
    pub fn update(&mut self) {
        self.transform.update_matrix();
    }

    /// The view matrix: the inverse of the camera's world matrix.
    ///
    /// Call [`update`](Self::update) first so the cached matrix is current.
    pub fn view_matrix(&self) -> Mat4 {
        self.transform.matrix().inverse()
    }
}

/// Fixed field-of-view perspective projection (left-handed, matching the
/// camera's +Z-forward basis).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(fov_y: f32, width: u32, height: u32, znear: f32, zfar: f32) -> Self {
        Self {
            fov_y,
            aspect: width.max(1) as f32 / height.max(1) as f32,
            znear,
            zfar,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect, self.znear, self.zfar)
    }

    /// Recomputes the aspect ratio for a new client size.
    ///
    /// Zero-area sizes (minimized window) leave the projection untouched —
    /// they would produce an invalid aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn view_is_inverse_of_camera_matrix() {
        let mut camera = Camera::new();
        camera
            .transform_mut()
            .set_position(Vec3::new(0.0, 0.0, -1.0));
        camera.update();

        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -1.0)).inverse();
        assert!((camera.view_matrix() - expected).abs_diff_eq(Mat4::ZERO, 1e-5));
    }

    #[test]
    fn resize_updates_aspect() {
        let mut proj = Projection::new(45f32.to_radians(), 800, 600, 0.1, 1000.0);
        assert!((proj.aspect - 800.0 / 600.0).abs() < 1e-6);
        proj.resize(1024, 768);
        assert!((proj.aspect - 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn zero_area_resize_is_skipped() {
        let mut proj = Projection::new(45f32.to_radians(), 800, 600, 0.1, 1000.0);
        let before = proj;
        proj.resize(0, 768);
        proj.resize(1024, 0);
        assert_eq!(before, proj);
        assert_eq!(before.matrix(), proj.matrix());
    }

    #[test]
    fn projection_is_left_handed() {
        let proj = Projection::new(45f32.to_radians(), 800, 600, 0.1, 1000.0);
        // A point in front of the camera (+Z) projects to positive depth.
        let p = proj.matrix() * Vec4::new(0.0, 0.0, 10.0, 1.0);
        assert!(p.z > 0.0 && p.w > 0.0);
    }
}
