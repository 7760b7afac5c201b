//! Local transform: position, rotation (quaternion), scale, with a lazily
//! cached matrix.
//!
//! The cached matrix is valid if and only if the dirty flag is clear.  Every
//! mutator sets the flag; [`Transform::update_matrix`] recomputes the matrix
//! only when the flag is set, so calling it twice in a row is a no-op.

use glam::{Mat4, Quat, Vec3};

/// Rotation/translation/scale state producing a local-to-parent matrix on
/// demand.
///
/// The orthonormal forward/up/right basis is re-derived from the quaternion
/// on every rotation and is always current, unlike the matrix which is only
/// rebuilt lazily.  The default basis is left-handed: forward +Z, up +Y,
/// right +X.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,

    forward: Vec3,
    up: Vec3,
    right: Vec3,

    matrix: Mat4,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform: origin, no rotation, uniform scale 1, canonical
    /// basis, cached matrix already valid.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            forward: Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            matrix: Mat4::IDENTITY,
            dirty: false,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        let mut t = Self::identity();
        t.set_position(position);
        t
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Forward direction in parent space (+Z at identity).
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Up direction in parent space (+Y at identity).
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Right direction in parent space (+X at identity).
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// The cached local matrix.  Stale if a mutator ran since the last
    /// [`update_matrix`](Self::update_matrix) call.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// True when a mutation has not yet been folded into the cached matrix.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Composes an incremental rotation onto the current orientation.
    ///
    /// Angles are in degrees.  The increment is built about the transform's
    /// *current* local axes — pitch about right, then yaw about up, then
    /// roll about forward, applied in that order — so repeated calls
    /// accumulate in the local frame rather than around fixed world axes.
    /// From identity, `rotate(0.0, 90.0, 0.0)` turns forward (0,0,1) into
    /// (1,0,0).
    pub fn rotate(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.dirty = true;

        let pitch = pitch.to_radians();
        let yaw = yaw.to_radians();
        let roll = roll.to_radians();

        let increment = Quat::from_axis_angle(self.forward, roll)
            * Quat::from_axis_angle(self.up, yaw)
            * Quat::from_axis_angle(self.right, pitch);

        self.rotation = (increment * self.rotation).normalize();
        self.rebuild_basis();
    }

    /// Replaces the orientation so that forward points at `target`.
    ///
    /// Keeps the identity orientation when `target` coincides with the
    /// current position.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir.length_squared() < 1e-10 {
            return;
        }
        self.rotation = Quat::from_rotation_arc(Vec3::Z, dir);
        self.rebuild_basis();
        self.dirty = true;
    }

    /// Recomputes the cached matrix (`T · R · S`) if dirty, then clears the
    /// flag.  Idempotent: a second call without an intervening mutation does
    /// nothing.
    pub fn update_matrix(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.matrix =
            Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position);
    }

    fn rebuild_basis(&mut self) {
        self.right = self.rotation * Vec3::X;
        self.up = self.rotation * Vec3::Y;
        self.forward = self.rotation * Vec3::Z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        assert!(
            (a - b).abs_diff_eq(Mat4::ZERO, TOL),
            "matrices differ:\n{a}\nvs\n{b}"
        );
    }

    #[test]
    fn identity_starts_clean() {
        let t = Transform::identity();
        assert!(!t.is_dirty());
        assert_mat_eq(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn zero_rotation_yields_identity_matrix() {
        let mut t = Transform::identity();
        t.rotate(0.0, 0.0, 0.0);
        // A zero-angle rotate still marks the transform dirty.
        assert!(t.is_dirty());
        t.update_matrix();
        assert_mat_eq(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn cache_never_stale_after_update() {
        let mut t = Transform::identity();
        t.set_position(Vec3::new(1.0, 2.0, 3.0));
        t.rotate(30.0, 45.0, 0.0);
        t.set_scale(Vec3::splat(2.0));
        t.update_matrix();

        let expected =
            Mat4::from_scale_rotation_translation(t.scale(), t.rotation(), t.position());
        assert_mat_eq(t.matrix(), expected);
    }

    #[test]
    fn update_matrix_is_idempotent() {
        let mut t = Transform::identity();
        t.rotate(10.0, 20.0, 30.0);
        t.update_matrix();
        let first = t.matrix();
        t.update_matrix();
        assert_eq!(first, t.matrix());
        assert!(!t.is_dirty());
    }

    #[test]
    fn matrix_is_stale_until_updated() {
        let mut t = Transform::identity();
        t.set_position(Vec3::X);
        // Mutated but not yet recomputed: the cache still holds identity.
        assert!(t.is_dirty());
        assert_mat_eq(t.matrix(), Mat4::IDENTITY);
        t.update_matrix();
        assert_mat_eq(t.matrix(), Mat4::from_translation(Vec3::X));
    }

    #[test]
    fn yaw_90_turns_forward_to_plus_x() {
        let mut t = Transform::identity();
        assert!((t.forward() - Vec3::Z).length() < TOL);
        t.rotate(0.0, 90.0, 0.0);
        assert!(
            (t.forward() - Vec3::X).length() < 1e-4,
            "forward was {:?}",
            t.forward()
        );
    }

    #[test]
    fn rotation_accumulates_in_local_frame() {
        let mut t = Transform::identity();
        t.rotate(0.0, 90.0, 0.0);
        t.rotate(0.0, 90.0, 0.0);
        // Two local yaws of 90° face backwards.
        assert!((t.forward() - Vec3::NEG_Z).length() < 1e-4);
        // Basis stays orthonormal.
        assert!(t.forward().dot(t.up()).abs() < TOL);
        assert!(t.forward().dot(t.right()).abs() < TOL);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut t = Transform::from_position(Vec3::new(0.0, 0.0, -1.0));
        t.look_at(Vec3::ZERO);
        assert!((t.forward() - Vec3::Z).length() < TOL);
    }

    #[test]
    fn look_at_self_is_a_no_op() {
        let mut t = Transform::from_position(Vec3::ONE);
        let before = t.rotation();
        t.look_at(Vec3::ONE);
        assert_eq!(before, t.rotation());
    }
}
