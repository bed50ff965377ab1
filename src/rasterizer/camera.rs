//! Camera: pose, projection parameters and the derived matrices

use super::math::{Mat4, Vec3};

/// Perspective camera.
///
/// Pose fields are mutated freely by scene and control logic between frames;
/// the derived matrices are recomputed once per frame via `set_perspective` /
/// `set_aspect_ratio` and `update_matrices`, never written directly.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Explicit look target, used when `use_direction` is false
    pub target: Vec3,
    /// Look direction relative to `position`, used when `use_direction` is true
    pub direction: Vec3,
    pub use_direction: bool,
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    pub projection_mat: Mat4,
    pub view_mat: Mat4,
    pub view_projection_mat: Mat4,
}

impl Camera {
    /// Smallest usable near-plane distance; `set_perspective` clamps to this
    /// so a zero or negative plane can never reach the projective divide.
    pub const MIN_NEAR: f32 = 1e-4;

    pub fn new() -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, -1.0),
            use_direction: true,
            up: Vec3::UP,
            fov: 60.0_f32.to_radians(),
            aspect_ratio: 4.0 / 3.0,
            near: 0.1,
            far: 1000.0,
            projection_mat: Mat4::IDENTITY,
            view_mat: Mat4::IDENTITY,
            view_projection_mat: Mat4::IDENTITY,
        };
        let (fov, aspect, near, far) = (cam.fov, cam.aspect_ratio, cam.near, cam.far);
        cam.set_perspective(fov, aspect, near, far);
        cam
    }

    /// Store the projection parameters and re-derive `projection_mat`.
    ///
    /// Cheap and allocation-free; called every frame since a window resize
    /// changes the aspect ratio.
    pub fn set_perspective(&mut self, fov: f32, aspect: f32, near: f32, far: f32) {
        self.fov = fov;
        self.aspect_ratio = aspect;
        self.near = near.max(Self::MIN_NEAR);
        self.far = far.max(self.near + Self::MIN_NEAR);
        self.projection_mat = Mat4::perspective(self.fov, self.aspect_ratio);
    }

    /// Re-derive the projection from the stored parameters at a new aspect.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        let (fov, near, far) = (self.fov, self.near, self.far);
        self.set_perspective(fov, aspect, near, far);
    }

    /// The point the camera is looking at this frame.
    pub fn resolved_target(&self) -> Vec3 {
        if self.use_direction {
            self.position + self.direction
        } else {
            self.target
        }
    }

    /// Compute the look-at view matrix and `view_projection_mat`.
    ///
    /// Must run once per frame before any model is transformed. A degenerate
    /// basis (position on the resolved target, or looking along `up`) holds
    /// the previous matrices instead of propagating NaNs into the buffer.
    pub fn update_matrices(&mut self) {
        let Some(view) = Mat4::look_at(self.position, self.resolved_target(), self.up) else {
            return;
        };
        self.view_mat = view;
        self.view_projection_mat = self.projection_mat * self.view_mat;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resolved_target_switches_on_flag() {
        let mut cam = Camera::new();
        cam.position = Vec3::new(1.0, 0.0, 0.0);
        cam.direction = Vec3::new(0.0, 0.0, -2.0);
        cam.target = Vec3::new(5.0, 5.0, 5.0);

        cam.use_direction = true;
        assert_eq!(cam.resolved_target(), Vec3::new(1.0, 0.0, -2.0));
        cam.use_direction = false;
        assert_eq!(cam.resolved_target(), Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_resolving_direction_does_not_clobber_target() {
        let mut cam = Camera::new();
        cam.use_direction = true;
        cam.target = Vec3::new(9.0, 9.0, 9.0);
        let _ = cam.resolved_target();
        assert_eq!(cam.target, Vec3::new(9.0, 9.0, 9.0));
    }

    #[test]
    fn test_update_matrices_composes_projection_and_view() {
        let mut cam = Camera::new();
        cam.set_perspective(45.0_f32.to_radians(), 1.0, 0.01, 1000.0);
        cam.use_direction = false;
        cam.position = Vec3::new(0.0, 0.0, 3.0);
        cam.target = Vec3::ZERO;
        cam.update_matrices();

        // a point between camera and target stays centered, depth preserved
        let p = cam.view_projection_mat.transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_basis_holds_previous_matrices() {
        let mut cam = Camera::new();
        cam.use_direction = false;
        cam.position = Vec3::new(0.0, 0.0, 3.0);
        cam.target = Vec3::ZERO;
        cam.update_matrices();
        let view = cam.view_mat;
        let vp = cam.view_projection_mat;

        cam.target = cam.position;
        cam.update_matrices();
        assert_eq!(cam.view_mat, view);
        assert_eq!(cam.view_projection_mat, vp);
    }

    #[test]
    fn test_set_perspective_clamps_bad_planes() {
        let mut cam = Camera::new();
        cam.set_perspective(60.0_f32.to_radians(), 1.0, -1.0, -0.5);
        assert!(cam.near >= Camera::MIN_NEAR);
        assert!(cam.far > cam.near);
    }

    #[test]
    fn test_set_aspect_ratio_keeps_other_parameters() {
        let mut cam = Camera::new();
        cam.set_perspective(45.0_f32.to_radians(), 1.0, 0.25, 500.0);
        cam.set_aspect_ratio(2.0);
        assert_relative_eq!(cam.fov, 45.0_f32.to_radians());
        assert_relative_eq!(cam.near, 0.25);
        assert_relative_eq!(cam.far, 500.0);
        assert_relative_eq!(cam.aspect_ratio, 2.0);
    }
}
