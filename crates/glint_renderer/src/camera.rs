//! Pinhole camera for primary ray generation.

use glint_math::{EulerRot, Mat3, Mat4, Ray, Vec3, Vec4};

/// Pitch stays this far short of straight up or down so the basis never
/// degenerates against the world up axis.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Pinhole camera looking down its local +Z axis.
///
/// The orthonormal basis is derived lazily: every mutation marks it stale and
/// [`Camera::compute_view_to_world`] rebuilds it before the next frame.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,
    /// Vertical field of view in degrees
    fov_angle: f32,

    forward: Vec3,
    up: Vec3,
    right: Vec3,

    total_yaw: f32,
    total_pitch: f32,

    basis_stale: bool,
}

impl Camera {
    /// Camera at `origin` looking down +Z.
    pub fn new(origin: Vec3, fov_angle: f32) -> Self {
        Self {
            origin,
            fov_angle,
            forward: Vec3::Z,
            up: Vec3::Y,
            right: Vec3::X,
            total_yaw: 0.0,
            total_pitch: 0.0,
            basis_stale: true,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn fov_angle(&self) -> f32 {
        self.fov_angle
    }

    pub fn is_basis_stale(&self) -> bool {
        self.basis_stale
    }

    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
        self.basis_stale = true;
    }

    pub fn set_fov_angle(&mut self, fov_angle: f32) {
        self.fov_angle = fov_angle;
    }

    /// Aim the camera at `target`, keeping the accumulated yaw/pitch in sync.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.origin).try_normalize() else {
            return;
        };

        self.total_yaw = forward.x.atan2(forward.z);
        self.total_pitch = (-forward.y).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.forward = Self::forward_from_angles(self.total_yaw, self.total_pitch);
        self.basis_stale = true;
    }

    /// Move along the camera's own axes: `delta.x` right, `delta.y` up,
    /// `delta.z` forward.
    pub fn translate(&mut self, delta: Vec3) {
        self.origin += self.right * delta.x + self.up * delta.y + self.forward * delta.z;
        self.basis_stale = true;
    }

    /// Add yaw (around world Y) and pitch (positive looks down), in radians.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.total_yaw += yaw;
        self.total_pitch = (self.total_pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.forward = Self::forward_from_angles(self.total_yaw, self.total_pitch);
        self.basis_stale = true;
    }

    fn forward_from_angles(yaw: f32, pitch: f32) -> Vec3 {
        Mat3::from_euler(EulerRot::YXZ, yaw, pitch, 0.0) * Vec3::Z
    }

    /// Refresh the basis if needed and return the camera-to-world matrix,
    /// whose columns are right, up, forward and origin.
    pub fn compute_view_to_world(&mut self) -> Mat4 {
        if self.basis_stale {
            self.forward = self.forward.normalize();
            self.right = Vec3::Y.cross(self.forward).normalize();
            self.up = self.forward.cross(self.right).normalize();
            self.basis_stale = false;
        }

        Mat4::from_cols(
            self.right.extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            Vec4::new(self.origin.x, self.origin.y, self.origin.z, 1.0),
        )
    }

    /// Ray through the center of pixel (`px`, `py`), with (0, 0) the top-left
    /// pixel of a `width` x `height` image.
    #[inline]
    pub fn primary_ray(&self, view_to_world: &Mat4, px: u32, py: u32, width: u32, height: u32) -> Ray {
        let aspect = width as f32 / height as f32;
        let fov = (self.fov_angle.to_radians() / 2.0).tan();

        let x = (2.0 * (px as f32 + 0.5) / width as f32 - 1.0) * aspect * fov;
        let y = (1.0 - 2.0 * (py as f32 + 0.5) / height as f32) * fov;

        let direction = view_to_world.transform_vector3(Vec3::new(x, y, 1.0)).normalize();
        Ray::new(self.origin, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 90.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(camera: &Camera) {
        for v in [camera.right(), camera.up(), camera.forward()] {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
        assert!(camera.right().dot(camera.up()).abs() < 1e-5);
        assert!(camera.right().dot(camera.forward()).abs() < 1e-5);
        assert!(camera.up().dot(camera.forward()).abs() < 1e-5);
    }

    #[test]
    fn test_default_basis() {
        let mut camera = Camera::default();
        let m = camera.compute_view_to_world();

        assert_eq!(m, Mat4::IDENTITY);
        assert!(!camera.is_basis_stale());
    }

    #[test]
    fn test_basis_after_look_at() {
        let mut camera = Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0);
        camera.look_at(Vec3::ZERO);
        assert!(camera.is_basis_stale());

        let m = camera.compute_view_to_world();
        assert_orthonormal(&camera);

        let expected = (Vec3::ZERO - camera.origin()).normalize();
        assert!((camera.forward() - expected).length() < 1e-5);
        // Right stays horizontal, up keeps a positive world-Y component
        assert!(camera.right().y.abs() < 1e-5);
        assert!(camera.up().y > 0.0);
        assert_eq!(m.w_axis, Vec4::new(0.0, 3.0, -9.0, 1.0));
    }

    #[test]
    fn test_center_ray_follows_forward() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.0, -3.0), 90.0);
        camera.look_at(Vec3::ZERO);
        let m = camera.compute_view_to_world();

        // Pixel centers straddle the middle of an odd-sized image exactly
        let ray = camera.primary_ray(&m, 50, 50, 101, 101);
        assert!((ray.direction - camera.forward()).length() < 1e-5);
        assert_eq!(ray.origin, camera.origin());
    }

    #[test]
    fn test_corner_rays() {
        let mut camera = Camera::default();
        let m = camera.compute_view_to_world();

        let top_left = camera.primary_ray(&m, 0, 0, 200, 100);
        assert!(top_left.direction.x < 0.0 && top_left.direction.y > 0.0);

        let bottom_right = camera.primary_ray(&m, 199, 99, 200, 100);
        assert!(bottom_right.direction.x > 0.0 && bottom_right.direction.y < 0.0);

        // fov 90 and aspect 2: x reaches nearly 2 at the edge
        let d = top_left.direction / top_left.direction.z;
        assert!((d.x + 2.0 * (1.0 - 1.0 / 200.0)).abs() < 1e-4);
        assert!((d.y - (1.0 - 1.0 / 100.0)).abs() < 1e-4);
    }

    #[test]
    fn test_translate_uses_camera_axes() {
        let mut camera = Camera::default();
        camera.rotate(std::f32::consts::FRAC_PI_2, 0.0);
        camera.compute_view_to_world();

        // Facing +X after a quarter yaw
        assert!((camera.forward() - Vec3::X).length() < 1e-5);
        camera.translate(Vec3::new(0.0, 0.0, 2.0));
        assert!((camera.origin() - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        assert!(camera.is_basis_stale());
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 10.0);
        camera.compute_view_to_world();

        assert!(camera.forward().y < 0.0);
        assert!(camera.forward().y > -1.0);
        assert!(camera.right().is_finite());
        assert_orthonormal(&camera);
    }
}
