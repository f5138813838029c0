//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hittable::{CullMode, HitRecord, Hittable, Query};
use glint_math::{are_equal, Aabb, Interval, Ray, Vec3};

/// A triangle primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices, counter-clockwise seen from the front face
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    /// Pre-computed face normal (unit length, zero for a degenerate triangle)
    pub normal: Vec3,
    pub cull_mode: CullMode,
    pub material_index: usize,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, cull_mode: CullMode, material_index: usize) -> Self {
        // A zero normal makes every ray "parallel", so degenerate input never hits
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self::with_normal(v0, v1, v2, normal, cull_mode, material_index)
    }

    /// Create a triangle with a pre-computed unit normal.
    pub fn with_normal(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        normal: Vec3,
        cull_mode: CullMode,
        material_index: usize,
    ) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal,
            cull_mode,
            material_index,
        }
    }
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns the ray parameter of the hit, or `None` when the ray is parallel
/// to the plane, the hit is culled for this kind of query, the hit point lies
/// outside the triangle or `t` is outside `ray_t`.
#[inline]
pub(crate) fn intersect_triangle(
    [v0, v1, v2]: [Vec3; 3],
    normal: Vec3,
    cull_mode: CullMode,
    ray: &Ray,
    ray_t: Interval,
    query: Query,
) -> Option<f32> {
    let n_dot_d = normal.dot(ray.direction);
    if are_equal(n_dot_d, 0.0) {
        return None;
    }

    if cull_mode.culls(n_dot_d, query) {
        return None;
    }

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray_t.contains(t).then_some(t)
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let vertices = [self.v0, self.v1, self.v2];
        match intersect_triangle(vertices, self.normal, self.cull_mode, ray, ray_t, Query::Closest)
        {
            Some(t) => {
                *rec = HitRecord::new(ray, t, self.normal, self.material_index);
                true
            }
            None => false,
        }
    }

    fn occludes(&self, ray: &Ray, ray_t: Interval) -> bool {
        let vertices = [self.v0, self.v1, self.v2];
        intersect_triangle(vertices, self.normal, self.cull_mode, ray, ray_t, Query::Any).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_point_cloud([self.v0, self.v1, self.v2].iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Triangle in the z=0 plane whose front face looks down -Z
    fn facing_camera(cull_mode: CullMode) -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            cull_mode,
            0,
        )
    }

    fn toward_front() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z)
    }

    fn toward_back() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z)
    }

    #[test]
    fn test_normal_follows_winding() {
        let tri = facing_camera(CullMode::NoCulling);
        assert!((tri.normal + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_triangle_hit() {
        let tri = facing_camera(CullMode::NoCulling);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&toward_front(), Ray::default_interval(), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-6);
        assert!(rec.point.length() < 1e-6);
        assert_eq!(rec.normal, tri.normal);

        let mut rec = HitRecord::default();
        assert!(tri.hit(&toward_back(), Ray::default_interval(), &mut rec));
    }

    #[test]
    fn test_triangle_miss() {
        let tri = facing_camera(CullMode::NoCulling);
        let outside = Ray::new(Vec3::new(5.0, 5.0, -2.0), Vec3::Z);
        assert!(!tri.occludes(&outside, Ray::default_interval()));
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = facing_camera(CullMode::NoCulling);
        let grazing = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        let mut rec = HitRecord::default();
        assert!(!tri.hit(&grazing, Ray::default_interval(), &mut rec));
    }

    #[test]
    fn test_back_face_culling() {
        let tri = facing_camera(CullMode::BackFaceCulling);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&toward_front(), Ray::default_interval(), &mut rec));
        assert!(!tri.hit(&toward_back(), Ray::default_interval(), &mut rec));

        // Shadow rays see the opposite side
        assert!(!tri.occludes(&toward_front(), Ray::default_interval()));
        assert!(tri.occludes(&toward_back(), Ray::default_interval()));
    }

    #[test]
    fn test_front_face_culling() {
        let tri = facing_camera(CullMode::FrontFaceCulling);
        let mut rec = HitRecord::default();

        assert!(!tri.hit(&toward_front(), Ray::default_interval(), &mut rec));
        assert!(tri.hit(&toward_back(), Ray::default_interval(), &mut rec));

        assert!(tri.occludes(&toward_front(), Ray::default_interval()));
        assert!(!tri.occludes(&toward_back(), Ray::default_interval()));
    }

    #[test]
    fn test_interval_limits() {
        let tri = facing_camera(CullMode::NoCulling);
        assert!(!tri.occludes(&toward_front(), Interval::new(0.0001, 1.5)));
        assert!(tri.occludes(&toward_front(), Interval::new(0.0001, 2.5)));
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0), CullMode::NoCulling, 0);
        let ray = Ray::new(Vec3::new(0.5, 0.0, -1.0), Vec3::Z);
        assert_eq!(tri.normal, Vec3::ZERO);
        assert!(!tri.occludes(&ray, Ray::default_interval()));
    }
}
