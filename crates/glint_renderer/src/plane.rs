//! Infinite plane primitive.

use crate::hittable::{HitRecord, Hittable};
use glint_math::{are_equal, Aabb, Interval, Ray, Vec3};

/// An infinite plane through `origin` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
    pub material_index: usize,
}

impl Plane {
    pub fn new(origin: Vec3, normal: Vec3, material_index: usize) -> Self {
        Self {
            origin,
            normal: normal.normalize_or_zero(),
            material_index,
        }
    }

    #[inline]
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let denom = ray.direction.dot(self.normal);
        if are_equal(denom, 0.0) {
            return None;
        }

        let t = (self.origin - ray.origin).dot(self.normal) / denom;
        ray_t.surrounds(t).then_some(t)
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        match self.intersect(ray, ray_t) {
            Some(t) => {
                *rec = HitRecord::new(ray, t, self.normal, self.material_index);
                true
            }
            None => false,
        }
    }

    fn occludes(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.intersect(ray, ray_t).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Plane {
        Plane::new(Vec3::ZERO, Vec3::Y, 1)
    }

    #[test]
    fn test_plane_hit() {
        let ray = Ray::new(Vec3::new(2.0, 3.0, 0.0), -Vec3::Y);
        let mut rec = HitRecord::default();

        assert!(floor().hit(&ray, Ray::default_interval(), &mut rec));
        assert!((rec.t - 3.0).abs() < 1e-6);
        assert_eq!(rec.point, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(rec.normal, Vec3::Y);
        assert_eq!(rec.material_index, 1);
    }

    #[test]
    fn test_plane_hit_from_below() {
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        let mut rec = HitRecord::default();

        assert!(floor().hit(&ray, Ray::default_interval(), &mut rec));
        // Normal is never flipped toward the ray
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_parallel_ray_misses() {
        // Above, on and below the plane
        for y in [1.0, 0.0, -1.0] {
            for direction in [Vec3::X, Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0).normalize()] {
                let ray = Ray::new(Vec3::new(3.0, y, -2.0), direction);
                let mut rec = HitRecord::default();

                assert!(!floor().hit(&ray, Ray::default_interval(), &mut rec), "y = {}", y);
                assert!(!rec.did_hit);
                assert!(!floor().occludes(&ray, Ray::default_interval()), "y = {}", y);
            }
        }
    }

    #[test]
    fn test_plane_behind_ray() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(!floor().occludes(&ray, Ray::default_interval()));
    }

    #[test]
    fn test_interval_is_open() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), -Vec3::Y);
        assert!(!floor().occludes(&ray, Interval::new(0.0001, 2.0)));
        assert!(floor().occludes(&ray, Interval::new(0.0001, 2.01)));
    }
}
