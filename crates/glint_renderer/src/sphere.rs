//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Aabb, Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material_index: usize,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material_index: usize) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material_index,
        }
    }

    /// Distance to the first valid root inside `ray_t`.
    ///
    /// Uses the geometric form (project the origin-to-center vector on the
    /// ray, then the half chord) instead of expanding the quadratic, which
    /// keeps precision for distant spheres. Tangent rays count as misses.
    #[inline]
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let oc = self.center - ray.origin;
        let tca = oc.dot(ray.direction);
        let discriminant = self.radius * self.radius - oc.length_squared() + tca * tca;
        if discriminant <= 0.0 {
            return None;
        }

        let thc = discriminant.sqrt();
        let t0 = tca - thc;
        if ray_t.contains(t0) {
            return Some(t0);
        }

        let t1 = tca + thc;
        ray_t.contains(t1).then_some(t1)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let Some(t) = self.intersect(ray, ray_t) else {
            return false;
        };

        let point = ray.at(t);
        let normal = (point - self.center) / self.radius;
        *rec = HitRecord {
            did_hit: true,
            t,
            point,
            normal,
            material_index: self.material_index,
        };
        true
    }

    fn occludes(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.intersect(ray, ray_t).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(self.center - rvec, self.center + rvec)
    }
}
