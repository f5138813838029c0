//! Hittable trait and HitRecord for ray-primitive intersection.

use glint_math::{Aabb, Interval, Ray, Vec3};

/// Record of a ray-primitive intersection.
///
/// A fresh record is created for every query and starts out as "no hit".
/// Materials are referenced by index into the scene's material table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Whether anything was hit
    pub did_hit: bool,
    /// Ray parameter of the hit
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Unit normal of the primitive's front face (not flipped toward the ray)
    pub normal: Vec3,
    /// Index into the scene's materials
    pub material_index: usize,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            did_hit: false,
            t: f32::MAX,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            material_index: 0,
        }
    }
}

impl HitRecord {
    /// A hit at parameter `t` along `ray`.
    #[inline]
    pub fn new(ray: &Ray, t: f32, normal: Vec3, material_index: usize) -> Self {
        Self {
            did_hit: true,
            t,
            point: ray.at(t),
            normal,
            material_index,
        }
    }
}

/// Which side of a triangle is invisible to shading rays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    #[default]
    NoCulling,
    FrontFaceCulling,
    BackFaceCulling,
}

/// The two kinds of scene queries. Culling is inverted between them so a
/// surface hidden from the camera by culling still casts a shadow from its
/// far side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Query {
    Closest,
    Any,
}

impl CullMode {
    /// Should a hit with `normal . direction == n_dot_d` be discarded?
    #[inline]
    pub(crate) fn culls(self, n_dot_d: f32, query: Query) -> bool {
        // The ray travels along the normal when it sees the back face
        let back = n_dot_d > 0.0;
        let back = match query {
            Query::Closest => back,
            Query::Any => !back,
        };

        match self {
            CullMode::NoCulling => false,
            CullMode::BackFaceCulling => back,
            CullMode::FrontFaceCulling => !back,
        }
    }
}

/// Trait for primitives that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest-hit query.
    ///
    /// `ray_t.max` is the best distance found so far; the record is only
    /// overwritten (and `true` returned) for a valid hit inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;

    /// Any-hit query for shadow rays. Skips normal and material work and
    /// applies the inverted culling sense.
    fn occludes(&self, ray: &Ray, ray_t: Interval) -> bool;

    /// World-space bounds.
    fn bounding_box(&self) -> Aabb;
}
