use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box stored as its two extreme corners.
///
/// Used for broad-phase rejection of meshes and for the nodes of the BVH.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Boxes thinner than this on an axis are padded so the slab test never
/// sees a zero-width slab (flat triangles lying in an axis plane).
const MIN_EXTENT: f32 = 0.0001;

impl Aabb {
    /// Contains nothing; the identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Contains everything (infinite planes).
    pub const UNIVERSE: Aabb = Aabb {
        min: Vec3::splat(f32::NEG_INFINITY),
        max: Vec3::splat(f32::INFINITY),
    };

    /// Box spanned by two arbitrary corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let mut aabb = Self {
            min: a.min(b),
            max: a.max(b),
        };
        aabb.pad_to_minimums();
        aabb
    }

    /// Tight box around a set of points, `EMPTY` for no points.
    pub fn from_point_cloud<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let (min, max) = points.into_iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );
        if min.x > max.x {
            return Self::EMPTY;
        }
        Self::from_points(min, max)
    }

    /// Smallest box containing both boxes.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Slab test: does the ray pass through the box while `t` is inside `ray_t`?
    ///
    /// The interval is intersected with the entry/exit distances of each
    /// axis-pair of planes; an empty result means a miss. Passing the current
    /// best hit distance as `ray_t.max` rejects boxes that start beyond it.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Index (0=X, 1=Y, 2=Z) of the axis with the largest extent.
    pub fn longest_axis(&self) -> usize {
        let size = self.max - self.min;
        if size.x > size.y && size.x > size.z {
            0
        } else if size.y > size.z {
            1
        } else {
            2
        }
    }

    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    fn pad_to_minimums(&mut self) {
        for axis in 0..3 {
            if self.max[axis] - self.min[axis] < MIN_EXTENT {
                self.min[axis] -= MIN_EXTENT / 2.0;
                self.max[axis] += MIN_EXTENT / 2.0;
            }
        }
    }
}
