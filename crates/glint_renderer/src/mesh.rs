//! Transformable triangle mesh backed by its own BVH.

use crate::bvh::Bvh;
use crate::hittable::{CullMode, HitRecord, Hittable, Query};
use crate::triangle::{intersect_triangle, Triangle};
use glint_core::Mesh;
use glint_math::{Aabb, Interval, Mat3, Mat4, Quat, Ray, Vec3};

/// A triangle mesh placed in the world by translation, Y rotation and scale.
///
/// The model-space data is kept untouched; world-space positions, normals,
/// bounds and the BVH are derived from it by [`TriangleMesh::update_transforms`].
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    model: Mesh,

    translation: Vec3,
    rotation_y: f32,
    scale: Vec3,

    world_positions: Vec<Vec3>,
    world_normals: Vec<Vec3>,
    bbox: Aabb,
    bvh: Bvh,

    pub cull_mode: CullMode,
    pub material_index: usize,
}

impl TriangleMesh {
    /// Wrap a loaded mesh with an identity transform and build its BVH.
    pub fn new(model: Mesh, cull_mode: CullMode, material_index: usize) -> Self {
        let mut mesh = Self {
            model,
            translation: Vec3::ZERO,
            rotation_y: 0.0,
            scale: Vec3::ONE,
            world_positions: Vec::new(),
            world_normals: Vec::new(),
            bbox: Aabb::EMPTY,
            bvh: Bvh::default(),
            cull_mode,
            material_index,
        };
        mesh.update_transforms();
        mesh
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    /// Rotation around the world Y axis, in radians.
    pub fn set_rotation_y(&mut self, angle: f32) {
        self.rotation_y = angle;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Model-to-world matrix: scale, then rotate, then translate.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_y(self.rotation_y),
            self.translation,
        )
    }

    /// Recompute world-space geometry from the current transform and rebuild
    /// the BVH. Call after changing translation, rotation or scale.
    pub fn update_transforms(&mut self) {
        let transform = self.transform();
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();

        self.world_positions = self
            .model
            .positions()
            .iter()
            .map(|&p| transform.transform_point3(p))
            .collect();

        // A zero scale collapses the mesh; its normals become zero and it never hits
        self.world_normals = self
            .model
            .normals()
            .iter()
            .map(|&n| (normal_matrix * n).normalize_or_zero())
            .collect();

        self.bbox = Aabb::from_point_cloud(self.world_positions.iter());

        let boxes: Vec<Aabb> = (0..self.triangle_count())
            .map(|i| Aabb::from_point_cloud(self.world_triangle(i).iter()))
            .collect();
        self.bvh = Bvh::build(&boxes);

        log::info!(
            "Built mesh BVH: {} triangles, {} nodes, depth {}",
            self.triangle_count(),
            self.bvh.node_count(),
            self.bvh.depth()
        );
    }

    pub fn triangle_count(&self) -> usize {
        self.model.triangle_count()
    }

    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// World-space triangles, in model order.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).map(move |i| {
            let [v0, v1, v2] = self.world_triangle(i);
            Triangle::with_normal(
                v0,
                v1,
                v2,
                self.world_normals[i],
                self.cull_mode,
                self.material_index,
            )
        })
    }

    #[inline]
    fn world_triangle(&self, index: usize) -> [Vec3; 3] {
        let face = &self.model.indices()[index * 3..index * 3 + 3];
        [
            self.world_positions[face[0] as usize],
            self.world_positions[face[1] as usize],
            self.world_positions[face[2] as usize],
        ]
    }

    #[inline]
    fn intersect(&self, index: usize, ray: &Ray, ray_t: Interval, query: Query) -> Option<f32> {
        intersect_triangle(
            self.world_triangle(index),
            self.world_normals[index],
            self.cull_mode,
            ray,
            ray_t,
            query,
        )
    }
}

impl Hittable for TriangleMesh {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        if !self.bbox.hit(ray, ray_t) {
            return false;
        }

        self.bvh.hit(ray, ray_t, rec, |i, ray_t, rec| {
            match self.intersect(i, ray, ray_t, Query::Closest) {
                Some(t) => {
                    *rec = HitRecord::new(ray, t, self.world_normals[i], self.material_index);
                    true
                }
                None => false,
            }
        })
    }

    fn occludes(&self, ray: &Ray, ray_t: Interval) -> bool {
        if !self.bbox.hit(ray, ray_t) {
            return false;
        }

        self.bvh
            .occludes(ray, ray_t, |i, ray_t| self.intersect(i, ray, ray_t, Query::Any).is_some())
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
