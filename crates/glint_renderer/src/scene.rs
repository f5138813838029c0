//! Scene container and the two ray queries the renderer needs.
//!
//! Bounded primitives (spheres, triangles, meshes) live under a BVH over
//! their world boxes; infinite planes cannot be boxed and are tested one by
//! one before the tree is searched.

use std::sync::OnceLock;

use crate::bvh::Bvh;
use crate::camera::Camera;
use crate::hittable::{HitRecord, Hittable};
use crate::light::Light;
use crate::material::{Color, Material};
use crate::mesh::TriangleMesh;
use crate::plane::Plane;
use crate::sphere::Sphere;
use crate::triangle::Triangle;
use glint_math::{Aabb, Interval, Ray, Vec3};

/// Everything visible in a frame: primitives, materials, lights and camera.
///
/// Primitives refer to materials by the index returned from
/// [`Scene::add_material`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    triangles: Vec<Triangle>,
    meshes: Vec<TriangleMesh>,
    materials: Vec<Material>,
    lights: Vec<Light>,
    camera: Camera,

    /// Over spheres, then triangles, then meshes. Dropped whenever one of
    /// them changes and rebuilt by the next query.
    bvh: OnceLock<Bvh>,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
        self.invalidate_bvh();
    }

    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
        self.invalidate_bvh();
    }

    pub fn add_mesh(&mut self, mesh: TriangleMesh) {
        self.meshes.push(mesh);
        self.invalidate_bvh();
    }

    /// Register a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_point_light(&mut self, origin: Vec3, intensity: f32, color: Color) {
        self.lights.push(Light::point(origin, intensity, color));
    }

    pub fn add_directional_light(&mut self, direction: Vec3, intensity: f32, color: Color) {
        self.lights.push(Light::directional(direction, intensity, color));
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Material at `index`. Panics on an index not handed out by
    /// [`Scene::add_material`].
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn meshes(&self) -> &[TriangleMesh] {
        &self.meshes
    }

    /// Mutable access to the meshes, e.g. to move one and call
    /// [`TriangleMesh::update_transforms`]. The scene BVH is rebuilt on the
    /// next query.
    pub fn meshes_mut(&mut self) -> &mut [TriangleMesh] {
        self.invalidate_bvh();
        &mut self.meshes
    }

    pub fn primitive_count(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.triangles.len() + self.meshes.len()
    }

    /// Hierarchy over the bounded primitives, built on first use after the
    /// geometry changed.
    pub fn bvh(&self) -> &Bvh {
        self.bvh.get_or_init(|| {
            let boxes: Vec<Aabb> = self.bounded().map(|object| object.bounding_box()).collect();
            let bvh = Bvh::build(&boxes);
            log::info!(
                "Built scene BVH: {} primitives, {} nodes, depth {}",
                boxes.len(),
                bvh.node_count(),
                bvh.depth()
            );
            bvh
        })
    }

    fn invalidate_bvh(&mut self) {
        self.bvh.take();
    }

    /// Bounded primitives in BVH index order.
    fn bounded(&self) -> impl Iterator<Item = &dyn Hittable> + '_ {
        let spheres = self.spheres.iter().map(|s| s as &dyn Hittable);
        let triangles = self.triangles.iter().map(|t| t as &dyn Hittable);
        let meshes = self.meshes.iter().map(|m| m as &dyn Hittable);
        spheres.chain(triangles).chain(meshes)
    }

    /// Bounded primitive behind BVH leaf `index`.
    fn bounded_at(&self, index: usize) -> &dyn Hittable {
        let spheres = self.spheres.len();
        let triangles = spheres + self.triangles.len();
        if index < spheres {
            &self.spheres[index]
        } else if index < triangles {
            &self.triangles[index - spheres]
        } else {
            &self.meshes[index - triangles]
        }
    }

    /// Nearest hit along `ray` within the default interval, or a record with
    /// `did_hit == false`.
    pub fn closest_hit(&self, ray: &Ray) -> HitRecord {
        let mut rec = HitRecord::default();
        let mut closest = Ray::default_interval();

        for plane in &self.planes {
            if plane.hit(ray, closest, &mut rec) {
                closest = closest.with_max(rec.t);
            }
        }

        self.bvh().hit(ray, closest, &mut rec, |i, ray_t, rec| {
            self.bounded_at(i).hit(ray, ray_t, rec)
        });

        rec
    }

    /// Is anything hit along `ray` within `ray_t`? Stops at the first hit.
    pub fn does_hit(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.planes.iter().any(|plane| plane.occludes(ray, ray_t))
            || self
                .bvh()
                .occludes(ray, ray_t, |i, ray_t| self.bounded_at(i).occludes(ray, ray_t))
    }
}
