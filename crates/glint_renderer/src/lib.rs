//! Glint Renderer - CPU direct-lighting ray tracer.
//!
//! For every pixel a primary ray is traced to the closest surface, each
//! light is tested for visibility with a shadow ray, and the visible lights
//! are shaded with an analytic BRDF. Pixels are rendered in parallel.

pub mod brdf;
mod bvh;
mod camera;
mod hittable;
mod light;
mod material;
mod mesh;
mod plane;
mod renderer;
mod scene;
pub mod scenes;
mod sphere;
mod triangle;

pub use bvh::Bvh;
pub use camera::Camera;
pub use hittable::{CullMode, HitRecord, Hittable};
pub use light::{Light, LightKind};
pub use material::{Color, Material};
pub use mesh::TriangleMesh;
pub use plane::Plane;
pub use renderer::{
    color_to_rgb8, max_to_one, FrameBuffer, LightingMode, RenderConfig, Renderer,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Mat4, Ray, Vec3};
