// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Absolute tolerance used for every float equality test in the tracer.
pub const EPSILON: f32 = 1e-6;

/// Compare two floats with an absolute tolerance of [`EPSILON`].
#[inline]
pub fn are_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}
