use crate::{Interval, Vec3};

/// A ray with an origin and a unit direction.
///
/// The valid range of `t` is not stored on the ray; queries take it as an
/// explicit [`Interval`] so traversal can narrow it without mutating the ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Default lower bound for hit distances, keeps rays from hitting their own origin.
    pub const T_MIN: f32 = 0.0001;
    /// Default upper bound for hit distances.
    pub const T_MAX: f32 = f32::MAX;

    /// Create a new ray. `direction` is expected to be normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// The interval a fresh query starts from: `[T_MIN, T_MAX]`.
    #[inline]
    pub fn default_interval() -> Interval {
        Interval::new(Self::T_MIN, Self::T_MAX)
    }

    /// Point along the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Z);

        assert_eq!(ray.at(0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), Vec3::new(1.0, 0.0, 2.5));
        assert_eq!(ray.at(-1.0), Vec3::new(1.0, 0.0, -1.0));
    }

    #[test]
    fn test_default_interval() {
        let interval = Ray::default_interval();
        assert_eq!(interval.min, Ray::T_MIN);
        assert_eq!(interval.max, f32::MAX);
        assert!(!interval.contains(0.0));
    }
}
