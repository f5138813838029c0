//! Point and directional lights.

use crate::material::Color;
use glint_math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
}

/// A light source.
///
/// Point lights use `origin` and fall off with the inverse square of the
/// distance. Directional lights use `direction`, the direction the light
/// travels, and have no falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub origin: Vec3,
    pub direction: Vec3,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn point(origin: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            kind: LightKind::Point,
            origin,
            direction: Vec3::ZERO,
            color,
            intensity,
        }
    }

    pub fn directional(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            kind: LightKind::Directional,
            origin: Vec3::ZERO,
            direction: direction.normalize_or_zero(),
            color,
            intensity,
        }
    }

    /// Vector from `target` toward the light.
    ///
    /// Not normalized for point lights: its length is the distance to the
    /// light, which bounds the shadow ray.
    #[inline]
    pub fn direction_to_light(&self, target: Vec3) -> Vec3 {
        match self.kind {
            LightKind::Point => self.origin - target,
            LightKind::Directional => -self.direction,
        }
    }

    /// Incident radiance arriving at `target`.
    #[inline]
    pub fn radiance(&self, target: Vec3) -> Color {
        match self.kind {
            LightKind::Point => {
                self.color * self.intensity / (self.origin - target).length_squared()
            }
            LightKind::Directional => self.color * self.intensity,
        }
    }
}
