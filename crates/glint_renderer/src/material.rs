//! Surface materials for direct lighting.

use crate::brdf;
use crate::hittable::HitRecord;
use glint_math::{are_equal, Vec3};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Reflectance at normal incidence for dielectrics.
const DIELECTRIC_F0: f32 = 0.04;

/// How a surface reflects light arriving from a single direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Constant color regardless of lighting geometry.
    SolidColor { color: Color },

    /// Ideal diffuse surface.
    Lambert {
        diffuse_color: Color,
        diffuse_reflectance: f32,
    },

    /// Diffuse base plus a Phong highlight.
    LambertPhong {
        diffuse_color: Color,
        diffuse_reflectance: f32,
        specular_reflectance: f32,
        phong_exponent: f32,
    },

    /// Microfacet model with GGX distribution, Schlick Fresnel and Smith
    /// geometry. Any non-zero `metalness` counts as a metal.
    CookTorrance {
        albedo: Color,
        metalness: f32,
        roughness: f32,
    },
}

impl Material {
    pub fn solid_color(color: Color) -> Self {
        Material::SolidColor { color }
    }

    pub fn lambert(diffuse_color: Color, diffuse_reflectance: f32) -> Self {
        Material::Lambert {
            diffuse_color,
            diffuse_reflectance,
        }
    }

    pub fn lambert_phong(
        diffuse_color: Color,
        diffuse_reflectance: f32,
        specular_reflectance: f32,
        phong_exponent: f32,
    ) -> Self {
        Material::LambertPhong {
            diffuse_color,
            diffuse_reflectance,
            specular_reflectance,
            phong_exponent,
        }
    }

    pub fn cook_torrance(albedo: Color, metalness: f32, roughness: f32) -> Self {
        Material::CookTorrance {
            albedo,
            metalness,
            roughness,
        }
    }

    /// Evaluate the BRDF at a hit point.
    ///
    /// `l` is the unit direction toward the light and `v` the unit direction
    /// toward the viewer.
    pub fn shade(&self, hit: &HitRecord, l: Vec3, v: Vec3) -> Color {
        let n = hit.normal;

        match *self {
            Material::SolidColor { color } => color,

            Material::Lambert {
                diffuse_color,
                diffuse_reflectance,
            } => brdf::lambert(diffuse_reflectance, diffuse_color),

            Material::LambertPhong {
                diffuse_color,
                diffuse_reflectance,
                specular_reflectance,
                phong_exponent,
            } => {
                brdf::lambert(diffuse_reflectance, diffuse_color)
                    + brdf::phong(specular_reflectance, phong_exponent, l, v, n)
            }

            Material::CookTorrance {
                albedo,
                metalness,
                roughness,
            } => {
                let dielectric = are_equal(metalness, 0.0);
                let f0 = if dielectric {
                    Color::splat(DIELECTRIC_F0)
                } else {
                    albedo
                };

                let h = (v + l).normalize_or_zero();
                let alpha = roughness * roughness;

                let f = brdf::fresnel_schlick(h, v, f0);
                let d = brdf::normal_distribution_ggx(n, h, alpha);
                let g = brdf::geometry_smith(n, v, l, alpha);

                let denominator = 4.0 * v.dot(n) * l.dot(n);
                let specular = if denominator > 0.0 {
                    f * (d * g / denominator)
                } else {
                    Color::ZERO
                };

                // Metals have no diffuse lobe
                let kd = if dielectric { Color::ONE - f } else { Color::ZERO };

                brdf::lambert_rgb(kd, albedo) + specular
            }
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::lambert(Color::ONE, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn hit_with_normal(normal: Vec3) -> HitRecord {
        HitRecord {
            did_hit: true,
            normal,
            ..Default::default()
        }
    }

    #[test]
    fn test_solid_color_ignores_geometry() {
        let red = Color::new(1.0, 0.0, 0.0);
        let m = Material::solid_color(red);
        let hit = hit_with_normal(Vec3::Y);
        assert_eq!(m.shade(&hit, Vec3::Y, Vec3::X), red);
        assert_eq!(m.shade(&hit, -Vec3::Y, Vec3::Z), red);
    }

    #[test]
    fn test_lambert_is_constant() {
        let m = Material::lambert(Color::new(0.5, 1.0, 0.0), 0.8);
        let hit = hit_with_normal(Vec3::Y);
        let c = m.shade(&hit, Vec3::Y, Vec3::Y);

        assert!((c.x - 0.4 / PI).abs() < 1e-6);
        assert!((c.y - 0.8 / PI).abs() < 1e-6);
        assert_eq!(c, m.shade(&hit, Vec3::X, Vec3::Z));
    }

    #[test]
    fn test_lambert_phong_highlight() {
        let m = Material::lambert_phong(Color::ONE, 1.0, 1.0, 20.0);
        let hit = hit_with_normal(Vec3::Y);
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mirror = Vec3::new(-1.0, 1.0, 0.0).normalize();

        let on_mirror = m.shade(&hit, l, mirror);
        let off_mirror = m.shade(&hit, l, Vec3::new(1.0, 0.2, 0.0).normalize());

        assert!((on_mirror.x - (1.0 / PI + 1.0)).abs() < 1e-4);
        assert!(off_mirror.x < on_mirror.x);
        assert!(off_mirror.x >= 1.0 / PI - 1e-6);
    }

    #[test]
    fn test_cook_torrance_dielectric_vs_metal() {
        let albedo = Color::new(0.9, 0.3, 0.1);
        let hit = hit_with_normal(Vec3::Y);
        let l = Vec3::new(0.3, 1.0, 0.0).normalize();
        let v = Vec3::new(-0.3, 1.0, 0.2).normalize();

        let plastic = Material::cook_torrance(albedo, 0.0, 0.5).shade(&hit, l, v);
        let metal = Material::cook_torrance(albedo, 1.0, 0.5).shade(&hit, l, v);

        assert!(plastic.is_finite() && metal.is_finite());
        assert!(plastic.min_element() > 0.0);
        // Metal specular is tinted by the albedo and has no diffuse lobe
        assert!(metal.x > metal.y && metal.y > metal.z);
        assert!(metal.x > plastic.x);
    }

    #[test]
    fn test_cook_torrance_below_horizon() {
        let m = Material::cook_torrance(Color::ONE, 1.0, 0.5);
        let hit = hit_with_normal(Vec3::Y);
        let c = m.shade(&hit, Vec3::new(1.0, -0.1, 0.0).normalize(), Vec3::Y);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_cook_torrance_no_specular_from_behind() {
        // Light and viewer both under the surface: the geometry term masks
        // the specular lobe, a metal goes black
        let hit = hit_with_normal(Vec3::Y);
        let l = Vec3::new(0.3, -1.0, 0.0).normalize();
        let v = Vec3::new(-0.3, -1.0, 0.0).normalize();

        let metal = Material::cook_torrance(Color::ONE, 1.0, 0.5).shade(&hit, l, v);
        assert_eq!(metal, Color::ZERO);

        let plastic = Material::cook_torrance(Color::ONE, 0.0, 0.5).shade(&hit, l, v);
        assert!(plastic.max_element() <= 1.0 / PI + 1e-6);
    }

    #[test]
    fn test_cook_torrance_smooth_surface_is_finite() {
        let m = Material::cook_torrance(Color::ONE, 0.0, 0.0);
        let hit = hit_with_normal(Vec3::Y);
        let c = m.shade(&hit, Vec3::Y, Vec3::Y);
        assert!(c.is_finite());
    }
}
