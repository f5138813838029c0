//! BRDF building blocks.
//!
//! Plain functions over pre-normalized vectors. `l` points from the surface
//! toward the light, `v` from the surface toward the viewer, `n` is the
//! surface normal.

use crate::material::Color;
use glint_math::Vec3;
use std::f32::consts::PI;

/// Lambertian diffuse with a scalar reflectance: `cd * kd / π`.
#[inline]
pub fn lambert(kd: f32, cd: Color) -> Color {
    cd * kd / PI
}

/// Lambertian diffuse with a per-channel reflectance.
#[inline]
pub fn lambert_rgb(kd: Color, cd: Color) -> Color {
    cd * kd / PI
}

/// Phong specular lobe, broadcast to all channels.
///
/// `r = l - 2(n·l)n` is the mirrored light direction with its sign flipped,
/// so `r·(-v)` is the cosine between the true mirror direction and `v`.
#[inline]
pub fn phong(ks: f32, exponent: f32, l: Vec3, v: Vec3, n: Vec3) -> Color {
    let r = l - 2.0 * n.dot(l) * n;
    let cos_alpha = r.dot(-v).max(0.0);
    Vec3::splat(ks * cos_alpha.powf(exponent))
}

/// Schlick's approximation of the Fresnel term.
///
/// Unlike the textbook `f0 + (1 - f0)(1 - h·v)^5`, `h·v` is clamped to zero
/// first, so a half vector facing away from `v` gives the grazing value
/// (white) instead of overshooting past one.
#[inline]
pub fn fresnel_schlick(h: Vec3, v: Vec3, f0: Color) -> Color {
    let cos_theta = h.dot(v).max(0.0);
    f0 + (Vec3::ONE - f0) * (1.0 - cos_theta).powi(5)
}

/// Trowbridge-Reitz GGX normal distribution.
///
/// `alpha` is the remapped roughness (`roughness²`); the lobe itself uses
/// `alpha²`. A perfectly smooth surface (`alpha == 0`) yields zero
/// everywhere instead of a singular spike.
#[inline]
pub fn normal_distribution_ggx(n: Vec3, h: Vec3, alpha: f32) -> f32 {
    let a2 = alpha * alpha;
    let n_dot_h = n.dot(h);
    let d = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    let denominator = PI * d * d;
    if denominator <= f32::EPSILON {
        return 0.0;
    }
    a2 / denominator
}

/// Schlick-GGX geometry term for a single direction `x` (view or light).
///
/// Differs from the unclamped `(n·x) / ((n·x)(1 - k) + k)`: `n·x` is clamped
/// to zero, so a direction below the surface is fully masked and the whole
/// Cook-Torrance specular term vanishes for a viewer behind the surface.
#[inline]
pub fn geometry_schlick_ggx(n: Vec3, x: Vec3, k: f32) -> f32 {
    let n_dot_x = n.dot(x).max(0.0);
    let denominator = n_dot_x * (1.0 - k) + k;
    if denominator <= 0.0 {
        return 0.0;
    }
    n_dot_x / denominator
}

/// Smith's method: masking times shadowing, with `k = (alpha + 1)² / 8`.
#[inline]
pub fn geometry_smith(n: Vec3, v: Vec3, l: Vec3, alpha: f32) -> f32 {
    let k = (alpha + 1.0) * (alpha + 1.0) / 8.0;
    geometry_schlick_ggx(n, v, k) * geometry_schlick_ggx(n, l, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_lambert() {
        let c = lambert(1.0, Vec3::ONE);
        assert!(close(c.x, 1.0 / PI));
        assert!(close(c.z, 1.0 / PI));

        let c = lambert_rgb(Vec3::new(1.0, 0.5, 0.0), Vec3::splat(2.0));
        assert!(close(c.x, 2.0 / PI));
        assert!(close(c.y, 1.0 / PI));
        assert_eq!(c.z, 0.0);
    }

    #[test]
    fn test_phong_peaks_on_mirror_direction() {
        let n = Vec3::Y;
        let l = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mirror = Vec3::new(-1.0, 1.0, 0.0).normalize();

        let peak = phong(0.5, 10.0, l, mirror, n);
        assert!(close(peak.x, 0.5));
        assert_eq!(peak.x, peak.y);
        assert_eq!(peak.y, peak.z);

        // Viewer on the light's side sees a much dimmer lobe
        let off = phong(0.5, 10.0, l, Vec3::Y, n);
        assert!(off.x < peak.x);
        assert!(off.x > 0.0);

        let behind = phong(0.5, 10.0, l, l, n);
        assert_eq!(behind, Vec3::ZERO);
    }

    #[test]
    fn test_fresnel_at_normal_incidence() {
        let f0 = Vec3::new(0.04, 0.5, 0.9);
        assert!((fresnel_schlick(Vec3::Y, Vec3::Y, f0) - f0).length() < 1e-6);

        // Grazing angles go to white
        let grazing = fresnel_schlick(Vec3::Y, Vec3::X, f0);
        assert!((grazing - Vec3::ONE).length() < 1e-6);

        // h.v < 0 is clamped to the grazing value, never above one
        let opposed = fresnel_schlick(Vec3::Y, -Vec3::Y, f0);
        assert!((opposed - Vec3::ONE).length() < 1e-6);
    }

    #[test]
    fn test_ggx_at_half_vector_equal_to_normal() {
        let alpha = 0.25;
        let d = normal_distribution_ggx(Vec3::Y, Vec3::Y, alpha);
        // a² / (π (a²)²) = 1 / (π a²)
        assert!(close(d, 1.0 / (PI * alpha * alpha)));

        assert_eq!(normal_distribution_ggx(Vec3::Y, Vec3::Y, 0.0), 0.0);
    }

    #[test]
    fn test_geometry_terms() {
        assert!(close(geometry_schlick_ggx(Vec3::Y, Vec3::Y, 0.3), 1.0));
        assert_eq!(geometry_schlick_ggx(Vec3::Y, -Vec3::Y, 0.3), 0.0);
        // Unclamped this would be (-0.5) / (-0.5 * 0.7 + 0.3) = 10
        let below = Vec3::new(0.0, -0.5, 0.75_f32.sqrt());
        assert_eq!(geometry_schlick_ggx(Vec3::Y, below, 0.3), 0.0);

        let g = geometry_smith(Vec3::Y, Vec3::Y, Vec3::Y, 0.5);
        assert!(close(g, 1.0));

        let tilted = Vec3::new(1.0, 1.0, 0.0).normalize();
        let g = geometry_smith(Vec3::Y, tilted, tilted, 0.5);
        assert!(g > 0.0 && g < 1.0);
    }
}
