//! Direct-lighting renderer.
//!
//! One primary ray per pixel, one shadow ray per light, no recursion.
//! Rows of the framebuffer are shaded in parallel with rayon; the scene is
//! only read during the parallel pass.

use crate::hittable::HitRecord;
use crate::light::{Light, LightKind};
use crate::material::Color;
use crate::scene::Scene;
use glint_math::{Interval, Mat4, Ray};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Which term of the lighting equation ends up in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LightingMode {
    /// Cosine between normal and light direction
    ObservedArea,
    /// Incident radiance only
    Radiance,
    /// Material response only
    Brdf,
    /// radiance x BRDF x observed area
    #[default]
    Combined,
}

impl LightingMode {
    /// Every mode, in cycling order.
    pub const ALL: [LightingMode; 4] = [
        LightingMode::ObservedArea,
        LightingMode::Radiance,
        LightingMode::Brdf,
        LightingMode::Combined,
    ];

    /// The mode after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            LightingMode::ObservedArea => LightingMode::Radiance,
            LightingMode::Radiance => LightingMode::Brdf,
            LightingMode::Brdf => LightingMode::Combined,
            LightingMode::Combined => LightingMode::ObservedArea,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LightingMode::ObservedArea => "observed-area",
            LightingMode::Radiance => "radiance",
            LightingMode::Brdf => "brdf",
            LightingMode::Combined => "combined",
        }
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LightingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LightingMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown lighting mode '{}', expected one of: observed-area, radiance, brdf, combined",
                    s
                )
            })
    }
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub lighting_mode: LightingMode,
    /// Cast shadow rays toward each light
    pub shadows_enabled: bool,
    /// Offset along the normal for shadow ray origins
    pub shadow_bias: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            lighting_mode: LightingMode::Combined,
            shadows_enabled: true,
            shadow_bias: 0.001,
        }
    }
}

/// RGB8 image, row-major with the origin at the top-left pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl FrameBuffer {
    /// Create a new black framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Row-major offset of (x, y). Computed in `usize`: `y * width` exceeds
    /// `u32` for images above four gigapixels.
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Tightly packed RGB bytes, ready for image encoders.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Scale a color down so its largest channel is at most one.
#[inline]
pub fn max_to_one(color: Color) -> Color {
    let max = color.max_element();
    if max > 1.0 {
        color / max
    } else {
        color
    }
}

/// Convert a color with channels in [0, 1] to bytes (truncating).
#[inline]
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    // `as` saturates, so stray negatives land on 0
    [
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    ]
}

/// Renders scenes into framebuffers.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn lighting_mode(&self) -> LightingMode {
        self.config.lighting_mode
    }

    pub fn shadows_enabled(&self) -> bool {
        self.config.shadows_enabled
    }

    /// Advance to the next lighting mode and return it.
    pub fn cycle_lighting_mode(&mut self) -> LightingMode {
        self.config.lighting_mode = self.config.lighting_mode.next();
        log::info!("Lighting mode: {}", self.config.lighting_mode);
        self.config.lighting_mode
    }

    /// Flip shadows on or off and return the new state.
    pub fn toggle_shadows(&mut self) -> bool {
        self.config.shadows_enabled = !self.config.shadows_enabled;
        log::info!(
            "Shadows {}",
            if self.config.shadows_enabled { "on" } else { "off" }
        );
        self.config.shadows_enabled
    }

    /// Render one frame.
    ///
    /// The camera basis and the scene BVH are brought up to date first; after
    /// that the scene is shared read-only between the rayon workers, each
    /// filling whole rows.
    pub fn render(&self, scene: &mut Scene, frame: &mut FrameBuffer) {
        let (width, height) = (frame.width, frame.height);
        if width == 0 || height == 0 {
            return;
        }

        let start = Instant::now();
        let view_to_world = scene.camera_mut().compute_view_to_world();
        let scene = &*scene;
        scene.bvh();

        frame
            .pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(py, row)| {
                for (px, pixel) in row.iter_mut().enumerate() {
                    let color =
                        self.render_pixel(scene, &view_to_world, px as u32, py as u32, width, height);
                    *pixel = color_to_rgb8(max_to_one(color));
                }
            });

        log::debug!(
            "Rendered {}x{} ({}) in {:.2}ms",
            width,
            height,
            self.config.lighting_mode,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    fn render_pixel(
        &self,
        scene: &Scene,
        view_to_world: &Mat4,
        px: u32,
        py: u32,
        width: u32,
        height: u32,
    ) -> Color {
        let ray = scene.camera().primary_ray(view_to_world, px, py, width, height);
        let hit = scene.closest_hit(&ray);
        if !hit.did_hit {
            return Color::ZERO;
        }

        scene
            .lights()
            .iter()
            .map(|light| self.light_contribution(scene, &ray, &hit, light))
            .sum()
    }

    /// What a single light adds to a hit point under the current mode.
    fn light_contribution(&self, scene: &Scene, ray: &Ray, hit: &HitRecord, light: &Light) -> Color {
        let to_light = light.direction_to_light(hit.point);
        let Some(l) = to_light.try_normalize() else {
            return Color::ZERO;
        };

        let observed_area = hit.normal.dot(l);
        if observed_area <= 0.0 {
            return Color::ZERO;
        }

        if self.config.shadows_enabled {
            let max = match light.kind {
                LightKind::Point => to_light.length(),
                LightKind::Directional => f32::MAX,
            };
            let shadow_ray = Ray::new(hit.point + hit.normal * self.config.shadow_bias, l);
            if scene.does_hit(&shadow_ray, Interval::new(Ray::T_MIN, max)) {
                return Color::ZERO;
            }
        }

        match self.config.lighting_mode {
            LightingMode::ObservedArea => Color::splat(observed_area),
            LightingMode::Radiance => light.radiance(hit.point),
            LightingMode::Brdf => scene.material(hit.material_index).shade(hit, l, -ray.direction),
            LightingMode::Combined => {
                let brdf = scene.material(hit.material_index).shade(hit, l, -ray.direction);
                light.radiance(hit.point) * brdf * observed_area
            }
        }
    }
}
