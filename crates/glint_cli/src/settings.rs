//! Render settings loaded from JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glint_renderer::RenderConfig;
use serde::{Deserialize, Serialize};

/// Built-in scenes selectable from the command line or settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    Spheres,
    #[default]
    Reference,
    Mesh,
    UnitSphere,
}

/// Everything a render run needs. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub scene: SceneKind,
    /// OBJ file for the mesh scene; a built-in icosahedron when absent
    pub obj: Option<PathBuf>,
    /// Output image, format chosen by extension
    pub output: PathBuf,
    /// Frames to render (the last one is saved)
    pub frames: u32,
    /// Render and save one image per lighting mode
    pub all_modes: bool,
    pub render: RenderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            scene: SceneKind::default(),
            obj: None,
            output: PathBuf::from("render.png"),
            frames: 1,
            all_modes: false,
            render: RenderConfig::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("Image size must be non-zero, got {}x{}", self.width, self.height);
        }
        if self.frames == 0 {
            bail!("Frame count must be at least 1");
        }
        if self.render.shadow_bias < 0.0 {
            bail!("Shadow bias must not be negative, got {}", self.render.shadow_bias);
        }
        Ok(())
    }
}
