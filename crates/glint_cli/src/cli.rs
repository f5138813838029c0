//! Command-line arguments.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glint_renderer::LightingMode;

use crate::settings::{SceneKind, Settings};

/// Command line arguments. Every flag overrides the matching settings field.
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "CPU direct-lighting ray tracer")]
pub struct Args {
    /// JSON settings file; flags given on the command line take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, help = "Scene to render")]
    pub scene: Option<SceneKind>,

    #[arg(long, help = "OBJ file to show in the mesh scene (implies --scene mesh)")]
    pub obj: Option<PathBuf>,

    #[arg(long, help = "Image width in pixels")]
    pub width: Option<u32>,

    #[arg(long, help = "Image height in pixels")]
    pub height: Option<u32>,

    #[arg(short, long, help = "Lighting mode: observed-area, radiance, brdf or combined")]
    pub mode: Option<LightingMode>,

    #[arg(long, help = "Disable shadow rays")]
    pub no_shadows: bool,

    #[arg(short, long, help = "Number of frames to render (for timing)")]
    pub frames: Option<u32>,

    #[arg(long, help = "Save one image per lighting mode")]
    pub all_modes: bool,

    #[arg(short, long, help = "Output image path (.png or .bmp)")]
    pub output: Option<PathBuf>,
}

impl Args {
    /// Settings file (or defaults) with the command-line overrides applied.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        self.apply(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    fn apply(&self, settings: &mut Settings) {
        if let Some(scene) = self.scene {
            settings.scene = scene;
        }
        if let Some(obj) = &self.obj {
            settings.obj = Some(obj.clone());
            settings.scene = SceneKind::Mesh;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(mode) = self.mode {
            settings.render.lighting_mode = mode;
        }
        if self.no_shadows {
            settings.render.shadows_enabled = false;
        }
        if let Some(frames) = self.frames {
            settings.frames = frames;
        }
        if self.all_modes {
            settings.all_modes = true;
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_gives_defaults() {
        let args = Args::parse_from(["glint"]);
        assert_eq!(args.resolve().unwrap(), Settings::default());
    }

    #[test]
    fn test_flags_override() {
        let args = Args::parse_from([
            "glint",
            "--scene",
            "unit-sphere",
            "--width",
            "100",
            "--height",
            "50",
            "--mode",
            "observed-area",
            "--no-shadows",
            "--frames",
            "5",
            "--output",
            "out.bmp",
        ]);
        let settings = args.resolve().unwrap();

        assert_eq!(settings.scene, SceneKind::UnitSphere);
        assert_eq!((settings.width, settings.height), (100, 50));
        assert_eq!(settings.render.lighting_mode, LightingMode::ObservedArea);
        assert!(!settings.render.shadows_enabled);
        assert_eq!(settings.frames, 5);
        assert_eq!(settings.output, PathBuf::from("out.bmp"));
        assert!(!settings.all_modes);
    }

    #[test]
    fn test_obj_selects_mesh_scene() {
        let args = Args::parse_from(["glint", "--scene", "spheres", "--obj", "bunny.obj"]);
        let settings = args.resolve().unwrap();
        assert_eq!(settings.scene, SceneKind::Mesh);
        assert_eq!(settings.obj, Some(PathBuf::from("bunny.obj")));
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join("glint_cli_override.json");
        std::fs::write(&path, r#"{ "width": 300, "height": 200, "frames": 4 }"#).unwrap();

        let args = Args::parse_from([
            "glint",
            "--config",
            path.to_str().unwrap(),
            "--width",
            "64",
        ]);
        let settings = args.resolve().unwrap();
        assert_eq!(settings.width, 64);
        assert_eq!(settings.height, 200);
        assert_eq!(settings.frames, 4);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Args::try_parse_from(["glint", "--mode", "phong"]).is_err());
        assert!(Args::try_parse_from(["glint", "--scene", "cornell"]).is_err());
        assert!(Args::parse_from(["glint", "--width", "0"]).resolve().is_err());
    }
}
