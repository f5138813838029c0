use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{scenes, FrameBuffer, LightingMode, Renderer, Scene};

mod cli;
mod settings;

use cli::Args;
use settings::{SceneKind, Settings};

fn build_scene(settings: &Settings) -> Result<Scene> {
    let scene = match settings.scene {
        SceneKind::Spheres => scenes::spheres(),
        SceneKind::Reference => scenes::reference()?,
        SceneKind::UnitSphere => scenes::unit_sphere(),
        SceneKind::Mesh => {
            let model = match &settings.obj {
                Some(path) => glint_core::load_obj(path)
                    .with_context(|| format!("Failed to load mesh {}", path.display()))?,
                None => scenes::icosahedron()?,
            };
            scenes::mesh(model)
        }
    };
    Ok(scene)
}

/// Render `frames` frames into `frame`, logging per-frame time and average FPS.
fn render_frames(renderer: &Renderer, scene: &mut Scene, frame: &mut FrameBuffer, frames: u32) {
    let start = Instant::now();

    for i in 0..frames {
        let frame_start = Instant::now();
        renderer.render(scene, frame);
        log::info!(
            "Frame {}/{} ({}): {:.2}ms",
            i + 1,
            frames,
            renderer.lighting_mode(),
            frame_start.elapsed().as_secs_f64() * 1000.0
        );
    }

    let total = start.elapsed().as_secs_f64();
    if total > 0.0 {
        log::info!("Average: {:.1} FPS over {} frame(s)", frames as f64 / total, frames);
    }
}

fn save_image(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let image = image::RgbImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
        .context("Framebuffer size does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to save image to {}", path.display()))?;
    log::info!("Saved {}", path.display());
    Ok(())
}

/// `render.png` -> `render_brdf.png`
fn path_for_mode(path: &Path, mode: LightingMode) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("render");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, mode, ext),
        None => format!("{}_{}", stem, mode),
    };
    path.with_file_name(name)
}

fn run(settings: &Settings) -> Result<()> {
    let mut scene = build_scene(settings)?;
    let mut renderer = Renderer::new(settings.render);
    let mut frame = FrameBuffer::new(settings.width, settings.height);

    log::info!(
        "Rendering {:?} at {}x{}, shadows {}",
        settings.scene,
        settings.width,
        settings.height,
        if renderer.shadows_enabled() { "on" } else { "off" }
    );

    if settings.all_modes {
        for _ in LightingMode::ALL {
            render_frames(&renderer, &mut scene, &mut frame, settings.frames);
            save_image(&frame, &path_for_mode(&settings.output, renderer.lighting_mode()))?;
            renderer.cycle_lighting_mode();
        }
    } else {
        render_frames(&renderer, &mut scene, &mut frame, settings.frames);
        save_image(&frame, &settings.output)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Glint");

    let args = Args::parse();
    let settings = args.resolve()?;
    run(&settings)
}
