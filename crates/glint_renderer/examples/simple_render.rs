//! Simple direct-lighting example.
//!
//! Renders the reference scene once per lighting mode and saves each frame
//! in PPM format.

use glint_renderer::{scenes, FrameBuffer, LightingMode, RenderConfig, Renderer};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let mut scene = scenes::reference()?;
    println!("Scene built in {:?}", start.elapsed());

    let mut renderer = Renderer::new(RenderConfig {
        lighting_mode: LightingMode::ObservedArea,
        ..Default::default()
    });
    let mut frame = FrameBuffer::new(640, 480);

    for _ in LightingMode::ALL {
        let mode = renderer.lighting_mode();
        println!("Rendering {}x{} ({})...", frame.width(), frame.height(), mode);

        let start = std::time::Instant::now();
        renderer.render(&mut scene, &mut frame);
        println!("Rendered in {:?}", start.elapsed());

        let filename = format!("output_{}.ppm", mode);
        save_ppm(&frame, &filename)?;
        println!("Saved to {}", filename);

        renderer.cycle_lighting_mode();
    }

    Ok(())
}

fn save_ppm(frame: &FrameBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", frame.width(), frame.height())?;
    writeln!(writer, "255")?;

    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let [r, g, b] = frame.get(x, y);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}
