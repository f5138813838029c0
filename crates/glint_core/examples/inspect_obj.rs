//! Example: Load and inspect an OBJ file.
//!
//! Run with: cargo run --example inspect_obj -- assets/bunny.obj

use std::env;

use glint_core::load_obj;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_obj <path-to-obj-file>");
        return;
    }

    let path = &args[1];
    println!("Loading OBJ file: {}", path);

    match load_obj(path) {
        Ok(mesh) => {
            println!("Vertices:  {}", mesh.vertex_count());
            println!("Triangles: {}", mesh.triangle_count());
            println!("Bounds:    {:?} .. {:?}", mesh.bounds().min, mesh.bounds().max);
            println!("Center:    {:?}", mesh.center());
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    }
}
