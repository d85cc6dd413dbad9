//! Example: Load and inspect a driver file and the models it places.
//!
//! Run with: cargo run --example load_driver -- scenes/driver00.txt

use std::env;

use prism_core::{load_driver, load_models};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_driver <path-to-driver-file>");
        println!("\nExamples:");
        println!("  cargo run --example load_driver -- scenes/driver00.txt");
        println!("  cargo run --example load_driver -- scenes/driver01.txt");
        return;
    }

    let path = &args[1];
    println!("Loading driver file: {}", path);

    let description = match load_driver(path) {
        Ok(description) => description,
        Err(e) => {
            eprintln!("Error loading driver file: {}", e);
            return;
        }
    };

    let camera = &description.camera;
    println!("\n=== Camera ===");
    println!(
        "  Eye: ({:.2}, {:.2}, {:.2})  Look: ({:.2}, {:.2}, {:.2})  Near: {:.2}",
        camera.eye.x(),
        camera.eye.y(),
        camera.eye.z(),
        camera.look_at.x(),
        camera.look_at.y(),
        camera.look_at.z(),
        camera.near
    );
    println!(
        "  Bounds: left {:.2} right {:.2} bottom {:.2} top {:.2}",
        camera.bounds.left, camera.bounds.right, camera.bounds.bottom, camera.bounds.top
    );
    println!(
        "  Resolution: {}x{}, recursion depth {}",
        description.width, description.height, description.recursion_depth
    );

    println!("\n--- Lights ---");
    if let Some(ambient) = &description.ambient {
        println!("  ambient {:?}", ambient.color);
    }
    for (i, light) in description.lights.iter().enumerate() {
        println!("  [{}] {:?} at {:?}", i, light.color, light.position);
    }

    println!("\n--- Spheres ---");
    for (i, sphere) in description.spheres.iter().enumerate() {
        println!(
            "  [{}] center ({:.2}, {:.2}, {:.2}) radius {:.2}",
            i,
            sphere.center.x(),
            sphere.center.y(),
            sphere.center.z(),
            sphere.radius
        );
    }

    println!("\n--- Models ---");
    match load_models(&description.models) {
        Ok(meshes) => {
            for (model, mesh) in description.models.iter().zip(&meshes) {
                println!(
                    "  {} - {} vertices, {} triangles, {} materials (theta {:.1}, scale {:.2})",
                    model.path.display(),
                    mesh.vertex_count(),
                    mesh.triangle_count(),
                    mesh.materials.len(),
                    model.placement.theta_degrees,
                    model.placement.scale
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading models: {}", e);
        }
    }
}
