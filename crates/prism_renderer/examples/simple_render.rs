//! Simple ray casting example.
//!
//! Renders a mirror sphere on a triangle floor lit by two point lights and
//! saves it in PPM format.

use std::sync::Arc;

use prism_core::{ImageBounds, Material};
use prism_renderer::{
    render, save_image, Camera, Color, Point3, RenderConfig, Scene, Sphere, Triangle, Vector3,
};

fn main() {
    env_logger::init();

    println!("Prism Ray Caster - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let mut scene = build_scene();
    scene.recursion_depth = 3;
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig::default();

    println!(
        "Rendering {}x{} @ depth {}...",
        scene.width, scene.height, scene.recursion_depth
    );

    let start = std::time::Instant::now();
    let image = match render(&scene, &config) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Render failed: {}", e);
            return;
        }
    };
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    match save_image(&image, filename) {
        Ok(()) => println!("Saved to {}", filename),
        Err(e) => eprintln!("Failed to save image: {}", e),
    }
}

fn build_scene() -> Scene {
    let camera = Camera::new(
        Point3::new(0.0, 1.0, 6.0),
        Point3::new(0.0, 0.5, 0.0),
        Vector3::Y,
        2.0,
        ImageBounds::new(-1.0, 1.0, -0.75, 0.75),
    );
    let mut scene = Scene::new(camera, 400, 300);

    // Floor: two triangles
    let floor = Arc::new(Material::new(
        "floor",
        Color::splat(0.2),
        Color::new(0.6, 0.6, 0.5),
        Color::ZERO,
        16.0,
    ));
    let corners = [
        Point3::new(-5.0, 0.0, -5.0),
        Point3::new(5.0, 0.0, -5.0),
        Point3::new(5.0, 0.0, 5.0),
        Point3::new(-5.0, 0.0, 5.0),
    ];
    scene.add_triangle(Triangle::new(corners[0], corners[1], corners[2], floor.clone()));
    scene.add_triangle(Triangle::new(corners[0], corners[2], corners[3], floor));

    // Mirror sphere
    scene.add_sphere(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(
            Material::new(
                "mirror",
                Color::splat(0.1),
                Color::splat(0.2),
                Color::splat(0.8),
                64.0,
            )
            .with_reflectance(Color::splat(0.8)),
        ),
    ));

    // Matte red sphere
    scene.add_sphere(Sphere::new(
        Point3::new(-2.2, 0.6, 0.8),
        0.6,
        Arc::new(Material::new(
            "red",
            Color::new(0.2, 0.0, 0.0),
            Color::new(0.8, 0.1, 0.1),
            Color::splat(0.3),
            16.0,
        )),
    ));

    scene.set_ambient(Color::splat(0.2));
    scene.add_light(Point3::new(4.0, 6.0, 4.0), Color::splat(0.7));
    scene.add_light(Point3::new(-4.0, 5.0, 2.0), Color::splat(0.4));

    println!("Created {} primitives", scene.primitive_count());
    scene
}
