//! Core ray casting renderer.
//!
//! Casts one primary ray per pixel (no anti-aliasing), shades it with
//! [`shade`] and stores the unclamped colour in an [`ImageBuffer`].

use std::time::Instant;

use prism_core::Color;
use prism_math::Interval;
use thiserror::Error;

use crate::bucket::{render_buckets, DEFAULT_BUCKET_SIZE};
use crate::camera::Viewport;
use crate::shader::shade;
use crate::Scene;

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}: both dimensions must be greater than 1")]
    InvalidResolution { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
///
/// The reflection depth is part of the [`Scene`], not of this config.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Multiply reflected colour by the material's Kr
    pub attenuate_reflections: bool,
    /// Bucket edge length in pixels for parallel rendering
    pub bucket_size: u32,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            attenuate_reflections: false,
            bucket_size: DEFAULT_BUCKET_SIZE,
            parallel: true,
        }
    }
}

/// Convert a colour to 8-bit RGB: clamp to [0, 1], scale to 0-255, round.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f64| (255.0 * Interval::UNIT.clamp(c)).round() as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Render a single pixel. `(x, y)` are image coordinates with row 0 at the
/// top; the camera counts rows from the bottom.
pub fn render_pixel(
    scene: &Scene,
    viewport: &Viewport<'_>,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let j = viewport.height() - 1 - y;
    let ray = viewport.ray(x, j);
    shade(scene, &ray, scene.recursion_depth, config)
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to packed RGB bytes, row 0 first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the scene one pixel at a time on the calling thread.
pub fn render_sequential(scene: &Scene, viewport: &Viewport<'_>, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(viewport.width(), viewport.height());

    for y in 0..viewport.height() {
        for x in 0..viewport.width() {
            let color = render_pixel(scene, viewport, x, y, config);
            image.set(x, y, color);
        }
    }

    image
}

/// Render the entire scene to an image buffer.
///
/// Fails before casting any ray if the resolution is 1 pixel or less in
/// either dimension.
pub fn render(scene: &Scene, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    let viewport = scene.camera.viewport(scene.width, scene.height)?;

    log::info!(
        "Rendering {}x{}: {} triangles, {} spheres, {} lights, depth {}{}",
        scene.width,
        scene.height,
        scene.triangles().len(),
        scene.spheres().len(),
        scene.lights().len(),
        scene.recursion_depth,
        if config.parallel { "" } else { " (sequential)" }
    );

    let start = Instant::now();
    let image = if config.parallel {
        render_buckets(scene, &viewport, config)
    } else {
        render_sequential(scene, &viewport, config)
    };
    log::info!("Rendered in {:.2?}", start.elapsed());

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use prism_core::{ImageBounds, Material};
    use prism_math::{Point3, Vector3};

    use crate::{Camera, Sphere};

    fn red_sphere_scene(light: Point3) -> Scene {
        let camera = Camera::new(
            Point3::ORIGIN,
            Point3::new(0.0, 0.0, -1.0),
            Vector3::Y,
            1.0,
            ImageBounds::new(-1.0, 1.0, -1.0, 1.0),
        );
        let material = Material::new(
            "red",
            Color::new(1.0, 0.0, 0.0),
            Color::new(1.0, 0.0, 0.0),
            Color::ZERO,
            16.0,
        );
        let mut scene = Scene::new(camera, 50, 50);
        scene.add_sphere(Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0, Arc::new(material)));
        scene.add_light(light, Color::ONE);
        scene.set_ambient(Color::splat(0.1));
        scene
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(2.0, -1.0, 0.5)), [255, 0, 128]);
    }

    #[test]
    fn test_image_buffer() {
        let mut image = ImageBuffer::new(4, 3);
        assert_eq!(image.pixels.len(), 12);
        image.set(3, 2, Color::ONE);
        assert_eq!(image.get(3, 2), Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);

        let bytes = image.to_rgb8();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[33..], &[255, 255, 255]);
    }

    #[test]
    fn test_render_red_sphere() {
        let scene = red_sphere_scene(Point3::new(0.0, 5.0, -5.0));
        let config = RenderConfig {
            parallel: false,
            ..RenderConfig::default()
        };
        let image = render(&scene, &config).unwrap();

        let center = image.get(25, 25);
        assert!(center.length() > 0.0);
        assert!(center.x > center.y && center.x > center.z, "{:?}", center);

        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(image.get(49, 49), Color::ZERO);
    }

    #[test]
    fn test_render_light_behind_sphere() {
        let scene = red_sphere_scene(Point3::new(0.0, 0.0, -10.0));
        let config = RenderConfig {
            parallel: false,
            ..RenderConfig::default()
        };
        let image = render(&scene, &config).unwrap();

        let center = image.get(25, 25);
        assert!((center - Color::new(0.1, 0.0, 0.0)).length() < 1e-9, "{:?}", center);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scene = red_sphere_scene(Point3::new(0.0, 5.0, -5.0));
        let sequential = RenderConfig {
            parallel: false,
            ..RenderConfig::default()
        };
        let parallel = RenderConfig {
            bucket_size: 16,
            ..RenderConfig::default()
        };
        assert_eq!(
            render(&scene, &sequential).unwrap(),
            render(&scene, &parallel).unwrap()
        );
    }

    #[test]
    fn test_scene_depth_drives_reflections() {
        let camera = Camera::new(
            Point3::ORIGIN,
            Point3::new(0.0, 0.0, -1.0),
            Vector3::Y,
            1.0,
            ImageBounds::new(-1.0, 1.0, -1.0, 1.0),
        );
        let mirror = Material::new("mirror", Color::ZERO, Color::ZERO, Color::ZERO, 16.0);
        let glow = Material::new("glow", Color::ONE, Color::ZERO, Color::ZERO, 16.0);

        let mut scene = Scene::new(camera, 51, 51);
        scene.add_sphere(Sphere::new(Point3::new(0.0, 0.0, -5.0), 1.0, Arc::new(mirror)));
        scene.add_sphere(Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0, Arc::new(glow)));
        scene.set_ambient(Color::splat(0.25));

        let config = RenderConfig {
            parallel: false,
            ..RenderConfig::default()
        };
        let flat = render(&scene, &config).unwrap();
        assert_eq!(flat.get(25, 25), Color::ZERO);

        scene.recursion_depth = 1;
        let reflected = render(&scene, &config).unwrap();
        let center = reflected.get(25, 25);
        assert!((center - Color::splat(0.25)).length() < 1e-9, "{:?}", center);
    }

    #[test]
    fn test_invalid_resolution_rejected() {
        let mut scene = red_sphere_scene(Point3::new(0.0, 5.0, -5.0));
        scene.width = 1;
        assert!(matches!(
            render(&scene, &RenderConfig::default()),
            Err(RenderError::InvalidResolution { width: 1, height: 50 })
        ));
    }

    #[test]
    fn test_image_rows_top_down() {
        // Sphere above the view axis shows up in the top half of the image
        let camera = Camera::new(
            Point3::ORIGIN,
            Point3::new(0.0, 0.0, -1.0),
            Vector3::Y,
            1.0,
            ImageBounds::new(-1.0, 1.0, -1.0, 1.0),
        );
        let mut scene = Scene::new(camera, 20, 20);
        let material = Material::new("white", Color::ONE, Color::ZERO, Color::ZERO, 16.0);
        scene.add_sphere(Sphere::new(Point3::new(0.0, 3.0, -5.0), 1.5, Arc::new(material)));
        scene.set_ambient(Color::ONE);

        let image = render(&scene, &RenderConfig::default()).unwrap();
        assert_eq!(image.get(10, 3), Color::ONE);
        assert_eq!(image.get(10, 16), Color::ZERO);
    }
}
