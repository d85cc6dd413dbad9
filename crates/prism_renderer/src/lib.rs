//! Prism Renderer - recursive Whitted-style ray casting.
//!
//! One primary ray per pixel, Phong shading with hard shadows from point
//! lights, and recursive mirror reflection up to a fixed depth. Every ray is
//! tested against every primitive.

mod bucket;
mod camera;
mod heatmap;
mod hittable;
mod output;
mod ray;
mod renderer;
mod scene;
mod shader;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, Viewport};
pub use heatmap::{heat_color, render_depth, DepthMap};
pub use hittable::{Hit, HitRecord, Hittable, Primitive, MIN_HIT_DISTANCE};
pub use output::{save_image, write_ppm};
pub use ray::Ray;
pub use renderer::{
    color_to_rgb, render, render_pixel, render_sequential, ImageBuffer, RenderConfig, RenderError,
    RenderResult,
};
pub use scene::Scene;
pub use shader::shade;
pub use sphere::Sphere;
pub use triangle::{Barycentric, Triangle, PARALLEL_EPSILON};

/// Re-export colour and geometry types
pub use prism_core::{Color, Material};
pub use prism_math::{Point3, Vector3};
