//! Camera for primary ray generation.
//!
//! The view basis follows the usual right-handed convention: `W` points from
//! the look-at point back towards the eye, `U = up × W` points right and
//! `V = W × U` points up. The image plane sits at `near` along `W`, where
//! `near` is negative, i.e. in front of the eye.

use prism_core::{CameraSpec, ImageBounds};
use prism_math::{Point3, Vector3};

use crate::renderer::{RenderError, RenderResult};
use crate::Ray;

/// `|unit(up) × W|` below this means `up` is (nearly) parallel to the view
/// direction and the basis is degenerate.
pub const DEGENERATE_BASIS_EPSILON: f64 = 1e-9;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Point3,
    look_at: Point3,
    up: Vector3,
    near: f64,
    bounds: ImageBounds,

    // Derived view basis
    u: Vector3,
    v: Vector3,
    w: Vector3,
}

impl Camera {
    /// Create a camera. `near` is stored as `−|near|`.
    pub fn new(eye: Point3, look_at: Point3, up: Vector3, near: f64, bounds: ImageBounds) -> Self {
        let w = Vector3::between(look_at, eye).unit();
        let right = up.unit().cross(w);
        let u = if right.magnitude() < DEGENERATE_BASIS_EPSILON {
            log::warn!("Camera up vector is parallel to the view direction; image will be empty");
            Vector3::ZERO
        } else {
            right.unit()
        };
        let v = w.cross(u).unit();

        Self {
            eye,
            look_at,
            up,
            near: -near.abs(),
            bounds,
            u,
            v,
            w,
        }
    }

    pub fn from_spec(spec: &CameraSpec) -> Self {
        Self::new(spec.eye, spec.look_at, spec.up, spec.near, spec.bounds)
    }

    pub fn eye(&self) -> Point3 {
        self.eye
    }

    pub fn look_at(&self) -> Point3 {
        self.look_at
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn bounds(&self) -> ImageBounds {
        self.bounds
    }

    /// The (U, V, W) view basis.
    pub fn basis(&self) -> (Vector3, Vector3, Vector3) {
        (self.u, self.v, self.w)
    }

    /// Bind the camera to an output resolution.
    ///
    /// Fails for a width or height of one pixel or less, where the pixel to
    /// image-plane mapping would divide by zero.
    pub fn viewport(&self, width: u32, height: u32) -> RenderResult<Viewport<'_>> {
        if width <= 1 || height <= 1 {
            return Err(RenderError::InvalidResolution { width, height });
        }
        Ok(Viewport {
            camera: self,
            width,
            height,
        })
    }
}

/// A camera paired with a validated resolution.
#[derive(Debug, Clone, Copy)]
pub struct Viewport<'a> {
    camera: &'a Camera,
    width: u32,
    height: u32,
}

impl<'a> Viewport<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Image-plane point for pixel (i, j). `j = 0` is the bottom row.
    pub fn pixel_point(&self, i: u32, j: u32) -> Point3 {
        let cam = self.camera;
        let b = cam.bounds;
        let x = i as f64 / (self.width - 1) as f64 * (b.right - b.left) + b.left;
        let y = j as f64 / (self.height - 1) as f64 * (b.top - b.bottom) + b.bottom;

        cam.eye + cam.w * cam.near + cam.u * x + cam.v * y
    }

    /// Primary ray through pixel (i, j): starts on the image plane and points
    /// away from the eye.
    pub fn ray(&self, i: u32, j: u32) -> Ray {
        let pixel = self.pixel_point(i, j);
        Ray::new(pixel, pixel - self.camera.eye)
    }
}
