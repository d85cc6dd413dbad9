//! Scene description types for Prism.
//!
//! These are the renderer-agnostic values produced by the driver-file parser:
//! materials, lights, the camera setup, spheres and model placements.

use std::path::Path;

use prism_math::{DVec3, Point3, Vector3};

use crate::placement::ModelPlacement;

/// RGB colour or reflectance triple. Components are nominally in [0, 1]
/// but are never clamped before the image is written.
pub type Color = DVec3;

/// Phong exponent used when a material does not specify one.
pub const DEFAULT_PHONG: f64 = 16.0;

/// A Phong surface description.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (from the MTL file, or generated)
    pub name: String,

    /// Ambient reflectance (Ka)
    pub ambient: Color,

    /// Diffuse reflectance (Kd)
    pub diffuse: Color,

    /// Specular reflectance (Ks)
    pub specular: Color,

    /// Phong exponent (Ns)
    pub phong: f64,

    /// Reflective attenuation (Kr), if the material carries one
    pub reflectance: Option<Color>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            ambient: Color::splat(0.2),
            diffuse: Color::splat(0.8), // Grey default
            specular: Color::ZERO,
            phong: DEFAULT_PHONG,
            reflectance: None,
        }
    }
}

impl Material {
    /// Create a named material from its three reflectances and exponent.
    pub fn new(
        name: impl Into<String>,
        ambient: Color,
        diffuse: Color,
        specular: Color,
        phong: f64,
    ) -> Self {
        Self {
            name: name.into(),
            ambient,
            diffuse,
            specular,
            phong,
            reflectance: None,
        }
    }

    /// Set the reflective attenuation.
    pub fn with_reflectance(mut self, reflectance: Color) -> Self {
        self.reflectance = Some(reflectance);
        self
    }
}

/// A light source.
///
/// Point lights have a position. The ambient light has none and only
/// contributes the flat ambient term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// RGB brightness
    pub color: Color,

    /// World position (None for ambient light)
    pub position: Option<Point3>,
}

impl Light {
    /// A point light at `position`.
    pub fn point(color: Color, position: Point3) -> Self {
        Self {
            color,
            position: Some(position),
        }
    }

    /// The position-less ambient light.
    pub fn ambient(color: Color) -> Self {
        Self {
            color,
            position: None,
        }
    }

    pub fn is_ambient(&self) -> bool {
        self.position.is_none()
    }
}

/// Image-plane extents in view space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl ImageBounds {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }
}

/// Camera parameters as written in the driver file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSpec {
    pub eye: Point3,
    pub look_at: Point3,
    pub up: Vector3,
    /// Distance from the eye to the image plane, always stored negative
    pub near: f64,
    pub bounds: ImageBounds,
}

impl CameraSpec {
    pub fn new(eye: Point3, look_at: Point3, up: Vector3, near: f64, bounds: ImageBounds) -> Self {
        Self {
            eye,
            look_at,
            up,
            near: -near.abs(),
            bounds,
        }
    }
}

/// A sphere as described in the driver file.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereSpec {
    pub center: Point3,
    pub radius: f64,
    pub material: Material,
}

/// Everything the driver file says about a render.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDescription {
    pub camera: CameraSpec,

    /// Output resolution in pixels
    pub width: u32,
    pub height: u32,

    /// Reflection bounces for primary rays
    pub recursion_depth: u32,

    /// Ambient light, if any
    pub ambient: Option<Light>,

    /// Point lights
    pub lights: Vec<Light>,

    pub spheres: Vec<SphereSpec>,

    pub models: Vec<ModelPlacement>,
}

impl SceneDescription {
    /// Resolve relative model paths against `base_dir`.
    pub fn resolve_model_paths(&mut self, base_dir: &Path) {
        for model in &mut self.models {
            if model.path.is_relative() {
                model.path = base_dir.join(&model.path);
            }
        }
    }
}
