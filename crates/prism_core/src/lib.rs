//! Prism Core - scene description and mesh I/O for the Prism ray caster.
//!
//! This crate provides:
//!
//! - **Scene types**: `SceneDescription`, `Material`, `Light`, `CameraSpec`
//! - **Driver files**: line-oriented scene description parsing
//! - **Meshes**: OBJ/MTL loading and writing, model placement into world space
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{load_driver, load_models};
//!
//! let description = load_driver("scenes/driver00.txt")?;
//! let meshes = load_models(&description.models)?;
//! println!("{} meshes, {} spheres", meshes.len(), description.spheres.len());
//! ```

pub mod driver;
pub mod mesh;
pub mod obj;
pub mod placement;
pub mod scene;

// Re-export commonly used types
pub use driver::{load_driver, parse_driver, DriverError, DriverResult};
pub use mesh::{Mesh, MeshFace};
pub use obj::{load_obj, write_obj, ObjError, ObjResult};
pub use placement::{export_models, load_models, ExportNamer, LoadError, LoadResult, ModelPlacement};
pub use scene::{
    CameraSpec, Color, ImageBounds, Light, Material, SceneDescription, SphereSpec, DEFAULT_PHONG,
};
