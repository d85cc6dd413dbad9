//! Model placement: loading OBJ models and moving them into world space.
//!
//! Each `model` line of a driver file becomes a [`ModelPlacement`]. Loading
//! reads the OBJ once per distinct path and applies the placement's
//! `T · S · R` matrix to a copy of the vertices for every instance.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use prism_math::Placement;
use thiserror::Error;

use crate::mesh::Mesh;
use crate::obj::{self, ObjError};

/// Errors that can occur while loading or exporting placed models.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load model {}: {source}", path.display())]
    Model {
        path: PathBuf,
        #[source]
        source: ObjError,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for placement operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// One `model` line: which OBJ file to load and where to put it.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelPlacement {
    /// Path to the OBJ file
    pub path: PathBuf,

    /// Rotation, scale and translation into world space
    pub placement: Placement,
}

impl ModelPlacement {
    pub fn new(path: impl Into<PathBuf>, placement: Placement) -> Self {
        Self {
            path: path.into(),
            placement,
        }
    }

    /// Model name: the file stem of the OBJ path.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("model"))
    }

    /// Move a model-space mesh into world space.
    pub fn apply(&self, mesh: &Mesh) -> Mesh {
        mesh.placed(&self.placement)
    }

    /// Load the OBJ file and place it.
    pub fn load(&self) -> LoadResult<Mesh> {
        let mesh = obj::load_obj(&self.path).map_err(|source| LoadError::Model {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.apply(&mesh))
    }
}

/// Load and place every model, reading each distinct OBJ file only once.
pub fn load_models(models: &[ModelPlacement]) -> LoadResult<Vec<Mesh>> {
    let mut cache: HashMap<&Path, Mesh> = HashMap::new();
    let mut placed = Vec::with_capacity(models.len());

    for model in models {
        if !cache.contains_key(model.path.as_path()) {
            let mesh = obj::load_obj(&model.path).map_err(|source| LoadError::Model {
                path: model.path.clone(),
                source,
            })?;
            cache.insert(model.path.as_path(), mesh);
        }
        let source = &cache[model.path.as_path()];
        log::debug!("Placing model {} ({:?})", model.name(), model.placement);
        placed.push(model.apply(source));
    }

    Ok(placed)
}

/// Hands out `<name>_mwNN.obj` file names, counting repeats per name.
#[derive(Debug, Default)]
pub struct ExportNamer {
    counts: HashMap<String, usize>,
}

impl ExportNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next export file name for a model called `name`.
    pub fn next_file_name(&mut self, name: &str) -> String {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        let file_name = format!("{}_mw{:02}.obj", name, count);
        *count += 1;
        file_name
    }
}

/// Write every placed mesh into `dir` as OBJ (plus MTL when it has
/// materials). Returns the written OBJ paths in order.
pub fn export_models(dir: &Path, meshes: &[Mesh]) -> LoadResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut namer = ExportNamer::new();
    let mut written = Vec::with_capacity(meshes.len());

    for mesh in meshes {
        let obj_path = dir.join(namer.next_file_name(&mesh.name));

        let mtllib = if mesh.materials.is_empty() {
            None
        } else {
            let mtl_path = obj::mtl_path_for(&obj_path);
            let mut writer = BufWriter::new(File::create(&mtl_path)?);
            obj::write_mtl(&mut writer, &mesh.materials)?;
            writer.flush()?;
            mtl_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        };

        let mut writer = BufWriter::new(File::create(&obj_path)?);
        obj::write_obj(&mut writer, mesh, mtllib.as_deref())?;
        writer.flush()?;

        log::info!("Wrote {}", obj_path.display());
        written.push(obj_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::{Point3, Vector3};

    #[test]
    fn test_model_name() {
        let model = ModelPlacement::new("models/cube.obj", Placement::default());
        assert_eq!(model.name(), "cube");
    }

    #[test]
    fn test_export_names_count_per_model() {
        let mut namer = ExportNamer::new();
        assert_eq!(namer.next_file_name("cube"), "cube_mw00.obj");
        assert_eq!(namer.next_file_name("cube"), "cube_mw01.obj");
        assert_eq!(namer.next_file_name("teapot"), "teapot_mw00.obj");
        for _ in 0..8 {
            namer.next_file_name("cube");
        }
        assert_eq!(namer.next_file_name("cube"), "cube_mw10.obj");
    }

    #[test]
    fn test_apply_uses_placement() {
        let mesh = obj::load_obj_from_str("tri", "v 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\n", None).unwrap();
        let model = ModelPlacement::new(
            "tri.obj",
            Placement::new(Vector3::Z, 90.0, 2.0, Point3::new(10.0, 0.0, 0.0)),
        );
        let placed = model.apply(&mesh);
        assert!(placed.positions[0]
            .raw()
            .abs_diff_eq(Point3::new(10.0, 2.0, 0.0).raw(), 1e-9));
    }

    #[test]
    fn test_missing_model_reports_path() {
        let model = ModelPlacement::new("does/not/exist.obj", Placement::default());
        match model.load() {
            Err(LoadError::Model { path, .. }) => assert_eq!(path, PathBuf::from("does/not/exist.obj")),
            other => panic!("expected model error, got {:?}", other.map(|m| m.name)),
        }
    }
}
