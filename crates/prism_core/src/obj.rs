//! Wavefront OBJ/MTL loading and writing.
//!
//! Loading goes through `tobj`: faces are triangulated and every model in the
//! file is merged into a single [`Mesh`]. MTL materials map `Ka`, `Kd`, `Ks`,
//! `Ns` and the non-standard `Kr` (reflective attenuation) onto [`Material`].

use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use prism_math::Point3;
use thiserror::Error;

use crate::mesh::{Mesh, MeshFace};
use crate::scene::{Color, Material, DEFAULT_PHONG};

/// Errors that can occur while reading an OBJ file.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("OBJ load error: {0}")]
    Load(#[from] tobj::LoadError),

    #[error("No geometry found in OBJ file: {0}")]
    NoGeometry(String),
}

/// Result type for OBJ operations.
pub type ObjResult<T> = Result<T, ObjError>;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load an OBJ file (and the MTL libraries it references) as one mesh.
///
/// An unreadable MTL file is not fatal: faces fall back to the default
/// material.
pub fn load_obj<P: AsRef<Path>>(path: P) -> ObjResult<Mesh> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("model"));

    let (models, materials) = tobj::load_obj(path, &load_options())?;
    let materials = materials.unwrap_or_else(|e| {
        log::warn!("Could not load materials for {}: {}", path.display(), e);
        Vec::new()
    });

    let mesh = mesh_from_models(&name, &models, &materials)?;
    log::info!(
        "Loaded {}: {} vertices, {} triangles, {} materials",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.materials.len()
    );
    Ok(mesh)
}

/// Load an OBJ from in-memory text, with an optional MTL library.
///
/// Every `mtllib` statement in `obj` resolves to `mtl`.
pub fn load_obj_from_str(name: &str, obj: &str, mtl: Option<&str>) -> ObjResult<Mesh> {
    let mut reader = BufReader::new(obj.as_bytes());
    let (models, materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| match mtl {
        Some(text) => tobj::load_mtl_buf(&mut BufReader::new(text.as_bytes())),
        None => Err(tobj::LoadError::OpenFileFailed),
    })?;
    let materials = materials.unwrap_or_default();
    mesh_from_models(name, &models, &materials)
}

/// Merge `tobj` models into one mesh, offsetting indices per model.
fn mesh_from_models(
    name: &str,
    models: &[tobj::Model],
    materials: &[tobj::Material],
) -> ObjResult<Mesh> {
    let mut positions = Vec::new();
    let mut faces = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let offset = positions.len();

        positions.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
        );

        let material = mesh.material_id.filter(|&id| id < materials.len());
        faces.extend(mesh.indices.chunks_exact(3).map(|tri| {
            MeshFace::new(
                [
                    offset + tri[0] as usize,
                    offset + tri[1] as usize,
                    offset + tri[2] as usize,
                ],
                material,
            )
        }));
    }

    if faces.is_empty() {
        return Err(ObjError::NoGeometry(name.to_string()));
    }

    let materials = materials.iter().map(material_from_tobj).collect();
    Ok(Mesh::new(name, positions, faces, materials))
}

fn rgb(v: [f32; 3]) -> Color {
    Color::new(v[0] as f64, v[1] as f64, v[2] as f64)
}

fn parse_rgb(text: &str) -> Option<Color> {
    let values: Vec<f64> = text
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        [r, g, b] => Some(Color::new(*r, *g, *b)),
        _ => None,
    }
}

/// Convert a `tobj` material, filling gaps from [`Material::default`].
pub fn material_from_tobj(source: &tobj::Material) -> Material {
    let defaults = Material::default();

    let reflectance = source.unknown_param.get("Kr").and_then(|text| {
        let parsed = parse_rgb(text);
        if parsed.is_none() {
            log::warn!("Ignoring malformed Kr '{}' in material {}", text, source.name);
        }
        parsed
    });

    Material {
        name: source.name.clone(),
        ambient: source.ambient.map(rgb).unwrap_or(defaults.ambient),
        diffuse: source.diffuse.map(rgb).unwrap_or(defaults.diffuse),
        specular: source.specular.map(rgb).unwrap_or(defaults.specular),
        phong: source.shininess.map(|s| s as f64).unwrap_or(DEFAULT_PHONG),
        reflectance,
    }
}

/// Write `mesh` as OBJ text.
///
/// Vertices are written with six decimals, faces with 1-based indices and a
/// `usemtl` line whenever the face material changes. Faces without a material
/// are written first, ahead of any `usemtl`.
pub fn write_obj<W: Write>(writer: &mut W, mesh: &Mesh, mtllib: Option<&str>) -> io::Result<()> {
    writeln!(writer, "# {}", mesh.name)?;
    writeln!(
        writer,
        "# {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    if let Some(lib) = mtllib {
        writeln!(writer, "mtllib {}", lib)?;
    }

    for p in &mesh.positions {
        writeln!(writer, "v {:.6} {:.6} {:.6}", p.x(), p.y(), p.z())?;
    }

    let (plain, shaded): (Vec<&MeshFace>, Vec<&MeshFace>) = mesh
        .faces
        .iter()
        .partition(|face| mesh.material_for(face).is_none());

    for face in plain {
        write_face(writer, face)?;
    }

    let mut current = None;
    for face in shaded {
        if let Some(material) = mesh.material_for(face) {
            if face.material != current {
                writeln!(writer, "usemtl {}", material.name)?;
                current = face.material;
            }
        }
        write_face(writer, face)?;
    }
    Ok(())
}

fn write_face<W: Write>(writer: &mut W, face: &MeshFace) -> io::Result<()> {
    let [a, b, c] = face.indices;
    writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)
}

/// Write materials as an MTL library.
pub fn write_mtl<W: Write>(writer: &mut W, materials: &[Material]) -> io::Result<()> {
    for m in materials {
        writeln!(writer, "newmtl {}", m.name)?;
        writeln!(writer, "Ka {:.6} {:.6} {:.6}", m.ambient.x, m.ambient.y, m.ambient.z)?;
        writeln!(writer, "Kd {:.6} {:.6} {:.6}", m.diffuse.x, m.diffuse.y, m.diffuse.z)?;
        writeln!(writer, "Ks {:.6} {:.6} {:.6}", m.specular.x, m.specular.y, m.specular.z)?;
        writeln!(writer, "Ns {:.6}", m.phong)?;
        if let Some(kr) = m.reflectance {
            writeln!(writer, "Kr {:.6} {:.6} {:.6}", kr.x, kr.y, kr.z)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// The `.mtl` path written next to an exported `.obj`.
pub fn mtl_path_for(obj_path: &Path) -> PathBuf {
    obj_path.with_extension("mtl")
}
