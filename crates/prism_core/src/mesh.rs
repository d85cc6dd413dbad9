//! Triangle mesh representation for Prism scenes.
//!
//! Meshes are loaded from OBJ files in model space, moved into world space by
//! a [`Placement`](prism_math::Placement) and finally broken into triangles by
//! the renderer.

use prism_math::{Placement, Point3};

use crate::scene::Material;

/// One triangle of a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshFace {
    /// Zero-based indices into `Mesh::positions`
    pub indices: [usize; 3],

    /// Index into `Mesh::materials`, if the face has a material
    pub material: Option<usize>,
}

impl MeshFace {
    pub fn new(indices: [usize; 3], material: Option<usize>) -> Self {
        Self { indices, material }
    }
}

/// A mesh of vertex positions, triangle faces and their materials.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    /// Model name (usually the OBJ file stem)
    pub name: String,

    /// Vertex positions
    pub positions: Vec<Point3>,

    /// Triangles
    pub faces: Vec<MeshFace>,

    /// Materials referenced by faces
    pub materials: Vec<Material>,
}

impl Mesh {
    /// Create a new mesh.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Point3>,
        faces: Vec<MeshFace>,
        materials: Vec<Material>,
    ) -> Self {
        Self {
            name: name.into(),
            positions,
            faces,
            materials,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// The three corner positions of `face`.
    ///
    /// Returns `None` when an index is out of range.
    pub fn face_vertices(&self, face: &MeshFace) -> Option<[Point3; 3]> {
        let [a, b, c] = face.indices;
        Some([
            *self.positions.get(a)?,
            *self.positions.get(b)?,
            *self.positions.get(c)?,
        ])
    }

    /// The material assigned to `face`, if any.
    pub fn material_for(&self, face: &MeshFace) -> Option<&Material> {
        face.material.and_then(|i| self.materials.get(i))
    }

    /// A copy of this mesh with every vertex moved by `placement`.
    ///
    /// Faces and materials are shared unchanged.
    pub fn placed(&self, placement: &Placement) -> Mesh {
        Mesh {
            name: self.name.clone(),
            positions: placement.apply(&self.positions),
            faces: self.faces.clone(),
            materials: self.materials.clone(),
        }
    }
}
