//! Render-ready scene: camera, primitives and lights.
//!
//! Built once from a [`SceneDescription`] plus the world-space meshes, then
//! shared read-only by every pixel.

use std::sync::Arc;

use prism_core::{Color, Light, Material, Mesh, SceneDescription};
use prism_math::Point3;

use crate::hittable::{HitRecord, Primitive};
use crate::{Camera, Ray, Sphere, Triangle};

/// Everything needed to shade a ray.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub width: u32,
    pub height: u32,
    pub recursion_depth: u32,
    triangles: Vec<Triangle>,
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
    ambient: Option<Light>,
}

impl Scene {
    /// An empty scene seen through `camera` at the given resolution.
    pub fn new(camera: Camera, width: u32, height: u32) -> Self {
        Self {
            camera,
            width,
            height,
            recursion_depth: 0,
            triangles: Vec::new(),
            spheres: Vec::new(),
            lights: Vec::new(),
            ambient: None,
        }
    }

    /// Assemble a scene from a parsed description and its placed meshes.
    pub fn from_description(description: &SceneDescription, meshes: &[Mesh]) -> Self {
        let mut scene = Scene::new(
            Camera::from_spec(&description.camera),
            description.width,
            description.height,
        );
        scene.recursion_depth = description.recursion_depth;

        if let Some(ambient) = description.ambient {
            scene.set_ambient(ambient.color);
        }
        for light in &description.lights {
            if let Some(position) = light.position {
                scene.add_light(position, light.color);
            }
        }
        for sphere in &description.spheres {
            scene.add_sphere(Sphere::new(
                sphere.center,
                sphere.radius,
                Arc::new(sphere.material.clone()),
            ));
        }
        for mesh in meshes {
            scene.add_mesh(mesh);
        }

        log::debug!(
            "Scene assembled: {} triangles, {} spheres, {} lights",
            scene.triangles.len(),
            scene.spheres.len(),
            scene.lights.len()
        );
        scene
    }

    /// Add every face of `mesh` as a triangle. Faces without a material get
    /// the default material.
    pub fn add_mesh(&mut self, mesh: &Mesh) {
        let fallback = Arc::new(Material::default());
        let materials: Vec<Arc<Material>> = mesh.materials.iter().cloned().map(Arc::new).collect();

        for face in &mesh.faces {
            let Some([a, b, c]) = mesh.face_vertices(face) else {
                log::warn!("Skipping face {:?} of {}: index out of range", face.indices, mesh.name);
                continue;
            };
            let material = face
                .material
                .and_then(|i| materials.get(i))
                .unwrap_or(&fallback)
                .clone();
            self.triangles
                .push(Triangle::from_mesh(a, b, c, face.indices, material));
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_light(&mut self, position: Point3, color: Color) {
        self.lights.push(Light::point(color, position));
    }

    pub fn set_ambient(&mut self, color: Color) {
        self.ambient = Some(Light::ambient(color));
    }

    pub fn ambient(&self) -> Option<&Light> {
        self.ambient.as_ref()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn primitive_count(&self) -> usize {
        self.triangles.len() + self.spheres.len()
    }

    /// Test `ray` against every primitive and return the closest hit.
    ///
    /// Triangles are tested before spheres.
    pub fn trace(&self, ray: &Ray) -> HitRecord<'_> {
        let mut record = HitRecord::new(*ray);
        for triangle in &self.triangles {
            record.consider(Primitive::Triangle(triangle));
        }
        for sphere in &self.spheres {
            record.consider(Primitive::Sphere(sphere));
        }
        record
    }

    /// Whether the light at `light_position` reaches `point`.
    ///
    /// Casts from the light towards the point. The light is blocked when the
    /// closest hit along that ray is somewhere other than `point`.
    pub fn is_lit(&self, light_position: Point3, point: Point3) -> bool {
        let ray = Ray::towards(light_position, point);
        match self.trace(&ray).hit() {
            Some(hit) => hit.point.approx_eq(&point),
            None => true,
        }
    }
}
