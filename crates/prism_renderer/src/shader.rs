//! Phong shading with hard shadows and recursive mirror reflection.

use prism_core::Color;
use prism_math::Vector3;

use crate::{Ray, RenderConfig, Scene};

/// Colour seen along `ray`, following up to `depth` reflections.
///
/// Misses are black. Colours are not clamped; overexposed components are
/// clamped only when the image is written.
pub fn shade(scene: &Scene, ray: &Ray, depth: u32, config: &RenderConfig) -> Color {
    let Some(hit) = scene.trace(ray).hit() else {
        return Color::ZERO;
    };

    let material = hit.primitive.material();
    let point = hit.point;
    let to_camera = ray.direction().reverse();

    // Face the normal towards the incoming ray
    let mut normal = hit.primitive.normal_at(point);
    if to_camera.dot(normal) < 0.0 {
        normal = normal.reverse();
    }

    let mut color = match scene.ambient() {
        Some(ambient) => ambient.color * material.ambient,
        None => Color::ZERO,
    };

    for light in scene.lights() {
        let Some(position) = light.position else {
            continue;
        };
        if !scene.is_lit(position, point) {
            continue;
        }

        let to_light = Vector3::between(point, position).unit();
        let l_dot_n = to_light.dot(normal);
        if l_dot_n <= 0.0 {
            continue;
        }

        color += material.diffuse * light.color * l_dot_n;

        let reflected_light = (normal * (2.0 * l_dot_n) - to_light).unit();
        let spec = to_camera.dot(reflected_light);
        if spec > 0.0 {
            color += material.specular * light.color * spec.powf(material.phong);
        }
    }

    if depth > 0 {
        let bounce = (normal * (2.0 * normal.dot(to_camera)) - to_camera).unit();
        let reflected = shade(scene, &Ray::new(point, bounce), depth - 1, config);
        color += if config.attenuate_reflections {
            reflected * material.reflectance.unwrap_or(Color::ONE)
        } else {
            reflected
        };
    }

    color
}
