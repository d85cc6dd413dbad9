//! Depth heat map of primary-ray hit distances.
//!
//! Near hits are red, mid-range green and far hits blue; misses stay black.

use prism_core::Color;
use rayon::prelude::*;

use crate::renderer::{ImageBuffer, RenderResult};
use crate::Scene;

/// Primary-ray hit distance per pixel, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    pub width: u32,
    pub height: u32,
    pub distances: Vec<Option<f64>>,
}

impl DepthMap {
    /// Smallest and largest hit distance, or `None` if nothing was hit.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.distances.iter().flatten().fold(None, |acc, &t| match acc {
            None => Some((t, t)),
            Some((min, max)) => Some((min.min(t), max.max(t))),
        })
    }

    /// Map distances onto the red → green → blue ramp.
    pub fn to_heat_image(&self) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.width, self.height);
        let Some((t_min, t_max)) = self.range() else {
            return image;
        };

        for (pixel, distance) in image.pixels.iter_mut().zip(&self.distances) {
            if let Some(t) = distance {
                *pixel = heat_color(*t, t_min, t_max);
            }
        }
        image
    }
}

/// Heat colour for distance `t` within `[t_min, t_max]`.
///
/// `ratio = 2(t − t_min)/(t_max − t_min)`, `r = 255·max(0, 1 − ratio)`,
/// `b = 255·max(0, ratio − 1)`, `g = 255 − r − b`, returned scaled to [0, 1].
/// A zero-width range maps everything to red.
pub fn heat_color(t: f64, t_min: f64, t_max: f64) -> Color {
    let span = t_max - t_min;
    let ratio = if span > 0.0 { 2.0 * (t - t_min) / span } else { 0.0 };
    let r = (255.0 * (1.0 - ratio)).max(0.0);
    let b = (255.0 * (ratio - 1.0)).max(0.0);
    let g = 255.0 - r - b;
    Color::new(r, g, b) / 255.0
}

/// Cast one primary ray per pixel and record the closest hit distance.
pub fn render_depth(scene: &Scene) -> RenderResult<DepthMap> {
    let viewport = scene.camera.viewport(scene.width, scene.height)?;
    let (width, height) = (viewport.width(), viewport.height());

    let rows: Vec<Vec<Option<f64>>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let j = height - 1 - y;
            (0..width)
                .map(|x| scene.trace(&viewport.ray(x, j)).hit().map(|hit| hit.t))
                .collect()
        })
        .collect();

    let depth = DepthMap {
        width,
        height,
        distances: rows.into_iter().flatten().collect(),
    };
    if let Some((t_min, t_max)) = depth.range() {
        log::info!("Depth range: {:.4} .. {:.4}", t_min, t_max);
    }
    Ok(depth)
}
