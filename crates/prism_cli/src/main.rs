//! `prism`: render a driver file to an image.
//!
//! Usage: `prism driver.txt out.ppm [--depth-map] [--export-models DIR]`

use anyhow::{Context, Result};
use clap::Parser;

use prism_core::{export_models, load_driver, load_models};
use prism_renderer::{render, render_depth, save_image, RenderConfig, Scene};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Prism");

    let description = load_driver(&args.driver)
        .with_context(|| format!("failed to load driver file {}", args.driver.display()))?;

    let meshes = load_models(&description.models).context("failed to load models")?;
    for mesh in &meshes {
        log::info!("Placed {} ({} triangles)", mesh.name, mesh.triangle_count());
    }

    if let Some(dir) = &args.export_models {
        let written = export_models(dir, &meshes)
            .with_context(|| format!("failed to export models to {}", dir.display()))?;
        log::info!("Exported {} models to {}", written.len(), dir.display());
    }

    let mut scene = Scene::from_description(&description, &meshes);
    scene.recursion_depth = args.recursion_depth(description.recursion_depth);

    let image = if args.depth_map {
        render_depth(&scene)
            .context("failed to render depth map")?
            .to_heat_image()
    } else {
        let config = args.apply(RenderConfig::default());
        render(&scene, &config).context("failed to render scene")?
    };

    save_image(&image, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!("Done");
    Ok(())
}
