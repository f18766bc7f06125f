//! Glint command-line host.
//!
//! Loads a scene, renders one frame and writes it as a PNG.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{load_scene_file, Plane, Scene, Sphere, Surface};
use glint_renderer::{look_rotation, Color, RenderConfig, Renderer, SceneFile, Vec3};

use cli::{init_logger, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level);

    let (scene, mut config) = match &args.scene {
        Some(path) => {
            let file: SceneFile = load_scene_file(path)
                .with_context(|| format!("failed to load scene {}", path.display()))?;
            let scene = Scene::from_description(&file)
                .with_context(|| format!("invalid scene {}", path.display()))?;
            (scene, file.render)
        }
        None => {
            log::info!("No scene file given, rendering the demo scene");
            demo_scene()
        }
    };
    apply_overrides(&mut config, &args);

    let mut renderer = Renderer::new();
    let (frame, stats) = renderer
        .render_frame(&scene.snapshot(), &config)
        .context("render failed")?;

    frame
        .to_image()
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    log::info!(
        "Wrote {} ({}x{}, {} rays in {:.2?})",
        args.output.display(),
        frame.width(),
        frame.height(),
        stats.rays_traced,
        stats.elapsed
    );
    Ok(())
}

fn apply_overrides(config: &mut RenderConfig, args: &Args) {
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(samples) = args.samples {
        config.sample_count = samples;
    }
    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
}

/// Three mirrored spheres over a checkered floor.
fn demo_scene() -> (Scene, RenderConfig) {
    let mut scene = Scene::new("demo");

    scene.add(Plane::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
        Surface::Checker {
            even: Color::new(0.9, 0.9, 0.9),
            odd: Color::new(0.15, 0.15, 0.2),
            scale: 1.0,
        },
    ));
    scene.add(Sphere::new(
        Vec3::new(0.0, 0.0, -4.0),
        1.0,
        Surface::Solid(Color::new(0.95, 0.95, 0.95)),
    ));
    scene.add(Sphere::new(
        Vec3::new(-2.2, -0.3, -5.0),
        0.7,
        Surface::Solid(Color::new(0.9, 0.35, 0.25)),
    ));
    scene.add(Sphere::new(
        Vec3::new(2.0, -0.4, -3.5),
        0.6,
        Surface::Solid(Color::new(0.3, 0.6, 0.9)),
    ));

    let position = Vec3::new(0.0, 0.6, 1.0);
    let target = Vec3::new(0.0, -0.2, -4.0);
    let mut config = RenderConfig::default()
        .with_resolution(800, 450)
        .with_quality(6, 16)
        .with_background(Color::new(0.75, 0.85, 1.0))
        .with_position(position);
    if let Some(orientation) = look_rotation(target - position, Vec3::Y) {
        config = config.with_orientation(orientation);
    }

    (scene, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_is_renderable() {
        let (scene, config) = demo_scene();
        assert_eq!(scene.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_replace_scene_settings() {
        let mut config = RenderConfig::default();
        let args = Args::parse_from(["glint", "--height", "10", "--depth", "2", "--seed", "5"]);
        apply_overrides(&mut config, &args);

        assert_eq!(config.width, RenderConfig::default().width);
        assert_eq!(config.height, 10);
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.seed, 5);
    }
}
