use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;

use sun_scene::cli::Cli;
use sun_scene::math::{BoundingSphere, SOLAR_RADIUS};
use sun_scene::Scene;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options = cli.scene_options().context("invalid scene options")?;
    let mut scene = Scene::new(options).context("failed to create scene")?;

    // The first frame computes the sun position for the scene time
    scene.render()?;

    if !cli.no_frame {
        let sun_position = scene.context().uniform_state().sun_position_wc();
        scene
            .camera_mut()
            .view_bounding_sphere(&BoundingSphere::new(sun_position, SOLAR_RADIUS));
        log::info!(
            "framing sun at ({:.3e}, {:.3e}, {:.3e}) in {} mode",
            sun_position.x,
            sun_position.y,
            sun_position.z,
            scene.mode()
        );
    }

    let pixel = scene.render_for_specs()?;
    log::info!("centre pixel: {:?}", pixel);

    if let Some(path) = &cli.output {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        scene
            .context()
            .framebuffer()
            .write_ppm(BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    scene.destroy()?;
    Ok(())
}
