//! Progressive Cornell-box render.
//!
//! Plays the external frame driver's role: renders a fixed number of
//! frames, blends each into the running average, and writes a PNG.

use anyhow::Result;
use ember_renderer::{render_frame, Camera, Film, Integrator, RenderConfig, Scene};

const WIDTH: u32 = 512;
const HEIGHT: u32 = 512;
const FRAMES: u32 = 64;

fn main() -> Result<()> {
    env_logger::init();

    let scene = Scene::cornell_box();
    let camera = Camera::default();
    let config = RenderConfig {
        sample_count: 1,
        ..Default::default()
    };
    let integrator = Integrator::new(&scene, camera, config)?;

    println!(
        "Rendering {}x{} over {} accumulated frames...",
        WIDTH, HEIGHT, FRAMES
    );

    let start = std::time::Instant::now();
    let mut film = Film::new(WIDTH, HEIGHT);
    for frame in 0..FRAMES {
        let rendered = render_frame(&integrator, WIDTH, HEIGHT, frame);
        film.blend(&rendered, frame);
    }
    println!("Rendered in {:?}", start.elapsed());

    let filename = "cornell.png";
    image::save_buffer(filename, &film.to_rgba(), WIDTH, HEIGHT, image::ColorType::Rgba8)?;
    println!("Saved {}", filename);

    Ok(())
}
