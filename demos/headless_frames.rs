//! # Headless Frames
//!
//! Steps a scene at a fixed 60 Hz without opening a window and prints a
//! few statistics per second of simulated time. Handy for checking a
//! field's range before tuning colours or camera distance.
//!
//! Run with: `cargo run --example headless_frames -- p-brane`

use warpfield::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let preset: Preset = match std::env::args().nth(1) {
        Some(name) => name.parse()?,
        None => Preset::EinsteinRosen,
    };

    let mut config = SceneConfig::from_preset(preset);
    config.seed = Some(1);
    let mut scene = Scene::from_config(&config)?;

    println!("=== {} ===", preset);
    println!(
        "Grid: {0}x{0}, range ±{1}",
        scene.vectors().grid().size(),
        scene.vectors().grid().range()
    );
    println!();

    let dt = 1.0 / 60.0;
    for second in 1..=10 {
        for _ in 0..60 {
            scene.step(dt);
        }

        let points = scene.vectors().grid().points();
        let lengths = points.iter().map(|p| p.displacement().length());
        let max = lengths.clone().fold(0.0f32, f32::max);
        let mean = lengths.sum::<f32>() / points.len() as f32;
        let lifted = points.iter().filter(|p| p.current[2] != 0.0).count();

        println!(
            "t={:>4.1}s  gen={:>4}  max |d|={:>10.4}  mean |d|={:>8.4}  lifted={}",
            second as f32,
            scene.vectors().generation(),
            max,
            mean,
            lifted
        );
    }

    Ok(())
}
