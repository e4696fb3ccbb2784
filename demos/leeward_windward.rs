//! # Leeward / Windward
//!
//! A wave travelling up the y axis under a Gaussian envelope. Points ahead
//! of the crest are pushed outward, points behind it pulled in.
//!
//! ## What This Demonstrates
//!
//! - Starting from a [`Preset`] and overriding its defaults
//! - A field with a Cartesian projection instead of a radial one
//!
//! ## Try This
//!
//! - Drop the grid to 40 points to see individual vectors
//! - Slow time down with `.with_speed(0.25)`
//! - Press `P` to freeze a frame and orbit around it
//!
//! Run with: `cargo run --example leeward_windward`

use warpfield::prelude::*;

fn main() -> Result<(), SimulationError> {
    env_logger::init();

    Visualization::new(Preset::LeewardWindward)
        .with_grid(120, 10.0)
        .with_speed(0.5)
        .with_camera_distance(45.0)
        .run()
}
