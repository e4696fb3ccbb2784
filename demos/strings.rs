//! # Open and Closed Strings
//!
//! Ten open strings wander on a feedback path while five loops drift as
//! rigid bodies, all over a grid at rest.
//!
//! ## What This Demonstrates
//!
//! - Loading a scene from JSON with [`SceneConfig::from_json`]
//! - Seeding so the same strings spawn every run
//! - Custom line and string colours
//!
//! Run with: `cargo run --example strings`

use warpfield::prelude::*;

const SCENE: &str = r#"{
    "preset": "open-closed-strings",
    "seed": 2024,
    "line_color": [0.25, 0.25, 0.3],
    "string_color": [1.0, 0.35, 0.2],
    "background": [0.02, 0.02, 0.05]
}"#;

fn main() -> Result<(), SimulationError> {
    env_logger::init();

    let config = SceneConfig::from_json(SCENE)?;
    Visualization::from_config(config).run()
}
