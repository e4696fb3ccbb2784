//! # warpfield - animated spacetime warp vector fields
//!
//! A fixed 2D grid of vectors whose endpoints are bent every frame by a
//! stylized physics formula: warp bubbles, brane perturbations, wormhole
//! curvature, travelling waves. Optional open and closed strings drift over
//! the top. Everything is drawn as GPU line lists through wgpu.
//!
//! ## Quick Start
//!
//! ```ignore
//! use warpfield::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Visualization::new(Preset::LeewardWindward)
//!         .with_speed(0.5)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Grid
//!
//! A [`Grid`] is a `size × size` lattice over `[-range, range]²`. Each
//! [`GridPoint`] stores its origin and its current endpoint; the flat
//! `[origin, current]` layout is handed to the GPU as-is.
//!
//! ### Fields
//!
//! A [`FieldEvaluator`] maps a point and a time to a displacement. The
//! built-in formulas live in [`FieldVariant`]; anything else can be plugged
//! in through the trait or a [`FieldFn`] closure:
//!
//! ```ignore
//! let ripple = FieldFn::new(|p: &Probe, t: f32| {
//!     let s = (p.r * 3.0 - t * std::f32::consts::TAU).sin() * 0.3;
//!     FieldSample::new(s, s)
//! });
//! Visualization::new(Preset::Warp).with_field(ripple).run()?;
//! ```
//!
//! Stochastic variants draw their noise from an injected [`NoiseSource`],
//! so they can be seeded or pinned in tests.
//!
//! ### Updating
//!
//! [`VectorField::update`] rewrites every endpoint as
//! `origin + displacement`, then raises a dirty flag once. A [`Scene`]
//! bundles the vector field, its field, the strings, the noise and the
//! [`Clock`], and folds elapsed time through the field's [`TimeWrap`]
//! before each update.
//!
//! ## Presets
//!
//! | Preset | Grid | Notes |
//! |--------|------|-------|
//! | `warp` | 51², ±5 | Pulsing Gaussian bubble |
//! | `inverted-warp`, `dissipating-warp`, `turbulent-warp` | 200², ±5 | Warp variations |
//! | `unified-forces` | 100², ±5 | Superposed harmonics |
//! | `leeward-windward` | 150², ±10 | Directional wave |
//! | `p-brane` | 100², ±10 | Out-of-plane foam |
//! | `einstein-rosen`, `stretched-mass-time` | 100², ±10 | Horizon curvature |
//! | `super-equation`, `octyl-coeternal` | 100², ±10 | Combined terms |
//! | `open-closed-strings` | 50², ±10 | Strings over a grid at rest |
//!
//! ## Controls
//!
//! Left-drag orbits, the wheel zooms, `P` pauses and `Escape` quits.

mod app;
pub mod config;
pub mod error;
pub mod field;
mod gpu;
pub mod grid;
pub mod noise;
pub mod preset;
pub mod scene;
pub mod strings;
pub mod time;
pub mod vector_field;

pub use glam::Vec3;

pub use app::Visualization;
pub use config::SceneConfig;
pub use error::{ConfigError, GpuError, GridError, SimulationError};
pub use field::{FieldEvaluator, FieldFn, FieldSample, FieldVariant, Probe, Projection};
pub use gpu::{Camera, LineStyle};
pub use grid::{Grid, GridPoint};
pub use noise::{ConstantNoise, NoiseSource, RandomNoise};
pub use preset::Preset;
pub use scene::Scene;
pub use strings::{ClosedString, OpenString, StringConfig, StringSet};
pub use time::{Clock, TimeWrap};
pub use vector_field::VectorField;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use warpfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::Visualization;
    pub use crate::config::SceneConfig;
    pub use crate::error::SimulationError;
    pub use crate::field::{FieldEvaluator, FieldFn, FieldSample, FieldVariant, Probe, Projection};
    pub use crate::grid::Grid;
    pub use crate::noise::{ConstantNoise, NoiseSource, RandomNoise};
    pub use crate::preset::Preset;
    pub use crate::scene::Scene;
    pub use crate::strings::StringSet;
    pub use crate::time::TimeWrap;
    pub use crate::vector_field::VectorField;
    pub use crate::Vec3;
}
