//! # Custom Field
//!
//! Plugs a hand-written formula into the renderer: a spiral that twists
//! the grid around the origin and unwinds again every four seconds.
//!
//! ## What This Demonstrates
//!
//! - [`FieldFn`] for closure-based fields
//! - Choosing the projection and time wrap of a custom field
//! - Implementing [`FieldEvaluator`] directly for a field with parameters
//!
//! Run with: `cargo run --example custom_field`
//! Or:       `cargo run --example custom_field -- ripple`

use std::f32::consts::TAU;

use warpfield::prelude::*;

/// Concentric ripple moving outward at `speed` units per second.
struct Ripple {
    wavelength: f32,
    speed: f32,
    amplitude: f32,
}

impl FieldEvaluator for Ripple {
    fn evaluate(&self, probe: &Probe, t: f32, _noise: &mut dyn NoiseSource) -> FieldSample {
        let phase = TAU * (probe.r - self.speed * t) / self.wavelength;
        let s = self.amplitude * phase.sin() * (-probe.r / 8.0).exp();
        FieldSample::new(s, s)
    }

    fn time_wrap(&self) -> TimeWrap {
        TimeWrap::Periodic(self.wavelength / self.speed)
    }
}

fn main() -> Result<(), SimulationError> {
    env_logger::init();

    let vis = Visualization::new(Preset::Warp)
        .with_grid(80, 8.0)
        .with_camera_distance(20.0);

    if std::env::args().nth(1).as_deref() == Some("ripple") {
        return vis
            .with_field(Ripple {
                wavelength: 2.0,
                speed: 1.0,
                amplitude: 0.3,
            })
            .with_title("warpfield - ripple")
            .run();
    }

    // Tangential offset: rotate each point's radial direction by 90 degrees
    let spiral = FieldFn::new(|p: &Probe, t: f32| {
        let twist = (TAU * t / 4.0).sin() * (-p.r * p.r / 20.0).exp();
        let r = if p.r < 1e-5 { 1.0 } else { p.r };
        FieldSample::new(-p.y / r * twist, p.x / r * twist)
    })
    .with_projection(Projection::Cartesian { gain: 1.5 })
    .with_time_wrap(TimeWrap::Periodic(4.0));

    vis.with_field(spiral).with_title("warpfield - spiral").run()
}
