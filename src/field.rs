//! Field evaluators: the formulas that bend the grid.
//!
//! A field evaluator maps a grid point and a normalized time to a
//! [`FieldSample`] of up to three scalar channels. The channels are then
//! turned into a displacement by the evaluator's [`Projection`]:
//!
//! - **Radial**: `contraction` scales `x / r`, `expansion` scales `y / r`
//! - **Foam**: radial, plus a z offset of `transfer × U[0,1) × amplitude`
//! - **Cartesian**: channels are used directly as `(dx, dy)`, times a gain
//!
//! # Variants
//!
//! | Variant | Character | Time wrap |
//! |---------|-----------|-----------|
//! | [`FieldVariant::Warp`] | Gaussian bubble pulsing in and out | 1 s |
//! | [`FieldVariant::InvertedWarp`] | Warp with contraction flipped | 1 s |
//! | [`FieldVariant::DissipatingWarp`] | Warp losing energy as `e^(-0.1t)` | 1 s |
//! | [`FieldVariant::TurbulentWarp`] | Dissipating warp with gravity-wave ripple and Gaussian noise | 5 s |
//! | [`FieldVariant::UnifiedForces`] | Four superposed harmonics on both channels | 1 s |
//! | [`FieldVariant::LeewardWindward`] | Wave travelling along y, Cartesian output | 10 s |
//! | [`FieldVariant::PBrane`] | Metric perturbation, flux, stochastic z foam | 10 s |
//! | [`FieldVariant::EinsteinRosen`] | `1 - rs/r` curvature with exotic stabilization | 10 s |
//! | [`FieldVariant::StretchedMassTime`] | Inverse-sqrt stretch plus tidal `1/r³` terms | 10 s |
//! | [`FieldVariant::SuperEquation`] | Combined terms with symmetric additive noise | 10 s |
//! | [`FieldVariant::OctylCoeternal`] | Two cyclic fields, one per axis | 10 s |
//! | [`FieldVariant::Rest`] | No displacement | none |
//!
//! # Singularities
//!
//! Every variant that divides by `r` substitutes a fallback radius when the
//! point sits on the origin (`r < 1e-5`): `1` for most variants, `1e-5` for
//! the two horizon variants. Projection always falls back to `1`. The
//! result stays finite at the origin for every deterministic variant.
//!
//! # Custom fields
//!
//! ```ignore
//! let swirl = FieldFn::new(|p: &Probe, t: f32| {
//!     let s = (p.r - t).sin();
//!     FieldSample::new(s, -s)
//! })
//! .with_time_wrap(TimeWrap::Periodic(std::f32::consts::TAU));
//! ```

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::noise::NoiseSource;
use crate::time::TimeWrap;

/// Below this radius a point counts as sitting on the origin.
pub const ORIGIN_EPSILON: f32 = 1e-5;

/// Fallback radius used by most variants and by every projection.
pub const UNIT_FALLBACK: f32 = 1.0;

/// Fallback radius for the horizon variants, which need `r` to stay tiny.
pub const SINGULAR_FALLBACK: f32 = 1e-5;

/// Smallest lapse `1 - rs/r` fed to the inverse square root.
const LAPSE_FLOOR: f32 = 1e-3;

/// Standard deviation of the per-point quantum noise in the turbulent warp.
const TURBULENCE_STD_DEV: f32 = 0.1;

/// A grid point prepared for evaluation.
///
/// `r` is computed once here and shared by the formula and the projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Probe {
    pub x: f32,
    pub y: f32,
    /// `sqrt(x² + y²)`, unguarded.
    pub r: f32,
}

impl Probe {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            r: (x * x + y * y).sqrt(),
        }
    }

    /// `r`, or `fallback` when the point is on the origin.
    #[inline]
    pub fn radius_or(&self, fallback: f32) -> f32 {
        if self.r < ORIGIN_EPSILON {
            fallback
        } else {
            self.r
        }
    }
}

/// Output channels of one field evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldSample {
    pub contraction: f32,
    pub expansion: f32,
    /// Only read by [`Projection::Foam`].
    pub transfer: f32,
}

impl FieldSample {
    pub const ZERO: FieldSample = FieldSample {
        contraction: 0.0,
        expansion: 0.0,
        transfer: 0.0,
    };

    #[inline]
    pub fn new(contraction: f32, expansion: f32) -> Self {
        Self {
            contraction,
            expansion,
            transfer: 0.0,
        }
    }

    #[inline]
    pub fn with_transfer(mut self, transfer: f32) -> Self {
        self.transfer = transfer;
        self
    }

    pub fn is_finite(&self) -> bool {
        self.contraction.is_finite() && self.expansion.is_finite() && self.transfer.is_finite()
    }
}

/// How a [`FieldSample`] becomes a displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// `(contraction · x/r, expansion · y/r, 0)`.
    Radial,
    /// Radial in the plane, plus `transfer · U[0,1) · amplitude` on z.
    Foam { amplitude: f32 },
    /// `(contraction · gain, expansion · gain, 0)`.
    Cartesian { gain: f32 },
}

impl Projection {
    #[inline]
    pub fn project(&self, probe: &Probe, sample: FieldSample, noise: &mut dyn NoiseSource) -> Vec3 {
        match *self {
            Projection::Radial => radial(probe, sample),
            Projection::Foam { amplitude } => {
                let planar = radial(probe, sample);
                let dz = sample.transfer * noise.unit() * amplitude;
                Vec3::new(planar.x, planar.y, dz)
            }
            Projection::Cartesian { gain } => {
                Vec3::new(sample.contraction * gain, sample.expansion * gain, 0.0)
            }
        }
    }
}

#[inline]
fn radial(probe: &Probe, sample: FieldSample) -> Vec3 {
    let r = probe.radius_or(UNIT_FALLBACK);
    Vec3::new(
        sample.contraction * (probe.x / r),
        sample.expansion * (probe.y / r),
        0.0,
    )
}

/// A formula the [`VectorField`](crate::VectorField) can drive the grid with.
///
/// Implementations must not keep state between calls; all randomness has
/// to come from the `noise` argument.
pub trait FieldEvaluator {
    /// Evaluate the channels at `probe` for normalized time `t`.
    fn evaluate(&self, probe: &Probe, t: f32, noise: &mut dyn NoiseSource) -> FieldSample;

    fn projection(&self) -> Projection {
        Projection::Radial
    }

    /// Normalization applied to elapsed time before [`evaluate`](Self::evaluate).
    fn time_wrap(&self) -> TimeWrap {
        TimeWrap::DECADE
    }

    /// Whether [`displace`](Self::displace) ignores the noise source.
    fn is_deterministic(&self) -> bool {
        true
    }

    /// Evaluate and project in one go.
    #[inline]
    fn displace(&self, probe: &Probe, t: f32, noise: &mut dyn NoiseSource) -> Vec3 {
        let sample = self.evaluate(probe, t, noise);
        self.projection().project(probe, sample, noise)
    }
}

/// The built-in visualization formulas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldVariant {
    /// Contraction `e^(-r²)cos 2πt`, expansion `e^(-r²)sin 2πt`.
    Warp,
    /// [`Warp`](Self::Warp) with the contraction channel negated.
    InvertedWarp,
    /// [`Warp`](Self::Warp) damped by `e^(-0.1t)`.
    DissipatingWarp,
    /// Dissipating warp plus a `0.1 sin 4πt` ripple and per-point noise
    /// (standard deviation 0.1) shared by both channels.
    TurbulentWarp,
    /// `e^(-r²)(sin 2πt + cos 2πt + sin 4πt + cos 4πt)` on both channels.
    UnifiedForces,
    /// Wave `sin 2π(y - t)` under a `15e^(-r²/5)` envelope, split along
    /// `x/r` and `y/r` and applied as Cartesian offsets with gain 2.
    LeewardWindward,
    /// Metric perturbation, flux interaction and an energy-transfer channel
    /// that kicks points out of plane with random amplitude.
    PBrane,
    /// Bridge curvature `1 - rs/r` modulated by `sin 2πt · e^(-r/5)`.
    EinsteinRosen { schwarzschild_radius: f32 },
    /// Mass and time stretch `1/sqrt(1 - rs/r)` with oscillation and tidal terms.
    StretchedMassTime { schwarzschild_radius: f32 },
    /// `e^(-r/5) · sin 2πt · (cos t + sin t)` with noise added to one
    /// channel and subtracted from the other.
    SuperEquation,
    /// Octyl flux on x, coeternal harmonics on y.
    OctylCoeternal,
    /// Zero everywhere.
    Rest,
}

impl FieldVariant {
    /// Every variant with its default parameters.
    pub const ALL: [FieldVariant; 12] = [
        FieldVariant::Warp,
        FieldVariant::InvertedWarp,
        FieldVariant::DissipatingWarp,
        FieldVariant::TurbulentWarp,
        FieldVariant::UnifiedForces,
        FieldVariant::LeewardWindward,
        FieldVariant::PBrane,
        FieldVariant::EinsteinRosen {
            schwarzschild_radius: 2.0,
        },
        FieldVariant::StretchedMassTime {
            schwarzschild_radius: 2.0,
        },
        FieldVariant::SuperEquation,
        FieldVariant::OctylCoeternal,
        FieldVariant::Rest,
    ];

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            FieldVariant::Warp => "warp",
            FieldVariant::InvertedWarp => "inverted warp",
            FieldVariant::DissipatingWarp => "dissipating warp",
            FieldVariant::TurbulentWarp => "turbulent warp",
            FieldVariant::UnifiedForces => "unified forces",
            FieldVariant::LeewardWindward => "leeward/windward",
            FieldVariant::PBrane => "p-brane",
            FieldVariant::EinsteinRosen { .. } => "einstein-rosen bridge",
            FieldVariant::StretchedMassTime { .. } => "stretched mass-time",
            FieldVariant::SuperEquation => "super equation",
            FieldVariant::OctylCoeternal => "octyl/coeternal",
            FieldVariant::Rest => "rest",
        }
    }
}

impl FieldEvaluator for FieldVariant {
    fn evaluate(&self, probe: &Probe, t: f32, noise: &mut dyn NoiseSource) -> FieldSample {
        let phase = TAU * t;
        match *self {
            FieldVariant::Warp => {
                let r = probe.radius_or(UNIT_FALLBACK);
                let envelope = (-r * r).exp();
                FieldSample::new(envelope * phase.cos(), envelope * phase.sin())
            }

            FieldVariant::InvertedWarp => {
                let envelope = (-probe.r * probe.r).exp();
                FieldSample::new(-envelope * phase.cos(), envelope * phase.sin())
            }

            FieldVariant::DissipatingWarp => {
                let envelope = (-0.1 * t).exp() * (-probe.r * probe.r).exp();
                FieldSample::new(envelope * phase.cos(), envelope * phase.sin())
            }

            FieldVariant::TurbulentWarp => {
                let envelope = (-0.1 * t).exp() * (-probe.r * probe.r).exp();
                let ripple = 0.1 * (2.0 * phase).sin();
                let jitter = noise.gaussian(TURBULENCE_STD_DEV);
                FieldSample::new(
                    envelope * (phase.cos() + ripple + jitter),
                    envelope * (phase.sin() + ripple + jitter),
                )
            }

            FieldVariant::UnifiedForces => {
                let envelope = (-probe.r * probe.r).exp();
                let forces =
                    phase.sin() + phase.cos() + (2.0 * phase).sin() + (2.0 * phase).cos();
                let value = envelope * forces;
                FieldSample::new(value, value)
            }

            FieldVariant::LeewardWindward => {
                let r = probe.radius_or(UNIT_FALLBACK);
                let wave = (TAU * (probe.y - t)).sin();
                let envelope = 15.0 * (-r * r / 5.0).exp() * wave;
                FieldSample::new(envelope * (probe.x / r), envelope * (probe.y / r))
            }

            FieldVariant::PBrane => {
                let r = probe.radius_or(UNIT_FALLBACK);
                let metric = (-r * r / 10.0).exp() * phase.sin();
                let flux = phase.cos() * (r * PI).sin();
                let transfer = (2.0 * TAU * (probe.x + probe.y + t)).sin() * (-t).exp();
                FieldSample::new(metric, flux).with_transfer(transfer)
            }

            FieldVariant::EinsteinRosen {
                schwarzschild_radius: rs,
            } => {
                let r = probe.radius_or(SINGULAR_FALLBACK);
                let curvature = 1.0 - rs / r;
                let stabilization = phase.sin() * (-r / 5.0).exp();
                let flux = (r * PI).sin() * t.cos();
                FieldSample::new(curvature * stabilization, stabilization * flux)
            }

            FieldVariant::StretchedMassTime {
                schwarzschild_radius: rs,
            } => {
                let r = probe.radius_or(SINGULAR_FALLBACK);
                // Inside the horizon the lapse goes negative; hold it at the floor
                let lapse = (1.0 - rs / r).max(LAPSE_FLOOR);
                let stretch = 1.0 / lapse.sqrt();
                let oscillation = (5.0 * phase).sin() * (-r / 5.0).exp();
                let tidal = (2.0 * rs / r.powi(3)) * (probe.x + probe.y);
                FieldSample::new(
                    -stretch + oscillation - tidal,
                    stretch + oscillation + tidal,
                )
            }

            FieldVariant::SuperEquation => {
                let spacetime = (-probe.r / 5.0).exp();
                let energy = phase.sin();
                let mass_time = t.cos() + t.sin();
                let core = spacetime * energy * mass_time;
                let jitter = noise.symmetric(0.1);
                FieldSample::new(core + jitter, core - jitter)
            }

            FieldVariant::OctylCoeternal => {
                let r = probe.radius_or(UNIT_FALLBACK);
                let cycle_flux = (4.0 * TAU * r + t).sin();
                let recursive_energy = (-r * r / 5.0).exp() * phase.cos();
                let harmonic = phase.sin() * r.powi(3);
                let resonance = (r * PI / 2.0).cos() * (-t).exp();
                FieldSample::new(cycle_flux * recursive_energy, harmonic + resonance)
            }

            FieldVariant::Rest => FieldSample::ZERO,
        }
    }

    fn projection(&self) -> Projection {
        match self {
            FieldVariant::LeewardWindward => Projection::Cartesian { gain: 2.0 },
            FieldVariant::PBrane => Projection::Foam { amplitude: 0.1 },
            _ => Projection::Radial,
        }
    }

    fn time_wrap(&self) -> TimeWrap {
        match self {
            FieldVariant::Warp
            | FieldVariant::InvertedWarp
            | FieldVariant::DissipatingWarp
            | FieldVariant::UnifiedForces => TimeWrap::UNIT,
            FieldVariant::TurbulentWarp => TimeWrap::Periodic(5.0),
            FieldVariant::Rest => TimeWrap::Unbounded,
            _ => TimeWrap::DECADE,
        }
    }

    fn is_deterministic(&self) -> bool {
        !matches!(
            self,
            FieldVariant::TurbulentWarp | FieldVariant::PBrane | FieldVariant::SuperEquation
        )
    }
}

/// Adapter turning a closure into a [`FieldEvaluator`].
///
/// The closure receives the probe and normalized time and must be pure.
pub struct FieldFn<F> {
    f: F,
    projection: Projection,
    wrap: TimeWrap,
}

impl<F> FieldFn<F>
where
    F: Fn(&Probe, f32) -> FieldSample,
{
    /// Radial projection, ten-second loop.
    pub fn new(f: F) -> Self {
        Self {
            f,
            projection: Projection::Radial,
            wrap: TimeWrap::DECADE,
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Loop time with `wrap`. A `Periodic` wrap with a period that is not
    /// finite and positive behaves as [`TimeWrap::Unbounded`].
    pub fn with_time_wrap(mut self, wrap: TimeWrap) -> Self {
        self.wrap = wrap;
        self
    }
}

impl<F> FieldEvaluator for FieldFn<F>
where
    F: Fn(&Probe, f32) -> FieldSample,
{
    #[inline]
    fn evaluate(&self, probe: &Probe, t: f32, _noise: &mut dyn NoiseSource) -> FieldSample {
        (self.f)(probe, t)
    }

    fn projection(&self) -> Projection {
        self.projection
    }

    fn time_wrap(&self) -> TimeWrap {
        self.wrap
    }

    fn is_deterministic(&self) -> bool {
        // Foam draws from the noise source even for a pure closure
        !matches!(self.projection, Projection::Foam { .. })
    }
}
