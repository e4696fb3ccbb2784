//! Injectable randomness for the stochastic field variants.
//!
//! The "quantum noise" terms of [`FieldVariant::TurbulentWarp`],
//! [`FieldVariant::SuperEquation`] and [`FieldVariant::PBrane`] draw from a
//! [`NoiseSource`] handed in by the caller rather than from a global
//! generator. Production code uses [`RandomNoise`]; tests can seed it or
//! swap in [`ConstantNoise`] to pin the stochastic term.
//!
//! [`FieldVariant::TurbulentWarp`]: crate::FieldVariant::TurbulentWarp
//! [`FieldVariant::SuperEquation`]: crate::FieldVariant::SuperEquation
//! [`FieldVariant::PBrane`]: crate::FieldVariant::PBrane

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// A stream of noise samples.
pub trait NoiseSource {
    /// Next sample in `[0, 1)`.
    fn unit(&mut self) -> f32;

    /// Next sample from a zero-mean normal distribution.
    fn gaussian(&mut self, std_dev: f32) -> f32;

    /// Next sample in `[-half_width, half_width)`.
    fn symmetric(&mut self, half_width: f32) -> f32 {
        (self.unit() * 2.0 - 1.0) * half_width
    }
}

/// Noise backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomNoise<R = StdRng> {
    rng: R,
}

impl RandomNoise<StdRng> {
    /// Seeded from OS entropy; different every run.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomNoise<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// The underlying generator, e.g. to spawn string geometry from the same stream.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: Rng> NoiseSource for RandomNoise<R> {
    #[inline]
    fn unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    fn gaussian(&mut self, std_dev: f32) -> f32 {
        match Normal::new(0.0, std_dev) {
            Ok(dist) => dist.sample(&mut self.rng),
            // Negative or non-finite spread: contribute nothing
            Err(_) => 0.0,
        }
    }
}

/// Always returns the same uniform value, clamped into `[0, 1)`.
///
/// Gaussian draws return the mean, 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(f32);

impl ConstantNoise {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0 - f32::EPSILON))
    }

    /// Noise that contributes nothing to a symmetric term.
    pub fn centered() -> Self {
        Self(0.5)
    }
}

impl NoiseSource for ConstantNoise {
    #[inline]
    fn unit(&mut self) -> f32 {
        self.0
    }

    #[inline]
    fn gaussian(&mut self, _std_dev: f32) -> f32 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_noise_range() {
        let mut noise = RandomNoise::seeded(7);
        for _ in 0..1000 {
            let u = noise.unit();
            assert!((0.0..1.0).contains(&u));
            let s = noise.symmetric(0.1);
            assert!((-0.1..0.1).contains(&s));
        }
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let mut a = RandomNoise::seeded(42);
        let mut b = RandomNoise::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn test_gaussian_spread() {
        let mut noise = RandomNoise::seeded(99);
        let n = 20_000;
        let samples: Vec<f32> = (0..n).map(|_| noise.gaussian(0.1)).collect();

        let mean = samples.iter().sum::<f32>() / n as f32;
        let var = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f32>() / n as f32;
        assert!(mean.abs() < 0.01, "mean {}", mean);
        assert!((var.sqrt() - 0.1).abs() < 0.005, "std dev {}", var.sqrt());

        // About 4.6% of a normal lies beyond two standard deviations
        let tails = samples.iter().filter(|s| s.abs() > 0.2).count() as f32 / n as f32;
        assert!((0.03..0.065).contains(&tails), "tail fraction {}", tails);
    }

    #[test]
    fn test_gaussian_rejects_bad_spread() {
        let mut noise = RandomNoise::seeded(1);
        assert_eq!(noise.gaussian(-1.0), 0.0);
        assert_eq!(noise.gaussian(f32::NAN), 0.0);
    }

    #[test]
    fn test_constant_noise() {
        let mut noise = ConstantNoise::centered();
        assert_eq!(noise.unit(), 0.5);
        assert_eq!(noise.symmetric(0.1), 0.0);
        assert_eq!(noise.gaussian(0.1), 0.0);

        let mut clamped = ConstantNoise::new(3.0);
        assert!(clamped.unit() < 1.0);
    }
}
