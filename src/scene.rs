//! The per-process visualization context.
//!
//! A [`Scene`] owns everything one running visualization mutates: the
//! active field, the vector field it drives, the optional strings, the
//! noise source and the clock. It is built once at start-up and handed to
//! the renderer by reference; there is no global state.
//!
//! Each tick runs the whole update before returning, so a renderer that
//! uploads after [`Scene::frame`] never sees a half-written buffer.

use crate::config::SceneConfig;
use crate::error::GridError;
use crate::field::FieldEvaluator;
use crate::grid::Grid;
use crate::noise::RandomNoise;
use crate::strings::{StringConfig, StringSet};
use crate::time::Clock;
use crate::vector_field::VectorField;

pub struct Scene {
    field: Box<dyn FieldEvaluator>,
    vectors: VectorField,
    strings: Option<StringSet>,
    noise: RandomNoise,
    clock: Clock,
}

impl Scene {
    /// A scene over `grid` driven by `field`, with entropy-seeded noise.
    pub fn new(field: Box<dyn FieldEvaluator>, grid: Grid) -> Self {
        Self {
            field,
            vectors: VectorField::new(grid),
            strings: None,
            noise: RandomNoise::from_entropy(),
            clock: Clock::new(),
        }
    }

    /// Build the scene a config describes.
    ///
    /// Strings, if the preset has them, are spawned from the same seeded
    /// stream the field noise uses.
    pub fn from_config(config: &SceneConfig) -> Result<Self, GridError> {
        let grid = Grid::new(config.grid_size(), config.grid_range())?;
        let mut scene = Scene::new(Box::new(config.preset.field()), grid);
        if let Some(seed) = config.seed {
            scene.noise = RandomNoise::seeded(seed);
        }
        if config.preset.has_strings() {
            let strings = StringSet::spawn(
                config.grid_range(),
                &StringConfig::default(),
                scene.noise.rng_mut(),
            );
            scene.strings = Some(strings);
        }
        scene.clock.set_time_scale(config.speed);
        Ok(scene)
    }

    pub fn with_strings(mut self, strings: StringSet) -> Self {
        self.strings = Some(strings);
        self
    }

    pub fn with_noise(mut self, noise: RandomNoise) -> Self {
        self.noise = noise;
        self
    }

    /// Recompute the whole scene for `elapsed` raw seconds.
    ///
    /// The field sees `elapsed` folded by its own time wrap; strings see it
    /// unchanged.
    pub fn tick(&mut self, elapsed: f32) {
        self.tick_precise(elapsed as f64);
    }

    /// [`tick`](Self::tick) for a high-precision elapsed time, as kept by
    /// the [`Clock`].
    pub fn tick_precise(&mut self, elapsed: f64) {
        let t = self.field.time_wrap().apply_precise(elapsed);
        self.vectors.update(self.field.as_ref(), t, &mut self.noise);
        if let Some(strings) = &mut self.strings {
            strings.update(elapsed as f32);
        }
    }

    /// Advance the clock from the wall clock and tick.
    ///
    /// Returns `true` when a new FPS sample is available. A paused scene is
    /// left untouched.
    pub fn frame(&mut self) -> bool {
        let sampled = self.clock.update();
        if !self.clock.is_paused() {
            self.tick_precise(self.clock.elapsed_precise());
        }
        sampled
    }

    /// Advance the clock by a fixed `dt` and tick. For headless use.
    pub fn step(&mut self, dt: f32) {
        self.clock.advance(dt);
        if !self.clock.is_paused() {
            self.tick_precise(self.clock.elapsed_precise());
        }
    }

    pub fn field(&self) -> &dyn FieldEvaluator {
        self.field.as_ref()
    }

    #[inline]
    pub fn vectors(&self) -> &VectorField {
        &self.vectors
    }

    #[inline]
    pub fn vectors_mut(&mut self) -> &mut VectorField {
        &mut self.vectors
    }

    #[inline]
    pub fn strings(&self) -> Option<&StringSet> {
        self.strings.as_ref()
    }

    #[inline]
    pub fn strings_mut(&mut self) -> Option<&mut StringSet> {
        self.strings.as_mut()
    }

    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    #[inline]
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldVariant;
    use crate::preset::Preset;

    #[test]
    fn test_from_config_uses_preset_defaults() {
        let scene = Scene::from_config(&SceneConfig::from_preset(Preset::LeewardWindward)).unwrap();
        assert_eq!(scene.vectors().grid().size(), 150);
        assert_eq!(scene.vectors().grid().range(), 10.0);
        assert!(scene.strings().is_none());
    }

    #[test]
    fn test_from_config_rejects_bad_grid() {
        let mut config = SceneConfig::default();
        config.grid_size = Some(1);
        assert!(matches!(
            Scene::from_config(&config),
            Err(GridError::InvalidSize(1))
        ));
    }

    #[test]
    fn test_strings_preset_spawns_strings() {
        let mut config = SceneConfig::from_preset(Preset::OpenClosedStrings);
        config.seed = Some(1);
        let scene = Scene::from_config(&config).unwrap();
        let strings = scene.strings().unwrap();
        assert_eq!(strings.open().len(), 10);
        assert_eq!(strings.closed().len(), 5);
    }

    #[test]
    fn test_seeded_scenes_match() {
        let mut config = SceneConfig::from_preset(Preset::SuperEquation);
        config.grid_size = Some(8);
        config.seed = Some(99);
        let mut a = Scene::from_config(&config).unwrap();
        let mut b = Scene::from_config(&config).unwrap();
        a.tick(1.5);
        b.tick(1.5);
        assert_eq!(a.vectors().positions(), b.vectors().positions());
    }

    #[test]
    fn test_tick_wraps_time() {
        let grid = Grid::new(6, 2.0).unwrap();
        let mut a = Scene::new(Box::new(FieldVariant::Warp), grid.clone());
        let mut b = Scene::new(Box::new(FieldVariant::Warp), grid);
        a.tick(0.25);
        b.tick(3.25);
        assert_eq!(a.vectors().positions(), b.vectors().positions());
    }

    #[test]
    fn test_step_respects_pause() {
        let grid = Grid::new(4, 1.0).unwrap();
        let mut scene = Scene::new(Box::new(FieldVariant::Warp), grid);
        scene.step(0.1);
        assert_eq!(scene.vectors().generation(), 1);

        scene.clock_mut().pause();
        scene.step(0.1);
        assert_eq!(scene.vectors().generation(), 1);
        assert!((scene.clock().elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_long_running_clock_still_animates() {
        let grid = Grid::new(5, 2.0).unwrap();
        let mut late = Scene::new(Box::new(FieldVariant::Warp), grid.clone());
        let mut fresh = Scene::new(Box::new(FieldVariant::Warp), grid);

        late.clock_mut().advance(1_048_576.0);
        late.step(0.25);
        fresh.tick(0.25);

        assert_eq!(late.vectors().positions(), fresh.vectors().positions());
    }

    #[test]
    fn test_speed_scales_clock() {
        let mut config = SceneConfig::from_preset(Preset::Warp);
        config.speed = 2.0;
        config.grid_size = Some(4);
        let mut scene = Scene::from_config(&config).unwrap();
        scene.step(0.5);
        assert_eq!(scene.clock().elapsed(), 1.0);
    }
}
