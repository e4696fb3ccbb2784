//! The animated vector field: a [`Grid`] driven by a [`FieldEvaluator`].
//!
//! [`VectorField::update`] is the per-frame hot loop. It walks every point,
//! evaluates the field at the point's origin and rewrites the endpoint as
//! `origin + displacement`. Endpoints are always recomputed from origins,
//! never accumulated, so a field evaluated twice at the same time lands in
//! the same place.
//!
//! The field tracks a generation counter and a dirty flag so the renderer
//! only re-uploads the vertex buffer when something changed.

use crate::field::{FieldEvaluator, Probe};
use crate::grid::Grid;
use crate::noise::NoiseSource;

/// A grid whose endpoints follow a field over time.
#[derive(Debug)]
pub struct VectorField {
    grid: Grid,
    generation: u64,
    dirty: bool,
}

impl VectorField {
    /// Wrap a grid. The field starts dirty so the first frame uploads it.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
            dirty: true,
        }
    }

    /// Recompute every endpoint for normalized time `t`.
    ///
    /// `t` must already be wrapped by the field's
    /// [`TimeWrap`](crate::TimeWrap). Bumps the generation exactly once.
    pub fn update<F>(&mut self, field: &F, t: f32, noise: &mut dyn NoiseSource)
    where
        F: FieldEvaluator + ?Sized,
    {
        for point in self.grid.points_mut() {
            let origin = point.origin();
            let probe = Probe::new(origin.x, origin.y);
            let current = origin + field.displace(&probe, t, noise);
            point.current = current.to_array();
        }
        self.generation += 1;
        self.dirty = true;
    }

    /// Put the field back at rest.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.generation += 1;
        self.dirty = true;
    }

    /// Number of completed updates.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether it was set.
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Flat `[origin.xyz, current.xyz]` per point.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        self.grid.positions()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.grid.as_bytes()
    }

    /// Number of line-list vertices (two per point).
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        // Grid::MAX_SIZE keeps this well inside u32
        (self.grid.len() * 2) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldFn, FieldSample, FieldVariant};
    use crate::noise::ConstantNoise;

    fn field(size: u32, range: f32) -> VectorField {
        VectorField::new(Grid::new(size, range).unwrap())
    }

    #[test]
    fn test_starts_dirty_and_at_rest() {
        let mut vf = field(4, 1.0);
        assert_eq!(vf.generation(), 0);
        assert!(vf.take_dirty());
        assert!(!vf.take_dirty());
        assert!(vf.grid().points().iter().all(|p| p.origin == p.current));
    }

    #[test]
    fn test_update_bumps_generation_once() {
        let mut vf = field(10, 5.0);
        vf.take_dirty();
        vf.update(&FieldVariant::Warp, 0.3, &mut ConstantNoise::centered());
        assert_eq!(vf.generation(), 1);
        assert!(vf.is_dirty());
        vf.update(&FieldVariant::Warp, 0.4, &mut ConstantNoise::centered());
        assert_eq!(vf.generation(), 2);
    }

    #[test]
    fn test_update_preserves_origins() {
        let mut vf = field(8, 3.0);
        let before: Vec<_> = vf.grid().points().iter().map(|p| p.origin).collect();
        vf.update(&FieldVariant::OctylCoeternal, 2.0, &mut ConstantNoise::centered());
        let after: Vec<_> = vf.grid().points().iter().map(|p| p.origin).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_update_is_not_cumulative() {
        let mut vf = field(6, 2.0);
        let mut noise = ConstantNoise::centered();
        vf.update(&FieldVariant::UnifiedForces, 0.1, &mut noise);
        let first = vf.positions().to_vec();
        vf.update(&FieldVariant::UnifiedForces, 0.1, &mut noise);
        assert_eq!(first, vf.positions());
    }

    #[test]
    fn test_update_writes_origin_plus_displacement() {
        let shift = FieldFn::new(|_: &crate::field::Probe, t: f32| FieldSample::new(t, 0.0))
            .with_projection(crate::field::Projection::Cartesian { gain: 1.0 });
        let mut vf = field(3, 1.0);
        vf.update(&shift, 0.5, &mut ConstantNoise::centered());
        for p in vf.grid().points() {
            assert_eq!(p.current[0], p.origin[0] + 0.5);
            assert_eq!(p.current[1], p.origin[1]);
        }
    }

    #[test]
    fn test_rest_leaves_grid_unchanged() {
        let mut vf = field(5, 2.0);
        let before = vf.positions().to_vec();
        vf.update(&FieldVariant::Rest, 123.0, &mut ConstantNoise::centered());
        assert_eq!(before, vf.positions());
    }

    #[test]
    fn test_boxed_evaluator() {
        let boxed: Box<dyn FieldEvaluator> = Box::new(FieldVariant::Warp);
        let mut vf = field(3, 1.0);
        vf.update(boxed.as_ref(), 0.0, &mut ConstantNoise::centered());
        assert_eq!(vf.generation(), 1);
    }

    #[test]
    fn test_reset() {
        let mut vf = field(5, 2.0);
        vf.update(&FieldVariant::Warp, 0.2, &mut ConstantNoise::centered());
        vf.reset();
        assert!(vf.grid().points().iter().all(|p| p.origin == p.current));
        assert_eq!(vf.generation(), 2);
    }

    #[test]
    fn test_vertex_count() {
        assert_eq!(field(10, 1.0).vertex_count(), 200);
    }
}
