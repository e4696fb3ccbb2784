//! Open and closed strings drifting over the field.
//!
//! Strings are free curves, not tied to the grid. Each one keeps its own
//! control points and is mutated in place every tick:
//!
//! - an [`OpenString`] moves its start point by an offset that depends on
//!   time *and* on where the start point currently is, so it wanders along
//!   a feedback path; the end point stays where it was spawned
//! - a [`ClosedString`] translates every point by a shared small drift
//!
//! Strings are driven by raw elapsed seconds, not a wrapped time.

use glam::Vec3;
use rand::Rng;

/// Spawn parameters for a [`StringSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringConfig {
    pub open_count: usize,
    pub closed_count: usize,
    /// Control points per closed loop.
    pub loop_points: usize,
    /// Radius of the circle each loop is jittered around.
    pub loop_radius: f32,
}

impl Default for StringConfig {
    fn default() -> Self {
        Self {
            open_count: 10,
            closed_count: 5,
            loop_points: 20,
            loop_radius: 2.0,
        }
    }
}

/// A two-point string with a free start and an anchored end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenString {
    pub start: Vec3,
    pub end: Vec3,
}

impl OpenString {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    /// Move the start point for elapsed time `t`.
    pub fn update(&mut self, t: f32) {
        let s = self.start;
        self.start.x = s.x + 0.5 * (t + s.x).sin();
        self.start.y = s.y + 0.5 * (t + s.y).cos();
    }

    /// `[start.xyz, end.xyz]`.
    pub fn positions(&self) -> [f32; 6] {
        let [sx, sy, sz] = self.start.to_array();
        let [ex, ey, ez] = self.end.to_array();
        [sx, sy, sz, ex, ey, ez]
    }
}

/// A closed loop of control points.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedString {
    points: Vec<Vec3>,
}

impl ClosedString {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    /// Translate the whole loop for elapsed time `t`.
    pub fn update(&mut self, t: f32) {
        let drift = Vec3::new(0.1 * t.sin(), 0.1 * t.cos(), 0.0);
        for p in &mut self.points {
            *p += drift;
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Flat `[x, y, z, ...]` view of the control points.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// One segment per point, the last one closing the loop.
    #[inline]
    pub fn segment_count(&self) -> usize {
        if self.points.len() < 2 {
            0
        } else {
            self.points.len()
        }
    }
}

/// Every string in a scene, updated together.
#[derive(Debug, Clone)]
pub struct StringSet {
    open: Vec<OpenString>,
    closed: Vec<ClosedString>,
    dirty: bool,
}

impl StringSet {
    /// Build a set from explicit strings.
    pub fn new(open: Vec<OpenString>, closed: Vec<ClosedString>) -> Self {
        Self {
            open,
            closed,
            dirty: true,
        }
    }

    /// Spawn randomized strings inside `[-range, range]²`.
    ///
    /// Open endpoints are uniform over the square. Loop `k` point `i` sits
    /// at angle `2πi / loop_points` on a circle of `loop_radius`, shifted
    /// by a uniform `[0, 1)` offset per axis.
    pub fn spawn<R: Rng>(range: f32, config: &StringConfig, rng: &mut R) -> Self {
        let random_point = |rng: &mut R| {
            Vec3::new(
                rng.gen_range(-range..=range),
                rng.gen_range(-range..=range),
                0.0,
            )
        };

        let open = (0..config.open_count)
            .map(|_| {
                let start = random_point(rng);
                let end = random_point(rng);
                OpenString::new(start, end)
            })
            .collect();

        let step = std::f32::consts::TAU / config.loop_points.max(1) as f32;
        let closed = (0..config.closed_count)
            .map(|_| {
                let points = (0..config.loop_points)
                    .map(|i| {
                        let theta = i as f32 * step;
                        Vec3::new(
                            config.loop_radius * theta.cos() + rng.gen::<f32>(),
                            config.loop_radius * theta.sin() + rng.gen::<f32>(),
                            0.0,
                        )
                    })
                    .collect();
                ClosedString::new(points)
            })
            .collect();

        Self::new(open, closed)
    }

    /// Advance every string to elapsed time `t` and raise the dirty flag.
    pub fn update(&mut self, t: f32) {
        for s in &mut self.open {
            s.update(t);
        }
        for s in &mut self.closed {
            s.update(t);
        }
        self.dirty = true;
    }

    #[inline]
    pub fn open(&self) -> &[OpenString] {
        &self.open
    }

    #[inline]
    pub fn closed(&self) -> &[ClosedString] {
        &self.closed
    }

    /// Total line segments across all strings.
    pub fn segment_count(&self) -> usize {
        self.open.len() + self.closed.iter().map(ClosedString::segment_count).sum::<usize>()
    }

    /// Replace `out` with line-list vertices for every string.
    pub fn fill_segments(&self, out: &mut Vec<[f32; 3]>) {
        out.clear();
        out.reserve(self.segment_count() * 2);
        for s in &self.open {
            out.push(s.start.to_array());
            out.push(s.end.to_array());
        }
        for s in &self.closed {
            if s.segment_count() == 0 {
                continue;
            }
            let pts = s.points();
            for (i, p) in pts.iter().enumerate() {
                let next = pts[(i + 1) % pts.len()];
                out.push(p.to_array());
                out.push(next.to_array());
            }
        }
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn_default(seed: u64) -> StringSet {
        let mut rng = StdRng::seed_from_u64(seed);
        StringSet::spawn(10.0, &StringConfig::default(), &mut rng)
    }

    // ========== Open String Tests ==========

    #[test]
    fn test_open_string_update() {
        let mut s = OpenString::new(Vec3::new(1.0, 2.0, 0.0), Vec3::new(5.0, 5.0, 0.0));
        s.update(0.5);
        let expected_x = 1.0 + 0.5 * (1.5f32).sin();
        let expected_y = 2.0 + 0.5 * (2.5f32).cos();
        assert!((s.start.x - expected_x).abs() < 1e-6);
        assert!((s.start.y - expected_y).abs() < 1e-6);
        assert_eq!(s.end, Vec3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn test_open_string_uses_pre_move_start() {
        // y must be computed from the old start, not the freshly moved x
        let mut s = OpenString::new(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO);
        s.update(1.0);
        assert!((s.start.y - 0.5 * 1.0f32.cos()).abs() < 1e-6);
    }

    #[test]
    fn test_open_string_positions() {
        let s = OpenString::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(s.positions(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    // ========== Closed String Tests ==========

    #[test]
    fn test_closed_string_translates_rigidly() {
        let mut s = ClosedString::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        let before = s.points().to_vec();
        s.update(0.7);
        let drift = Vec3::new(0.1 * 0.7f32.sin(), 0.1 * 0.7f32.cos(), 0.0);
        for (a, b) in before.iter().zip(s.points()) {
            assert!((*b - *a - drift).length() < 1e-6);
        }
    }

    #[test]
    fn test_closed_string_flat_positions() {
        let s = ClosedString::new(vec![Vec3::new(1.0, 2.0, 0.0), Vec3::new(3.0, 4.0, 0.0)]);
        assert_eq!(s.positions(), &[1.0, 2.0, 0.0, 3.0, 4.0, 0.0]);
    }

    // ========== StringSet Tests ==========

    #[test]
    fn test_spawn_counts() {
        let set = spawn_default(1);
        assert_eq!(set.open().len(), 10);
        assert_eq!(set.closed().len(), 5);
        assert!(set.closed().iter().all(|c| c.points().len() == 20));
        assert_eq!(set.segment_count(), 10 + 5 * 20);
    }

    #[test]
    fn test_spawn_open_within_range() {
        let set = spawn_default(2);
        for s in set.open() {
            for p in [s.start, s.end] {
                assert!(p.x.abs() <= 10.0 && p.y.abs() <= 10.0);
                assert_eq!(p.z, 0.0);
            }
        }
    }

    #[test]
    fn test_spawn_loops_near_circle() {
        let set = spawn_default(3);
        for c in set.closed() {
            for (i, p) in c.points().iter().enumerate() {
                let theta = i as f32 * (std::f32::consts::TAU / 20.0);
                let dx = p.x - 2.0 * theta.cos();
                let dy = p.y - 2.0 * theta.sin();
                assert!((-1e-5..1.0 + 1e-5).contains(&dx), "dx {dx}");
                assert!((-1e-5..1.0 + 1e-5).contains(&dy), "dy {dy}");
            }
        }
    }

    #[test]
    fn test_spawn_is_reproducible() {
        let a = spawn_default(9);
        let b = spawn_default(9);
        assert_eq!(a.open(), b.open());
        assert_eq!(a.closed(), b.closed());
    }

    #[test]
    fn test_fill_segments() {
        let set = StringSet::new(
            vec![OpenString::new(Vec3::ZERO, Vec3::X)],
            vec![ClosedString::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y])],
        );
        let mut out = vec![[9.0; 3]];
        set.fill_segments(&mut out);
        assert_eq!(out.len(), set.segment_count() * 2);
        assert_eq!(out[0], [0.0, 0.0, 0.0]);
        assert_eq!(out[1], [1.0, 0.0, 0.0]);
        // Closing segment goes from the last point back to the first
        assert_eq!(out[6], [0.0, 1.0, 0.0]);
        assert_eq!(out[7], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_update_raises_dirty_once() {
        let mut set = spawn_default(4);
        assert!(set.take_dirty());
        assert!(!set.is_dirty());
        set.update(0.1);
        assert!(set.take_dirty());
        assert!(!set.take_dirty());
    }

    #[test]
    fn test_update_keeps_open_ends_fixed() {
        let mut set = spawn_default(5);
        let ends: Vec<_> = set.open().iter().map(|s| s.end).collect();
        for k in 0..10 {
            set.update(k as f32 * 0.1);
        }
        let after: Vec<_> = set.open().iter().map(|s| s.end).collect();
        assert_eq!(ends, after);
    }
}
