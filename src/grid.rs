//! Uniform 2D lattice of vector anchor points.
//!
//! A [`Grid`] is built once from `(size, range)` and lives for the whole
//! session. Each [`GridPoint`] keeps the origin it was created at and a
//! current endpoint that the [`VectorField`](crate::VectorField) rewrites
//! every tick.
//!
//! # Layout
//!
//! Points are stored row-major: `x` follows the outer index `i`, `y` the
//! inner index `j`, so point `(i, j)` lives at `i * size + j`. A point is
//! six `f32`s, `[origin.xyz, current.xyz]`, which is exactly one line
//! segment of a line-list vertex buffer. The renderer binds
//! [`Grid::as_bytes`] directly without any per-point copy.
//!
//! ```ignore
//! let grid = Grid::new(100, 10.0)?;
//! assert_eq!(grid.len(), 100 * 100);
//! assert_eq!(grid.positions().len(), 100 * 100 * 6);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::error::GridError;

/// One vector of the field: a fixed origin and a moving endpoint.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GridPoint {
    /// Where the vector starts. Never changes after construction.
    pub origin: [f32; 3],
    /// Where the vector currently ends.
    pub current: [f32; 3],
}

impl GridPoint {
    fn at_rest(x: f32, y: f32) -> Self {
        let p = [x, y, 0.0];
        Self {
            origin: p,
            current: p,
        }
    }

    /// Origin as a vector.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }

    /// Current endpoint as a vector.
    #[inline]
    pub fn current(&self) -> Vec3 {
        Vec3::from_array(self.current)
    }

    /// `current - origin`.
    #[inline]
    pub fn displacement(&self) -> Vec3 {
        self.current() - self.origin()
    }
}

/// Square lattice spanning `[-range, range]` on both axes.
#[derive(Clone, Debug)]
pub struct Grid {
    size: u32,
    range: f32,
    step: f32,
    points: Vec<GridPoint>,
}

impl Grid {
    /// Number of `f32`s exported per point.
    pub const FLOATS_PER_POINT: usize = 6;

    /// Largest accepted `size`. Keeps the line-list vertex count inside `u32`.
    pub const MAX_SIZE: u32 = 4096;

    /// Build a `size × size` grid with spacing `2 * range / (size - 1)`.
    ///
    /// Both end rows land exactly on `±range`. Fails for `size < 2`
    /// (no spacing can be defined), for `size > MAX_SIZE` and for a range
    /// that is not finite and strictly positive.
    pub fn new(size: u32, range: f32) -> Result<Self, GridError> {
        if !(2..=Self::MAX_SIZE).contains(&size) {
            return Err(GridError::InvalidSize(size));
        }
        if !range.is_finite() || range <= 0.0 {
            return Err(GridError::InvalidRange(range));
        }

        let step = 2.0 * range / (size - 1) as f32;
        let last = size - 1;
        let axis = |k: u32| {
            // Pin the last sample so rounding never overshoots the range
            if k == last {
                range
            } else {
                -range + k as f32 * step
            }
        };

        let mut points = Vec::with_capacity(size as usize * size as usize);
        for i in 0..size {
            let x = axis(i);
            for j in 0..size {
                points.push(GridPoint::at_rest(x, axis(j)));
            }
        }

        Ok(Self {
            size,
            range,
            step,
            points,
        })
    }

    /// Points per axis.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Half-extent of the lattice.
    #[inline]
    pub fn range(&self) -> f32 {
        self.range
    }

    /// Distance between neighbouring points on either axis.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total number of points (`size²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed grid; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flat index of lattice coordinate `(i, j)`.
    #[inline]
    pub fn index(&self, i: u32, j: u32) -> usize {
        i as usize * self.size as usize + j as usize
    }

    /// Point at lattice coordinate `(i, j)`.
    pub fn point(&self, i: u32, j: u32) -> Option<&GridPoint> {
        if i >= self.size || j >= self.size {
            return None;
        }
        self.points.get(self.index(i, j))
    }

    /// All points in row-major order.
    #[inline]
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    /// Mutable access for the updater. Origins must not be written.
    #[inline]
    pub(crate) fn points_mut(&mut self) -> &mut [GridPoint] {
        &mut self.points
    }

    /// Flat `[ox, oy, oz, cx, cy, cz, ...]` view of the whole grid.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Raw bytes of [`positions`](Self::positions), ready for GPU upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Put every endpoint back on its origin.
    pub fn reset(&mut self) {
        for p in &mut self.points {
            p.current = p.origin;
        }
    }
}
