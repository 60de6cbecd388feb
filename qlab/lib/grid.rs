//! Uniform position-space grids.

use ndarray as nd;
use crate::{ error::GridError, safe_denom };

pub type GridResult<T> = Result<T, GridError>;

/// A uniformly spaced, increasing set of sample positions.
///
/// The spacing is fixed at construction and always agrees with the stored
/// coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    // coordinate array
    x: nd::Array1<f64>,
    // coordinate array grid spacing
    dx: f64,
}

/// Build a grid of `n` points spanning the closed interval `[min, max]`.
///
/// The spacing is `(max - min) / (n - 1)`. A zero-width interval is allowed
/// (every point sits at `min` and `dx == 0`); downstream routines treat the
/// resulting zero denominators as 1.
///
/// ```
/// use qlab::grid::build_grid;
///
/// let grid = build_grid(-5.0, 5.0, 11).unwrap();
/// assert_eq!(grid.len(), 11);
/// assert!((grid.dx() - 1.0).abs() < 1e-15);
/// assert!(build_grid(0.0, 1.0, 1).is_err());
/// ```
pub fn build_grid(min: f64, max: f64, n: usize) -> GridResult<Grid> {
    GridError::check_points(n)?;
    GridError::check_interval(min, max)?;
    let dx = (max - min) / (n - 1) as f64;
    let x: nd::Array1<f64>
        = (0..n).map(|k| min + k as f64 * dx).collect();
    Ok(Grid { x, dx })
}

/// Build a grid of `n` points over `[-width / 2, width / 2]`.
pub fn symmetric(width: f64, n: usize) -> GridResult<Grid> {
    build_grid(-width / 2.0, width / 2.0, n)
}

impl Grid {
    /// Get a reference to the coordinate array.
    pub fn x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get the grid spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Get the grid spacing, replaced by 1 if it is zero.
    pub fn dx_safe(&self) -> f64 { safe_denom(self.dx) }

    /// Get the number of points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.x.len() }

    /// Get the first coordinate.
    pub fn min(&self) -> f64 { self.x[0] }

    /// Get the last coordinate.
    pub fn max(&self) -> f64 { self.x[self.x.len() - 1] }

    /// Distance between the first and last points.
    pub fn width(&self) -> f64 { self.max() - self.min() }

    /// Evaluate a function at every grid point.
    pub fn map<F>(&self, f: F) -> nd::Array1<f64>
    where F: FnMut(f64) -> f64
    {
        self.x.mapv(f)
    }
}
