//! Table interpolation over a shared wavelength grid.
//!
//! A [`TableInterpolator`] holds one strictly increasing wavelength grid and
//! a 2-D complex sample table of shape `(rows, grid_size)`. Evaluating it at
//! a wavelength yields one complex value per row. The grid is reference
//! counted and never mutated, so interpolators derived from one another
//! share it freely; the sample table is always owned.

use std::ops::Range;
use std::sync::Arc;

use ndarray::{concatenate, s, Array1, Array2, Axis, Zip};
use num_complex::Complex64;

use crate::provider::MaterialError;
use crate::spline::{cubic_segment, locate, natural_second_derivatives};

/// Interpolation scheme used between grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Piecewise-linear.
    #[default]
    Linear,
    /// Natural cubic spline, per row.
    CubicSpline,
}

/// Check that a wavelength grid has at least 2 finite, strictly increasing points.
pub fn validate_grid(xs: &[f64]) -> Result<(), MaterialError> {
    if xs.len() < 2 {
        return Err(MaterialError::InvalidGrid(format!(
            "need at least 2 wavelengths, got {}",
            xs.len()
        )));
    }
    if let Some(i) = xs.iter().position(|x| !x.is_finite()) {
        return Err(MaterialError::InvalidGrid(format!(
            "non-finite wavelength {} at index {}",
            xs[i], i
        )));
    }
    if let Some(i) = (1..xs.len()).find(|&i| xs[i] <= xs[i - 1]) {
        return Err(MaterialError::InvalidGrid(format!(
            "wavelengths must be strictly increasing at index {}",
            i
        )));
    }
    Ok(())
}

/// Row-wise interpolation of complex samples on a shared grid.
#[derive(Debug, Clone)]
pub struct TableInterpolator {
    x: Arc<[f64]>,
    y: Array2<Complex64>,
    kind: Interpolation,
    /// Knot curvatures, present for [`Interpolation::CubicSpline`].
    y2: Option<Array2<Complex64>>,
}

impl TableInterpolator {
    /// Linear interpolator over `x` with sample table `y` (`rows × x.len()`).
    pub fn new(x: impl Into<Arc<[f64]>>, y: Array2<Complex64>) -> Result<Self, MaterialError> {
        Self::with_kind(x, y, Interpolation::Linear)
    }

    /// Interpolator with an explicit scheme.
    ///
    /// # Errors
    /// Fails if the grid is invalid (see [`validate_grid`]) or the table's
    /// column count differs from the grid length.
    pub fn with_kind(
        x: impl Into<Arc<[f64]>>,
        y: Array2<Complex64>,
        kind: Interpolation,
    ) -> Result<Self, MaterialError> {
        let x = x.into();
        validate_grid(&x)?;
        if y.ncols() != x.len() {
            return Err(MaterialError::ShapeMismatch {
                expected: x.len(),
                found: y.ncols(),
            });
        }
        Ok(Self::build(x, y, kind))
    }

    /// Assemble from parts already known to be consistent.
    fn build(x: Arc<[f64]>, y: Array2<Complex64>, kind: Interpolation) -> Self {
        log::trace!(
            "{:?} interpolator: {} rows on {} wavelengths",
            kind,
            y.nrows(),
            x.len()
        );
        let y2 = match kind {
            Interpolation::Linear => None,
            Interpolation::CubicSpline => {
                let mut y2 = Array2::zeros(y.raw_dim());
                for (row, mut out) in y.outer_iter().zip(y2.outer_iter_mut()) {
                    let curvature = natural_second_derivatives(&x, &row.to_vec());
                    out.assign(&Array1::from(curvature));
                }
                Some(y2)
            }
        };
        Self { x, y, kind, y2 }
    }

    /// Same grid and scheme, new sample table.
    fn with_table(&self, y: Array2<Complex64>) -> Self {
        Self::build(Arc::clone(&self.x), y, self.kind)
    }

    /// Sample wavelengths.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Shared handle to the sample wavelengths.
    pub fn grid(&self) -> &Arc<[f64]> {
        &self.x
    }

    /// Sample table, one row per series.
    pub fn y(&self) -> &Array2<Complex64> {
        &self.y
    }

    pub fn kind(&self) -> Interpolation {
        self.kind
    }

    /// Number of rows in the sample table.
    pub fn rows(&self) -> usize {
        self.y.nrows()
    }

    /// `(first, last)` grid wavelength.
    pub fn range(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// True when both interpolators sample the same wavelengths.
    pub fn same_grid(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.x, &other.x) || self.x == other.x
    }

    fn check_range(&self, wavelength_nm: f64) -> Result<(), MaterialError> {
        let (min, max) = self.range();
        if wavelength_nm.is_nan() || wavelength_nm < min || wavelength_nm > max {
            return Err(MaterialError::OutOfRange {
                wavelength_nm,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Evaluate every row at `wavelength_nm`.
    ///
    /// # Errors
    /// Returns [`MaterialError::OutOfRange`] outside the grid.
    pub fn evaluate(&self, wavelength_nm: f64) -> Result<Array1<Complex64>, MaterialError> {
        self.check_range(wavelength_nm)?;
        let (lo, hi) = locate(&self.x, wavelength_nm);
        let (x_lo, x_hi) = (self.x[lo], self.x[hi]);

        let values = match &self.y2 {
            None => {
                let t = (wavelength_nm - x_lo) / (x_hi - x_lo);
                Zip::from(self.y.column(lo))
                    .and(self.y.column(hi))
                    .map_collect(|&a, &b| a * (1.0 - t) + b * t)
            }
            Some(y2) => Zip::from(self.y.column(lo))
                .and(self.y.column(hi))
                .and(y2.column(lo))
                .and(y2.column(hi))
                .map_collect(|&a, &b, &c, &d| {
                    cubic_segment((x_lo, x_hi), (a, b), (c, d), wavelength_nm)
                }),
        };
        Ok(values)
    }

    /// Keep the contiguous rows in `rows`.
    ///
    /// `rows` must lie within `0..self.rows()`.
    pub fn slice_rows(&self, rows: Range<usize>) -> Self {
        self.with_table(self.y.slice(s![rows, ..]).to_owned())
    }

    /// Keep the listed rows, in the listed order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        self.with_table(self.y.select(Axis(0), rows))
    }

    /// Drop row `index`.
    pub fn remove_row(&self, index: usize) -> Self {
        let keep: Vec<usize> = (0..self.rows()).filter(|&i| i != index).collect();
        self.select_rows(&keep)
    }

    /// Reverse the row order.
    pub fn reversed_rows(&self) -> Self {
        self.with_table(self.y.slice(s![..;-1, ..]).to_owned())
    }

    /// Rows of `self` followed by rows of `other`.
    ///
    /// # Errors
    /// The two tables must share one wavelength grid and one scheme.
    pub fn stack_rows(&self, other: &Self) -> Result<Self, MaterialError> {
        if !self.same_grid(other) {
            return Err(MaterialError::InvalidGrid(format!(
                "cannot stack tables sampled on {:?} and {:?}",
                self.x(),
                other.x()
            )));
        }
        if self.kind != other.kind {
            return Err(MaterialError::SchemeMismatch {
                left: self.kind,
                right: other.kind,
            });
        }
        let y = concatenate(Axis(0), &[self.y.view(), other.y.view()])
            .map_err(|e| MaterialError::DataError(e.to_string()))?;
        Ok(self.with_table(y))
    }

    /// Same grid and table under a different scheme.
    pub fn with_interpolation(&self, kind: Interpolation) -> Self {
        Self::build(Arc::clone(&self.x), self.y.clone(), kind)
    }
}
