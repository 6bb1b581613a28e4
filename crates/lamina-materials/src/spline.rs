//! Cubic spline interpolation for smooth refractive index curves.
//!
//! Tabulated optical constants are provided at discrete wavelengths. A
//! natural cubic spline gives a continuous $\tilde{n}(\lambda)$ with
//! continuous first and second derivatives between the data points. The
//! spline is linear in its sample values, so the same construction works
//! for real data and for complex indices.

use std::ops::{Add, Mul, Sub};

use crate::interp::validate_grid;
use crate::provider::MaterialError;

/// Sample values a spline can be built over (`f64`, `Complex64`).
pub trait SplineValue:
    Copy + Default + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
}

impl<T> SplineValue for T where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>
{
}

/// A natural cubic spline interpolator.
///
/// Given $n$ data points $(x_i, y_i)$, constructs piecewise cubic polynomials
/// with zero curvature at both ends.
#[derive(Debug, Clone)]
pub struct CubicSpline<T = f64> {
    /// Strictly increasing knots.
    xs: Vec<f64>,
    ys: Vec<T>,
    /// Second derivatives at each knot.
    y2s: Vec<T>,
}

impl<T: SplineValue> CubicSpline<T> {
    /// Construct a natural cubic spline from data points.
    ///
    /// # Errors
    /// Fails if `xs` and `ys` differ in length, if `xs` is not strictly
    /// increasing, or if fewer than 2 points are provided.
    pub fn new(xs: Vec<f64>, ys: Vec<T>) -> Result<Self, MaterialError> {
        validate_grid(&xs)?;
        if xs.len() != ys.len() {
            return Err(MaterialError::ShapeMismatch {
                expected: xs.len(),
                found: ys.len(),
            });
        }
        let y2s = natural_second_derivatives(&xs, &ys);
        Ok(Self { xs, ys, y2s })
    }

    /// Evaluate the spline at `x`.
    ///
    /// Extrapolation beyond the data range uses the boundary polynomial.
    pub fn evaluate(&self, x: f64) -> T {
        let (lo, hi) = locate(&self.xs, x);
        cubic_segment(
            (self.xs[lo], self.xs[hi]),
            (self.ys[lo], self.ys[hi]),
            (self.y2s[lo], self.y2s[hi]),
            x,
        )
    }

    /// Knot positions.
    pub fn knots(&self) -> &[f64] {
        &self.xs
    }

    /// `(first, last)` knot.
    pub fn range(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

/// Solve the tridiagonal system for the knot curvatures of a natural spline.
///
/// `xs` must already be validated (strictly increasing, at least 2 points).
pub(crate) fn natural_second_derivatives<T: SplineValue>(xs: &[f64], ys: &[T]) -> Vec<T> {
    let n = xs.len();
    let mut y2s = vec![T::default(); n];
    let mut coeff = vec![0.0; n];
    let mut u = vec![T::default(); n.saturating_sub(1)];
    if n < 3 {
        return y2s;
    }

    // Forward sweep
    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * coeff[i - 1] + 2.0;
        coeff[i] = (sig - 1.0) / p;
        let slope = (ys[i + 1] - ys[i]) * (1.0 / (xs[i + 1] - xs[i]))
            - (ys[i] - ys[i - 1]) * (1.0 / (xs[i] - xs[i - 1]));
        u[i] = (slope * (6.0 / (xs[i + 1] - xs[i - 1])) - u[i - 1] * sig) * (1.0 / p);
    }

    // Back substitution; y2s[n - 1] stays zero
    for k in (0..n - 2).rev() {
        y2s[k + 1] = y2s[k + 2] * coeff[k + 1] + u[k + 1];
    }

    y2s
}

/// Evaluate one cubic segment between knots `lo` and `hi`.
pub(crate) fn cubic_segment<T: SplineValue>(
    (x_lo, x_hi): (f64, f64),
    (y_lo, y_hi): (T, T),
    (y2_lo, y2_hi): (T, T),
    x: f64,
) -> T {
    let h = x_hi - x_lo;
    let a = (x_hi - x) / h;
    let b = (x - x_lo) / h;
    y_lo * a + y_hi * b + (y2_lo * (a * a * a - a) + y2_hi * (b * b * b - b)) * (h * h / 6.0)
}

/// Binary search for the knot interval enclosing `x`.
///
/// Returns `(lo, lo + 1)`; values outside the grid map to the boundary
/// interval.
pub(crate) fn locate(xs: &[f64], x: f64) -> (usize, usize) {
    let mut lo = 0;
    let mut hi = xs.len() - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] > x {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    (lo, hi)
}
