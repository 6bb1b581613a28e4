//! Material provider trait.
//!
//! Every source of refractive index data implements [`IndexProvider`]. A
//! layer stack samples providers on its wavelength grid to build its index
//! table.

use ndarray::Array1;
use num_complex::Complex64;
use thiserror::Error;

use crate::interp::Interpolation;

/// Errors from interpolation and material providers.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("Wavelength {wavelength_nm} nm is outside the data range [{min}, {max}] nm")]
    OutOfRange {
        wavelength_nm: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid wavelength grid: {0}")]
    InvalidGrid(String),

    #[error("Sample table has {found} columns but the wavelength grid has {expected} points")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("Cannot combine {left:?} and {right:?} interpolated tables")]
    SchemeMismatch {
        left: Interpolation,
        right: Interpolation,
    },

    #[error("Data error: {0}")]
    DataError(String),
}

/// Provides the wavelength-dependent complex refractive index of a medium.
pub trait IndexProvider: Send + Sync {
    /// Human-readable name of this material.
    fn name(&self) -> &str;

    /// Wavelength range over which data is available (nm).
    fn wavelength_range(&self) -> (f64, f64);

    /// Complex refractive index $\tilde{n} = n + ik$ at a given wavelength.
    fn refractive_index(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError>;

    /// Complex dielectric function $\epsilon = \tilde{n}^2$.
    fn dielectric_function(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        let n = self.refractive_index(wavelength_nm)?;
        Ok(n * n)
    }

    /// Sample the refractive index at every point of `grid`.
    fn sample(&self, grid: &[f64]) -> Result<Array1<Complex64>, MaterialError> {
        grid.iter()
            .map(|&wl| self.refractive_index(wl))
            .collect::<Result<Vec<_>, _>>()
            .map(Array1::from)
    }
}
