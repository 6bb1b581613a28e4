//! Refractive index inputs accepted at construction.

use std::sync::Arc;

use lamina_materials::{Interpolation, TableInterpolator};
use ndarray::{Array, Array1, Array2, ArrayD, Axis, Dimension};
use num_complex::Complex64;

use crate::error::StackError;

/// Where a stack's refractive indices come from.
///
/// Either raw samples on an explicit wavelength grid, or an interpolator
/// built elsewhere. Both are normalised to one owned [`TableInterpolator`].
#[derive(Debug, Clone)]
pub enum RefractiveIndexSource {
    Samples {
        /// 1-D (single layer) or 2-D `(layers, grid_size)` table.
        samples: ArrayD<Complex64>,
        wavelengths: Arc<[f64]>,
        interpolation: Interpolation,
    },
    Prebuilt(TableInterpolator),
}

impl RefractiveIndexSource {
    /// Linearly interpolated samples on `wavelengths`.
    pub fn samples<D: Dimension>(
        samples: Array<Complex64, D>,
        wavelengths: impl Into<Arc<[f64]>>,
    ) -> Self {
        Self::Samples {
            samples: samples.into_dyn(),
            wavelengths: wavelengths.into(),
            interpolation: Interpolation::Linear,
        }
    }

    /// Build samples from nested rows, one `Vec` per layer.
    pub fn from_rows(
        rows: Vec<Vec<Complex64>>,
        wavelengths: impl Into<Arc<[f64]>>,
    ) -> Result<Self, StackError> {
        let wavelengths: Arc<[f64]> = wavelengths.into();
        let layers = rows.len();
        let columns = rows.first().map_or(wavelengths.len(), Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != columns) {
            return Err(StackError::Validation {
                what: "refractive index row",
                found: vec![bad.len()],
                expected_from: "the first row",
                expected: vec![columns],
            });
        }
        let table = Array2::from_shape_fn((layers, columns), |(i, j)| rows[i][j]);
        Ok(Self::samples(table, wavelengths))
    }

    /// Select the interpolation scheme used for raw samples.
    pub fn interpolated(self, kind: Interpolation) -> Self {
        match self {
            Self::Samples {
                samples,
                wavelengths,
                ..
            } => Self::Samples {
                samples,
                wavelengths,
                interpolation: kind,
            },
            Self::Prebuilt(interp) => Self::Prebuilt(interp.with_interpolation(kind)),
        }
    }

    /// Normalise into an interpolator, promoting a 1-D table to one row.
    pub(crate) fn into_interpolator(self) -> Result<TableInterpolator, StackError> {
        match self {
            Self::Prebuilt(interp) => Ok(interp),
            Self::Samples {
                samples,
                wavelengths,
                interpolation,
            } => {
                let table = promote(samples)?;
                if table.ncols() != wavelengths.len() {
                    return Err(StackError::Validation {
                        what: "refractive index columns",
                        found: vec![table.ncols()],
                        expected_from: "the wavelength grid",
                        expected: vec![wavelengths.len()],
                    });
                }
                Ok(TableInterpolator::with_kind(wavelengths, table, interpolation)?)
            }
        }
    }
}

impl From<TableInterpolator> for RefractiveIndexSource {
    fn from(interp: TableInterpolator) -> Self {
        Self::Prebuilt(interp)
    }
}

fn promote(samples: ArrayD<Complex64>) -> Result<Array2<Complex64>, StackError> {
    match samples.ndim() {
        0 | 1 => {
            let row: Array1<Complex64> = samples.iter().copied().collect();
            Ok(row.insert_axis(Axis(0)))
        }
        2 => {
            let shape = samples.shape();
            Ok(Array2::from_shape_fn((shape[0], shape[1]), |(i, j)| samples[&[i, j][..]]))
        }
        ndim => Err(StackError::Dimension { ndim }),
    }
}
