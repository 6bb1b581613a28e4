//! Tabulated and non-dispersive materials.
//!
//! [`TabulatedMaterial`] wraps measured $(\lambda, n, k)$ data and
//! interpolates it with a natural cubic spline. [`ConstantMaterial`] is a
//! wavelength-independent index, handy for ambient media and idealised
//! spacer layers.

use num_complex::Complex64;

use crate::provider::{IndexProvider, MaterialError};
use crate::spline::CubicSpline;

/// Material with a spline-interpolated complex refractive index.
#[derive(Debug, Clone)]
pub struct TabulatedMaterial {
    name: String,
    spline: CubicSpline<Complex64>,
}

impl TabulatedMaterial {
    /// Construct from separate $n$ and $k$ columns.
    ///
    /// # Arguments
    /// * `name` - Material label (e.g. "ITO", "PEDOT:PSS").
    /// * `wavelengths_nm` - Wavelengths in nm (must be strictly increasing).
    /// * `n` - Real part of the index at each wavelength.
    /// * `k` - Extinction coefficient at each wavelength.
    pub fn new(
        name: impl Into<String>,
        wavelengths_nm: Vec<f64>,
        n: Vec<f64>,
        k: Vec<f64>,
    ) -> Result<Self, MaterialError> {
        if n.len() != k.len() {
            return Err(MaterialError::DataError(format!(
                "n has {} values but k has {}",
                n.len(),
                k.len()
            )));
        }
        let index = n
            .iter()
            .zip(&k)
            .map(|(&n, &k)| Complex64::new(n, k))
            .collect();
        Ok(Self {
            name: name.into(),
            spline: CubicSpline::new(wavelengths_nm, index)?,
        })
    }

    /// Construct from `(λ/nm, n, k)` rows.
    pub fn from_nk_table(
        name: impl Into<String>,
        data: &[(f64, f64, f64)],
    ) -> Result<Self, MaterialError> {
        let wavelengths_nm = data.iter().map(|&(lam, _, _)| lam).collect();
        let n = data.iter().map(|&(_, n, _)| n).collect();
        let k = data.iter().map(|&(_, _, k)| k).collect();
        Self::new(name, wavelengths_nm, n, k)
    }
}

impl IndexProvider for TabulatedMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        self.spline.range()
    }

    fn refractive_index(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        let (min, max) = self.wavelength_range();
        if wavelength_nm.is_nan() || wavelength_nm < min || wavelength_nm > max {
            return Err(MaterialError::OutOfRange {
                wavelength_nm,
                min,
                max,
            });
        }
        Ok(self.spline.evaluate(wavelength_nm))
    }
}

/// Wavelength-independent refractive index.
#[derive(Debug, Clone)]
pub struct ConstantMaterial {
    name: String,
    index: Complex64,
}

impl ConstantMaterial {
    pub fn new(name: impl Into<String>, index: Complex64) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    /// Vacuum, $\tilde{n} = 1$.
    pub fn vacuum() -> Self {
        Self::new("vacuum", Complex64::new(1.0, 0.0))
    }
}

impl IndexProvider for ConstantMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn refractive_index(&self, _wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        Ok(self.index)
    }
}
