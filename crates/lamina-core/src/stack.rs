//! The layer stack data type.
//!
//! A [`LayerStack`] is an ordered list of thin-film layers. Each layer has a
//! name, a thickness in nanometres and a row in a shared complex refractive
//! index table. All rows are sampled on one wavelength grid, so evaluating
//! the stack at a wavelength yields exactly one index per layer, in layer
//! order. That is the input a transfer-matrix solver consumes.
//!
//! Stacks have value semantics: slicing and the algebra in
//! [`crate::algebra`] return new stacks. The wavelength grid is shared
//! read-only between derived stacks; sample tables are always copied.

use std::fmt;
use std::sync::Arc;

use lamina_materials::{IndexProvider, TableInterpolator};
use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::StackError;
use crate::signature::{self, LayerSignature};
use crate::source::RefractiveIndexSource;

/// Imaginary index above which a layer is reported as opaque.
pub const OPAQUE_THRESHOLD: f64 = 0.5;

/// An ordered stack of optical thin-film layers.
#[derive(Debug, Clone)]
pub struct LayerStack {
    names: Vec<String>,
    /// Thickness per layer (nm).
    thicknesses: Array1<f64>,
    /// Refractive index table, one row per layer.
    index: TableInterpolator,
    /// Distinguished layer (e.g. the photoactive one). Metadata only.
    active_layer: Option<usize>,
}

impl LayerStack {
    /// Build a stack from layer names, thicknesses and index data.
    ///
    /// # Errors
    /// Returns [`StackError::Validation`] when the number of names,
    /// thicknesses and index rows disagree, [`StackError::Dimension`] for a
    /// sample table with more than 2 dimensions,
    /// [`StackError::NonFiniteThickness`] for a NaN or infinite thickness and
    /// [`StackError::Material`] for an invalid wavelength grid.
    pub fn new<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        thicknesses: impl IntoIterator<Item = f64>,
        source: impl Into<RefractiveIndexSource>,
    ) -> Result<Self, StackError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let thicknesses: Array1<f64> = thicknesses.into_iter().collect();
        let source: RefractiveIndexSource = source.into();
        let index = source.into_interpolator()?;

        if thicknesses.len() != names.len() {
            return Err(StackError::Validation {
                what: "thicknesses",
                found: vec![thicknesses.len()],
                expected_from: "layer names",
                expected: vec![names.len()],
            });
        }
        if let Some(layer) = thicknesses.iter().position(|t| !t.is_finite()) {
            return Err(StackError::NonFiniteThickness {
                index: layer,
                value: thicknesses[layer],
            });
        }
        if index.rows() != names.len() {
            return Err(StackError::Validation {
                what: "refractive index samples",
                found: vec![index.rows(), index.x().len()],
                expected_from: "layer names",
                expected: vec![names.len(), index.x().len()],
            });
        }

        log::debug!(
            "constructed {}-layer stack on {} wavelengths",
            names.len(),
            index.x().len()
        );
        Ok(Self {
            names,
            thicknesses,
            index,
            active_layer: None,
        })
    }

    /// A stack with no layers on the given wavelength grid.
    pub fn empty(wavelengths: impl Into<Arc<[f64]>>) -> Result<Self, StackError> {
        let wavelengths: Arc<[f64]> = wavelengths.into();
        let table = Array2::zeros((0, wavelengths.len()));
        Self::new(
            Vec::<String>::new(),
            Vec::new(),
            RefractiveIndexSource::samples(table, wavelengths),
        )
    }

    /// Sample material providers on `wavelengths`, one layer per entry.
    ///
    /// # Arguments
    /// * `layers` - `(name, thickness_nm, material)` per layer, top to bottom.
    /// * `wavelengths` - Grid shared by every layer.
    pub fn from_providers(
        layers: &[(&str, f64, &dyn IndexProvider)],
        wavelengths: impl Into<Arc<[f64]>>,
    ) -> Result<Self, StackError> {
        let wavelengths: Arc<[f64]> = wavelengths.into();
        let rows = layers
            .iter()
            .map(|(_, _, material)| material.sample(&wavelengths))
            .collect::<Result<Vec<_>, _>>()?;
        let table =
            Array2::from_shape_fn((layers.len(), wavelengths.len()), |(i, j)| rows[i][j]);
        Self::new(
            layers.iter().map(|&(name, _, _)| name),
            layers.iter().map(|&(_, thickness, _)| thickness),
            RefractiveIndexSource::samples(table, wavelengths),
        )
    }

    /// Assemble from parts that already satisfy the stack invariants.
    pub(crate) fn from_parts(
        names: Vec<String>,
        thicknesses: Array1<f64>,
        index: TableInterpolator,
        active_layer: Option<usize>,
    ) -> Self {
        debug_assert_eq!(names.len(), thicknesses.len());
        debug_assert_eq!(names.len(), index.rows());
        Self {
            names,
            thicknesses,
            index,
            active_layer,
        }
    }

    /// Mark `layer` as the distinguished (e.g. photoactive) layer.
    ///
    /// Not checked against the layer count.
    pub fn with_active_layer(mut self, layer: usize) -> Self {
        self.active_layer = Some(layer);
        self
    }

    pub fn active_layer(&self) -> Option<usize> {
        self.active_layer
    }

    /// Number of layers.
    pub fn layers(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Layer thicknesses (nm).
    pub fn thicknesses(&self) -> &Array1<f64> {
        &self.thicknesses
    }

    /// The shared wavelength grid (nm).
    pub fn wavelengths(&self) -> &[f64] {
        self.index.x()
    }

    /// Refractive index samples, shape `(layers, wavelengths)`.
    pub fn index_samples(&self) -> &Array2<Complex64> {
        self.index.y()
    }

    /// The interpolator behind [`Self::refractive_index`].
    pub fn interpolator(&self) -> &TableInterpolator {
        &self.index
    }

    /// Complex refractive index of every layer at `wavelength_nm`.
    ///
    /// The result has one entry per layer, ordered like [`Self::names`].
    pub fn refractive_index(&self, wavelength_nm: f64) -> Result<Array1<Complex64>, StackError> {
        Ok(self.index.evaluate(wavelength_nm)?)
    }

    /// `(name, thickness)` record of every layer.
    pub fn signature(&self) -> Vec<LayerSignature> {
        self.names
            .iter()
            .zip(self.thicknesses.iter())
            .map(|(name, &thickness)| LayerSignature::new(name.as_str(), thickness))
            .collect()
    }

    /// One-line structure, e.g. `ITO_200/ PEDOT_50`.
    pub fn compact_repr(&self) -> String {
        signature::render(&self.signature())
    }

    /// One line per layer with the index at the first grid wavelength.
    pub fn detailed_repr(&self) -> String {
        let wavelength = self.index.x()[0].trunc();
        let samples = self.index.y();
        self.signature()
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let n = samples[[i, 0]];
                let sign = if n.im < 0.0 { '-' } else { '+' };
                let class = if n.im > OPAQUE_THRESHOLD {
                    "opaque"
                } else {
                    "transparent"
                };
                format!(
                    "{:>3}  {:<12} {:>6} nm  {:.2}{}{:.2}i at {} nm ({})",
                    i + 1,
                    layer.name,
                    layer.thickness_nm,
                    n.re,
                    sign,
                    n.im.abs(),
                    wavelength,
                    class
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for LayerStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.detailed_repr())
        } else {
            f.write_str(&self.compact_repr())
        }
    }
}
