//! TOML description of a layer stack.
//!
//! ```toml
//! active_layer = 2
//! interpolation = "linear"
//!
//! [wavelengths]
//! values = [300.0, 500.0, 700.0]
//!
//! [[layer]]
//! name = "ITO"
//! thickness = 200.0
//! n = [1.5, 1.5, 1.6]
//! k = [0.001, 0.0001, 0.0001]
//!
//! [[layer]]
//! name = "PEDOT"
//! thickness = 50.0
//! n = 1.4
//! k = 0.05
//! ```

use std::path::Path;

use lamina_materials::Interpolation;
use num_complex::Complex64;
use serde::Deserialize;

use crate::error::StackError;
use crate::source::RefractiveIndexSource;
use crate::stack::LayerStack;

/// Top-level stack configuration.
#[derive(Debug, Deserialize)]
pub struct StackConfig {
    pub wavelengths: WavelengthSpec,
    #[serde(default)]
    pub interpolation: InterpolationKind,
    #[serde(default)]
    pub active_layer: Option<usize>,
    #[serde(default, rename = "layer")]
    pub layers: Vec<LayerConfig>,
}

/// Wavelength specification: either a range or explicit list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WavelengthSpec {
    Range { range: [f64; 2], points: usize },
    List { values: Vec<f64> },
}

impl WavelengthSpec {
    /// The wavelengths this specification describes (nm).
    pub fn grid(&self) -> Vec<f64> {
        match self {
            Self::Range { range, points } => {
                let [start, end] = *range;
                let steps = points.saturating_sub(1).max(1) as f64;
                (0..*points)
                    .map(|i| start + (end - start) * i as f64 / steps)
                    .collect()
            }
            Self::List { values } => values.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationKind {
    #[default]
    Linear,
    CubicSpline,
}

impl From<InterpolationKind> for Interpolation {
    fn from(kind: InterpolationKind) -> Self {
        match kind {
            InterpolationKind::Linear => Interpolation::Linear,
            InterpolationKind::CubicSpline => Interpolation::CubicSpline,
        }
    }
}

/// A single layer.
#[derive(Debug, Deserialize)]
pub struct LayerConfig {
    pub name: String,
    /// Thickness in nm.
    pub thickness: f64,
    /// Real part of the refractive index.
    pub n: IndexValues,
    /// Extinction coefficient (default: 0).
    #[serde(default)]
    pub k: IndexValues,
}

/// One value for the whole grid, or one per grid wavelength.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IndexValues {
    Constant(f64),
    PerWavelength(Vec<f64>),
}

impl Default for IndexValues {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

impl IndexValues {
    fn expand(&self, layer: &str, part: &str, points: usize) -> Result<Vec<f64>, StackError> {
        match self {
            Self::Constant(value) => Ok(vec![*value; points]),
            Self::PerWavelength(values) if values.len() == points => Ok(values.clone()),
            Self::PerWavelength(values) => Err(StackError::Config(format!(
                "layer '{}' has {} {} values but the grid has {} wavelengths",
                layer,
                values.len(),
                part,
                points
            ))),
        }
    }
}

impl StackConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, StackError> {
        toml::from_str(content).map_err(|e| StackError::Config(e.to_string()))
    }

    /// Build the described stack.
    pub fn build(&self) -> Result<LayerStack, StackError> {
        let grid = self.wavelengths.grid();
        let rows = self
            .layers
            .iter()
            .map(|layer| -> Result<Vec<Complex64>, StackError> {
                let n = layer.n.expand(&layer.name, "n", grid.len())?;
                let k = layer.k.expand(&layer.name, "k", grid.len())?;
                Ok(n.into_iter()
                    .zip(k)
                    .map(|(n, k)| Complex64::new(n, k))
                    .collect())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let source =
            RefractiveIndexSource::from_rows(rows, grid)?.interpolated(self.interpolation.into());
        let stack = LayerStack::new(
            self.layers.iter().map(|layer| layer.name.as_str()),
            self.layers.iter().map(|layer| layer.thickness),
            source,
        )?;
        Ok(match self.active_layer {
            Some(layer) => stack.with_active_layer(layer),
            None => stack,
        })
    }
}

/// Load and parse a TOML stack configuration file.
pub fn load_config(path: &Path) -> Result<StackConfig, StackError> {
    let content = std::fs::read_to_string(path)?;
    StackConfig::from_toml_str(&content)
}
