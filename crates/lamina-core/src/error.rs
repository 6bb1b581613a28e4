//! Errors raised by layer stack construction and algebra.

use lamina_materials::{Interpolation, MaterialError};
use thiserror::Error;

/// Errors that can occur while building or combining layer stacks.
#[derive(Debug, Error)]
pub enum StackError {
    #[error("{what} has shape {found:?} but {expected_from} implies {expected:?}")]
    Validation {
        what: &'static str,
        found: Vec<usize>,
        expected_from: &'static str,
        expected: Vec<usize>,
    },

    #[error("refractive index samples must have at most 2 dimensions, got {ndim}")]
    Dimension { ndim: usize },

    #[error("index {index} is out of bounds for a stack of {layers} layers")]
    IndexOutOfBounds { index: usize, layers: usize },

    #[error("range {start}..{end} is out of bounds for a stack of {layers} layers")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        layers: usize,
    },

    #[error("the structure \"{structure}\" does not include \"{substack}\"")]
    SubstackNotFound { structure: String, substack: String },

    #[error("a stack of {layers} layers cannot be divided evenly by {divisor}")]
    NotDivisible { layers: usize, divisor: usize },

    #[error("the stack is not periodic with {divisor} repeats")]
    NotPeriodic { divisor: usize },

    #[error("cannot divide a stack into 0 periods")]
    ZeroDivisor,

    #[error("wavelength grids differ: {left:?} vs {right:?}")]
    GridMismatch { left: Vec<f64>, right: Vec<f64> },

    #[error("interpolation schemes differ: {left:?} vs {right:?}")]
    InterpolationMismatch {
        left: Interpolation,
        right: Interpolation,
    },

    #[error("layer {index} has non-finite thickness {value}")]
    NonFiniteThickness { index: usize, value: f64 },

    #[error("refractive index error: {0}")]
    Material(#[from] MaterialError),

    #[error("invalid stack configuration: {0}")]
    Config(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
