//! Structural algebra on layer stacks.
//!
//! | Operation | Method | Operator |
//! |-----------|--------|----------|
//! | Concatenation | [`LayerStack::concat`] | `&a + &b` |
//! | Repetition | [`LayerStack::repeat`] | `&a * k` |
//! | Sub-stack removal | [`LayerStack::remove_substack`] | `&a - &b` |
//! | Period extraction | [`LayerStack::extract_period`] | `&a / k` |
//! | Structural equality | [`LayerStack::structurally_eq`] | `a == b` |
//!
//! Equality and containment compare layer signatures (name and whole-nm
//! thickness) only. Stacks combined with `+` or `-` must share one
//! wavelength grid; no resampling is attempted.

use std::ops::{Add, Div, Mul, Sub};

use ndarray::Array1;

use crate::error::StackError;
use crate::signature::find_window;
use crate::stack::LayerStack;

impl LayerStack {
    fn require_same_grid(&self, other: &LayerStack) -> Result<(), StackError> {
        if self.interpolator().same_grid(other.interpolator()) {
            Ok(())
        } else {
            Err(StackError::GridMismatch {
                left: self.wavelengths().to_vec(),
                right: other.wavelengths().to_vec(),
            })
        }
    }

    /// Layers of `self` followed by layers of `other`.
    ///
    /// The result keeps `self`'s active layer.
    ///
    /// # Errors
    /// [`StackError::GridMismatch`] if the two stacks sample different
    /// wavelengths, [`StackError::InterpolationMismatch`] if they interpolate
    /// between samples differently.
    pub fn concat(&self, other: &LayerStack) -> Result<LayerStack, StackError> {
        self.require_same_grid(other)?;
        let (left, right) = (self.interpolator().kind(), other.interpolator().kind());
        if left != right {
            return Err(StackError::InterpolationMismatch { left, right });
        }
        log::debug!("concat \"{}\" + \"{}\"", self, other);

        let names = self.names().iter().chain(other.names()).cloned().collect();
        let thicknesses = self
            .thicknesses()
            .iter()
            .chain(other.thicknesses())
            .copied()
            .collect::<Array1<f64>>();
        let index = self.interpolator().stack_rows(other.interpolator())?;
        Ok(LayerStack::from_parts(names, thicknesses, index, self.active_layer()))
    }

    /// `copies` back-to-back copies of this stack.
    ///
    /// Zero copies gives an empty stack on the same wavelength grid; one copy
    /// is a plain structural copy.
    pub fn repeat(&self, copies: usize) -> LayerStack {
        log::debug!("repeat \"{}\" x{}", self, copies);
        let rows: Vec<usize> = (0..copies).flat_map(|_| 0..self.layers()).collect();
        self.pick(&rows)
    }

    /// Remove the first occurrence of `substack` from this stack.
    ///
    /// The occurrence is located by comparing layer signatures and must
    /// start on a layer boundary. Its layers are removed one at a time from
    /// the last to the first, on a copy of `self`.
    ///
    /// # Errors
    /// [`StackError::SubstackNotFound`] if `substack` does not occur, and
    /// [`StackError::GridMismatch`] if the grids differ.
    pub fn remove_substack(&self, substack: &LayerStack) -> Result<LayerStack, StackError> {
        self.require_same_grid(substack)?;
        let start = find_window(&self.signature(), &substack.signature()).ok_or_else(|| {
            StackError::SubstackNotFound {
                structure: self.compact_repr(),
                substack: substack.compact_repr(),
            }
        })?;
        log::debug!(
            "removing \"{}\" from \"{}\" at layer {}",
            substack,
            self,
            start
        );

        let mut result = self.clone();
        for index in (start..start + substack.layers()).rev() {
            result.remove(index)?;
        }
        Ok(result)
    }

    /// The repeating unit of a stack made of `periods` identical runs.
    ///
    /// # Errors
    /// [`StackError::ZeroDivisor`] for `periods == 0`,
    /// [`StackError::NotDivisible`] if the layer count is not a multiple of
    /// `periods`, and [`StackError::NotPeriodic`] if the runs differ.
    pub fn extract_period(&self, periods: usize) -> Result<LayerStack, StackError> {
        if periods == 0 {
            return Err(StackError::ZeroDivisor);
        }
        let layers = self.layers();
        if layers % periods != 0 {
            return Err(StackError::NotDivisible {
                layers,
                divisor: periods,
            });
        }

        let unit = layers / periods;
        let signature = self.signature();
        let first = &signature[..unit];
        let periodic = (1..periods).all(|i| &signature[i * unit..(i + 1) * unit] == first);
        if !periodic {
            return Err(StackError::NotPeriodic { divisor: periods });
        }
        log::debug!("\"{}\" has period of {} layers", self, unit);
        Ok(self.sub(0..unit))
    }

    /// Split off layer `index`.
    ///
    /// Returns `(removed, remaining)`; `self` is unchanged.
    pub fn pop(&self, index: usize) -> Result<(LayerStack, LayerStack), StackError> {
        let mut remaining = self.clone();
        let removed = remaining.remove(index)?;
        Ok((removed, remaining))
    }

    /// Remove layer `index` in place and return it as a one-layer stack.
    ///
    /// # Errors
    /// [`StackError::IndexOutOfBounds`] when `index >= layers`.
    pub fn remove(&mut self, index: usize) -> Result<LayerStack, StackError> {
        let removed = self.get(index)?;
        log::trace!("removing layer {} ({})", index, removed);

        let mut names = self.names().to_vec();
        names.remove(index);
        let thicknesses: Array1<f64> = self
            .thicknesses()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, &t)| t)
            .collect();
        let index_table = self.interpolator().remove_row(index);

        *self = LayerStack::from_parts(names, thicknesses, index_table, self.active_layer());
        Ok(removed)
    }

    /// Reverse the layer order in place.
    pub fn reverse(&mut self) -> &mut Self {
        *self = self.reversed();
        self
    }

    /// Copy with the layer order reversed.
    pub fn reversed(&self) -> LayerStack {
        let mut names = self.names().to_vec();
        names.reverse();
        LayerStack::from_parts(
            names,
            self.thicknesses().slice(ndarray::s![..;-1]).to_owned(),
            self.interpolator().reversed_rows(),
            self.active_layer(),
        )
    }

    /// Same names and thicknesses in the same order.
    ///
    /// Refractive index data is not compared.
    pub fn structurally_eq(&self, other: &LayerStack) -> bool {
        self.signature() == other.signature()
    }
}

impl PartialEq for LayerStack {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl Add for &LayerStack {
    type Output = Result<LayerStack, StackError>;

    fn add(self, rhs: &LayerStack) -> Self::Output {
        self.concat(rhs)
    }
}

impl Mul<usize> for &LayerStack {
    type Output = LayerStack;

    fn mul(self, copies: usize) -> LayerStack {
        self.repeat(copies)
    }
}

impl Sub for &LayerStack {
    type Output = Result<LayerStack, StackError>;

    fn sub(self, rhs: &LayerStack) -> Self::Output {
        self.remove_substack(rhs)
    }
}

/// Floor division: the repeating unit of the stack.
impl Div<usize> for &LayerStack {
    type Output = Result<LayerStack, StackError>;

    fn div(self, periods: usize) -> Self::Output {
        self.extract_period(periods)
    }
}
