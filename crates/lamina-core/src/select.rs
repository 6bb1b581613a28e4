//! Indexing and slicing of layer stacks.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

use crate::error::StackError;
use crate::stack::LayerStack;

/// Which layers to take from a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// One layer.
    Index(usize),
    /// Contiguous layers `start..end`; `end = None` runs to the last layer.
    Range { start: usize, end: Option<usize> },
}

impl Selector {
    /// Resolve against a stack of `layers` layers.
    pub fn resolve(&self, layers: usize) -> Result<Range<usize>, StackError> {
        match *self {
            Self::Index(index) if index < layers => Ok(index..index + 1),
            Self::Index(index) => Err(StackError::IndexOutOfBounds { index, layers }),
            Self::Range { start, end } => {
                let end = end.unwrap_or(layers);
                if start > end || end > layers {
                    return Err(StackError::RangeOutOfBounds { start, end, layers });
                }
                Ok(start..end)
            }
        }
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Range<usize>> for Selector {
    fn from(range: Range<usize>) -> Self {
        Self::Range {
            start: range.start,
            end: Some(range.end),
        }
    }
}

impl From<RangeInclusive<usize>> for Selector {
    fn from(range: RangeInclusive<usize>) -> Self {
        let (start, end) = range.into_inner();
        Self::Range {
            start,
            end: Some(end.saturating_add(1)),
        }
    }
}

impl From<RangeFrom<usize>> for Selector {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::Range {
            start: range.start,
            end: None,
        }
    }
}

impl From<RangeTo<usize>> for Selector {
    fn from(range: RangeTo<usize>) -> Self {
        Self::Range {
            start: 0,
            end: Some(range.end),
        }
    }
}

impl From<RangeFull> for Selector {
    fn from(_: RangeFull) -> Self {
        Self::Range {
            start: 0,
            end: None,
        }
    }
}

impl LayerStack {
    /// Take one layer or a contiguous run of layers as a new stack.
    ///
    /// An index yields a one-layer stack. The result samples the same
    /// wavelength grid; its index table is a copy.
    ///
    /// # Errors
    /// [`StackError::IndexOutOfBounds`] or [`StackError::RangeOutOfBounds`]
    /// when the selection falls outside `0..layers`.
    pub fn get(&self, selector: impl Into<Selector>) -> Result<LayerStack, StackError> {
        let range = selector.into().resolve(self.layers())?;
        Ok(self.sub(range))
    }

    /// Contiguous sub-stack; `range` must already be in bounds.
    pub(crate) fn sub(&self, range: Range<usize>) -> LayerStack {
        LayerStack::from_parts(
            self.names()[range.clone()].to_vec(),
            self.thicknesses().slice(ndarray::s![range.clone()]).to_owned(),
            self.interpolator().slice_rows(range),
            self.active_layer(),
        )
    }

    /// Layers at the listed positions, in the listed order; positions must be in bounds.
    pub(crate) fn pick(&self, rows: &[usize]) -> LayerStack {
        LayerStack::from_parts(
            rows.iter().map(|&i| self.names()[i].clone()).collect(),
            rows.iter().map(|&i| self.thicknesses()[i]).collect(),
            self.interpolator().select_rows(rows),
            self.active_layer(),
        )
    }
}
