//! Structural signatures of layers.
//!
//! Two stacks have the same structure when their layers carry the same
//! names and thicknesses in the same order; refractive index data plays no
//! part. Comparison works on whole [`LayerSignature`] records, so a name
//! that is a prefix of another (`ITO_2` vs `ITO_20`) never matches.

use std::fmt;

/// The `(name, thickness)` identity of one layer.
///
/// Thickness is kept at whole-nanometre resolution, truncated toward zero,
/// matching how it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerSignature {
    pub name: String,
    pub thickness_nm: i64,
}

impl LayerSignature {
    pub fn new(name: impl Into<String>, thickness_nm: f64) -> Self {
        Self {
            name: name.into(),
            thickness_nm: thickness_nm.trunc() as i64,
        }
    }
}

impl fmt::Display for LayerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.name, self.thickness_nm)
    }
}

/// Separator between layers in a compact representation.
pub const SEPARATOR: &str = "/ ";

/// Join signatures into the compact `name_thickness/ name_thickness` form.
pub fn render(signatures: &[LayerSignature]) -> String {
    signatures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Layer position of the first occurrence of `needle` in `haystack`.
///
/// An empty needle matches at position 0.
pub fn find_window(haystack: &[LayerSignature], needle: &[LayerSignature]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
