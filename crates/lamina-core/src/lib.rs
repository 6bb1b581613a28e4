//! # Lamina Core
//!
//! Thin-film layer stacks for transfer-matrix optics. A
//! [`LayerStack`](stack::LayerStack) holds layer names, thicknesses and a
//! complex refractive index table sampled on one wavelength grid, and
//! supports a small structural algebra for assembling device stacks:
//!
//! ```text
//! let cell = (&(&electrode + &active)? * 3);   // three repeats
//! let unit = (&cell / 3)?;                     // recover the repeat unit
//! let bare = (&cell - &electrode)?;            // drop the first electrode
//! ```
//!
//! ## Modules
//!
//! - [`stack`] — The layer stack type, construction and representations.
//! - [`source`] — Refractive index inputs (raw samples or prebuilt interpolators).
//! - [`select`] — Indexing and slicing.
//! - [`algebra`] — Concatenation, repetition, removal, periodicity, reversal.
//! - [`signature`] — Structural `(name, thickness)` records.
//! - [`config`] — TOML stack descriptions.
//! - [`error`] — The [`StackError`](error::StackError) type.

pub mod algebra;
pub mod config;
pub mod error;
pub mod select;
pub mod signature;
pub mod source;
pub mod stack;

pub use error::StackError;
pub use select::Selector;
pub use source::RefractiveIndexSource;
pub use stack::LayerStack;
