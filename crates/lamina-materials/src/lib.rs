//! # Lamina Materials
//!
//! Refractive index data for the Lamina thin-film framework. This crate
//! provides the interpolation machinery that turns tabulated complex
//! refractive indices into continuous functions of wavelength, plus a small
//! set of material providers.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`interp`] | [`TableInterpolator`](interp::TableInterpolator): one shared wavelength grid, one complex row per layer |
//! | [`spline`] | Natural cubic splines over real or complex samples |
//! | [`provider`] | The [`IndexProvider`](provider::IndexProvider) trait and [`MaterialError`](provider::MaterialError) |
//! | [`tabulated`] | `(λ, n, k)` tables and non-dispersive media |
//!
//! ## Interpolation
//!
//! Tables are interpolated piecewise-linearly by default. Natural cubic
//! splines ([`spline::CubicSpline`]) are available where smoother curves
//! are needed between data points.

pub mod interp;
pub mod provider;
pub mod spline;
pub mod tabulated;

pub use interp::{Interpolation, TableInterpolator};
pub use provider::{IndexProvider, MaterialError};
