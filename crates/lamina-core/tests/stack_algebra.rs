//! Integration tests for layer stack construction and algebra.
//!
//! Covers the algebraic laws the stack type guarantees:
//! - construction counts layers and rejects mismatched inputs
//! - indexing yields one-layer stacks matching the parent's structure
//! - concatenation, repetition and period extraction compose as expected
//! - removal of any contiguous sub-stack succeeds
//! - equality ignores refractive index data

use approx::assert_relative_eq;
use ndarray::{array, Array2};
use num_complex::Complex64;

use lamina_core::signature::SEPARATOR;
use lamina_core::{LayerStack, RefractiveIndexSource, StackError};
use lamina_materials::tabulated::{ConstantMaterial, TabulatedMaterial};
use lamina_materials::{IndexProvider, Interpolation};

// ─────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

const GRID: [f64; 3] = [300.0, 500.0, 700.0];

/// The ITO / PEDOT anode used throughout.
fn ito_pedot() -> LayerStack {
    LayerStack::new(
        ["ITO", "PEDOT"],
        [200.0, 50.0],
        RefractiveIndexSource::samples(
            array![
                [c(1.5, 0.001), c(1.5, 0.0001), c(1.6, 0.0001)],
                [c(1.3, 0.05), c(1.4, 0.05), c(1.5, 0.05)],
            ],
            GRID.to_vec(),
        ),
    )
    .unwrap()
    .with_active_layer(2)
}

/// Stack with every index equal to `n`.
fn uniform(layers: &[(&str, f64)], n: Complex64) -> LayerStack {
    LayerStack::new(
        layers.iter().map(|&(name, _)| name),
        layers.iter().map(|&(_, t)| t),
        RefractiveIndexSource::samples(
            Array2::from_elem((layers.len(), GRID.len()), n),
            GRID.to_vec(),
        ),
    )
    .unwrap()
}

fn solar_cell() -> LayerStack {
    uniform(
        &[
            ("glass", 1000.0),
            ("ITO", 150.0),
            ("PEDOT", 40.0),
            ("P3HT:PCBM", 90.0),
            ("Ca", 5.0),
            ("Al", 100.0),
        ],
        c(1.5, 0.0),
    )
}

// ─────────────────────────────────────────────────────────────
// Worked example
// ─────────────────────────────────────────────────────────────

#[test]
fn test_ito_pedot_example() {
    init_logging();
    let stack = ito_pedot();
    assert_eq!(stack.layers(), 2);
    assert_eq!(stack.compact_repr(), "ITO_200/ PEDOT_50");

    let detail = stack.detailed_repr();
    let lines: Vec<&str> = detail.lines().collect();
    assert!(lines[0].ends_with("(transparent)"), "{}", lines[0]);
    assert!(lines[1].ends_with("(transparent)"), "{}", lines[1]);

    let tripled = stack.repeat(3);
    assert_eq!(tripled.layers(), 6);
    assert_eq!(tripled.extract_period(3).unwrap(), stack);
    assert_eq!(tripled.active_layer(), Some(2));
}

#[test]
fn test_index_at_grid_points_feeds_solver_in_layer_order() {
    let stack = ito_pedot();
    for (col, &wl) in GRID.iter().enumerate() {
        let n = stack.refractive_index(wl).unwrap();
        assert_eq!(n.len(), stack.layers());
        for layer in 0..stack.layers() {
            let expected = stack.index_samples()[[layer, col]];
            assert_relative_eq!(n[layer].re, expected.re, epsilon = 1e-12);
            assert_relative_eq!(n[layer].im, expected.im, epsilon = 1e-12);
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────

#[test]
fn test_construction_layer_count_matches_names() {
    for layers in 0..5 {
        let layout: Vec<(String, f64)> = (0..layers)
            .map(|i| (format!("L{}", i), 10.0 * i as f64))
            .collect();
        let names: Vec<&str> = layout.iter().map(|(n, _)| n.as_str()).collect();
        let stack = LayerStack::new(
            names.clone(),
            layout.iter().map(|&(_, t)| t),
            RefractiveIndexSource::samples(
                Array2::from_elem((layers, 3), c(1.0, 0.0)),
                GRID.to_vec(),
            ),
        )
        .unwrap();
        assert_eq!(stack.layers(), names.len());
    }
}

#[test]
fn test_construction_rejects_mismatched_lengths() {
    let table = Array2::from_elem((2, 3), c(1.0, 0.0));
    let cases: [(Vec<&str>, Vec<f64>); 3] = [
        (vec!["a"], vec![1.0, 2.0]),
        (vec!["a", "b"], vec![1.0]),
        (vec!["a", "b", "c"], vec![1.0, 2.0, 3.0]),
    ];
    for (names, thicknesses) in cases {
        let err = LayerStack::new(
            names,
            thicknesses,
            RefractiveIndexSource::samples(table.clone(), GRID.to_vec()),
        )
        .unwrap_err();
        assert!(matches!(err, StackError::Validation { .. }), "{}", err);
    }
}

#[test]
fn test_construction_rejects_non_finite_thickness() {
    let table = Array2::from_elem((2, 3), c(1.0, 0.0));
    for bad in [f64::NAN, f64::INFINITY] {
        let err = LayerStack::new(
            ["ITO", "PEDOT"],
            [bad, 50.0],
            RefractiveIndexSource::samples(table.clone(), GRID.to_vec()),
        )
        .unwrap_err();
        assert!(matches!(err, StackError::NonFiniteThickness { index: 0, .. }), "{}", err);
    }
}

#[test]
fn test_construction_from_rows_and_spline() {
    let source = RefractiveIndexSource::from_rows(
        vec![vec![c(2.0, 0.1), c(1.9, 0.05), c(1.8, 0.0)]],
        GRID.to_vec(),
    )
    .unwrap()
    .interpolated(Interpolation::CubicSpline);
    let stack = LayerStack::new(["TiO2"], [60.0], source).unwrap();
    assert_relative_eq!(stack.refractive_index(500.0).unwrap()[0].re, 1.9, epsilon = 1e-12);
}

#[test]
fn test_construction_from_material_providers() {
    let ito = TabulatedMaterial::from_nk_table(
        "ITO",
        &[(300.0, 2.1, 0.08), (500.0, 1.96, 0.004), (700.0, 1.83, 0.006)],
    )
    .unwrap();
    let air = ConstantMaterial::vacuum();
    let ito_ref: &dyn IndexProvider = &ito;
    let air_ref: &dyn IndexProvider = &air;
    let stack = LayerStack::from_providers(
        &[("air", 0.0, air_ref), ("ITO", 150.0, ito_ref)],
        GRID.to_vec(),
    )
    .unwrap();
    assert_eq!(stack.compact_repr(), "air_0/ ITO_150");
    let n = stack.refractive_index(500.0).unwrap();
    assert_relative_eq!(n[0].re, 1.0);
    assert_relative_eq!(n[1].re, 1.96, epsilon = 1e-12);
}

// ─────────────────────────────────────────────────────────────
// Indexing
// ─────────────────────────────────────────────────────────────

#[test]
fn test_indexing_round_trip() {
    let stack = solar_cell();
    let parts: Vec<String> = stack
        .compact_repr()
        .split(SEPARATOR)
        .map(str::to_owned)
        .collect();
    for i in 0..stack.layers() {
        let layer = stack.get(i).unwrap();
        assert_eq!(layer.layers(), 1);
        assert_eq!(layer.compact_repr(), parts[i]);
        assert_eq!(layer.wavelengths(), stack.wavelengths());
    }
    assert!(matches!(
        stack.get(stack.layers()),
        Err(StackError::IndexOutOfBounds { .. })
    ));
}

#[test]
fn test_slicing_copies_table() {
    let stack = solar_cell();
    let active = stack.get(2..4).unwrap();
    assert_eq!(active.compact_repr(), "PEDOT_40/ P3HT:PCBM_90");
    assert_eq!(stack.get(..).unwrap(), stack);
    assert!(stack.get(4..7).is_err());
    assert!(matches!(
        stack.get(0..=usize::MAX),
        Err(StackError::RangeOutOfBounds { .. })
    ));

    // Mutating the slice leaves the parent alone.
    let mut reversed = active.clone();
    reversed.reverse();
    assert_eq!(stack.get(2..4).unwrap(), active);
}

// ─────────────────────────────────────────────────────────────
// Algebra
// ─────────────────────────────────────────────────────────────

#[test]
fn test_concatenation_identity() {
    init_logging();
    let a = ito_pedot();
    let b = solar_cell();
    let ab = (&a + &b).unwrap();
    assert_eq!(ab.layers(), a.layers() + b.layers());
    assert_eq!(
        ab.compact_repr(),
        format!("{}{}{}", a.compact_repr(), SEPARATOR, b.compact_repr())
    );
}

#[test]
fn test_concatenation_requires_same_interpolation() {
    let linear = ito_pedot();
    let spline = LayerStack::new(
        ["TiO2"],
        [60.0],
        RefractiveIndexSource::samples(array![c(2.6, 0.0), c(2.4, 0.0), c(2.3, 0.0)], GRID.to_vec())
            .interpolated(Interpolation::CubicSpline),
    )
    .unwrap();
    assert!(matches!(
        &linear + &spline,
        Err(StackError::InterpolationMismatch {
            left: Interpolation::Linear,
            right: Interpolation::CubicSpline
        })
    ));
    let joined = (&spline + &spline).unwrap();
    assert_eq!(joined.interpolator().kind(), Interpolation::CubicSpline);
}

#[test]
fn test_repetition_law() {
    let a = ito_pedot();
    for k in 1..5 {
        let expected = vec![a.compact_repr(); k].join(SEPARATOR);
        assert_eq!((&a * k).compact_repr(), expected);
    }
    assert!((&a * 0).is_empty());
}

#[test]
fn test_subtraction_of_any_contiguous_substack() {
    let a = solar_cell();
    for start in 0..a.layers() {
        for end in start..=a.layers() {
            let b = a.get(start..end).unwrap();
            let rest = (&a - &b).unwrap();
            assert_eq!(rest.layers(), a.layers() - b.layers());
        }
    }
}

#[test]
fn test_subtraction_of_foreign_substack_fails() {
    let a = solar_cell();
    let b = ito_pedot();
    assert!(matches!(&a - &b, Err(StackError::SubstackNotFound { .. })));
}

#[test]
fn test_periodicity() {
    let units = [ito_pedot(), solar_cell(), solar_cell().get(1..2).unwrap()];
    for unit in &units {
        let period = (&(unit * 3) / 3).unwrap();
        assert_eq!(&period, unit);
    }
}

#[test]
fn test_equality_ignores_index_data() {
    let layers = [("SiO2", 100.0), ("TiO2", 60.0)];
    let a = uniform(&layers, c(1.45, 0.0));
    let b = uniform(&layers, c(2.4, 0.3));
    assert_eq!(a, b);
    assert_ne!(a, a.reversed());
}

#[test]
fn test_bragg_mirror_assembly() {
    let pair = uniform(&[("SiO2", 94.0), ("TiO2", 58.0)], c(1.5, 0.0));
    let cap = uniform(&[("Ag", 30.0)], c(0.05, 3.0));
    let mirror = (&(&pair * 5) + &cap).unwrap();
    assert_eq!(mirror.layers(), 11);
    assert!(mirror.detailed_repr().lines().last().unwrap().ends_with("(opaque)"));

    let without_cap = (&mirror - &cap).unwrap();
    assert_eq!((&without_cap / 5).unwrap(), pair);
    assert!(matches!(&mirror / 5, Err(StackError::NotDivisible { .. })));

    let (top, rest) = without_cap.pop(0).unwrap();
    assert_eq!(top.compact_repr(), "SiO2_94");
    assert_eq!(rest.layers(), 9);
}

// ─────────────────────────────────────────────────────────────
// Empty stacks
// ─────────────────────────────────────────────────────────────

#[test]
fn test_empty_stack_period_is_empty() {
    let empty = LayerStack::empty(GRID.to_vec()).unwrap();
    let period = empty.extract_period(3).unwrap();
    assert!(period.is_empty());
    assert_eq!(period.wavelengths(), &GRID);
}

#[test]
fn test_empty_stack_selection_out_of_bounds() {
    let empty = LayerStack::empty(GRID.to_vec()).unwrap();
    assert!(matches!(
        empty.get(0..1),
        Err(StackError::RangeOutOfBounds {
            start: 0,
            end: 1,
            layers: 0
        })
    ));
    assert!(matches!(
        empty.get(0),
        Err(StackError::IndexOutOfBounds { index: 0, layers: 0 })
    ));
    assert!(empty.get(..).unwrap().is_empty());
}
