//! Tests for boundary-weight fields and spectral diagnostics.
//!
//! These tests verify the standalone evaluation views of a configured
//! window:
//! - Boundary weights per mode, with and without dimension collapse
//! - Tap profiles and frequency responses
//!
//! ## Test Organization
//!
//! 1. **Boundary Weights** - interior unity, edge attenuation, drop_dims
//! 2. **Tap Profiles** - offsets and coefficients
//! 3. **Frequency Response** - DC normalization, grid scaling

use approx::assert_relative_eq;
use ndarray::{ArrayD, IxDyn};

use ndfir::prelude::*;

fn ones_1d(n: usize) -> LabeledArray<f64> {
    LabeledArray::new(ArrayD::from_elem(IxDyn(&[n]), 1.0), ["x"]).unwrap()
}

// ============================================================================
// Boundary Weight Tests
// ============================================================================

/// With reflect mode and no missing values, the weight field is exactly 1
/// everywhere: reflection pads with present cells.
#[test]
fn test_reflect_weights_all_present() {
    let array = ones_1d(12);
    let window = Filter::new().dims(["x"]).order(5).build(&array).unwrap();

    let weights = window.boundary_weights(BoundaryMode::Reflect, &[]).unwrap();
    for &w in weights.data().iter() {
        assert_relative_eq!(w, 1.0, epsilon = 1e-12);
    }
}

/// With zero padding, edge cells lose exactly the out-of-domain share of the
/// kernel; cells beyond the halo keep weight 1.
#[test]
fn test_zero_mode_edge_attenuation() {
    let array = ones_1d(10);
    let window = Filter::new().dims(["x"]).order(3).build(&array).unwrap();

    let weights = window.boundary_weights(BoundaryMode::Zero, &[]).unwrap();
    let w = weights.data().as_slice().unwrap().to_vec();
    assert_relative_eq!(w[0], 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(w[9], 2.0 / 3.0, epsilon = 1e-12);
    for &wi in &w[1..9] {
        assert_relative_eq!(wi, 1.0, epsilon = 1e-12);
    }
}

/// Weights are nulled where the input itself is missing.
#[test]
fn test_weights_nulled_on_missing() {
    let mut data = ArrayD::from_elem(IxDyn(&[8]), 1.0);
    data[[3]] = f64::NAN;
    let array = LabeledArray::new(data, ["x"]).unwrap();
    let window = Filter::new().dims(["x"]).order(3).build(&array).unwrap();

    let weights = window.boundary_weights(BoundaryMode::Reflect, &[]).unwrap();
    let w = weights.data().as_slice().unwrap();
    assert!(w[3].is_nan());
    assert_relative_eq!(w[2], 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(w[4], 2.0 / 3.0, epsilon = 1e-12);
}

/// Dropping a constant non-filtering dimension collapses the field to the
/// surviving dims and keeps their coordinates.
#[test]
fn test_drop_dims_collapse() {
    let data = ArrayD::from_elem(IxDyn(&[6, 4]), 1.0);
    let array = LabeledArray::new(data, ["x", "y"])
        .unwrap()
        .with_coord("x", vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])
        .unwrap();
    let window = Filter::new().dims(["x"]).order(3).build(&array).unwrap();

    let weights = window.boundary_weights(BoundaryMode::Zero, &["y"]).unwrap();
    assert_eq!(weights.dims(), &["x"]);
    assert_eq!(weights.name(), Some("boundary_weights"));
    assert_eq!(weights.shape(), &[6]);
    assert!(weights.coord("x").is_some());
}

/// Filtering dimensions cannot be dropped.
#[test]
fn test_drop_filtering_dim_rejected() {
    let data = ArrayD::from_elem(IxDyn(&[6, 4]), 1.0);
    let array = LabeledArray::new(data, ["x", "y"]).unwrap();
    let window = Filter::new().dims(["x"]).order(3).build(&array).unwrap();

    assert!(matches!(
        window.boundary_weights(BoundaryMode::Zero, &["x"]),
        Err(FilterError::UnsupportedArgument(_))
    ));
}

// ============================================================================
// Tap Profile Tests
// ============================================================================

/// Tap profiles report symmetric offsets and the raw window coefficients.
#[test]
fn test_tap_profile() {
    let array = ones_1d(20);
    let window = Filter::new().dims(["x"]).order(5).build(&array).unwrap();

    let profile = window.taps("x").unwrap();
    assert_eq!(profile.offsets, vec![-2, -1, 0, 1, 2]);
    for &c in &profile.coefficients {
        assert_relative_eq!(c, 1.0, epsilon = 1e-12);
    }
}

/// Tap profiles require a filtering dimension.
#[test]
fn test_tap_profile_requires_filtering_dim() {
    let data = ArrayD::from_elem(IxDyn(&[6, 4]), 1.0);
    let array = LabeledArray::new(data, ["x", "y"]).unwrap();
    let window = Filter::new().dims(["x"]).order(3).build(&array).unwrap();

    assert!(matches!(
        window.taps("y"),
        Err(FilterError::UnsupportedArgument(_))
    ));
    assert!(matches!(
        window.taps("q"),
        Err(FilterError::UnknownDimension { .. })
    ));
}

// ============================================================================
// Frequency Response Tests
// ============================================================================

/// A low-pass response peaks (0 dB) at zero frequency, which sits at the
/// center of the shifted grid.
#[test]
fn test_response_dc_peak() {
    let array = ones_1d(20);
    let window = Filter::new().dims(["x"]).order(5).build(&array).unwrap();

    let response = window.frequency_response("x", 64).unwrap();
    assert_eq!(response.freqs.len(), 64);
    assert_eq!(response.magnitude_db.len(), 64);

    let center = 32;
    assert_relative_eq!(response.freqs[center], 0.0, epsilon = 1e-12);
    assert_relative_eq!(response.magnitude_db[center], 0.0, epsilon = 1e-9);
    for &db in &response.magnitude_db {
        assert!(db <= 1e-9);
    }
}

/// The frequency grid scales with the dimension's sample spacing.
#[test]
fn test_response_grid_scaling() {
    let data = ArrayD::from_elem(IxDyn(&[16]), 1.0);
    let array = LabeledArray::new(data, ["t"])
        .unwrap()
        .with_coord("t", (0..16).map(|i| f64::from(i) * 0.5).collect())
        .unwrap();
    let window = Filter::new().dims(["t"]).order(5).build(&array).unwrap();

    let response = window.frequency_response("t", 32).unwrap();
    // Nyquist for spacing 0.5 is 1.0; the grid spans [-1, 1).
    assert_relative_eq!(response.freqs[0], -1.0, epsilon = 1e-12);
    let df = response.freqs[1] - response.freqs[0];
    assert_relative_eq!(df, 2.0 / 32.0, epsilon = 1e-12);
}

/// nfft must cover the tap count.
#[test]
fn test_response_nfft_too_small() {
    let array = ones_1d(20);
    let window = Filter::new().dims(["x"]).order(9).build(&array).unwrap();
    assert!(matches!(
        window.frequency_response("x", 4),
        Err(FilterError::InvalidInput(_))
    ));
}
