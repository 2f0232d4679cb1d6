//! Tests for the window-function catalog.
//!
//! These tests verify the 1-D coefficient generators behind kernel
//! construction:
//! - The custom Lanczos window (symmetry, center value, odd-length contract)
//! - Standard cosine-sum and polygonal windows
//! - Name-based lookup and aliases
//!
//! ## Test Organization
//!
//! 1. **Lanczos Window** - closed-form taps, symmetry, center value
//! 2. **Standard Windows** - boxcar, triangle, Hann, Hamming, Blackman
//! 3. **Length Contract** - odd positive lengths only
//! 4. **Name Lookup** - parsing and aliases

use approx::assert_relative_eq;

use ndfir::prelude::*;

// ============================================================================
// Lanczos Window Tests
// ============================================================================

/// The Lanczos center tap equals 2*fc for every odd length and cutoff.
#[test]
fn test_lanczos_center_value() {
    for &n in &[3usize, 5, 9, 21] {
        for &fc in &[0.05, 0.1, 0.25, 0.45] {
            let w = WindowFunction::Lanczos { cutoff: fc }
                .coefficients::<f64>(n)
                .unwrap();
            assert_eq!(w.len(), n);
            assert_relative_eq!(w[(n - 1) / 2], 2.0 * fc, max_relative = 1e-12);
        }
    }
}

/// Lanczos windows are symmetric: w[i] == w[n-1-i].
#[test]
fn test_lanczos_symmetry() {
    for &n in &[5usize, 9, 31] {
        for &fc in &[0.02, 0.1, 0.4] {
            let w = WindowFunction::Lanczos { cutoff: fc }
                .coefficients::<f64>(n)
                .unwrap();
            for i in 0..n {
                assert_relative_eq!(w[i], w[n - 1 - i], max_relative = 1e-12);
            }
        }
    }
}

/// Lanczos off-center taps follow sinc(2*fc*k) * sinc(k / (n/2)).
#[test]
fn test_lanczos_formula() {
    let n = 9;
    let fc = 0.1;
    let w = WindowFunction::Lanczos { cutoff: fc }
        .coefficients::<f64>(n)
        .unwrap();

    let sinc = |x: f64| {
        if x == 0.0 {
            1.0
        } else {
            (std::f64::consts::PI * x).sin() / (std::f64::consts::PI * x)
        }
    };
    for (i, &wi) in w.iter().enumerate() {
        let k = i as f64 - 4.0;
        if k != 0.0 {
            let expected = sinc(2.0 * fc * k) * sinc(k / 4.5);
            assert_relative_eq!(wi, expected, max_relative = 1e-12);
        }
    }
}

// ============================================================================
// Standard Window Tests
// ============================================================================

/// Boxcar windows are all ones.
#[test]
fn test_boxcar_all_ones() {
    let w = WindowFunction::Boxcar.coefficients::<f64>(7).unwrap();
    assert!(w.iter().all(|&v| v == 1.0));
}

/// Triangle window values on a 5-point grid.
#[test]
fn test_triangle_values() {
    let w = WindowFunction::Triangle.coefficients::<f64>(5).unwrap();
    let expected = [0.0, 0.5, 1.0, 0.5, 0.0];
    for (got, want) in w.iter().zip(expected) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
}

/// Hann windows are zero at the ends and one at the center.
#[test]
fn test_hann_endpoints_and_center() {
    let w = WindowFunction::Hann.coefficients::<f64>(9).unwrap();
    assert_relative_eq!(w[0], 0.0, epsilon = 1e-12);
    assert_relative_eq!(w[8], 0.0, epsilon = 1e-12);
    assert_relative_eq!(w[4], 1.0, epsilon = 1e-12);
}

/// All standard windows are symmetric with a unit center tap, except boxcar
/// which is flat.
#[test]
fn test_standard_windows_symmetric() {
    let windows = [
        WindowFunction::Boxcar,
        WindowFunction::Triangle,
        WindowFunction::Hann,
        WindowFunction::Hamming,
        WindowFunction::Blackman,
        WindowFunction::BlackmanHarris,
    ];
    for win in windows {
        let w = win.coefficients::<f64>(11).unwrap();
        for i in 0..11 {
            assert_relative_eq!(w[i], w[10 - i], max_relative = 1e-12);
        }
    }
}

/// Blackman has the textbook unit center value.
#[test]
fn test_blackman_center() {
    let w = WindowFunction::Blackman.coefficients::<f64>(7).unwrap();
    assert_relative_eq!(w[3], 1.0, epsilon = 1e-12);
}

// ============================================================================
// Length Contract Tests
// ============================================================================

/// Even and zero lengths are rejected for every catalog entry.
#[test]
fn test_even_length_rejected() {
    for win in [
        WindowFunction::Boxcar,
        WindowFunction::Hann,
        WindowFunction::Lanczos { cutoff: 0.1 },
    ] {
        assert!(matches!(
            win.coefficients::<f64>(4),
            Err(FilterError::InvalidWindowLength { got: 4 })
        ));
        assert!(matches!(
            win.coefficients::<f64>(0),
            Err(FilterError::InvalidWindowLength { got: 0 })
        ));
    }
}

/// A single-tap window degenerates to [1] (or [2*fc] for Lanczos).
#[test]
fn test_single_tap_window() {
    let w = WindowFunction::Hann.coefficients::<f64>(1).unwrap();
    assert_eq!(w, vec![1.0]);

    let w = WindowFunction::Lanczos { cutoff: 0.2 }
        .coefficients::<f64>(1)
        .unwrap();
    assert_relative_eq!(w[0], 0.4, epsilon = 1e-12);
}

// ============================================================================
// Name Lookup Tests
// ============================================================================

/// Catalog names and aliases parse to the right entries.
#[test]
fn test_window_name_parsing() {
    assert_eq!("boxcar".parse::<WindowFunction>().unwrap().name(), "boxcar");
    assert_eq!("rect".parse::<WindowFunction>().unwrap().name(), "boxcar");
    assert_eq!("hanning".parse::<WindowFunction>().unwrap().name(), "hann");
    assert_eq!(
        "bartlett".parse::<WindowFunction>().unwrap().name(),
        "triangle"
    );
    assert!(matches!(
        "lcz".parse::<WindowFunction>().unwrap(),
        WindowFunction::Lanczos { .. }
    ));
}

/// Unrecognized names fail with UnknownWindow.
#[test]
fn test_unknown_window_name() {
    let err = "kaiser-ish".parse::<WindowFunction>().unwrap_err();
    assert!(matches!(err, FilterError::UnknownWindow(_)));
}
