#![cfg(feature = "dev")]
//! Tests for chunked arrays and halo-aware block execution.
//!
//! These tests verify the overlap-then-trim protocol underneath the
//! convolution engine:
//! - Chunk grid construction and validation
//! - map_overlap identity and shape preservation
//! - Chunking invariance: any chunk layout reproduces the monolithic result
//!
//! ## Test Organization
//!
//! 1. **Chunk Layout** - grid sizes, validation
//! 2. **map_overlap** - identity, trim, halo correctness

use approx::assert_relative_eq;
use ndarray::{ArrayD, IxDyn};

use ndfir::internals::engine::chunked::ChunkedArray;
use ndfir::internals::math::convolve::convolve;
use ndfir::prelude::*;

// ============================================================================
// Chunk Layout Tests
// ============================================================================

/// Default chunking is one chunk spanning each axis.
#[test]
fn test_default_single_chunk() {
    let data = ArrayD::from_elem(IxDyn(&[10, 4]), 0.0_f64);
    let chunked = ChunkedArray::new(data, None).unwrap();
    assert_eq!(chunked.chunks(), &[10, 4]);
    assert_eq!(chunked.chunk_count(), 1);
}

/// Explicit chunk lengths produce a ceil-divided grid.
#[test]
fn test_chunk_grid_size() {
    let data = ArrayD::from_elem(IxDyn(&[10, 4]), 0.0_f64);
    let chunked = ChunkedArray::new(data, Some(vec![3, 4])).unwrap();
    assert_eq!(chunked.chunk_count(), 4);
}

/// Zero chunk lengths and wrong-arity chunk vectors are rejected.
#[test]
fn test_chunk_validation() {
    let data = ArrayD::from_elem(IxDyn(&[10]), 0.0_f64);
    assert!(matches!(
        ChunkedArray::new(data.clone(), Some(vec![0])),
        Err(FilterError::InvalidChunkSize { got: 0 })
    ));
    assert!(matches!(
        ChunkedArray::new(data, Some(vec![2, 2])),
        Err(FilterError::ShapeMismatch { .. })
    ));
}

// ============================================================================
// map_overlap Tests
// ============================================================================

/// The identity transform reassembles the input exactly, for any chunking.
#[test]
fn test_map_overlap_identity() {
    let values: Vec<f64> = (0..24).map(f64::from).collect();
    let data = ArrayD::from_shape_vec(IxDyn(&[24]), values).unwrap();

    for chunk in [1usize, 5, 7, 24] {
        let chunked = ChunkedArray::new(data.clone(), Some(vec![chunk])).unwrap();
        let out = chunked
            .map_overlap(&[2], BoundaryMode::Reflect, |block| Ok(block.to_owned()))
            .unwrap();
        assert_eq!(out.data(), &data);
    }
}

/// Chunk-local convolution with halo equals the monolithic convolution, for
/// every chunk layout and boundary mode.
#[test]
fn test_chunked_convolution_matches_monolithic() {
    let values: Vec<f64> = (0..30).map(|i| (f64::from(i) * 0.7).sin()).collect();
    let data = ArrayD::from_shape_vec(IxDyn(&[30]), values).unwrap();
    let kernel = ArrayD::from_elem(IxDyn(&[5]), 0.2);

    for mode in [BoundaryMode::Reflect, BoundaryMode::Zero] {
        let whole = convolve(data.view(), kernel.view(), mode).unwrap();
        for chunk in [4usize, 9, 15, 30] {
            let chunked = ChunkedArray::new(data.clone(), Some(vec![chunk])).unwrap();
            let out = chunked
                .map_overlap(&[2], mode, |block| convolve(block, kernel.view(), mode))
                .unwrap();
            for (got, want) in out.data().iter().zip(whole.iter()) {
                assert_relative_eq!(*got, *want, epsilon = 1e-12);
            }
        }
    }
}

/// The same invariance holds on a 2-D grid with per-axis halos.
#[test]
fn test_chunked_convolution_2d() {
    let values: Vec<f64> = (0..48).map(|i| f64::from(i % 7)).collect();
    let data = ArrayD::from_shape_vec(IxDyn(&[8, 6]), values).unwrap();
    let kernel = ArrayD::from_elem(IxDyn(&[3, 1]), 1.0 / 3.0);

    let whole = convolve(data.view(), kernel.view(), BoundaryMode::Reflect).unwrap();
    let chunked = ChunkedArray::new(data, Some(vec![3, 4])).unwrap();
    let out = chunked
        .map_overlap(&[1, 0], BoundaryMode::Reflect, |block| {
            convolve(block, kernel.view(), BoundaryMode::Reflect)
        })
        .unwrap();
    for (got, want) in out.data().iter().zip(whole.iter()) {
        assert_relative_eq!(*got, *want, epsilon = 1e-12);
    }
}

/// Depth arity must match array rank.
#[test]
fn test_depth_arity_validation() {
    let data = ArrayD::from_elem(IxDyn(&[10]), 0.0_f64);
    let chunked = ChunkedArray::new(data, None).unwrap();
    assert!(matches!(
        chunked.map_overlap(&[1, 1], BoundaryMode::Reflect, |b| Ok(b.to_owned())),
        Err(FilterError::ShapeMismatch { .. })
    ));
}
