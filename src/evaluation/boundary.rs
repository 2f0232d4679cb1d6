//! Standalone boundary-weight fields.
//!
//! ## Purpose
//!
//! This module computes the renormalization field the convolution engine
//! divides by — the local sum of kernel weight backed by present data — as a
//! standalone diagnostic. Dimensions along which the mask is known constant
//! can be collapsed to their first index to save space.
//!
//! ## Design notes
//!
//! * **Consistency**: The kernel is normalized to unit sum here exactly as
//!   the engine normalizes it, so the field matches what filtering divides
//!   by.
//! * **Collapse**: Dropped dimensions must be non-filtering; their kernel
//!   axes are unit length and are removed alongside the mask axes.
//!
//! ## Invariants
//!
//! * The returned field is nulled wherever the (possibly reduced) mask is
//!   false, mirroring the main convolution's boundary behavior.
//!
//! ## Non-goals
//!
//! * This module does not apply the weights; the engine does that inline.

use ndarray::{ArrayD, Axis};
use num_traits::Float;

use crate::math::convolve::{convolve, BoundaryMode};
use crate::primitives::errors::FilterError;
use crate::primitives::labeled::LabeledArray;

// ============================================================================
// Boundary Weights
// ============================================================================

/// Compute the boundary-weight field for `array` under `kernel`.
///
/// `drop_dims` lists dimensions along which the mask is constant; the field
/// is evaluated at their first index only and the dimensions are dropped
/// from the result.
pub fn boundary_weights<T: Float>(
    array: &LabeledArray<T>,
    kernel: &ArrayD<T>,
    mode: BoundaryMode,
    drop_dims: &[String],
) -> Result<LabeledArray<T>, FilterError> {
    if kernel.ndim() != array.ndim() {
        return Err(FilterError::ShapeMismatch {
            expected: array.ndim(),
            got: kernel.ndim(),
        });
    }

    let mut drop_axes = Vec::with_capacity(drop_dims.len());
    for di in drop_dims {
        let axis = array
            .axis_of(di)
            .ok_or_else(|| FilterError::UnknownDimension { dim: di.clone() })?;
        if kernel.shape()[axis] != 1 {
            return Err(FilterError::UnsupportedArgument(format!(
                "cannot drop filtering dimension '{di}'"
            )));
        }
        drop_axes.push(axis);
    }
    drop_axes.sort_unstable();
    drop_axes.dedup();

    // Collapse mask and kernel to the first index along each dropped axis,
    // descending so positions stay valid.
    let mut mask = array.present_mask();
    let mut coeffs = kernel.clone();
    for &axis in drop_axes.iter().rev() {
        mask = mask.index_axis_move(Axis(axis), 0);
        coeffs = coeffs.index_axis_move(Axis(axis), 0);
    }

    let total = coeffs.iter().fold(T::zero(), |acc, &v| acc + v);
    if total == T::zero() || !total.is_finite() {
        return Err(FilterError::InvalidInput(
            "kernel coefficients must have a finite, nonzero sum".to_string(),
        ));
    }
    let coeffs = coeffs.mapv(|v| v / total);

    let mut weights = convolve(mask.view(), coeffs.view(), mode)?;
    weights.zip_mut_with(&mask, |w, &m| {
        if m == T::zero() {
            *w = T::nan();
        }
    });

    let kept: Vec<String> = array
        .dims()
        .iter()
        .enumerate()
        .filter(|(ax, _)| !drop_axes.contains(ax))
        .map(|(_, di)| di.clone())
        .collect();

    let mut out = LabeledArray::new(weights, kept.clone())?.with_name("boundary_weights");
    for di in &kept {
        if let Some(coord) = array.coord(di) {
            out = out.with_coord(di.clone(), coord.to_vec())?;
        }
    }
    Ok(out)
}
