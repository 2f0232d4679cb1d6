//! Mask-aware convolution driver and deferred evaluation.
//!
//! ## Purpose
//!
//! This module orchestrates one filtering application end to end: kernel
//! normalization, missing-value masking, boundary-weight computation,
//! zero-filling, halo-aware chunked convolution, renormalization, and
//! re-nulling. It also provides [`Deferred`], the unevaluated form of that
//! pipeline for callers composing several stages before paying evaluation
//! cost once.
//!
//! ## Key concepts
//!
//! * **Boundary weights**: Convolving the 0/1 presence mask with the
//!   normalized kernel yields, per cell, the fraction of kernel weight backed
//!   by real data; dividing by it corrects edge and missing-value
//!   attenuation.
//! * **Re-nulling**: Filtering never invents values — cells missing in the
//!   input are missing in the output.
//!
//! ## Invariants
//!
//! * The kernel and halo are immutable snapshots shared read-only across
//!   chunk tasks.
//! * Apply-time errors surface before any chunk work is scheduled.
//!
//! ## Non-goals
//!
//! * This module does not resolve configuration; it consumes a built
//!   [`KernelPlan`](crate::engine::kernel::KernelPlan)'s pieces.

use log::debug;
use ndarray::ArrayD;
use num_traits::Float;

use crate::engine::chunked::ChunkedArray;
use crate::math::convolve::{convolve, BoundaryMode};
use crate::primitives::errors::FilterError;
use crate::primitives::labeled::LabeledArray;

// ============================================================================
// Convolution Driver
// ============================================================================

/// Apply a kernel to a labeled array with masking and renormalization.
pub fn convolve_labeled<T>(
    array: &LabeledArray<T>,
    chunks: &[usize],
    kernel: &ArrayD<T>,
    halo: &[usize],
    mode: BoundaryMode,
    explicit_weights: Option<&ArrayD<T>>,
) -> Result<LabeledArray<T>, FilterError>
where
    T: Float + Send + Sync,
{
    if kernel.ndim() != array.ndim() {
        return Err(FilterError::ShapeMismatch {
            expected: array.ndim(),
            got: kernel.ndim(),
        });
    }

    // 1. Unit-sum kernel preserves DC gain.
    let total = kernel.iter().fold(T::zero(), |acc, &v| acc + v);
    if total == T::zero() || !total.is_finite() {
        return Err(FilterError::InvalidInput(
            "kernel coefficients must have a finite, nonzero sum".to_string(),
        ));
    }
    let coeffs = kernel.mapv(|v| v / total);

    // 2. Presence mask, recomputed per call.
    let mask = array.present_mask();

    // 3. Effective kernel weight available near each cell.
    let weights = match explicit_weights {
        Some(w) => {
            if w.shape() != array.shape() {
                return Err(FilterError::ShapeMismatch {
                    expected: array.ndim(),
                    got: w.ndim(),
                });
            }
            w.clone()
        }
        None => convolve(mask.view(), coeffs.view(), mode)?,
    };

    // 4. Missing cells contribute nothing to the weighted sum.
    let filled = array.fill_missing(T::zero());

    // 5. Halo-aware chunked convolution.
    debug!(
        "convolving '{}' over {:?} with kernel {:?}",
        array.name().unwrap_or("<unnamed>"),
        array.shape(),
        coeffs.shape()
    );
    let chunked = ChunkedArray::new(filled, Some(chunks.to_vec()))?;
    let convolved =
        chunked.map_overlap(halo, mode, |block| convolve(block, coeffs.view(), mode))?;

    // 6-7. Renormalize, then re-null missing cells.
    let mut data = convolved.into_data();
    data.zip_mut_with(&weights, |v, &w| *v = *v / w);
    data.zip_mut_with(&mask, |v, &m| {
        if m == T::zero() {
            *v = T::nan();
        }
    });

    array.with_data(data)
}

// ============================================================================
// Deferred Evaluation
// ============================================================================

/// An unevaluated filtering computation.
///
/// Nothing runs until [`Deferred::compute`]; further labeled-array stages
/// can be fused in with [`Deferred::then`], so a multi-stage pipeline pays
/// evaluation cost once.
pub struct Deferred<T> {
    thunk: Box<dyn FnOnce() -> Result<LabeledArray<T>, FilterError> + Send>,
}

impl<T> Deferred<T> {
    /// Wrap a pending computation.
    pub(crate) fn new<F>(thunk: F) -> Self
    where
        F: FnOnce() -> Result<LabeledArray<T>, FilterError> + Send + 'static,
    {
        Self {
            thunk: Box::new(thunk),
        }
    }

    /// Fuse a further transformation into the node.
    pub fn then<F>(self, stage: F) -> Deferred<T>
    where
        F: FnOnce(LabeledArray<T>) -> Result<LabeledArray<T>, FilterError> + Send + 'static,
        T: 'static,
    {
        Deferred::new(move || stage((self.thunk)()?))
    }

    /// Evaluate the pipeline, blocking until every chunk task completes.
    pub fn compute(self) -> Result<LabeledArray<T>, FilterError> {
        debug!("evaluating deferred filtering pipeline");
        (self.thunk)()
    }
}

impl<T> std::fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Deferred { .. }")
    }
}
