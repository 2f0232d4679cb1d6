//! N-dimensional convolution with boundary handling.
//!
//! ## Purpose
//!
//! This module implements direct N-dimensional convolution of an array with
//! a (typically small, separable) kernel, with the boundary of the domain
//! synthesized according to a [`BoundaryMode`]. Both the chunk-local payload
//! pass and the whole-array weights pass of the convolution engine run
//! through it.
//!
//! ## Design notes
//!
//! * **True convolution**: The kernel is flipped relative to correlation, so
//!   asymmetric kernels behave like `scipy.ndimage.convolve`.
//! * **Direct evaluation**: Kernels here are small outer products; direct
//!   O(N*K) evaluation per block keeps the implementation exact and the
//!   parallelism at the chunk level.
//!
//! ## Key concepts
//!
//! * **Reflect**: Symmetric edge reflection, `(d c b a | a b c d | d c b a)`.
//! * **Zero**: Out-of-domain samples read as zero.
//! * **Valid**: No padding; output cells whose kernel footprint leaves the
//!   domain are nulled.
//!
//! ## Invariants
//!
//! * Output shape equals input shape for every mode.
//! * Kernel rank must equal input rank.
//!
//! ## Non-goals
//!
//! * This module knows nothing about chunks, halos, masks, or labels.

use std::str::FromStr;

use ndarray::{ArrayD, ArrayViewD, Dimension};
use num_traits::Float;

use crate::primitives::errors::FilterError;

// ============================================================================
// Boundary Mode
// ============================================================================

/// Policy for synthesizing samples beyond the domain edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Reflect the domain symmetrically across each edge.
    #[default]
    Reflect,

    /// Read out-of-domain samples as zero.
    Zero,

    /// No padding: null every output cell whose kernel footprint leaves the
    /// domain.
    Valid,
}

impl BoundaryMode {
    /// Get the name of the boundary mode.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            BoundaryMode::Reflect => "reflect",
            BoundaryMode::Zero => "zero",
            BoundaryMode::Valid => "valid",
        }
    }
}

impl FromStr for BoundaryMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reflect" => Ok(BoundaryMode::Reflect),
            // "same" is the zero-padded same-shape convention.
            "zero" | "same" | "constant" => Ok(BoundaryMode::Zero),
            "valid" => Ok(BoundaryMode::Valid),
            other => Err(FilterError::UnsupportedBoundaryMode(other.to_string())),
        }
    }
}

// ============================================================================
// Convolution
// ============================================================================

/// Convolve `data` with `kernel` under the given boundary mode.
pub fn convolve<T: Float>(
    data: ArrayViewD<'_, T>,
    kernel: ArrayViewD<'_, T>,
    mode: BoundaryMode,
) -> Result<ArrayD<T>, FilterError> {
    if data.ndim() != kernel.ndim() {
        return Err(FilterError::ShapeMismatch {
            expected: data.ndim(),
            got: kernel.ndim(),
        });
    }

    let shape: Vec<usize> = data.shape().to_vec();
    let centers: Vec<isize> = kernel
        .shape()
        .iter()
        .map(|&len| (len as isize - 1) / 2)
        .collect();

    let mut out = ArrayD::<T>::zeros(data.raw_dim());
    let mut src = vec![0usize; shape.len()];

    for (out_idx, out_cell) in out.indexed_iter_mut() {
        let out_idx = out_idx.slice();
        let mut acc = T::zero();
        let mut truncated = false;

        'taps: for (k_idx, &kv) in kernel.indexed_iter() {
            let k_idx = k_idx.slice();
            for d in 0..shape.len() {
                let n = shape[d] as isize;
                let raw = out_idx[d] as isize + centers[d] - k_idx[d] as isize;
                let mapped = match mode {
                    BoundaryMode::Reflect => reflect_index(raw, n),
                    BoundaryMode::Zero | BoundaryMode::Valid => {
                        if raw < 0 || raw >= n {
                            if mode == BoundaryMode::Valid {
                                truncated = true;
                                break 'taps;
                            }
                            continue 'taps;
                        }
                        raw
                    }
                };
                src[d] = mapped as usize;
            }
            acc = acc + kv * data[src.as_slice()];
        }

        *out_cell = if truncated { T::nan() } else { acc };
    }

    Ok(out)
}

/// Map an out-of-range index into the domain by symmetric reflection.
pub(crate) fn reflect_index(mut idx: isize, n: isize) -> isize {
    loop {
        if idx < 0 {
            idx = -idx - 1;
        } else if idx >= n {
            idx = 2 * n - idx - 1;
        } else {
            return idx;
        }
    }
}
