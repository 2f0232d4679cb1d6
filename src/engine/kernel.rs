//! Separable kernel synthesis.
//!
//! ## Purpose
//!
//! This module builds the full N-dimensional filter kernel from independent
//! per-dimension tap sequences. Filtering dimensions contribute their taps
//! through successive outer products; every other dimension contributes a
//! unit-length broadcast axis, so kernel rank always matches array rank and
//! kernel axes follow the array's own axis order.
//!
//! ## Design notes
//!
//! * **Axis order**: Iteration follows the array's dimension order, not the
//!   filter spec's; this is what makes the kernel broadcast correctly.
//! * **Separability**: The N-D kernel is exactly the outer product of the
//!   per-dimension 1-D responses.
//! * **Halo depth**: The kernel radius `order / 2` per filtering axis; this
//!   is the overlap the chunk engine needs for seam-free convolution.
//!
//! ## Invariants
//!
//! * `kernel.ndim() == array.ndim()` for every spec, including the empty one
//!   (identity kernel of all-unit axes).
//! * `halo.len() == array.ndim()`, zero on non-filtering axes.
//!
//! ## Non-goals
//!
//! * This module does not normalize the kernel; the convolution engine does.
//! * This module does not validate builder-level arguments.

use std::collections::BTreeMap;

use ndarray::{ArrayD, Axis, IxDyn};
use num_traits::Float;

use crate::math::design::firwin;
use crate::math::window::WindowFunction;
use crate::primitives::errors::FilterError;
use crate::primitives::labeled::LabeledArray;

/// Relative tolerance for coordinate-spacing uniformity.
const SPACING_RTOL: f64 = 1e-5;

// ============================================================================
// Filter Spec
// ============================================================================

/// Fully resolved per-dimension filter configuration.
#[derive(Debug, Clone)]
pub struct FilterSpec<T> {
    /// Filtering dimensions, in selection order.
    pub dims: Vec<String>,

    /// Tap count per filtering dimension.
    pub order: BTreeMap<String, usize>,

    /// Optional cutoff set per filtering dimension, in coordinate frequency
    /// units. One cutoff designs a low-pass, two a band-pass.
    pub cutoff: BTreeMap<String, Option<Vec<T>>>,

    /// Window function per filtering dimension.
    pub window: BTreeMap<String, WindowFunction>,
}

// ============================================================================
// Kernel Plan
// ============================================================================

/// A built kernel together with its axis bookkeeping.
#[derive(Debug, Clone)]
pub struct KernelPlan<T> {
    /// The N-dimensional separable kernel, rank equal to the array's.
    pub kernel: ArrayD<T>,

    /// Halo depth per axis position, in samples.
    pub halo: Vec<usize>,

    /// Nyquist frequency per filtering dimension.
    pub nyquist: BTreeMap<String, T>,

    /// Sample spacing per filtering dimension.
    pub spacing: BTreeMap<String, T>,
}

/// Build the separable kernel for `spec` against `array`.
pub fn build_kernel<T: Float>(
    array: &LabeledArray<T>,
    spec: &FilterSpec<T>,
) -> Result<KernelPlan<T>, FilterError> {
    for di in &spec.dims {
        if array.axis_of(di).is_none() {
            return Err(FilterError::UnknownDimension { dim: di.clone() });
        }
    }

    let mut kernel = ArrayD::from_elem(IxDyn(&[]), T::one());
    let mut halo = Vec::with_capacity(array.ndim());
    let mut nyquist = BTreeMap::new();
    let mut spacing = BTreeMap::new();

    for di in array.dims() {
        if spec.dims.contains(di) {
            let order = *spec.order.get(di).ok_or_else(|| {
                FilterError::InvalidInput(format!("no order resolved for dimension '{di}'"))
            })?;
            let window = spec.window.get(di).copied().unwrap_or_default();

            let dx = sample_spacing(array, di)?;
            let fnyq = T::one() / (T::from(2.0).unwrap() * dx);
            spacing.insert(di.clone(), dx);
            nyquist.insert(di.clone(), fnyq);

            let taps = match spec.cutoff.get(di).and_then(|c| c.as_deref()) {
                None => window.coefficients(order)?,
                Some(cutoffs) => firwin(order, cutoffs, window, fnyq)?,
            };

            kernel = outer_trailing(&kernel, &taps);
            halo.push(order / 2);
        } else {
            let n = kernel.ndim();
            kernel = kernel.insert_axis(Axis(n));
            halo.push(0);
        }
    }

    Ok(KernelPlan {
        kernel,
        halo,
        nyquist,
        spacing,
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Outer product along a new trailing axis: `out[.., j] = kernel[..] * taps[j]`.
fn outer_trailing<T: Float>(kernel: &ArrayD<T>, taps: &[T]) -> ArrayD<T> {
    let mut shape = kernel.shape().to_vec();
    shape.push(taps.len());

    let mut flat = Vec::with_capacity(kernel.len() * taps.len());
    for &a in kernel.iter() {
        for &b in taps {
            flat.push(a * b);
        }
    }

    // Row-major layout makes the trailing-axis product a plain nested loop.
    ArrayD::from_shape_vec(IxDyn(&shape), flat).unwrap()
}

/// Derive the scalar sample spacing along a dimension from its coordinates.
///
/// Dimensions without coordinates (or with a single sample) get unit
/// spacing. Coordinates must be strictly increasing and uniform within
/// relative tolerance.
pub fn sample_spacing<T: Float>(
    array: &LabeledArray<T>,
    dim: &str,
) -> Result<T, FilterError> {
    let coord = match array.coord(dim) {
        Some(c) if c.len() >= 2 => c,
        _ => return Ok(T::one()),
    };

    let dx = coord[1] - coord[0];
    if !dx.is_finite() || dx <= T::zero() {
        return Err(FilterError::NonUniformSampling {
            dim: dim.to_string(),
        });
    }

    let rtol = T::from(SPACING_RTOL).unwrap();
    for pair in coord.windows(2) {
        let d = pair[1] - pair[0];
        if !d.is_finite() || ((d - dx) / dx).abs() > rtol {
            return Err(FilterError::NonUniformSampling {
                dim: dim.to_string(),
            });
        }
    }

    Ok(dx)
}
