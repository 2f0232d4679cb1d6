//! Spectral-response diagnostics.
//!
//! ## Purpose
//!
//! This module supplies the numbers behind kernel inspection: the 1-D tap
//! profile along a filtering axis, and its normalized magnitude response in
//! dB on a shifted frequency grid scaled by the dimension's sample spacing.
//! Rendering is left entirely to the caller.
//!
//! ## Design notes
//!
//! * **Central slice**: For multi-dimension kernels the profile along one
//!   axis is taken through the center of every other axis.
//! * **Normalization**: The response is normalized to its peak, so the
//!   passband reads 0 dB.
//!
//! ## Non-goals
//!
//! * No plotting; this is a pure display-data sink.

use ndarray::ArrayD;
use num_traits::Float;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::primitives::errors::FilterError;

// ============================================================================
// Tap Profile
// ============================================================================

/// The 1-D coefficients of a kernel along one axis, with sample offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct TapProfile<T> {
    /// Sample offsets relative to the center tap.
    pub offsets: Vec<isize>,

    /// Kernel coefficients at those offsets.
    pub coefficients: Vec<T>,
}

/// Extract the tap profile along `axis`, slicing through the center of every
/// other axis.
pub fn taps<T: Float>(kernel: &ArrayD<T>, axis: usize) -> Result<TapProfile<T>, FilterError> {
    if axis >= kernel.ndim() {
        return Err(FilterError::InvalidInput(format!(
            "axis {axis} out of range for a rank-{} kernel",
            kernel.ndim()
        )));
    }

    let n = kernel.shape()[axis];
    let mut idx: Vec<usize> = kernel.shape().iter().map(|&len| (len - 1) / 2).collect();

    let mut offsets = Vec::with_capacity(n);
    let mut coefficients = Vec::with_capacity(n);
    let half = (n as isize - 1) / 2;
    for i in 0..n {
        idx[axis] = i;
        offsets.push(i as isize - half);
        coefficients.push(kernel[idx.as_slice()]);
    }

    Ok(TapProfile {
        offsets,
        coefficients,
    })
}

// ============================================================================
// Frequency Response
// ============================================================================

/// A shifted frequency grid and the matching normalized magnitude response.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse<T> {
    /// Frequencies in cycles per coordinate unit, ascending through zero.
    pub freqs: Vec<T>,

    /// Magnitude response in dB, normalized to the peak.
    pub magnitude_db: Vec<T>,
}

/// Compute the magnitude response of the kernel's tap profile along `axis`.
///
/// `spacing` is the sample spacing of the corresponding dimension; `nfft`
/// must be at least the tap count.
pub fn frequency_response<T: Float>(
    kernel: &ArrayD<T>,
    axis: usize,
    spacing: T,
    nfft: usize,
) -> Result<FrequencyResponse<T>, FilterError> {
    let profile = taps(kernel, axis)?;
    if nfft < profile.coefficients.len() {
        return Err(FilterError::InvalidInput(format!(
            "nfft {nfft} is smaller than the tap count {}",
            profile.coefficients.len()
        )));
    }

    let mut buf: Vec<Complex<f64>> = profile
        .coefficients
        .iter()
        .map(|&c| Complex::new(c.to_f64().unwrap_or(0.0), 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(nfft)
        .collect();

    FftPlanner::new().plan_fft_forward(nfft).process(&mut buf);

    let magnitudes: Vec<f64> = buf.iter().map(|c| c.norm()).collect();
    let peak = magnitudes.iter().cloned().fold(0.0_f64, f64::max);
    if peak == 0.0 {
        return Err(FilterError::InvalidInput(
            "kernel has an identically zero response".to_string(),
        ));
    }

    let dx = spacing.to_f64().unwrap_or(1.0);
    let half = nfft / 2;
    let mut freqs = Vec::with_capacity(nfft);
    let mut magnitude_db = Vec::with_capacity(nfft);
    for k in 0..nfft {
        // fftshift: zero frequency lands at the center of the grid.
        let src = (k + nfft - half) % nfft;
        freqs.push(
            T::from((k as f64 - half as f64) / (nfft as f64 * dx)).unwrap_or_else(T::zero),
        );
        magnitude_db.push(
            T::from(20.0 * (magnitudes[src] / peak).log10()).unwrap_or_else(T::nan),
        );
    }

    Ok(FrequencyResponse {
        freqs,
        magnitude_db,
    })
}
