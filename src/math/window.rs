//! Window-function catalog.
//!
//! ## Purpose
//!
//! This module provides the 1-D coefficient generators behind every filter
//! kernel: the standard cosine-sum and polygonal windows, plus the custom
//! Lanczos low-pass window. The catalog is a stateless, read-only registry;
//! name-based lookup covers the common aliases.
//!
//! ## Design notes
//!
//! * **Odd lengths only**: Every generator requires an odd, positive length
//!   so kernels stay symmetric about a center tap and halo depths are exact.
//! * **Symmetric windows**: Cosine-sum windows use the symmetric form
//!   (denominator `n - 1`), the filter-design convention.
//!
//! ## Key concepts
//!
//! * **Lanczos window**: `w[k] = sinc(2*fc*k) * sinc(k / (n/2))` on the
//!   symmetric grid `k = -(n-1)/2 ..= (n-1)/2`, with `w[0] = 2*fc`. Used
//!   directly as a low-pass kernel, its DC-normalized response cuts off near
//!   `fc` cycles per sample.
//!
//! ## Invariants
//!
//! * Generated windows are symmetric: `w[i] == w[n-1-i]`.
//! * All coefficients are finite for finite parameters.
//!
//! ## Non-goals
//!
//! * This module does not normalize coefficients; the convolution engine
//!   normalizes kernels to unit sum.

use std::f64::consts::PI;
use std::str::FromStr;

use num_traits::Float;

use crate::primitives::errors::FilterError;

/// Default cutoff frequency for a Lanczos window requested by bare name.
pub const DEFAULT_LANCZOS_CUTOFF: f64 = 0.02;

// ============================================================================
// Window Function Enum
// ============================================================================

/// A named 1-D window function.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WindowFunction {
    /// Rectangular window: all ones.
    #[default]
    Boxcar,

    /// Triangular (Bartlett) window: `1 - |2i/(n-1) - 1|`.
    Triangle,

    /// Hann window: `0.5 - 0.5*cos(2*pi*i/(n-1))`.
    Hann,

    /// Hamming window: `0.54 - 0.46*cos(2*pi*i/(n-1))`.
    Hamming,

    /// Blackman window: `0.42 - 0.5*cos(2*pi*i/(n-1)) + 0.08*cos(4*pi*i/(n-1))`.
    Blackman,

    /// 4-term Blackman-Harris window (-92 dB sidelobes).
    BlackmanHarris,

    /// Lanczos low-pass window with cutoff in cycles per sample.
    Lanczos {
        /// Cutoff frequency in cycles per sample, in (0, 0.5).
        cutoff: f64,
    },
}

impl WindowFunction {
    /// Get the name of the window function.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            WindowFunction::Boxcar => "boxcar",
            WindowFunction::Triangle => "triangle",
            WindowFunction::Hann => "hann",
            WindowFunction::Hamming => "hamming",
            WindowFunction::Blackman => "blackman",
            WindowFunction::BlackmanHarris => "blackmanharris",
            WindowFunction::Lanczos { .. } => "lanczos",
        }
    }

    /// Generate the window coefficients for an odd, positive length `n`.
    pub fn coefficients<T: Float>(&self, n: usize) -> Result<Vec<T>, FilterError> {
        if n == 0 || n % 2 == 0 {
            return Err(FilterError::InvalidWindowLength { got: n });
        }

        let w = match self {
            WindowFunction::Boxcar => vec![1.0; n],
            WindowFunction::Triangle => polygonal(n),
            WindowFunction::Hann => cosine_sum(n, &[0.5, 0.5]),
            WindowFunction::Hamming => cosine_sum(n, &[0.54, 0.46]),
            WindowFunction::Blackman => cosine_sum(n, &[0.42, 0.5, 0.08]),
            WindowFunction::BlackmanHarris => {
                cosine_sum(n, &[0.35875, 0.48829, 0.14128, 0.01168])
            }
            WindowFunction::Lanczos { cutoff } => lanczos(n, *cutoff),
        };

        Ok(w.into_iter()
            .map(|v| T::from(v).unwrap_or_else(T::zero))
            .collect())
    }
}

impl FromStr for WindowFunction {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boxcar" | "rect" | "rectangular" => Ok(WindowFunction::Boxcar),
            "triangle" | "bartlett" => Ok(WindowFunction::Triangle),
            "hann" | "hanning" => Ok(WindowFunction::Hann),
            "hamming" => Ok(WindowFunction::Hamming),
            "blackman" => Ok(WindowFunction::Blackman),
            "blackmanharris" => Ok(WindowFunction::BlackmanHarris),
            "lanczos" | "lcz" => Ok(WindowFunction::Lanczos {
                cutoff: DEFAULT_LANCZOS_CUTOFF,
            }),
            other => Err(FilterError::UnknownWindow(other.to_string())),
        }
    }
}

// ============================================================================
// Generators
// ============================================================================

/// Normalized sinc: `sin(pi*x) / (pi*x)`, with `sinc(0) = 1`.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Generalized symmetric cosine-sum window with alternating-sign terms.
fn cosine_sum(n: usize, coeffs: &[f64]) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }
    let m = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let x = 2.0 * PI * i as f64 / m;
            coeffs
                .iter()
                .enumerate()
                .map(|(j, &a)| {
                    let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                    sign * a * (j as f64 * x).cos()
                })
                .sum()
        })
        .collect()
}

/// Triangular window on `n` symmetric points.
fn polygonal(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }
    let m = (n - 1) as f64;
    (0..n)
        .map(|i| 1.0 - (2.0 * i as f64 / m - 1.0).abs())
        .collect()
}

/// Lanczos low-pass window of odd length `n` with cutoff `fc`.
fn lanczos(n: usize, fc: f64) -> Vec<f64> {
    let half = (n as isize - 1) / 2;
    let half_width = n as f64 / 2.0;
    (-half..=half)
        .map(|k| {
            if k == 0 {
                2.0 * fc
            } else {
                let k = k as f64;
                sinc(2.0 * fc * k) * sinc(k / half_width)
            }
        })
        .collect()
}
