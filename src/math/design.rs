//! Windowed-sinc FIR design.
//!
//! ## Purpose
//!
//! This module designs low-pass and band-pass FIR taps by multiplying an
//! ideal sinc response by a tapering window, with cutoffs validated against
//! the dimension's Nyquist frequency. The kernel builder calls into it
//! whenever a cutoff accompanies a filtering dimension.
//!
//! ## Design notes
//!
//! * **Normalization**: Cutoffs arrive in the coordinate's frequency units
//!   and are divided by `2 * nyquist` to land in cycles per sample.
//! * **DC gain**: Low-pass taps are scaled to unit response at zero
//!   frequency; band-pass taps to unit response at the band center.
//!
//! ## Invariants
//!
//! * Tap count is odd and positive, so the design is symmetric (linear
//!   phase) about an integer center.
//! * Cutoffs satisfy `0 < fc <= nyquist`.
//!
//! ## Non-goals
//!
//! * No high-pass or multi-band designs; the filtering surface exposes
//!   low-pass and band-pass only.
//! * No optimal (Parks-McClellan) designs.

use std::f64::consts::PI;

use num_traits::Float;

use crate::math::window::{sinc, WindowFunction};
use crate::primitives::errors::FilterError;

// ============================================================================
// FIR Design
// ============================================================================

/// Design windowed-sinc FIR taps.
///
/// One cutoff yields a low-pass design; two strictly increasing cutoffs
/// yield a band-pass design as the difference of two low-passes.
pub fn firwin<T: Float>(
    numtaps: usize,
    cutoffs: &[T],
    window: WindowFunction,
    nyquist: T,
) -> Result<Vec<T>, FilterError> {
    if numtaps == 0 || numtaps % 2 == 0 {
        return Err(FilterError::InvalidWindowLength { got: numtaps });
    }

    let nyq = nyquist.to_f64().unwrap_or(f64::NAN);
    let normalized: Vec<f64> = cutoffs
        .iter()
        .map(|&c| {
            let c = c.to_f64().unwrap_or(f64::NAN);
            if !c.is_finite() || c <= 0.0 || c > nyq {
                return Err(FilterError::InvalidCutoff {
                    value: c,
                    nyquist: nyq,
                });
            }
            // Cycles per sample: nyquist maps to 0.5.
            Ok(c / (2.0 * nyq))
        })
        .collect::<Result<_, _>>()?;

    let taper = window.coefficients::<f64>(numtaps)?;

    let taps = match normalized.as_slice() {
        [fc] => {
            let mut h = ideal_lowpass(numtaps, *fc, &taper);
            scale_response(&mut h, 0.0);
            h
        }
        [f1, f2] => {
            if f1 >= f2 {
                return Err(FilterError::UnsupportedArgument(format!(
                    "band-pass cutoffs must be strictly increasing, got ({f1}, {f2}) cycles/sample"
                )));
            }
            let hi = ideal_lowpass(numtaps, *f2, &taper);
            let lo = ideal_lowpass(numtaps, *f1, &taper);
            let mut h: Vec<f64> = hi.iter().zip(&lo).map(|(a, b)| a - b).collect();
            scale_response(&mut h, 0.5 * (f1 + f2));
            h
        }
        [] => {
            return Err(FilterError::UnsupportedArgument(
                "empty cutoff sequence".to_string(),
            ))
        }
        more => {
            return Err(FilterError::UnsupportedArgument(format!(
                "at most two cutoffs are supported, got {}",
                more.len()
            )))
        }
    };

    Ok(taps
        .into_iter()
        .map(|v| T::from(v).unwrap_or_else(T::zero))
        .collect())
}

/// Ideal low-pass impulse response tapered by a window.
fn ideal_lowpass(numtaps: usize, fc: f64, taper: &[f64]) -> Vec<f64> {
    let center = (numtaps - 1) as f64 / 2.0;
    (0..numtaps)
        .map(|i| {
            let k = i as f64 - center;
            2.0 * fc * sinc(2.0 * fc * k) * taper[i]
        })
        .collect()
}

/// Scale taps so the frequency response is unity at `freq` cycles per sample.
fn scale_response(h: &mut [f64], freq: f64) {
    let center = (h.len() - 1) as f64 / 2.0;
    let gain: f64 = h
        .iter()
        .enumerate()
        .map(|(i, &v)| v * (2.0 * PI * freq * (i as f64 - center)).cos())
        .sum();
    if gain != 0.0 {
        for v in h.iter_mut() {
            *v /= gain;
        }
    }
}
