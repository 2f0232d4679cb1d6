//! # ndfir — windowed FIR filtering for labeled N-dimensional arrays
//!
//! Boundary-aware separable FIR convolution over labeled, chunked
//! N-dimensional arrays: build a separable kernel (boxcar, Lanczos, or any
//! cataloged window) along one or more named axes, then apply it as a
//! chunk-parallel convolution with missing-value handling, producing a
//! filtered array with the same dimensions and coordinates as the input.
//!
//! ## What it does
//!
//! * **Separable kernels**: per-dimension orders, cutoffs, and window
//!   functions combine through outer products into one N-dimensional kernel
//!   whose rank always matches the array's.
//! * **Windowed-sinc design**: a cutoff turns the window into a low-pass (or
//!   band-pass) FIR design, normalized against the dimension's Nyquist
//!   frequency as derived from its coordinates.
//! * **Halo-aware chunking**: chunk-local convolution fetches exactly the
//!   kernel radius of overlap from neighboring chunks, so any chunk layout
//!   reproduces the monolithic result; chunks run in parallel on the
//!   `rayon` pool.
//! * **Missing-value correction**: non-finite cells are masked out and the
//!   output is renormalized by the locally available kernel weight, so data
//!   near gaps and domain edges is not attenuated. Missing cells stay
//!   missing.
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::{ArrayD, IxDyn};
//! use ndfir::prelude::*;
//!
//! // A 1-D array of ones on the "x" axis.
//! let data = ArrayD::from_elem(IxDyn(&[20]), 1.0_f64);
//! let array = LabeledArray::new(data, ["x"])?;
//!
//! // A 5-tap boxcar along x: low-passing a constant leaves it unchanged.
//! let window = Filter::new().dims(["x"]).order(5).build(&array)?;
//! let filtered = window.convolve().compute()?;
//!
//! assert!(filtered
//!     .data()
//!     .iter()
//!     .all(|&v| (v - 1.0).abs() < 1e-12));
//! # Ok::<(), FilterError>(())
//! ```
//!
//! ## Cutoffs and windows
//!
//! ```rust
//! use ndarray::{ArrayD, IxDyn};
//! use ndfir::prelude::*;
//!
//! let data = ArrayD::from_elem(IxDyn(&[64, 32]), 0.0_f64);
//! let array = LabeledArray::new(data, ["time", "space"])?
//!     .with_coord("time", (0..64).map(f64::from).collect())?;
//!
//! // Low-pass along time only; space is left untouched (unit kernel axis).
//! let window = Filter::new()
//!     .dims(["time"])
//!     .order(9)
//!     .cutoff(0.1)
//!     .window(WindowFunction::Hann)
//!     .chunks(16)
//!     .build(&array)?;
//!
//! assert_eq!(window.kernel().shape(), &[9, 1]);
//! assert_eq!(window.halo(), &[4, 0]);
//! # Ok::<(), FilterError>(())
//! ```
//!
//! ## Deferred evaluation
//!
//! `convolve().defer()` returns an unevaluated [`Deferred`] node instead of
//! a realized array; `then` fuses further stages and `compute` pays the
//! evaluation cost once.
//!
//! [`Deferred`]: crate::prelude::Deferred

// Layer 1: Primitives - errors, labeled arrays, argument normalization.
mod primitives;

// Layer 2: Math - window catalog, FIR design, N-d convolution.
mod math;

// Layer 3: Engine - kernel synthesis, chunked execution, convolution driver.
mod engine;

// Layer 4: Evaluation - boundary weights and spectral diagnostics.
mod evaluation;

// High-level fluent API for windowed filtering.
mod api;

// Standard filtering prelude.
pub mod prelude {
    pub use crate::api::{
        BoundaryMode, Convolution, Deferred, Filter, FilterError, FrequencyResponse,
        LabeledArray, TapProfile, Window, WindowFunction,
    };
    pub use crate::primitives::args::DimArg;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing
// purposes. It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
