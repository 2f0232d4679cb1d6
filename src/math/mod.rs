//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure numeric building blocks behind filtering:
//! - window coefficient generators (the catalog)
//! - windowed-sinc FIR design
//! - direct N-dimensional convolution with boundary handling
//!
//! These are reusable mathematical functions with no chunking, labeling, or
//! configuration logic.
//!
//! # Architecture
//!
//! ```text
//! API
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Window-function catalog.
pub mod window;

/// Windowed-sinc FIR design.
pub mod design;

/// N-dimensional convolution with boundary handling.
pub mod convolve;
