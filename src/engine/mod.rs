//! Layer 3: Engine
//!
//! # Purpose
//!
//! This layer orchestrates filtering: it validates configuration, builds the
//! separable N-dimensional kernel with its halo bookkeeping, and drives the
//! mask-aware chunked convolution over the `rayon` pool.
//!
//! # Architecture
//!
//! ```text
//! API
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Engine ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Separable kernel synthesis.
pub mod kernel;

/// Chunked arrays and halo-aware block execution.
pub mod chunked;

/// Mask-aware convolution driver and deferred evaluation.
pub mod executor;

/// Validation utilities.
pub mod validator;
