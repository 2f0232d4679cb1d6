//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer provides post-hoc views of a configured filter: the
//! boundary-weight renormalization field as a standalone diagnostic, and the
//! kernel's tap profile and spectral magnitude response.
//!
//! # Architecture
//!
//! ```text
//! API
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Standalone boundary-weight fields.
pub mod boundary;

/// Spectral-response diagnostics.
pub mod response;
