//! Input validation for filter configuration.
//!
//! ## Purpose
//!
//! This module provides fail-fast validation for the filter builder: selected
//! dimensions, tap counts, chunk lengths, and builder hygiene. Checks run
//! before any kernel state is built, so configuration errors never leave
//! partial state behind.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Ordering**: Checks are ordered from cheap to expensive.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective constraints.
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not resolve arguments or build kernels.
//! * This module does not correct invalid inputs.

use num_traits::Float;

use crate::primitives::errors::FilterError;
use crate::primitives::labeled::LabeledArray;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for filter configuration.
///
/// Provides static methods returning `Result<(), FilterError>` that fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    /// Validate that the selected dimensions are distinct and present in the
    /// array.
    pub fn validate_dims<T: Float>(
        dims: &[String],
        array: &LabeledArray<T>,
    ) -> Result<(), FilterError> {
        for (i, di) in dims.iter().enumerate() {
            if dims[..i].contains(di) {
                return Err(FilterError::UnsupportedArgument(format!(
                    "dimension '{di}' selected twice"
                )));
            }
            if array.axis_of(di).is_none() {
                return Err(FilterError::UnknownDimension { dim: di.clone() });
            }
        }
        Ok(())
    }

    /// Validate a tap count: positive and odd, so the kernel is symmetric
    /// about an integer center.
    pub fn validate_order(order: usize) -> Result<(), FilterError> {
        if order == 0 || order % 2 == 0 {
            return Err(FilterError::InvalidWindowLength { got: order });
        }
        Ok(())
    }

    /// Validate a chunk length along one axis.
    pub fn validate_chunk(len: usize) -> Result<(), FilterError> {
        if len == 0 {
            return Err(FilterError::InvalidChunkSize { got: len });
        }
        Ok(())
    }

    /// Validate that no builder parameter was set multiple times.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), FilterError> {
        if let Some(parameter) = duplicate_param {
            return Err(FilterError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
