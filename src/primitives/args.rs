//! Per-dimension argument normalization.
//!
//! ## Purpose
//!
//! This module resolves the flexible per-dimension argument forms accepted by
//! the filter builder — a single scalar, a sequence aligned with the selected
//! dimensions, or a mapping keyed by dimension name — into one value (or a
//! default) per selected dimension. Orders, cutoffs, window choices, and
//! chunk lengths all pass through the same machinery.
//!
//! ## Design notes
//!
//! * **Permissive by contract**: Missing mapping keys and short sequences
//!   fall back to the default; this substitution is designed behavior, not
//!   error suppression.
//! * **Vector-valued args**: A sequence supplied for a single selected
//!   dimension is that dimension's whole value in the [`resolve_vec`] path,
//!   which is how multi-cutoff (band-pass) specifications arrive.
//!
//! ## Invariants
//!
//! * The resolved map contains exactly the selected dimensions as keys.
//! * Resolution never fails for well-formed argument shapes; only an empty
//!   sequence is unsupported.
//!
//! ## Non-goals
//!
//! * This module does not validate resolved values (orders, cutoffs); that is
//!   the validator's and kernel builder's job.

use std::collections::BTreeMap;

use crate::primitives::errors::FilterError;

// ============================================================================
// Per-Dimension Argument
// ============================================================================

/// A per-dimension argument in one of the accepted shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum DimArg<V> {
    /// One value for every selected dimension.
    Scalar(V),

    /// Values assigned positionally to the selected dimensions.
    Sequence(Vec<V>),

    /// Values keyed by dimension name.
    PerDim(BTreeMap<String, V>),
}

impl<V> From<V> for DimArg<V> {
    fn from(value: V) -> Self {
        DimArg::Scalar(value)
    }
}

impl<V> From<Vec<V>> for DimArg<V> {
    fn from(values: Vec<V>) -> Self {
        DimArg::Sequence(values)
    }
}

impl<V> From<BTreeMap<String, V>> for DimArg<V> {
    fn from(map: BTreeMap<String, V>) -> Self {
        DimArg::PerDim(map)
    }
}

impl<V: Clone> From<&[(&str, V)]> for DimArg<V> {
    fn from(pairs: &[(&str, V)]) -> Self {
        DimArg::PerDim(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        )
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve a per-dimension argument to one optional value per dimension.
///
/// * absent argument: every dimension gets the default;
/// * scalar: every dimension gets the value;
/// * mapping: each dimension looks itself up, falling back to the default;
/// * sequence: positional assignment, default past the sequence's end.
pub fn resolve<V: Clone>(
    arg: Option<&DimArg<V>>,
    dims: &[String],
    default: Option<V>,
) -> Result<BTreeMap<String, Option<V>>, FilterError> {
    let mut resolved = BTreeMap::new();

    match arg {
        None => {
            for di in dims {
                resolved.insert(di.clone(), default.clone());
            }
        }
        Some(DimArg::Scalar(v)) => {
            for di in dims {
                resolved.insert(di.clone(), Some(v.clone()));
            }
        }
        Some(DimArg::PerDim(map)) => {
            for di in dims {
                resolved.insert(di.clone(), map.get(di).cloned().or_else(|| default.clone()));
            }
        }
        Some(DimArg::Sequence(values)) => {
            if values.is_empty() {
                return Err(FilterError::UnsupportedArgument(
                    "empty sequence".to_string(),
                ));
            }
            for (i, di) in dims.iter().enumerate() {
                resolved.insert(
                    di.clone(),
                    values.get(i).cloned().or_else(|| default.clone()),
                );
            }
        }
    }

    Ok(resolved)
}

/// Resolve a per-dimension argument whose resolved values are vectors.
///
/// Identical to [`resolve`] except that a sequence supplied for exactly one
/// selected dimension becomes that dimension's whole value, supporting
/// vector-valued per-dimension arguments such as band-pass cutoff pairs.
pub fn resolve_vec<V: Clone>(
    arg: Option<&DimArg<V>>,
    dims: &[String],
    default: Option<Vec<V>>,
) -> Result<BTreeMap<String, Option<Vec<V>>>, FilterError> {
    let mut resolved = BTreeMap::new();

    match arg {
        None => {
            for di in dims {
                resolved.insert(di.clone(), default.clone());
            }
        }
        Some(DimArg::Scalar(v)) => {
            for di in dims {
                resolved.insert(di.clone(), Some(vec![v.clone()]));
            }
        }
        Some(DimArg::PerDim(map)) => {
            for di in dims {
                resolved.insert(
                    di.clone(),
                    map.get(di)
                        .map(|v| vec![v.clone()])
                        .or_else(|| default.clone()),
                );
            }
        }
        Some(DimArg::Sequence(values)) => {
            if values.is_empty() {
                return Err(FilterError::UnsupportedArgument(
                    "empty sequence".to_string(),
                ));
            }
            if dims.len() == 1 {
                resolved.insert(dims[0].clone(), Some(values.clone()));
            } else {
                for (i, di) in dims.iter().enumerate() {
                    resolved.insert(
                        di.clone(),
                        values
                            .get(i)
                            .map(|v| vec![v.clone()])
                            .or_else(|| default.clone()),
                    );
                }
            }
        }
    }

    Ok(resolved)
}
