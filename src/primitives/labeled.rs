//! Labeled N-dimensional arrays.
//!
//! ## Purpose
//!
//! This module provides [`LabeledArray`], the crate's carrier type: an owned
//! N-dimensional payload with ordered dimension names, optional per-dimension
//! coordinate vectors, and an optional name. Filtering consumes and produces
//! labeled arrays whose labels are identical; only the payload changes.
//!
//! ## Design notes
//!
//! * **Value semantics**: Labels are immutable after construction; derived
//!   arrays are rebuilt via [`LabeledArray::with_data`].
//! * **Missing values**: Non-finite payload cells (NaN, ±inf) are "missing";
//!   masking and filling are the only missing-value operations.
//! * **Validation**: Construction fails fast on rank or coordinate-length
//!   disagreement.
//!
//! ## Invariants
//!
//! * `dims.len()` equals payload rank, and dimension names are distinct.
//! * Every coordinate vector has the length of its dimension.
//!
//! ## Non-goals
//!
//! * This module does not provide alignment, broadcasting, or indexing by
//!   coordinate value.
//! * This module does not interpret coordinates; spacing is derived by the
//!   kernel builder.

use std::collections::BTreeMap;

use ndarray::ArrayD;
use num_traits::Float;

use crate::primitives::errors::FilterError;

// ============================================================================
// Labeled Array
// ============================================================================

/// An owned N-dimensional array with named dimensions and coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray<T> {
    name: Option<String>,
    dims: Vec<String>,
    coords: BTreeMap<String, Vec<T>>,
    data: ArrayD<T>,
}

impl<T: Float> LabeledArray<T> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a labeled array from a payload and ordered dimension names.
    pub fn new<S: Into<String>>(
        data: ArrayD<T>,
        dims: impl IntoIterator<Item = S>,
    ) -> Result<Self, FilterError> {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();

        if dims.len() != data.ndim() {
            return Err(FilterError::InvalidInput(format!(
                "{} dimension names for a rank-{} payload",
                dims.len(),
                data.ndim()
            )));
        }
        for (i, di) in dims.iter().enumerate() {
            if dims[..i].contains(di) {
                return Err(FilterError::InvalidInput(format!(
                    "duplicate dimension name '{di}'"
                )));
            }
        }

        Ok(Self {
            name: None,
            dims,
            coords: BTreeMap::new(),
            data,
        })
    }

    /// Reconstruct a labeled array from raw parts.
    ///
    /// This is the inverse of decomposing an array into payload, dimension
    /// names, coordinates, and name; it runs the same validation as the
    /// incremental constructors.
    pub fn from_parts<S: Into<String>>(
        data: ArrayD<T>,
        dims: impl IntoIterator<Item = S>,
        coords: BTreeMap<String, Vec<T>>,
        name: Option<String>,
    ) -> Result<Self, FilterError> {
        let mut arr = Self::new(data, dims)?;
        for (dim, values) in coords {
            arr = arr.with_coord(dim, values)?;
        }
        arr.name = name;
        Ok(arr)
    }

    /// Attach a name to the array.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a coordinate vector to a dimension.
    pub fn with_coord(
        mut self,
        dim: impl Into<String>,
        values: Vec<T>,
    ) -> Result<Self, FilterError> {
        let dim = dim.into();
        let axis = self
            .axis_of(&dim)
            .ok_or_else(|| FilterError::UnknownDimension { dim: dim.clone() })?;

        if values.len() != self.data.shape()[axis] {
            return Err(FilterError::InvalidInput(format!(
                "coordinate '{dim}' has {} values for a length-{} dimension",
                values.len(),
                self.data.shape()[axis]
            )));
        }

        self.coords.insert(dim, values);
        Ok(self)
    }

    /// Rebuild the array with a new payload, preserving all labels.
    pub fn with_data(&self, data: ArrayD<T>) -> Result<Self, FilterError> {
        if data.shape() != self.data.shape() {
            return Err(FilterError::ShapeMismatch {
                expected: self.data.ndim(),
                got: data.ndim(),
            });
        }
        Ok(Self {
            name: self.name.clone(),
            dims: self.dims.clone(),
            coords: self.coords.clone(),
            data,
        })
    }

    // ========================================================================
    // Label Access
    // ========================================================================

    /// Ordered dimension names.
    #[inline]
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Optional array name.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Payload rank.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Payload shape.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Axis position of a named dimension.
    pub fn axis_of(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    /// Length of a named dimension.
    pub fn len_of(&self, dim: &str) -> Option<usize> {
        self.axis_of(dim).map(|ax| self.data.shape()[ax])
    }

    /// Coordinate values of a named dimension, if any were attached.
    pub fn coord(&self, dim: &str) -> Option<&[T]> {
        self.coords.get(dim).map(Vec::as_slice)
    }

    /// All attached coordinates.
    #[inline]
    pub fn coords(&self) -> &BTreeMap<String, Vec<T>> {
        &self.coords
    }

    /// The payload.
    #[inline]
    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    /// Consume the array, returning the payload.
    #[inline]
    pub fn into_data(self) -> ArrayD<T> {
        self.data
    }

    // ========================================================================
    // Missing-Value Operations
    // ========================================================================

    /// Mask of present cells: 1 where the payload is finite, 0 elsewhere.
    pub fn present_mask(&self) -> ArrayD<T> {
        self.data
            .mapv(|v| if v.is_finite() { T::one() } else { T::zero() })
    }

    /// Payload with missing cells replaced by `fill`.
    pub fn fill_missing(&self, fill: T) -> ArrayD<T> {
        self.data.mapv(|v| if v.is_finite() { v } else { fill })
    }
}
