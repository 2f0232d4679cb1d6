//! High-level API for windowed filtering.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point: a fluent [`Filter`]
//! builder that resolves per-dimension arguments against a labeled array and
//! builds the kernel, and the resulting [`Window`] object whose
//! [`convolve`](Window::convolve) sub-builder applies the filter eagerly or
//! as a deferred node.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all
//!   parameters; per-dimension arguments accept scalars, sequences, or
//!   name-keyed mappings.
//! * **Value semantics**: `build()` produces an immutable configuration —
//!   spec, kernel, halo, chunk layout — bound to a snapshot of the array;
//!   nothing mutates after construction.
//! * **Validated**: Arguments are validated when `build()` runs, before any
//!   kernel state exists.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`Filter`] via `Filter::new()`.
//! 2. Chain configuration methods (`.dims()`, `.order()`, `.cutoff()`,
//!    `.window()`, `.chunks()`).
//! 3. Bind to an array with `.build(&array)` to get a [`Window`].
//! 4. Apply with `.convolve()`, inspect with `.boundary_weights()`,
//!    `.taps()`, or `.frequency_response()`.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use ndarray::ArrayD;
use num_traits::Float;

use crate::engine::executor::convolve_labeled;
use crate::engine::kernel::{build_kernel, FilterSpec, KernelPlan};
use crate::engine::validator::Validator;
use crate::evaluation::boundary;
use crate::evaluation::response;
use crate::primitives::args::{resolve, resolve_vec, DimArg};

// Publicly re-exported types
pub use crate::engine::executor::Deferred;
pub use crate::evaluation::response::{FrequencyResponse, TapProfile};
pub use crate::math::convolve::BoundaryMode;
pub use crate::math::window::WindowFunction;
pub use crate::primitives::errors::FilterError;
pub use crate::primitives::labeled::LabeledArray;

// ============================================================================
// Filter Builder
// ============================================================================

/// Fluent builder for configuring a windowed filter.
#[derive(Debug, Clone)]
pub struct Filter<T> {
    /// Filtering dimensions; `None` selects every array dimension.
    dims: Option<Vec<String>>,

    /// Tap count per dimension; `None` defaults to the dimension length
    /// (rounded down to odd).
    order: Option<DimArg<usize>>,

    /// Cutoff frequencies per dimension; `None` uses the window shape
    /// directly.
    cutoff: Option<DimArg<T>>,

    /// Window function per dimension, default boxcar.
    window: Option<DimArg<WindowFunction>>,

    /// Chunk length per dimension; unspecified axes get a single chunk.
    chunks: Option<DimArg<usize>>,

    /// Tracks if any parameter was set multiple times (for validation).
    duplicate_param: Option<&'static str>,
}

impl<T: Float + Send + Sync> Default for Filter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + Send + Sync> Filter<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            dims: None,
            order: None,
            cutoff: None,
            window: None,
            chunks: None,
            duplicate_param: None,
        }
    }

    /// Select the filtering dimensions.
    pub fn dims<S: Into<String>>(mut self, dims: impl IntoIterator<Item = S>) -> Self {
        if self.dims.is_some() {
            self.duplicate_param = Some("dims");
        }
        self.dims = Some(dims.into_iter().map(Into::into).collect());
        self
    }

    /// Set the tap count (window order) per filtering dimension.
    pub fn order(mut self, order: impl Into<DimArg<usize>>) -> Self {
        if self.order.is_some() {
            self.duplicate_param = Some("order");
        }
        self.order = Some(order.into());
        self
    }

    /// Set the cutoff frequency per filtering dimension, in the coordinate's
    /// frequency units. A two-element sequence for a single dimension
    /// designs a band-pass.
    pub fn cutoff(mut self, cutoff: impl Into<DimArg<T>>) -> Self {
        if self.cutoff.is_some() {
            self.duplicate_param = Some("cutoff");
        }
        self.cutoff = Some(cutoff.into());
        self
    }

    /// Set the window function per filtering dimension.
    pub fn window(mut self, window: impl Into<DimArg<WindowFunction>>) -> Self {
        if self.window.is_some() {
            self.duplicate_param = Some("window");
        }
        self.window = Some(window.into());
        self
    }

    /// Set the chunk length per dimension for the execution grid.
    pub fn chunks(mut self, chunks: impl Into<DimArg<usize>>) -> Self {
        if self.chunks.is_some() {
            self.duplicate_param = Some("chunks");
        }
        self.chunks = Some(chunks.into());
        self
    }

    /// Resolve the configuration against `array` and build the kernel.
    pub fn build(self, array: &LabeledArray<T>) -> Result<Window<T>, FilterError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let dims: Vec<String> = match self.dims {
            Some(dims) => dims,
            None => array.dims().to_vec(),
        };
        Validator::validate_dims(&dims, array)?;

        let mut order = BTreeMap::new();
        for (di, resolved) in resolve(self.order.as_ref(), &dims, None)? {
            let n = match resolved {
                Some(n) => n,
                // Default: the whole dimension, rounded down to odd.
                None => {
                    let len = array.len_of(&di).unwrap_or(0);
                    if len % 2 == 1 {
                        len
                    } else {
                        len.saturating_sub(1)
                    }
                }
            };
            Validator::validate_order(n)?;
            order.insert(di, n);
        }

        let cutoff = resolve_vec(self.cutoff.as_ref(), &dims, None)?;

        let window = resolve(self.window.as_ref(), &dims, Some(WindowFunction::default()))?
            .into_iter()
            .map(|(di, w)| (di, w.unwrap_or_default()))
            .collect();

        let mut chunks = Vec::with_capacity(array.ndim());
        let chunk_map = resolve(self.chunks.as_ref(), array.dims(), None)?;
        for di in array.dims() {
            let len = array.len_of(di).unwrap_or(1).max(1);
            let chunk = chunk_map.get(di).copied().flatten().unwrap_or(len);
            Validator::validate_chunk(chunk)?;
            chunks.push(chunk);
        }

        let spec = FilterSpec {
            dims,
            order,
            cutoff,
            window,
        };
        let plan = build_kernel(array, &spec)?;

        Ok(Window {
            array: array.clone(),
            chunks,
            spec,
            plan,
        })
    }
}

// ============================================================================
// Configured Window
// ============================================================================

/// A filter configuration bound to an array: resolved spec, built kernel,
/// halo depths, and chunk layout. Immutable once built.
#[derive(Debug, Clone)]
pub struct Window<T> {
    array: LabeledArray<T>,
    chunks: Vec<usize>,
    spec: FilterSpec<T>,
    plan: KernelPlan<T>,
}

impl<T: Float + Send + Sync> Window<T> {
    // ========================================================================
    // Accessors
    // ========================================================================

    /// The bound array snapshot.
    #[inline]
    pub fn array(&self) -> &LabeledArray<T> {
        &self.array
    }

    /// Filtering dimensions, in selection order.
    #[inline]
    pub fn dims(&self) -> &[String] {
        &self.spec.dims
    }

    /// Tap count per filtering dimension.
    #[inline]
    pub fn order(&self) -> &BTreeMap<String, usize> {
        &self.spec.order
    }

    /// The built N-dimensional kernel.
    #[inline]
    pub fn kernel(&self) -> &ArrayD<T> {
        &self.plan.kernel
    }

    /// Halo depth per axis position.
    #[inline]
    pub fn halo(&self) -> &[usize] {
        &self.plan.halo
    }

    /// Nyquist frequency per filtering dimension.
    #[inline]
    pub fn nyquist(&self) -> &BTreeMap<String, T> {
        &self.plan.nyquist
    }

    /// Sample spacing per filtering dimension.
    #[inline]
    pub fn spacing(&self) -> &BTreeMap<String, T> {
        &self.plan.spacing
    }

    /// Chunk length per axis position.
    #[inline]
    pub fn chunks(&self) -> &[usize] {
        &self.chunks
    }

    // ========================================================================
    // Application
    // ========================================================================

    /// Start a convolution of the window with its bound array.
    pub fn convolve(&self) -> Convolution<'_, T> {
        Convolution {
            window: self,
            mode: BoundaryMode::default(),
            weights: None,
        }
    }

    /// Compute the boundary-weight field as a standalone diagnostic.
    ///
    /// `drop_dims` lists non-filtering dimensions along which the mask is
    /// known constant; the field is evaluated at their first index only.
    pub fn boundary_weights(
        &self,
        mode: BoundaryMode,
        drop_dims: &[&str],
    ) -> Result<LabeledArray<T>, FilterError> {
        let drops: Vec<String> = drop_dims.iter().map(|s| (*s).to_string()).collect();
        boundary::boundary_weights(&self.array, &self.plan.kernel, mode, &drops)
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// The 1-D tap profile along a filtering dimension.
    pub fn taps(&self, dim: &str) -> Result<TapProfile<T>, FilterError> {
        let axis = self.filtering_axis(dim)?;
        response::taps(&self.plan.kernel, axis)
    }

    /// The normalized magnitude response (dB) along a filtering dimension,
    /// on a frequency grid in cycles per coordinate unit.
    pub fn frequency_response(
        &self,
        dim: &str,
        nfft: usize,
    ) -> Result<FrequencyResponse<T>, FilterError> {
        let axis = self.filtering_axis(dim)?;
        let spacing = self.plan.spacing[dim];
        response::frequency_response(&self.plan.kernel, axis, spacing, nfft)
    }

    fn filtering_axis(&self, dim: &str) -> Result<usize, FilterError> {
        let axis = self
            .array
            .axis_of(dim)
            .ok_or_else(|| FilterError::UnknownDimension {
                dim: dim.to_string(),
            })?;
        if !self.spec.dims.iter().any(|d| d == dim) {
            return Err(FilterError::UnsupportedArgument(format!(
                "dimension '{dim}' is not a filtering dimension"
            )));
        }
        Ok(axis)
    }
}

impl<T: Float> Display for Window<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Window [")?;
        for (i, di) in self.spec.dims.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{di}: order={}", self.spec.order[di])?;
            write!(f, ", window={}", self.spec.window[di].name())?;
            match &self.spec.cutoff[di] {
                Some(cutoffs) => {
                    let rendered: Vec<String> = cutoffs
                        .iter()
                        .map(|c| format!("{}", c.to_f64().unwrap_or(f64::NAN)))
                        .collect();
                    write!(f, ", cutoff=[{}]", rendered.join(", "))?;
                }
                None => write!(f, ", cutoff=None")?,
            }
        }
        write!(f, "]")
    }
}

// ============================================================================
// Convolution Sub-Builder
// ============================================================================

/// Options for one application of a [`Window`] to its bound array.
#[derive(Debug)]
pub struct Convolution<'a, T> {
    window: &'a Window<T>,
    mode: BoundaryMode,
    weights: Option<ArrayD<T>>,
}

impl<'a, T: Float + Send + Sync> Convolution<'a, T> {
    /// Set the boundary mode (default: reflect).
    pub fn mode(mut self, mode: BoundaryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Supply an explicit renormalization field instead of deriving one from
    /// the mask.
    pub fn weights(mut self, weights: ArrayD<T>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Apply the filter now, blocking until all chunk tasks complete.
    pub fn compute(self) -> Result<LabeledArray<T>, FilterError> {
        let w = self.window;
        convolve_labeled(
            &w.array,
            &w.chunks,
            &w.plan.kernel,
            &w.plan.halo,
            self.mode,
            self.weights.as_ref(),
        )
    }

    /// Return the application as an unevaluated [`Deferred`] node.
    pub fn defer(self) -> Deferred<T>
    where
        T: 'static,
    {
        let array = self.window.array.clone();
        let chunks = self.window.chunks.clone();
        let kernel = self.window.plan.kernel.clone();
        let halo = self.window.plan.halo.clone();
        let mode = self.mode;
        let weights = self.weights;
        Deferred::new(move || {
            convolve_labeled(&array, &chunks, &kernel, &halo, mode, weights.as_ref())
        })
    }
}
