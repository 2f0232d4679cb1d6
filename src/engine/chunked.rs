//! Chunked arrays and halo-aware block execution.
//!
//! ## Purpose
//!
//! This module provides the chunked-execution primitive the convolution
//! engine is built on: a [`ChunkedArray`] carrying per-axis chunk lengths,
//! and [`ChunkedArray::map_overlap`], which applies a pure block transform
//! over every chunk together with `depth` extra samples per side (fetched
//! from neighboring chunks, or synthesized by the boundary mode at domain
//! edges), trims the halo back off, and reassembles an array of the original
//! shape.
//!
//! ## Design notes
//!
//! * **Overlap then trim**: With depth at least the kernel radius, each
//!   chunk's interior convolution sees the same context as a monolithic
//!   convolution, so the reassembled result is identical.
//! * **Parallelism**: Chunks are independent apart from their halo reads, so
//!   blocks run on the `rayon` pool; each task writes a disjoint output
//!   region.
//! * **One padding pass**: The whole array is padded once by the per-axis
//!   depth; every chunk-plus-halo slab is then a plain view into the padded
//!   array.
//!
//! ## Invariants
//!
//! * Output shape equals input shape; chunk layout is preserved.
//! * Block transforms are pure; shared state (kernel, depths) is read-only.
//!
//! ## Non-goals
//!
//! * This module does not know about masks, weights, or labels.
//! * No cancellation or timeout; the caller owns scheduling policy.

use log::debug;
use ndarray::{ArrayD, ArrayViewD, Dimension, IxDyn, Slice};
use num_traits::Float;
use rayon::prelude::*;

use crate::math::convolve::{reflect_index, BoundaryMode};
use crate::primitives::errors::FilterError;

// ============================================================================
// Chunked Array
// ============================================================================

/// An in-memory array with an explicit per-axis chunk layout.
#[derive(Debug, Clone)]
pub struct ChunkedArray<T> {
    data: ArrayD<T>,
    chunks: Vec<usize>,
}

impl<T: Float + Send + Sync> ChunkedArray<T> {
    /// Chunk an array. Axes without an explicit chunk length get a single
    /// chunk spanning the whole axis.
    pub fn new(data: ArrayD<T>, chunks: Option<Vec<usize>>) -> Result<Self, FilterError> {
        let default: Vec<usize> = data.shape().iter().map(|&n| n.max(1)).collect();
        let chunks = match chunks {
            None => default,
            Some(chunks) => {
                if chunks.len() != data.ndim() {
                    return Err(FilterError::ShapeMismatch {
                        expected: data.ndim(),
                        got: chunks.len(),
                    });
                }
                for &len in &chunks {
                    if len == 0 {
                        return Err(FilterError::InvalidChunkSize { got: len });
                    }
                }
                chunks
            }
        };
        Ok(Self { data, chunks })
    }

    /// The underlying payload.
    #[inline]
    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    /// Consume the chunked array, returning the payload.
    #[inline]
    pub fn into_data(self) -> ArrayD<T> {
        self.data
    }

    /// Chunk length per axis.
    #[inline]
    pub fn chunks(&self) -> &[usize] {
        &self.chunks
    }

    /// Total number of chunks in the grid.
    pub fn chunk_count(&self) -> usize {
        self.data
            .shape()
            .iter()
            .zip(&self.chunks)
            .map(|(&n, &c)| n.div_ceil(c).max(1))
            .product()
    }

    /// Apply a pure block transform over every chunk with halo and trim.
    ///
    /// `depth[d]` extra samples per side are provided along axis `d`; the
    /// transform output must have the slab's shape and is trimmed back to
    /// the chunk shape before reassembly.
    pub fn map_overlap<F>(
        &self,
        depth: &[usize],
        boundary: BoundaryMode,
        transform: F,
    ) -> Result<ChunkedArray<T>, FilterError>
    where
        F: Fn(ArrayViewD<'_, T>) -> Result<ArrayD<T>, FilterError> + Sync,
    {
        if depth.len() != self.data.ndim() {
            return Err(FilterError::ShapeMismatch {
                expected: self.data.ndim(),
                got: depth.len(),
            });
        }

        let regions = self.chunk_regions();
        debug!(
            "map_overlap: {} chunk(s), depth {:?}, boundary '{}'",
            regions.len(),
            depth,
            boundary.name()
        );

        let padded = pad(&self.data, depth, boundary);

        let blocks: Vec<(Vec<(usize, usize)>, ArrayD<T>)> = regions
            .into_par_iter()
            .map(|region| {
                // Padded index = original index + depth, so the slab spanning
                // [start, end) plus halo is [start, end + 2*depth) in padded
                // coordinates.
                let slab = padded.slice_each_axis(|ax| {
                    let d = ax.axis.index();
                    let (start, end) = region[d];
                    Slice::from(start as isize..(end + 2 * depth[d]) as isize)
                });

                let slab_shape = slab.shape().to_vec();
                let full = transform(slab)?;
                if full.shape() != slab_shape.as_slice() {
                    return Err(FilterError::ShapeMismatch {
                        expected: slab_shape.len(),
                        got: full.ndim(),
                    });
                }

                let trimmed = full
                    .slice_each_axis(|ax| {
                        let d = ax.axis.index();
                        let len = ax.len;
                        Slice::from(depth[d] as isize..(len - depth[d]) as isize)
                    })
                    .to_owned();

                Ok((region, trimmed))
            })
            .collect::<Result<_, FilterError>>()?;

        let mut out = ArrayD::<T>::zeros(self.data.raw_dim());
        for (region, block) in blocks {
            out.slice_each_axis_mut(|ax| {
                let (start, end) = region[ax.axis.index()];
                Slice::from(start as isize..end as isize)
            })
            .assign(&block);
        }

        debug!("map_overlap: reassembled {:?}", out.shape());
        Ok(ChunkedArray {
            data: out,
            chunks: self.chunks.clone(),
        })
    }

    /// Enumerate chunk regions as per-axis `(start, end)` ranges.
    fn chunk_regions(&self) -> Vec<Vec<(usize, usize)>> {
        let per_axis: Vec<Vec<(usize, usize)>> = self
            .data
            .shape()
            .iter()
            .zip(&self.chunks)
            .map(|(&n, &c)| {
                (0..n.max(1))
                    .step_by(c)
                    .map(|s| (s, (s + c).min(n)))
                    .collect()
            })
            .collect();

        let mut regions = Vec::new();
        let mut cursor = vec![0usize; per_axis.len()];
        loop {
            regions.push(
                cursor
                    .iter()
                    .zip(&per_axis)
                    .map(|(&i, axis)| axis[i])
                    .collect(),
            );
            // Odometer increment over the chunk grid.
            let mut d = per_axis.len();
            loop {
                if d == 0 {
                    return regions;
                }
                d -= 1;
                cursor[d] += 1;
                if cursor[d] < per_axis[d].len() {
                    break;
                }
                cursor[d] = 0;
            }
        }
    }
}

// ============================================================================
// Padding
// ============================================================================

/// Pad an array by `depth[d]` samples per side along each axis, synthesizing
/// out-of-domain samples per the boundary mode (`Valid` pads with NaN so
/// under-supported cells null out downstream).
fn pad<T: Float>(data: &ArrayD<T>, depth: &[usize], mode: BoundaryMode) -> ArrayD<T> {
    if depth.iter().all(|&d| d == 0) {
        return data.clone();
    }

    let shape: Vec<usize> = data
        .shape()
        .iter()
        .zip(depth)
        .map(|(&n, &d)| n + 2 * d)
        .collect();

    let mut src = vec![0usize; data.ndim()];
    ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
        let idx = idx.slice();
        for d in 0..src.len() {
            let n = data.shape()[d] as isize;
            let raw = idx[d] as isize - depth[d] as isize;
            if raw >= 0 && raw < n {
                src[d] = raw as usize;
            } else {
                match mode {
                    BoundaryMode::Reflect => src[d] = reflect_index(raw, n) as usize,
                    BoundaryMode::Zero => return T::zero(),
                    BoundaryMode::Valid => return T::nan(),
                }
            }
        }
        data[src.as_slice()]
    })
}
