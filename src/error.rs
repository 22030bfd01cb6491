//! Error type of the crate.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by samplers, the robust estimator and the debug sink.
#[derive(Debug, Error)]
pub enum Error {
    /// A sampler was asked for more distinct indices than its universe holds.
    #[error("cannot draw {size} distinct indices from a universe of {universe}")]
    SampleTooLarge {
        /// Requested sample width.
        size: usize,
        /// Number of indices available, `maximum + 1`.
        universe: usize,
    },

    /// The sampler state could not be allocated.
    #[error("failed to allocate sampler state: {0}")]
    Allocation(#[from] TryReserveError),

    /// Source points, destination points and weights differ in length.
    #[error("correspondence length mismatch: {src} source points, {dst} destination points, {weights} weights")]
    LengthMismatch {
        /// Number of source points.
        src: usize,
        /// Number of destination points.
        dst: usize,
        /// Number of weights.
        weights: usize,
    },

    /// The final SVG header is longer than the space reserved for it.
    #[error("svg header of {len} bytes does not fit the {capacity} reserved bytes")]
    HeaderOverflow {
        /// Length of the header to write.
        len: usize,
        /// Bytes reserved at the start of the document.
        capacity: usize,
    },

    /// Writing the debug drawing failed.
    #[error("svg output failed: {0}")]
    Io(#[from] std::io::Error),
}
