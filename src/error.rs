//! Error types for grid access and construction.

use thiserror::Error;

/// Errors returned by [`Grid2D`](crate::Grid2D) operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate lies outside `[0, width) x [0, height)`.
    #[error("coordinate ({i}, {j}) is outside grid of size {width} x {height}")]
    OutOfBounds {
        /// Column coordinate.
        i: isize,
        /// Row coordinate.
        j: isize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// A storage buffer did not hold exactly `width * height` elements.
    #[error("storage of length {len} does not match grid of size {width} x {height}")]
    InvalidArgument {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// Length of the supplied buffer.
        len: usize,
    },
}

/// Result alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
