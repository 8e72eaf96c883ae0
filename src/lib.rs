//! Fixed-size dense 2D grid addressed by `(i, j)` or by `glam` vectors.
#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod grid;

pub use error::{GridError, Result};
pub use glam::{IVec2, UVec2};
pub use grid::Grid2D;
