//! Photo mosaic rendering with constrained tile placement
//!
//! The target image is split into a grid of cells and each cell is filled
//! with the pool tile whose average colour is closest, subject to reuse
//! limits, an adjacency exclusion radius, optional colour correction and
//! optional mirroring. Transparent cells are left undrawn.

#![forbid(unsafe_code)]

/// Tile pool, matching and the cell-by-cell placement engine
pub mod algorithm;
/// Average colours, distances and tile colour correction
pub mod color;
/// Input/output operations and error handling
pub mod io;
/// Pixel buffers, grid traversal and transparency checks
pub mod spatial;

pub use algorithm::placement::{
    Completion, PlacementConfig, PlacementEngine, PlacementResult, RunStatistics, render_mosaic,
};
pub use io::error::{MosaicError, Result};
