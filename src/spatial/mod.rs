//! Spatial data structures and grid traversal
//!
//! This module contains spatial-related functionality including:
//! - Pixel buffer access and compositing
//! - Grid dimensions and cell traversal orders
//! - Transparency gating of cells

/// Pixel buffer abstraction over in-memory bitmaps
pub mod buffer;
/// Grid geometry and traversal order generation
pub mod traversal;
/// Transparency checks for target regions
pub mod transparency;

pub use buffer::PixelBuffer;
pub use traversal::{Cell, GridDimensions, PixelPosition, TraversalOrder};
