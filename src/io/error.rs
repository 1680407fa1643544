//! Error types for mosaic construction and image I/O

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
///
/// Only precondition failures live here. Running out of tiles and placing
/// adjacent clones are recoverable outcomes reported through
/// [`crate::algorithm::placement::PlacementResult`].
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Input images don't meet the placement requirements
    ///
    /// Raised for an empty tile list or a target without any pixels.
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile buffer dimensions differ from the configured tile size
    MalformedTile {
        /// Position of the tile in the input list
        index: usize,
        /// Configured tile size (width, height)
        expected: (u32, u32),
        /// Actual buffer size (width, height)
        actual: (u32, u32),
    },

    /// Tile index exceeds the pool
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles in the pool
        max_tiles: usize,
    },

    /// Cell coordinate lies outside the mosaic grid
    CellOutOfBounds {
        /// Requested cell (x, y)
        cell: (u32, u32),
        /// Grid size (columns, rows)
        grid: (u32, u32),
    },

    /// Failed to save the rendered mosaic
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MalformedTile {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Tile {index} is {}x{} but the configured tile size is {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (pool size: {max_tiles})")
            }
            Self::CellOutOfBounds { cell, grid } => {
                write!(
                    f,
                    "Cell ({}, {}) lies outside the {}x{} grid",
                    cell.0, cell.1, grid.0, grid.1
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
