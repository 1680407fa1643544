//! Placement constants and runtime configuration defaults

// Tile geometry
/// Default tile width in pixels
pub const DEFAULT_TILE_WIDTH: u32 = 72;
/// Default tile height in pixels
pub const DEFAULT_TILE_HEIGHT: u32 = 72;

/// Width the target image is resized to before the grid is laid out
pub const DEFAULT_PROCESSING_WIDTH: u32 = 2880;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed processing width
pub const MAX_PROCESSING_WIDTH: u32 = 20_000;

// Placement constraints
/// Times a tile may be placed before leaving the pool (0 = unlimited)
pub const DEFAULT_REUSE_LIMIT: usize = 1;

/// Adjacency exclusion radius in cells
pub const DEFAULT_ADJACENCY_RADIUS: u32 = 0;

/// Cells with any pixel alpha below this value are skipped
pub const DEFAULT_ALPHA_CUTOFF: u8 = 1;

/// Blend weight pulling tiles toward their cell colour
pub const DEFAULT_COLOR_CORRECTION: f64 = 0.0;

/// Fixed seed for reproducible random traversal
pub const DEFAULT_SEED: u64 = 42;

// Progress bar display settings
/// Cells placed between progress bar refreshes
pub const PROGRESS_REFRESH_INTERVAL: usize = 30;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// File extensions accepted as tile images
pub const TILE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
