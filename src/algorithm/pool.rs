//! Tile candidates and the shrinking pool they are drawn from
//!
//! Tiles are created once per input image. Each placement bumps the tile's
//! usage counter and appends the placement position; when the counter reaches
//! a non-zero reuse limit the tile leaves the available view for good.

use crate::color::Color;
use crate::io::error::{MosaicError, Result, invalid_parameter, invalid_source};
use crate::spatial::PixelPosition;
use bitvec::{bitvec, vec::BitVec};
use image::RgbaImage;
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

/// Candidate image with its average colour and placement history
#[derive(Debug, Clone)]
pub struct Tile {
    pixels: RgbaImage,
    color: Color,
    usage: usize,
    positions: Vec<PixelPosition>,
}

impl Tile {
    /// Wrap a tile buffer, precomputing its average colour
    pub fn new(pixels: RgbaImage) -> Self {
        let color = Color::average(pixels.pixels());
        Self {
            pixels,
            color,
            usage: 0,
            positions: Vec::new(),
        }
    }

    /// Tile pixels as supplied
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Average colour of the tile pixels
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Number of times the tile has been placed
    pub const fn usage(&self) -> usize {
        self.usage
    }

    /// Placement positions in placement order
    pub fn positions(&self) -> &[PixelPosition] {
        &self.positions
    }
}

/// Working set of tiles with usage tracking
///
/// Removal from the available set is one-way: once a tile reaches the reuse
/// limit it is never offered again during the run.
#[derive(Debug, Clone)]
pub struct TilePool {
    tiles: Vec<Tile>,
    available: BitVec,
    available_count: usize,
    reuse_limit: usize,
    tile_size: (u32, u32),
}

impl TilePool {
    /// Build a pool from pre-resized tile buffers
    ///
    /// Average colours are computed in parallel before the pool is returned.
    /// A `reuse_limit` of 0 means tiles may be placed any number of times.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tiles were supplied
    /// - A tile dimension is zero
    /// - Any buffer does not measure exactly `tile_width` x `tile_height`
    pub fn new(
        images: Vec<RgbaImage>,
        tile_width: u32,
        tile_height: u32,
        reuse_limit: usize,
    ) -> Result<Self> {
        if tile_width == 0 || tile_height == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &format!("{tile_width}x{tile_height}"),
                &"tile dimensions must be positive",
            ));
        }

        if images.is_empty() {
            return Err(invalid_source(&"at least one tile image is required"));
        }

        for (index, image) in images.iter().enumerate() {
            if image.dimensions() != (tile_width, tile_height) {
                return Err(MosaicError::MalformedTile {
                    index,
                    expected: (tile_width, tile_height),
                    actual: image.dimensions(),
                });
            }
        }

        let tiles: Vec<Tile> = images.into_par_iter().map(Tile::new).collect();
        let count = tiles.len();

        Ok(Self {
            tiles,
            available: bitvec![1; count],
            available_count: count,
            reuse_limit,
            tile_size: (tile_width, tile_height),
        })
    }

    /// Total number of tiles, available or not
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the pool holds no tiles at all
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in input order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile by input index
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Configured reuse limit (0 = unlimited)
    pub const fn reuse_limit(&self) -> usize {
        self.reuse_limit
    }

    /// Tile size as (width, height)
    pub const fn tile_size(&self) -> (u32, u32) {
        self.tile_size
    }

    /// Tiles still eligible for placement, in input order
    pub fn available(&self) -> impl Iterator<Item = (usize, &Tile)> + '_ {
        self.available
            .iter_ones()
            .filter_map(|index| self.tiles.get(index).map(|tile| (index, tile)))
    }

    /// Number of tiles still eligible for placement
    pub const fn available_count(&self) -> usize {
        self.available_count
    }

    /// Check if no tile can be placed any more
    pub const fn is_exhausted(&self) -> bool {
        self.available_count == 0
    }

    /// Check if the tile at `index` is still in the available view
    pub fn is_available(&self, index: usize) -> bool {
        self.available.get(index).as_deref() == Some(&true)
    }

    /// Check if a tile's usage is below the reuse limit
    pub const fn has_capacity(&self, tile: &Tile) -> bool {
        self.reuse_limit == 0 || tile.usage < self.reuse_limit
    }

    /// Number of tiles placed at least once
    pub fn distinct_tiles_used(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.usage > 0).count()
    }

    /// Record a placement of the tile at `index`
    ///
    /// Returns `true` when this placement used up the tile's last permitted
    /// reuse and removed it from the available view.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the tile has already
    /// left the pool.
    pub fn record(&mut self, index: usize, position: PixelPosition) -> Result<bool> {
        let max_tiles = self.tiles.len();
        if !self.is_available(index) {
            return Err(if index >= max_tiles {
                MosaicError::InvalidTileIndex { index, max_tiles }
            } else {
                invalid_parameter("tile", &index, &"tile has reached its reuse limit")
            });
        }

        let reuse_limit = self.reuse_limit;
        let Some(tile) = self.tiles.get_mut(index) else {
            return Err(MosaicError::InvalidTileIndex { index, max_tiles });
        };

        tile.usage += 1;
        tile.positions.push(position);

        let exhausted = reuse_limit > 0 && tile.usage >= reuse_limit;
        if exhausted {
            self.available.set(index, false);
            self.available_count -= 1;
        }

        Ok(exhausted)
    }

    /// Forget one placement of the tile at `index`
    ///
    /// Used when a drawn cell is overwritten after the run. The usage count
    /// drops by one but a tile that already left the available view stays
    /// out of it. Returns whether `position` was recorded for the tile.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range
    pub fn release(&mut self, index: usize, position: PixelPosition) -> Result<bool> {
        let max_tiles = self.tiles.len();
        let Some(tile) = self.tiles.get_mut(index) else {
            return Err(MosaicError::InvalidTileIndex { index, max_tiles });
        };

        let Some(slot) = tile.positions.iter().position(|&placed| placed == position) else {
            return Ok(false);
        };

        tile.positions.remove(slot);
        tile.usage = tile.usage.saturating_sub(1);
        Ok(true)
    }
}
