use crate::{
    algorithm::pool::{Tile, TilePool},
    algorithm::selection::{AdjacencyBox, best_match, best_non_adjacent_match, is_adjacent},
    color::Color,
    color::correction::{OrientedTile, apply_correction, blend, choose_orientation},
    io::configuration::{
        DEFAULT_ADJACENCY_RADIUS, DEFAULT_ALPHA_CUTOFF, DEFAULT_COLOR_CORRECTION,
        DEFAULT_REUSE_LIMIT, DEFAULT_SEED, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH,
    },
    io::error::{MosaicError, Result, invalid_parameter, invalid_source},
    spatial::transparency::is_mostly_transparent,
    spatial::traversal::Traversal,
    spatial::{Cell, GridDimensions, PixelBuffer, TraversalOrder},
};
use image::RgbaImage;
use log::{debug, info, warn};
use ndarray::Array2;

/// Parameters controlling tile matching, placement and rendering
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementConfig {
    /// Tile width in pixels
    pub tile_width: u32,
    /// Tile height in pixels
    pub tile_height: u32,
    /// Times a tile may be placed before it leaves the pool (0 = unlimited)
    pub reuse_limit: usize,
    /// Radius in cells inside which a tile may not repeat
    pub adjacency_radius: u32,
    /// Order in which cells are visited
    pub traversal: TraversalOrder,
    /// Seed for the random traversal order
    pub seed: u64,
    /// Cells with any pixel alpha below this value are skipped
    pub alpha_cutoff: u8,
    /// Blend weight in `[0, 1]` pulling tiles toward their cell colour
    pub color_correction: f64,
    /// Whether tiles may be mirrored horizontally
    pub allow_flip: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            reuse_limit: DEFAULT_REUSE_LIMIT,
            adjacency_radius: DEFAULT_ADJACENCY_RADIUS,
            traversal: TraversalOrder::default(),
            seed: DEFAULT_SEED,
            alpha_cutoff: DEFAULT_ALPHA_CUTOFF,
            color_correction: DEFAULT_COLOR_CORRECTION,
            allow_flip: false,
        }
    }
}

impl PlacementConfig {
    /// Check the configuration before any processing starts
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either tile dimension is zero
    /// - The colour correction factor is not a number in `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if self.tile_width == 0 {
            return Err(invalid_parameter(
                "tile_width",
                &self.tile_width,
                &"must be positive",
            ));
        }
        if self.tile_height == 0 {
            return Err(invalid_parameter(
                "tile_height",
                &self.tile_height,
                &"must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.color_correction) {
            return Err(invalid_parameter(
                "color_correction",
                &self.color_correction,
                &"must be between 0 and 1",
            ));
        }
        Ok(())
    }

    /// Rendering part of the configuration
    pub const fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            color_correction: self.color_correction,
            allow_flip: self.allow_flip,
        }
    }
}

/// How a chosen tile is turned into output pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderSettings {
    /// Blend weight in `[0, 1]` pulling the tile toward the cell colour
    pub color_correction: f64,
    /// Whether the mirrored tile may be drawn instead
    pub allow_flip: bool,
}

/// Colour-correct a tile toward `target_color` and pick its orientation
pub fn render_tile(
    tile: &Tile,
    target_color: Color,
    target_region: &RgbaImage,
    settings: RenderSettings,
) -> OrientedTile {
    let blended = blend(tile.color(), target_color, settings.color_correction);
    let corrected = apply_correction(tile.pixels(), tile.color(), blended);
    choose_orientation(corrected, target_region, settings.allow_flip)
}

/// Where the pixels of a drawn cell came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileSource {
    /// Tile at this index of the pool
    Pool(usize),
    /// Tile supplied through [`PlacementResult::replace_cell`]
    Replacement,
}

/// Decision recorded for one drawn cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Tile drawn into the cell
    pub source: TileSource,
    /// Whether the tile was mirrored
    pub flipped: bool,
    /// Whether the tile was placed next to itself for lack of alternatives
    pub adjacent_clone: bool,
}

/// Per-cell record of the placements of a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementMap {
    /// Placements indexed by (`row`, `col`); `None` for undrawn cells
    cells: Array2<Option<Placement>>,
}

impl PlacementMap {
    /// Empty map for a grid
    pub fn new(grid: GridDimensions) -> Self {
        Self {
            cells: Array2::from_elem((grid.rows as usize, grid.cols as usize), None),
        }
    }

    /// Grid covered by the map
    pub fn grid(&self) -> GridDimensions {
        let (rows, cols) = self.cells.dim();
        GridDimensions::new(cols as u32, rows as u32)
    }

    /// Placement at a cell, if it was drawn
    pub fn get(&self, cell: Cell) -> Option<&Placement> {
        self.cells
            .get([cell.y as usize, cell.x as usize])
            .and_then(Option::as_ref)
    }

    /// All drawn cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &Placement)> + '_ {
        self.cells.indexed_iter().filter_map(|((row, col), entry)| {
            entry
                .as_ref()
                .map(|placement| (Cell::new(col as u32, row as u32), placement))
        })
    }

    /// Number of drawn cells
    pub fn drawn_count(&self) -> usize {
        self.cells.iter().filter(|entry| entry.is_some()).count()
    }

    fn set(&mut self, cell: Cell, placement: Placement) -> Option<Placement> {
        self.cells
            .get_mut([cell.y as usize, cell.x as usize])
            .and_then(|entry| entry.replace(placement))
    }
}

/// Counters accumulated over a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Cells in the grid
    pub total_cells: usize,
    /// Cells a tile was drawn into
    pub drawn: usize,
    /// Cells skipped as transparent
    pub skipped: usize,
    /// Cells where a tile had to be placed next to itself
    pub adjacent_clones: usize,
    /// Tiles placed at least once
    pub distinct_tiles: usize,
}

/// How a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Every cell was visited
    Completed,
    /// The pool ran out; the remaining cells were left undrawn
    PoolExhausted {
        /// Cells left undrawn, including the one that found the pool empty
        undrawn_cells: usize,
    },
    /// The caller stopped the run between cells
    Cancelled {
        /// Cells never visited
        unvisited_cells: usize,
    },
}

impl Completion {
    /// Check if every cell was visited
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Output of a placement run
#[derive(Debug, Clone)]
pub struct PlacementResult<B> {
    /// Rendered mosaic, same size as the target
    pub output: B,
    /// Run counters
    pub statistics: RunStatistics,
    /// How the run ended
    pub completion: Completion,
    /// Placement decision per cell
    pub placements: PlacementMap,
    /// Final pool state including usage counters and positions
    pub pool: TilePool,
}

impl<B: PixelBuffer> PlacementResult<B> {
    /// Redraw a single cell with a caller-supplied tile
    ///
    /// The tile goes through the same correction and orientation choice as
    /// placed tiles. Returns whether it was mirrored. A pool tile previously
    /// drawn in the cell gives up that placement, and the clone counter and
    /// distinct-tile count are brought in line with the map.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cell lies outside the grid
    /// - The tile does not match the pool's tile size
    /// - The previous placement refers to a tile missing from the pool
    pub fn replace_cell(
        &mut self,
        target: &B,
        cell: Cell,
        tile: &Tile,
        settings: RenderSettings,
    ) -> Result<bool> {
        let grid = self.placements.grid();
        if !grid.contains(cell) {
            return Err(MosaicError::CellOutOfBounds {
                cell: (cell.x, cell.y),
                grid: (grid.cols, grid.rows),
            });
        }

        let (tile_width, tile_height) = self.pool.tile_size();
        let (width, height) = tile.pixels().dimensions();
        if (width, height) != (tile_width, tile_height) {
            return Err(invalid_parameter(
                "tile",
                &format!("{width}x{height}"),
                &format!("replacement tiles must be {tile_width}x{tile_height}"),
            ));
        }

        let position = cell.pixel_position(tile_width, tile_height);
        let region = target.region(position.x, position.y, tile_width, tile_height);
        let target_color = Color::average(region.pixels());
        let oriented = render_tile(tile, target_color, &region, settings);
        self.output.draw(&oriented.pixels, position.x, position.y);

        let previous = self.placements.set(
            cell,
            Placement {
                source: TileSource::Replacement,
                flipped: oriented.flipped,
                adjacent_clone: false,
            },
        );
        match previous {
            None => self.statistics.drawn += 1,
            Some(Placement {
                source: TileSource::Pool(index),
                adjacent_clone,
                ..
            }) => {
                self.pool.release(index, position)?;
                if adjacent_clone {
                    self.statistics.adjacent_clones =
                        self.statistics.adjacent_clones.saturating_sub(1);
                }
                self.statistics.distinct_tiles = self.pool.distinct_tiles_used();
            }
            Some(_) => {}
        }

        Ok(oriented.flipped)
    }
}

/// Cell-by-cell mosaic placement over a target buffer
///
/// Each step visits one cell in traversal order: transparent cells are
/// skipped, the closest available tile is chosen (avoiding repeats inside
/// the adjacency box where possible), rendered into the output and recorded
/// in the pool. Every step observes all earlier pool updates, so cells are
/// processed strictly one after another.
pub struct PlacementEngine<'t, B: PixelBuffer> {
    config: PlacementConfig,
    target: &'t B,
    pool: TilePool,
    output: B,
    grid: GridDimensions,
    traversal: Traversal,
    adjacency: AdjacencyBox,
    placements: PlacementMap,
    statistics: RunStatistics,
    completion: Option<Completion>,
}

impl<'t, B: PixelBuffer> PlacementEngine<'t, B> {
    /// Validate inputs and prepare a run
    ///
    /// Tile colours are precomputed here, before the first cell is visited.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The target has no pixels
    /// - The tile list is empty or a tile has the wrong size
    pub fn new(config: PlacementConfig, tiles: Vec<RgbaImage>, target: &'t B) -> Result<Self> {
        config.validate()?;

        let (width, height) = target.dimensions();
        if width == 0 || height == 0 {
            return Err(invalid_source(&format!(
                "target image is {width}x{height}"
            )));
        }

        let pool = TilePool::new(
            tiles,
            config.tile_width,
            config.tile_height,
            config.reuse_limit,
        )?;

        let grid = GridDimensions::covering(width, height, config.tile_width, config.tile_height);
        let traversal = Traversal::new(grid, config.traversal, config.seed);
        let adjacency =
            AdjacencyBox::from_cells(config.adjacency_radius, config.tile_width, config.tile_height);

        debug!(
            "Placing {} tiles over a {}x{} grid in {} order",
            pool.len(),
            grid.cols,
            grid.rows,
            config.traversal
        );

        Ok(Self {
            config,
            target,
            pool,
            output: B::blank(width, height),
            grid,
            traversal,
            adjacency,
            placements: PlacementMap::new(grid),
            statistics: RunStatistics {
                total_cells: grid.cell_count(),
                ..RunStatistics::default()
            },
            completion: None,
        })
    }

    /// Grid being filled
    pub const fn grid(&self) -> GridDimensions {
        self.grid
    }

    /// Current pool state
    pub const fn pool(&self) -> &TilePool {
        &self.pool
    }

    /// Output rendered so far
    pub const fn output(&self) -> &B {
        &self.output
    }

    /// Counters so far
    pub const fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    /// Cells visited so far, drawn or skipped
    pub fn cells_visited(&self) -> usize {
        self.grid.cell_count() - self.traversal.remaining()
    }

    /// Process the next cell
    ///
    /// Returns `false` once the traversal is finished or the pool ran out.
    ///
    /// # Errors
    ///
    /// Returns an error if pool bookkeeping rejects the selected tile
    pub fn execute_step(&mut self) -> Result<bool> {
        if self.completion.is_some() {
            return Ok(false);
        }

        let Some(cell) = self.traversal.next() else {
            self.completion = Some(Completion::Completed);
            return Ok(false);
        };

        let (tile_width, tile_height) = (self.config.tile_width, self.config.tile_height);
        let position = cell.pixel_position(tile_width, tile_height);
        let region = self
            .target
            .region(position.x, position.y, tile_width, tile_height);

        if is_mostly_transparent(&region, self.config.alpha_cutoff) {
            self.statistics.skipped += 1;
            return Ok(true);
        }

        if self.pool.is_exhausted() {
            return Ok(self.halt_exhausted());
        }

        let target_color = Color::average(region.pixels());
        let Some(primary) = best_match(target_color, self.pool.available()) else {
            return Ok(self.halt_exhausted());
        };

        let primary_is_adjacent = self
            .pool
            .tile(primary)
            .is_some_and(|tile| is_adjacent(tile, position, self.adjacency));

        let (selected, adjacent_clone) = if primary_is_adjacent {
            match best_non_adjacent_match(target_color, &self.pool, position, self.adjacency) {
                Some(alternative) => (alternative, false),
                None => (primary, true),
            }
        } else {
            (primary, false)
        };

        let tile = self
            .pool
            .tile(selected)
            .ok_or(MosaicError::InvalidTileIndex {
                index: selected,
                max_tiles: self.pool.len(),
            })?;
        let oriented = render_tile(tile, target_color, &region, self.config.render_settings());
        self.output.draw(&oriented.pixels, position.x, position.y);

        self.pool.record(selected, position)?;
        self.placements.set(
            cell,
            Placement {
                source: TileSource::Pool(selected),
                flipped: oriented.flipped,
                adjacent_clone,
            },
        );

        self.statistics.drawn += 1;
        if adjacent_clone {
            self.statistics.adjacent_clones += 1;
        }

        Ok(true)
    }

    /// Process every remaining cell and return the result
    ///
    /// # Errors
    ///
    /// Returns an error if pool bookkeeping rejects a selected tile
    pub fn run(mut self) -> Result<PlacementResult<B>> {
        while self.execute_step()? {}
        Ok(self.finish())
    }

    /// Stop the run and return everything rendered so far
    ///
    /// Calling this before the traversal is exhausted reports the run as
    /// cancelled; the output reflects every cell processed up to that point.
    pub fn finish(mut self) -> PlacementResult<B> {
        let completion = match self.completion {
            Some(completion) => completion,
            None if self.traversal.remaining() == 0 => Completion::Completed,
            None => Completion::Cancelled {
                unvisited_cells: self.traversal.remaining(),
            },
        };

        self.statistics.distinct_tiles = self.pool.distinct_tiles_used();

        if self.statistics.adjacent_clones > 0 {
            info!(
                "{} tiles were placed next to themselves because no other tile was available",
                self.statistics.adjacent_clones
            );
        }
        if let Completion::Cancelled { unvisited_cells } = completion {
            info!("Placement stopped with {unvisited_cells} cells unvisited");
        }
        info!(
            "Drew {} of {} cells ({} skipped as transparent, {} distinct tiles)",
            self.statistics.drawn,
            self.statistics.total_cells,
            self.statistics.skipped,
            self.statistics.distinct_tiles
        );

        PlacementResult {
            output: self.output,
            statistics: self.statistics,
            completion,
            placements: self.placements,
            pool: self.pool,
        }
    }

    fn halt_exhausted(&mut self) -> bool {
        let undrawn_cells = self.traversal.remaining() + 1;
        warn!("Not enough tiles to fill the mosaic: {undrawn_cells} cells left undrawn");
        self.completion = Some(Completion::PoolExhausted { undrawn_cells });
        false
    }
}

/// Build a mosaic in one call
///
/// # Errors
///
/// Returns an error if the configuration or inputs are invalid
pub fn render_mosaic<B: PixelBuffer>(
    config: PlacementConfig,
    tiles: Vec<RgbaImage>,
    target: &B,
) -> Result<PlacementResult<B>> {
    PlacementEngine::new(config, tiles, target)?.run()
}
