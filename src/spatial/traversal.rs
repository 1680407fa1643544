//! Grid geometry and the order in which cells are visited
//!
//! Every traversal enumerates each cell of a `cols x rows` grid exactly once.
//! Row-major, reverse and spiral orders depend only on the grid size; the
//! random order is a seeded Fisher-Yates shuffle of the row-major order.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::fmt;

/// Grid coordinate in tile units
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Column index
    pub x: u32,
    /// Row index
    pub y: u32,
}

impl Cell {
    /// Create a cell coordinate
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Top-left pixel of this cell for the given tile size
    pub const fn pixel_position(self, tile_width: u32, tile_height: u32) -> PixelPosition {
        PixelPosition {
            x: self.x.saturating_mul(tile_width),
            y: self.y.saturating_mul(tile_height),
        }
    }
}

/// Position in target-image pixel coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPosition {
    /// Horizontal pixel offset
    pub x: u32,
    /// Vertical pixel offset
    pub y: u32,
}

impl PixelPosition {
    /// Create a pixel position
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Size of the mosaic grid in cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    /// Number of columns
    pub cols: u32,
    /// Number of rows
    pub rows: u32,
}

impl GridDimensions {
    /// Create grid dimensions directly
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Grid covering an image, rounding partial edge cells up
    ///
    /// Tile dimensions must be non-zero.
    pub const fn covering(
        image_width: u32,
        image_height: u32,
        tile_width: u32,
        tile_height: u32,
    ) -> Self {
        Self {
            cols: image_width.div_ceil(tile_width),
            rows: image_height.div_ceil(tile_height),
        }
    }

    /// Total number of cells
    pub const fn cell_count(self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Check if a cell lies inside the grid
    pub const fn contains(self, cell: Cell) -> bool {
        cell.x < self.cols && cell.y < self.rows
    }
}

/// Order in which grid cells are visited
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TraversalOrder {
    /// Top-left to bottom-right, row by row
    RowMajor,
    /// Bottom-right to top-left, row by row
    ReverseRowMajor,
    /// Square spiral outward from the grid centre
    #[default]
    Spiral,
    /// Seeded uniform shuffle of all cells
    Random,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RowMajor => "row-major",
            Self::ReverseRowMajor => "reverse-row-major",
            Self::Spiral => "spiral",
            Self::Random => "random",
        };
        f.write_str(name)
    }
}

/// Finite, single-pass sequence of cells
#[derive(Debug, Clone)]
pub struct Traversal {
    cells: std::vec::IntoIter<Cell>,
}

impl Traversal {
    /// Generate the visiting order for a grid
    ///
    /// `seed` only affects [`TraversalOrder::Random`].
    pub fn new(grid: GridDimensions, order: TraversalOrder, seed: u64) -> Self {
        let cells = match order {
            TraversalOrder::RowMajor => row_major(grid),
            TraversalOrder::ReverseRowMajor => reverse_row_major(grid),
            TraversalOrder::Spiral => spiral(grid),
            TraversalOrder::Random => random(grid, seed),
        };

        Self {
            cells: cells.into_iter(),
        }
    }

    /// Number of cells not yet yielded
    pub fn remaining(&self) -> usize {
        self.cells.len()
    }
}

impl Iterator for Traversal {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        self.cells.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cells.size_hint()
    }
}

impl ExactSizeIterator for Traversal {}

/// Rows top to bottom, columns left to right
pub fn row_major(grid: GridDimensions) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(grid.cell_count());
    for y in 0..grid.rows {
        for x in 0..grid.cols {
            cells.push(Cell::new(x, y));
        }
    }
    cells
}

/// Rows bottom to top, columns right to left
pub fn reverse_row_major(grid: GridDimensions) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(grid.cell_count());
    for y in (0..grid.rows).rev() {
        for x in (0..grid.cols).rev() {
            cells.push(Cell::new(x, y));
        }
    }
    cells
}

/// Square spiral starting at `(cols / 2, rows / 2)`
///
/// Walks right, down, left, up with the step length growing after every
/// second turn. Positions outside the grid are stepped over but not emitted.
pub fn spiral(grid: GridDimensions) -> Vec<Cell> {
    const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

    let total = grid.cell_count();
    let mut cells = Vec::with_capacity(total);

    let cols = i64::from(grid.cols);
    let rows = i64::from(grid.rows);
    let mut x = cols / 2;
    let mut y = rows / 2;
    let mut direction = 0usize;
    let mut step_length = 1u64;
    let mut steps_taken = 0u64;

    while cells.len() < total {
        if (0..cols).contains(&x) && (0..rows).contains(&y) {
            cells.push(Cell::new(x as u32, y as u32));
        }

        let (dx, dy) = DIRECTIONS.get(direction).copied().unwrap_or((1, 0));
        x += dx;
        y += dy;
        steps_taken += 1;

        if steps_taken == step_length {
            direction = (direction + 1) % DIRECTIONS.len();
            steps_taken = 0;
            // Turning onto the horizontal legs lengthens the next pair of legs
            if direction % 2 == 0 {
                step_length += 1;
            }
        }
    }

    cells
}

/// Row-major enumeration shuffled with a seeded Fisher-Yates pass
pub fn random(grid: GridDimensions, seed: u64) -> Vec<Cell> {
    let mut cells = row_major(grid);
    let mut rng = StdRng::seed_from_u64(seed);
    cells.shuffle(&mut rng);
    cells
}
