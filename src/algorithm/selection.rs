use crate::{
    algorithm::pool::{Tile, TilePool},
    color::Color,
    spatial::PixelPosition,
};

/// Half-extent of the box around a cell in which a tile may not repeat
///
/// Built from a radius in cells scaled by the tile size. The test is a
/// per-axis box test, not a Euclidean one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjacencyBox {
    /// Maximum horizontal pixel distance still counted as adjacent
    pub half_width: u32,
    /// Maximum vertical pixel distance still counted as adjacent
    pub half_height: u32,
}

impl AdjacencyBox {
    /// Box for a radius given in cells
    ///
    /// A radius of 0 only matches the exact same pixel position.
    pub const fn from_cells(radius: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            half_width: radius.saturating_mul(tile_width),
            half_height: radius.saturating_mul(tile_height),
        }
    }

    /// Check if `other` lies within the box centred on `center`
    pub const fn contains(self, center: PixelPosition, other: PixelPosition) -> bool {
        center.x.abs_diff(other.x) <= self.half_width
            && center.y.abs_diff(other.y) <= self.half_height
    }
}

/// Index of the candidate closest in colour to `target`
///
/// Candidates are scanned once; on equal distance the first one wins.
/// Returns `None` only for an empty candidate list.
pub fn best_match<'a>(
    target: Color,
    candidates: impl IntoIterator<Item = (usize, &'a Tile)>,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, tile) in candidates {
        let distance = target.distance(tile.color());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

/// Check if any recorded placement of `tile` lies inside the adjacency box
pub fn is_adjacent(tile: &Tile, position: PixelPosition, adjacency: AdjacencyBox) -> bool {
    tile.positions()
        .iter()
        .any(|&placed| adjacency.contains(position, placed))
}

/// Closest available tile with no placement inside the adjacency box
///
/// Tiles without remaining reuse capacity are ignored as well. `None` means
/// every candidate would repeat itself next to `position`.
pub fn best_non_adjacent_match(
    target: Color,
    pool: &TilePool,
    position: PixelPosition,
    adjacency: AdjacencyBox,
) -> Option<usize> {
    best_match(
        target,
        pool.available()
            .filter(|(_, tile)| pool.has_capacity(tile))
            .filter(|(_, tile)| !is_adjacent(tile, position, adjacency)),
    )
}
