/// Cell-by-cell placement engine and run results
pub mod placement;
/// Tile records and the shrinking pool of candidates
pub mod pool;
/// Colour matching with adjacency exclusion
pub mod selection;
