//! Colour representation, comparison and correction

/// Tile colour correction and mirror selection
pub mod correction;
/// Average colours and the RGB distance metric
pub mod model;

pub use model::Color;
