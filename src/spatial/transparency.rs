//! Transparency gating for target regions

use image::RgbaImage;

/// Check whether a region should be left undrawn
///
/// Any single pixel with alpha strictly below `alpha_cutoff` marks the whole
/// region. A cutoff of 0 never skips.
pub fn is_mostly_transparent(region: &RgbaImage, alpha_cutoff: u8) -> bool {
    region.pixels().any(|pixel| {
        let [.., alpha] = pixel.0;
        alpha < alpha_cutoff
    })
}
