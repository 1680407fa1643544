//! Colour correction and orientation choice for placed tiles
//!
//! A tile is shifted toward the colour of the cell it covers by a blend
//! factor, then optionally mirrored when the mirror image lines up better
//! with the left/right colour balance of the cell.

use crate::color::model::Color;
use image::{RgbaImage, imageops};

/// A rendered tile together with the orientation it was drawn in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientedTile {
    /// Pixels to composite into the output
    pub pixels: RgbaImage,
    /// Whether the pixels are the horizontal mirror of the corrected tile
    pub flipped: bool,
}

/// Linear interpolation per channel from `tile` toward `target`
///
/// A factor of 0 keeps the tile colour and 1 yields the target colour.
/// Factors outside `[0, 1]` are clamped.
pub fn blend(tile: Color, target: Color, factor: f64) -> Color {
    let factor = if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    };

    let tile_channels = tile.channels();
    let target_channels = target.channels();
    let mut blended = [0u8; 3];

    for ((out, &from), &to) in blended
        .iter_mut()
        .zip(tile_channels.iter())
        .zip(target_channels.iter())
    {
        let value = (f64::from(to) - f64::from(from)).mul_add(factor, f64::from(from));
        *out = value.round().clamp(0.0, 255.0) as u8;
    }

    Color::from_channels(blended)
}

/// Shift every pixel by the per-channel difference between two colours
///
/// Channels saturate at both ends of the `u8` range; alpha is untouched.
pub fn apply_correction(pixels: &RgbaImage, tile_color: Color, blended: Color) -> RgbaImage {
    let deltas: [i16; 3] = [
        i16::from(blended.r) - i16::from(tile_color.r),
        i16::from(blended.g) - i16::from(tile_color.g),
        i16::from(blended.b) - i16::from(tile_color.b),
    ];

    let mut corrected = pixels.clone();
    if deltas == [0; 3] {
        return corrected;
    }

    for pixel in corrected.pixels_mut() {
        for (channel, &delta) in pixel.0.iter_mut().zip(deltas.iter()) {
            *channel = (i16::from(*channel) + delta).clamp(0, 255) as u8;
        }
    }

    corrected
}

/// Pick the orientation of `corrected` that best matches `target_region`
///
/// Both buffers are split into left and right halves; the orientation with
/// the lower summed Manhattan distance between half averages wins. Ties keep
/// the tile unflipped. Tiles narrower than two pixels have no distinct
/// mirror image and are returned as-is.
pub fn choose_orientation(
    corrected: RgbaImage,
    target_region: &RgbaImage,
    allow_flip: bool,
) -> OrientedTile {
    if !allow_flip || corrected.width() < 2 {
        return OrientedTile {
            pixels: corrected,
            flipped: false,
        };
    }

    let target_halves = half_averages(target_region);
    let mirrored = imageops::flip_horizontal(&corrected);

    let unflipped_error = halves_difference(half_averages(&corrected), target_halves);
    let flipped_error = halves_difference(half_averages(&mirrored), target_halves);

    if flipped_error < unflipped_error {
        OrientedTile {
            pixels: mirrored,
            flipped: true,
        }
    } else {
        OrientedTile {
            pixels: corrected,
            flipped: false,
        }
    }
}

/// Average colours of the left and right halves of a buffer
///
/// For odd widths the middle column belongs to the right half.
pub fn half_averages(pixels: &RgbaImage) -> (Color, Color) {
    let (width, height) = pixels.dimensions();
    let left_width = width / 2;

    let left = imageops::crop_imm(pixels, 0, 0, left_width, height).to_image();
    let right = imageops::crop_imm(pixels, left_width, 0, width - left_width, height).to_image();

    (Color::average(left.pixels()), Color::average(right.pixels()))
}

fn halves_difference(tile: (Color, Color), target: (Color, Color)) -> u32 {
    tile.0.manhattan(target.0) + tile.1.manhattan(target.1)
}
