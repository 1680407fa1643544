//! Pixel buffer abstraction used by the placement engine
//!
//! The engine only reads regions of the target and writes tiles into the
//! output, so any surface that can do both can host a mosaic run.

use image::{RgbaImage, imageops};

/// Surface that regions can be read from and tiles drawn into
pub trait PixelBuffer {
    /// Create a fully transparent buffer of the given size
    fn blank(width: u32, height: u32) -> Self
    where
        Self: Sized;

    /// Buffer size as (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Copy a `width` x `height` region whose top-left corner is at `(x, y)`
    ///
    /// Pixels outside the buffer read as transparent black.
    fn region(&self, x: u32, y: u32, width: u32, height: u32) -> RgbaImage;

    /// Overwrite pixels with `tile` placed at `(x, y)`, clipped to the buffer
    fn draw(&mut self, tile: &RgbaImage, x: u32, y: u32);
}

impl PixelBuffer for RgbaImage {
    fn blank(width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn region(&self, x: u32, y: u32, width: u32, height: u32) -> RgbaImage {
        let (buffer_width, buffer_height) = (self.width(), self.height());

        // Fast path: region fully inside the buffer
        if x.saturating_add(width) <= buffer_width && y.saturating_add(height) <= buffer_height {
            return imageops::crop_imm(self, x, y, width, height).to_image();
        }

        let mut region = Self::new(width, height);
        for (dx, dy, pixel) in region.enumerate_pixels_mut() {
            if let Some(source) = x
                .checked_add(dx)
                .zip(y.checked_add(dy))
                .and_then(|(sx, sy)| self.get_pixel_checked(sx, sy))
            {
                *pixel = *source;
            }
        }
        region
    }

    fn draw(&mut self, tile: &RgbaImage, x: u32, y: u32) {
        imageops::replace(self, tile, i64::from(x), i64::from(y));
    }
}
