//! Average colours of pixel regions and the distances between them

use image::Rgba;

/// Average colour of a pixel region
///
/// Alpha never contributes to the average; transparency is judged
/// separately by [`crate::spatial::transparency`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a colour from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array in `[r, g, b]` order
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build a colour from an `[r, g, b]` array
    pub const fn from_channels(channels: [u8; 3]) -> Self {
        let [r, g, b] = channels;
        Self { r, g, b }
    }

    /// Average each channel over all pixels, rounding halves up
    ///
    /// An empty region averages to black.
    pub fn average<'a>(pixels: impl IntoIterator<Item = &'a Rgba<u8>>) -> Self {
        let mut sums = [0u64; 3];
        let mut count = 0u64;

        for pixel in pixels {
            for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                *sum += u64::from(channel);
            }
            count += 1;
        }

        if count == 0 {
            return Self::default();
        }

        // floor(sum / count + 1/2) without leaving integer arithmetic
        Self::from_channels(sums.map(|sum| ((2 * sum + count) / (2 * count)) as u8))
    }

    /// Euclidean distance in RGB space
    ///
    /// This is the only metric used when matching tiles to cells.
    pub fn distance(self, other: Self) -> f64 {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .map(|(&a, &b)| {
                let delta = f64::from(a) - f64::from(b);
                delta * delta
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Sum of absolute channel differences
    pub fn manhattan(self, other: Self) -> u32 {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .map(|(&a, &b)| u32::from(a.abs_diff(b)))
            .sum()
    }
}

impl From<Rgba<u8>> for Color {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, _] = pixel.0;
        Self { r, g, b }
    }
}
