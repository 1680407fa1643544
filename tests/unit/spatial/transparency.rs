//! Tests for the any-pixel transparency rule

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use photomosaic::spatial::transparency::is_mostly_transparent;

    // Tests a fully transparent region is skipped regardless of colour
    #[test]
    fn test_fully_transparent_region_is_skipped() {
        let region = RgbaImage::from_pixel(4, 4, Rgba([255, 128, 3, 0]));

        assert!(is_mostly_transparent(&region, 1));
    }

    // Tests opaque regions pass any cutoff
    #[test]
    fn test_opaque_region_is_kept() {
        let region = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));

        assert!(!is_mostly_transparent(&region, 1));
        assert!(!is_mostly_transparent(&region, 255));
    }

    // Tests one low-alpha pixel marks the whole region
    #[test]
    fn test_single_pixel_triggers_skip() {
        let mut region = RgbaImage::from_pixel(8, 8, Rgba([10, 10, 10, 255]));
        region.put_pixel(7, 0, Rgba([10, 10, 10, 100]));

        assert!(is_mostly_transparent(&region, 101));
        assert!(!is_mostly_transparent(&region, 100));
    }

    // Tests a zero cutoff never skips
    #[test]
    fn test_zero_cutoff_never_skips() {
        let region = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));

        assert!(!is_mostly_transparent(&region, 0));
    }
}
