//! Tests for region reads and tile compositing on in-memory buffers

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use photomosaic::spatial::PixelBuffer;

    const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    // Tests blank buffers are fully transparent
    #[test]
    fn test_blank_is_transparent() {
        let buffer = <RgbaImage as PixelBuffer>::blank(3, 2);

        assert_eq!(PixelBuffer::dimensions(&buffer), (3, 2));
        assert!(buffer.pixels().all(|pixel| *pixel == TRANSPARENT));
    }

    // Tests an in-bounds region copies the exact pixels
    #[test]
    fn test_region_inside_bounds() {
        let buffer = gradient(6, 6);

        let region = buffer.region(2, 3, 2, 2);

        assert_eq!(region.dimensions(), (2, 2));
        assert_eq!(region.get_pixel(0, 0), &Rgba([2, 3, 7, 255]));
        assert_eq!(region.get_pixel(1, 1), &Rgba([3, 4, 7, 255]));
    }

    // Tests pixels past the border read as transparent black
    #[test]
    fn test_region_pads_outside_bounds() {
        let buffer = gradient(3, 3);

        let region = buffer.region(2, 2, 2, 2);

        assert_eq!(region.get_pixel(0, 0), &Rgba([2, 2, 7, 255]));
        assert_eq!(region.get_pixel(1, 0), &TRANSPARENT);
        assert_eq!(region.get_pixel(0, 1), &TRANSPARENT);
        assert_eq!(region.get_pixel(1, 1), &TRANSPARENT);
    }

    // Tests regions entirely outside the buffer are empty
    #[test]
    fn test_region_fully_outside() {
        let buffer = gradient(2, 2);

        let region = buffer.region(10, 10, 2, 2);

        assert!(region.pixels().all(|pixel| *pixel == TRANSPARENT));
    }

    // Tests drawing overwrites pixels and clips at the border
    #[test]
    fn test_draw_overwrites_and_clips() {
        let mut buffer = <RgbaImage as PixelBuffer>::blank(3, 3);
        let tile = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));

        buffer.draw(&tile, 2, 2);

        assert_eq!(buffer.get_pixel(2, 2), &Rgba([9, 9, 9, 255]));
        assert_eq!(buffer.get_pixel(1, 1), &TRANSPARENT);
        assert_eq!(buffer.dimensions(), (3, 3));
    }

    // Tests drawing replaces rather than blends translucent pixels
    #[test]
    fn test_draw_replaces_alpha() {
        let mut buffer = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        let tile = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 10]));

        buffer.draw(&tile, 0, 0);

        assert_eq!(buffer.get_pixel(0, 0), &Rgba([0, 0, 0, 10]));
        assert_eq!(buffer.get_pixel(1, 0), &Rgba([255, 255, 255, 255]));
    }
}
