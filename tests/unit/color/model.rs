//! Tests for average colour computation and colour distances

#[cfg(test)]
mod tests {
    use image::Rgba;
    use photomosaic::color::Color;

    // Tests averaging a uniform region returns that colour
    #[test]
    fn test_average_of_uniform_region() {
        let pixels = vec![Rgba([10, 20, 30, 255]); 9];

        assert_eq!(Color::average(pixels.iter()), Color::new(10, 20, 30));
    }

    // Tests halves round up like the browser's Math.round
    #[test]
    fn test_average_rounds_half_up() {
        let pixels = [Rgba([0, 0, 0, 255]), Rgba([1, 2, 3, 255])];

        // 0.5 -> 1, 1.0 -> 1, 1.5 -> 2
        assert_eq!(Color::average(pixels.iter()), Color::new(1, 1, 2));
    }

    // Tests rounding down below the half
    #[test]
    fn test_average_rounds_down_below_half() {
        let pixels = [
            Rgba([0, 0, 0, 255]),
            Rgba([0, 0, 0, 255]),
            Rgba([1, 1, 1, 255]),
        ];

        assert_eq!(Color::average(pixels.iter()), Color::new(0, 0, 0));
    }

    // Tests alpha does not weight or exclude pixels
    #[test]
    fn test_average_ignores_alpha() {
        let pixels = [Rgba([200, 0, 0, 0]), Rgba([0, 0, 0, 255])];

        assert_eq!(Color::average(pixels.iter()), Color::new(100, 0, 0));
    }

    // Tests empty regions fall back to black
    #[test]
    fn test_average_of_empty_region() {
        let pixels: Vec<Rgba<u8>> = Vec::new();

        assert_eq!(Color::average(pixels.iter()), Color::default());
    }

    // Tests the Euclidean metric on a 3-4-5 triangle
    #[test]
    fn test_distance_is_euclidean() {
        let a = Color::new(0, 0, 0);
        let b = Color::new(3, 4, 0);

        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
        assert!((b.distance(a) - 5.0).abs() < f64::EPSILON);
        assert!(a.distance(a).abs() < f64::EPSILON);
    }

    // Tests the distance between opposite corners of the RGB cube
    #[test]
    fn test_distance_maximum() {
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);

        let expected = (3.0_f64 * 255.0 * 255.0).sqrt();
        assert!((black.distance(white) - expected).abs() < 1e-9);
    }

    // Tests Manhattan distance sums absolute channel differences
    #[test]
    fn test_manhattan_distance() {
        let a = Color::new(10, 20, 30);
        let b = Color::new(0, 25, 30);

        assert_eq!(a.manhattan(b), 15);
        assert_eq!(b.manhattan(a), 15);
    }

    // Tests conversion from a pixel drops alpha
    #[test]
    fn test_from_rgba_pixel() {
        let color = Color::from(Rgba([1, 2, 3, 4]));

        assert_eq!(color, Color::new(1, 2, 3));
        assert_eq!(color.channels(), [1, 2, 3]);
        assert_eq!(Color::from_channels([1, 2, 3]), color);
    }
}
