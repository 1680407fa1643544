//! Tests for error formatting and source chaining

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::io::error::{invalid_parameter, invalid_source};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests parameter errors name the parameter, value and reason
    #[test]
    fn test_invalid_parameter_display() {
        let error = invalid_parameter("reuse", &-1, &"must not be negative");

        assert_eq!(
            error.to_string(),
            "Invalid parameter 'reuse' = '-1': must not be negative"
        );
        assert!(error.source().is_none());
    }

    // Tests source data errors carry their reason
    #[test]
    fn test_invalid_source_display() {
        let error = invalid_source(&"no tiles");

        assert_eq!(error.to_string(), "Invalid source data: no tiles");
    }

    // Tests tile size mismatches report both sizes
    #[test]
    fn test_malformed_tile_display() {
        let error = MosaicError::MalformedTile {
            index: 4,
            expected: (72, 72),
            actual: (64, 80),
        };

        assert_eq!(
            error.to_string(),
            "Tile 4 is 64x80 but the configured tile size is 72x72"
        );
    }

    // Tests index and cell range errors
    #[test]
    fn test_out_of_range_display() {
        let index = MosaicError::InvalidTileIndex {
            index: 9,
            max_tiles: 3,
        };
        let cell = MosaicError::CellOutOfBounds {
            cell: (5, 1),
            grid: (4, 2),
        };

        assert_eq!(
            index.to_string(),
            "Tile index 9 is out of bounds (pool size: 3)"
        );
        assert_eq!(cell.to_string(), "Cell (5, 1) lies outside the 4x2 grid");
    }

    // Tests I/O errors convert and keep their source
    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");

        let error = MosaicError::from(io);

        assert!(matches!(
            error,
            MosaicError::FileSystem {
                operation: "unknown",
                ..
            }
        ));
        assert!(error.to_string().contains("gone"));
        assert!(error.source().is_some());
    }

    // Tests file system errors mention the operation and path
    #[test]
    fn test_file_system_display() {
        let error = MosaicError::FileSystem {
            path: PathBuf::from("tiles"),
            operation: "read directory",
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            error.to_string(),
            "File system error during read directory on 'tiles': denied"
        );
    }

    // Tests image errors chain to the decoder error
    #[test]
    fn test_image_load_source() {
        let source = image::ImageError::IoError(std::io::Error::other("truncated"));

        let error = MosaicError::ImageLoad {
            path: PathBuf::from("tile.png"),
            source,
        };

        assert!(error.to_string().starts_with("Failed to load image 'tile.png'"));
        assert!(error.source().is_some());
    }
}
