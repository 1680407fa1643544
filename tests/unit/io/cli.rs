//! Tests for command-line parsing and the file-based mosaic pipeline

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use photomosaic::MosaicError;
    use photomosaic::algorithm::placement::Completion;
    use photomosaic::io::cli::{Cli, MosaicProcessor};
    use photomosaic::spatial::TraversalOrder;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    // Tests defaults when only the positional arguments are given
    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["program", "target.png", "tiles"]);

        assert_eq!(cli.target, PathBuf::from("target.png"));
        assert_eq!(cli.tiles, PathBuf::from("tiles"));
        assert_eq!(cli.processing_width, 2880);
        assert_eq!((cli.tile_width, cli.tile_height), (72, 72));
        assert_eq!(cli.reuse, 1);
        assert_eq!(cli.radius, 0);
        assert_eq!(cli.order, TraversalOrder::Spiral);
        assert_eq!(cli.alpha_cutoff, 1);
        assert!(!cli.flip);
        assert!(!cli.quiet);
        assert!(cli.should_show_progress());
        assert_eq!(cli.log_filter(), "info");
    }

    // Tests every option maps onto the placement configuration
    #[test]
    fn test_cli_placement_config() {
        let cli = Cli::parse_from([
            "program",
            "target.png",
            "tiles",
            "--tile-width",
            "16",
            "--tile-height",
            "12",
            "-u",
            "3",
            "-r",
            "2",
            "--order",
            "reverse-row-major",
            "-s",
            "7",
            "-a",
            "128",
            "-c",
            "0.25",
            "-f",
        ]);

        let config = cli.placement_config();

        assert_eq!((config.tile_width, config.tile_height), (16, 12));
        assert_eq!(config.reuse_limit, 3);
        assert_eq!(config.adjacency_radius, 2);
        assert_eq!(config.traversal, TraversalOrder::ReverseRowMajor);
        assert_eq!(config.seed, 7);
        assert_eq!(config.alpha_cutoff, 128);
        assert!((config.color_correction - 0.25).abs() < f64::EPSILON);
        assert!(config.allow_flip);
    }

    // Tests quiet mode hides progress and lowers the log level
    #[test]
    fn test_quiet_mode() {
        let cli = Cli::parse_from(["program", "target.png", "tiles", "--quiet"]);

        assert!(cli.quiet);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_filter(), "warn");
    }

    // Tests the default output sits next to the target
    #[test]
    fn test_default_output_path() {
        let cli = Cli::parse_from(["program", "photos/portrait.jpg", "tiles"]);

        assert_eq!(
            cli.output_path(),
            PathBuf::from("photos/portrait_mosaic.png")
        );
    }

    // Tests an explicit output path is used as given
    #[test]
    fn test_explicit_output_path() {
        let cli = Cli::parse_from(["program", "a.png", "tiles", "-o", "out/result.png"]);

        assert_eq!(cli.output_path(), PathBuf::from("out/result.png"));
    }

    fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
        RgbaImage::from_pixel(width, height, Rgba(color))
            .save(path)
            .unwrap();
    }

    fn quiet_cli(target: &Path, tiles: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "program".to_string(),
            target.to_string_lossy().into_owned(),
            tiles.to_string_lossy().into_owned(),
            "--quiet".to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    // Tests a full run from files on disk to a written mosaic
    #[test]
    fn test_process_writes_mosaic() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.png");
        let tiles = temp_dir.path().join("tiles");
        fs::create_dir(&tiles).unwrap();
        write_png(&target, 8, 4, [200, 40, 40, 255]);
        write_png(&tiles.join("red.png"), 3, 3, [210, 30, 30, 255]);
        write_png(&tiles.join("blue.png"), 5, 5, [20, 20, 220, 255]);

        let cli = quiet_cli(
            &target,
            &tiles,
            &["-w", "8", "--tile-width", "4", "--tile-height", "4", "-u", "0"],
        );
        let mut processor = MosaicProcessor::new(cli);

        let summary = processor.process().unwrap();

        assert_eq!(summary.statistics.total_cells, 2);
        assert_eq!(summary.statistics.drawn, 2);
        assert_eq!(summary.statistics.distinct_tiles, 1);
        assert_eq!(summary.completion, Completion::Completed);
        assert_eq!(summary.output_path, temp_dir.path().join("target_mosaic.png"));

        let output = image::open(temp_dir.path().join("target_mosaic.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(output.dimensions(), (8, 4));
        assert!(output.pixels().all(|pixel| pixel.0[3] > 0));
    }

    // Tests a run that runs out of tiles reports how many cells were left
    #[test]
    fn test_process_reports_pool_exhaustion() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.png");
        let tiles = temp_dir.path().join("tiles");
        let output = temp_dir.path().join("partial.png");
        fs::create_dir(&tiles).unwrap();
        write_png(&target, 12, 4, [90, 90, 90, 255]);
        write_png(&tiles.join("grey.png"), 4, 4, [100, 100, 100, 255]);

        let cli = quiet_cli(
            &target,
            &tiles,
            &[
                "-w",
                "12",
                "--tile-width",
                "4",
                "--tile-height",
                "4",
                "-u",
                "1",
                "--order",
                "row-major",
                "-o",
                output.to_str().unwrap(),
            ],
        );

        let summary = MosaicProcessor::new(cli).process().unwrap();

        assert_eq!(summary.statistics.total_cells, 3);
        assert_eq!(summary.statistics.drawn, 1);
        assert_eq!(
            summary.completion,
            Completion::PoolExhausted { undrawn_cells: 2 }
        );
        assert!(!summary.completion.is_complete());
        assert_eq!(summary.output_path, output);
        assert!(output.exists());
    }

    // Tests an out-of-range processing width is rejected
    #[test]
    fn test_process_rejects_zero_width() {
        let temp_dir = TempDir::new().unwrap();
        let cli = quiet_cli(
            &temp_dir.path().join("target.png"),
            temp_dir.path(),
            &["-w", "0"],
        );

        let result = MosaicProcessor::new(cli).process();

        assert!(matches!(
            result,
            Err(MosaicError::InvalidParameter {
                parameter: "width",
                ..
            })
        ));
    }

    // Tests a missing target image is reported as a load failure
    #[test]
    fn test_process_missing_target() {
        let temp_dir = TempDir::new().unwrap();
        let cli = quiet_cli(&temp_dir.path().join("missing.png"), temp_dir.path(), &[]);

        let result = MosaicProcessor::new(cli).process();

        assert!(matches!(result, Err(MosaicError::ImageLoad { .. })));
    }

    // Tests a tile directory without images is rejected
    #[test]
    fn test_process_empty_tile_directory() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.png");
        let tiles = temp_dir.path().join("tiles");
        fs::create_dir(&tiles).unwrap();
        fs::write(tiles.join("readme.txt"), "no images here").unwrap();
        write_png(&target, 4, 4, [0, 0, 0, 255]);

        let cli = quiet_cli(&target, &tiles, &["-w", "4"]);
        let result = MosaicProcessor::new(cli).process();

        assert!(matches!(result, Err(MosaicError::InvalidSourceData { .. })));
    }

    // Tests an invalid correction factor fails before any file is read
    #[test]
    fn test_process_rejects_bad_correction() {
        let cli = quiet_cli(
            Path::new("does-not-exist.png"),
            Path::new("no-tiles"),
            &["-c", "2.0"],
        );

        let result = MosaicProcessor::new(cli).process();

        assert!(matches!(
            result,
            Err(MosaicError::InvalidParameter {
                parameter: "color_correction",
                ..
            })
        ));
    }
}
