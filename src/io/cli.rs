//! Command-line interface for rendering a mosaic from image files

use crate::algorithm::placement::{Completion, PlacementConfig, PlacementEngine, RunStatistics};
use crate::io::configuration::{
    DEFAULT_ADJACENCY_RADIUS, DEFAULT_ALPHA_CUTOFF, DEFAULT_COLOR_CORRECTION,
    DEFAULT_PROCESSING_WIDTH, DEFAULT_REUSE_LIMIT, DEFAULT_SEED, DEFAULT_TILE_HEIGHT,
    DEFAULT_TILE_WIDTH, MAX_PROCESSING_WIDTH, OUTPUT_SUFFIX, PROGRESS_REFRESH_INTERVAL,
};
use crate::io::error::{Result, invalid_parameter, invalid_source};
use crate::io::image::{collect_tile_paths, export_png, load_target, load_tiles};
use crate::io::progress::ProgressManager;
use crate::spatial::TraversalOrder;
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Render a photo mosaic from a target image and a directory of tiles"
)]
/// Command-line arguments for the mosaic renderer
pub struct Cli {
    /// Image to recreate as a mosaic
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of tile images (png, jpg, jpeg)
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Output PNG path (defaults to <target>_mosaic.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Width the target is resized to before tiling
    #[arg(short = 'w', long = "width", default_value_t = DEFAULT_PROCESSING_WIDTH)]
    pub processing_width: u32,

    /// Tile width in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_WIDTH)]
    pub tile_width: u32,

    /// Tile height in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_HEIGHT)]
    pub tile_height: u32,

    /// Times each tile may be used (0 = unlimited)
    #[arg(short = 'u', long, default_value_t = DEFAULT_REUSE_LIMIT)]
    pub reuse: usize,

    /// Radius in cells inside which a tile may not repeat
    #[arg(short, long, default_value_t = DEFAULT_ADJACENCY_RADIUS)]
    pub radius: u32,

    /// Order in which cells are filled
    #[arg(long, value_enum, default_value_t = TraversalOrder::Spiral)]
    pub order: TraversalOrder,

    /// Seed for the random order
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Skip cells containing any pixel with alpha below this value
    #[arg(short, long, default_value_t = DEFAULT_ALPHA_CUTOFF)]
    pub alpha_cutoff: u8,

    /// Blend tiles toward their cell colour (0.0 - 1.0)
    #[arg(short, long, default_value_t = DEFAULT_COLOR_CORRECTION)]
    pub color_correction: f64,

    /// Allow tiles to be mirrored horizontally
    #[arg(short, long)]
    pub flip: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Placement parameters selected on the command line
    pub const fn placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            reuse_limit: self.reuse,
            adjacency_radius: self.radius,
            traversal: self.order,
            seed: self.seed,
            alpha_cutoff: self.alpha_cutoff,
            color_correction: self.color_correction,
            allow_flip: self.flip,
        }
    }

    /// Default log filter for the selected verbosity
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet { "warn" } else { "info" }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Where the mosaic will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Self::default_output_path(&self.target))
    }

    fn default_output_path(target: &Path) -> PathBuf {
        let stem = target.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = target.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Outcome of a file-based run, without the rendered pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Run counters
    pub statistics: RunStatistics,
    /// How the run ended
    pub completion: Completion,
    /// Where the mosaic was written
    pub output_path: PathBuf,
}

/// Loads the inputs, runs placement and writes the mosaic
pub struct MosaicProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Render the mosaic described by the CLI arguments
    ///
    /// A run that stops early because the pool ran out still writes the
    /// partial mosaic; the returned summary says how the run ended.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any parameter is invalid
    /// - The target or a tile image cannot be loaded
    /// - The tile directory holds no images
    /// - The mosaic cannot be written
    pub fn process(&mut self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let config = self.cli.placement_config();
        config.validate()?;

        let width = self.cli.processing_width;
        if width == 0 || width > MAX_PROCESSING_WIDTH {
            return Err(invalid_parameter(
                "width",
                &width,
                &format!("must be between 1 and {MAX_PROCESSING_WIDTH}"),
            ));
        }

        let target = load_target(&self.cli.target, width)?;

        let tile_paths = collect_tile_paths(&self.cli.tiles)?;
        if tile_paths.is_empty() {
            return Err(invalid_source(&format!(
                "no tile images found in '{}'",
                self.cli.tiles.display()
            )));
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_tiles(tile_paths.len());
        }
        let progress = self.progress_manager.as_ref();
        let tiles = load_tiles(&tile_paths, config.tile_width, config.tile_height, || {
            if let Some(pm) = progress {
                pm.tile_loaded();
            }
        })?;

        let mut engine = PlacementEngine::new(config, tiles, &target)?;
        info!(
            "Loaded {} tiles; target {}x{} split into {}x{} cells",
            engine.pool().len(),
            target.width(),
            target.height(),
            engine.grid().cols,
            engine.grid().rows
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_placement(engine.grid().cell_count());
        }

        while engine.execute_step()? {
            let visited = engine.cells_visited();
            if visited % PROGRESS_REFRESH_INTERVAL == 0 {
                if let Some(ref pm) = self.progress_manager {
                    pm.update_placement(visited, engine.statistics().drawn);
                }
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.update_placement(engine.cells_visited(), engine.statistics().drawn);
            pm.finish();
        }

        let result = engine.finish();
        let output_path = self.cli.output_path();
        export_png(&result.output, &output_path)?;

        info!(
            "Wrote {} in {:.2?}",
            output_path.display(),
            start_time.elapsed()
        );

        Ok(RunSummary {
            statistics: result.statistics,
            completion: result.completion,
            output_path,
        })
    }
}
