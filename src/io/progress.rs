//! Two-phase progress display: tile ingestion, then cell placement

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>8}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates the progress bars of a mosaic run
///
/// Tile ingestion is reported from worker threads, so the tile bar is only
/// ever touched through `&self`.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    tile_bar: Option<ProgressBar>,
    cell_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            tile_bar: None,
            cell_bar: None,
        }
    }

    /// Show the tile ingestion bar
    pub fn start_tiles(&mut self, tile_count: usize) {
        let bar = ProgressBar::new(tile_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix("tiles");
        self.tile_bar = Some(self.multi_progress.add(bar));
    }

    /// Count one ingested tile
    pub fn tile_loaded(&self) {
        if let Some(ref bar) = self.tile_bar {
            bar.inc(1);
        }
    }

    /// Close the tile bar and show the placement bar
    pub fn start_placement(&mut self, cell_count: usize) {
        if let Some(ref bar) = self.tile_bar {
            bar.finish();
        }

        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix("cells");
        self.cell_bar = Some(self.multi_progress.add(bar));
    }

    /// Report visited cells and placements so far
    pub fn update_placement(&self, cells_visited: usize, drawn: usize) {
        if let Some(ref bar) = self.cell_bar {
            bar.set_position(cells_visited as u64);
            bar.set_message(format!("{drawn} drawn"));
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref bar) = self.cell_bar {
            bar.finish();
        }
        let _ = self.multi_progress.clear();
    }
}
