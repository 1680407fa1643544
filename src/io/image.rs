//! Image ingestion and PNG export for the command-line front end
//!
//! The placement core never touches files; this module turns a target image
//! and a directory of tile images into the pre-resized buffers it consumes.

use crate::io::configuration::TILE_EXTENSIONS;
use crate::io::error::{MosaicError, Result, invalid_source};
use image::{RgbaImage, imageops::FilterType};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use std::path::{Path, PathBuf};

/// Load the target image and resize it to `width`, keeping the aspect ratio
///
/// # Errors
///
/// Returns an error if the image cannot be decoded or has no pixels
pub fn load_target(path: &Path, width: u32) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|source| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(invalid_source(&format!(
            "target image '{}' has no pixels",
            path.display()
        )));
    }

    let aspect_ratio = f64::from(image.height()) / f64::from(image.width());
    let height = (f64::from(width) * aspect_ratio).round().max(1.0) as u32;

    Ok(image
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgba8())
}

/// List tile image files in a directory, sorted by path
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn collect_tile_paths(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory).map_err(|source| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_tile_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn has_tile_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TILE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Decode and resize tile images in parallel
///
/// `on_loaded` is called once per finished tile from worker threads. The
/// returned buffers keep the order of `paths`.
///
/// # Errors
///
/// Returns the first decoding error encountered
pub fn load_tiles(
    paths: &[PathBuf],
    tile_width: u32,
    tile_height: u32,
    on_loaded: impl Fn() + Sync,
) -> Result<Vec<RgbaImage>> {
    paths
        .par_iter()
        .map(|path| -> Result<RgbaImage> {
            let tile = image::open(path)
                .map_err(|source| MosaicError::ImageLoad {
                    path: path.clone(),
                    source,
                })?
                .resize_exact(tile_width, tile_height, FilterType::Lanczos3)
                .to_rgba8();
            on_loaded();
            Ok(tile)
        })
        .collect()
}

/// Save a rendered mosaic as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
