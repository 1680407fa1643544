/// Command-line argument parsing and file processing
pub mod cli;
/// Placement defaults and constants
pub mod configuration;
/// Error types
pub mod error;
/// Image ingestion and PNG export
pub mod image;
/// Progress bars for the command line
pub mod progress;
