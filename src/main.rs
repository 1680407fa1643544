//! CLI entry point for the photo mosaic renderer

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicProcessor};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let mut processor = MosaicProcessor::new(cli);
    processor.process().map(|_| ())
}
