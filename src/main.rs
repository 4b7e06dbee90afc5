//! DZI Tiler - a Deep Zoom Image pyramid generator.
//!
//! This binary scans a source directory and converts every supported raster
//! image into a DZI tile pyramid under the output directory. Individual image
//! failures are reported and skipped; the exit code is a failure only when the
//! batch itself cannot run or no image succeeded despite some being present.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dzi_tiler::{config::Config, run_batch, TILE_FORMAT, TILE_OVERLAP, TILE_SIZE};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Input directory: {}", config.input_dir.display());
    info!("  Output directory: {}", config.output_dir.display());
    info!(
        "  Tiles: {}x{} {}, overlap {}, quality {}",
        TILE_SIZE, TILE_SIZE, TILE_FORMAT, TILE_OVERLAP, config.jpeg_quality
    );
    match config.workers {
        Some(workers) => info!("  Workers: {}", workers),
        None => info!("  Workers: one per CPU"),
    }
    if let Some(max_pixels) = config.max_pixels {
        info!("  Max source pixels: {}", max_pixels);
    }

    let report = match run_batch(&config.input_dir, &config.output_dir, &config.batch_options()) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let summary = report.summary();
    info!(
        "Batch complete: {} succeeded, {} failed, {} total",
        summary.succeeded, summary.failed, summary.total
    );

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    }

    if summary.total > 0 && summary.succeeded == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "dzi_tiler=debug"
    } else {
        "dzi_tiler=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
