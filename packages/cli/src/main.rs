#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the crime incident exporter.
//!
//! The formatted export is the only thing written to stdout. Diagnostics go
//! through `log` (stderr); set `RUST_LOG=info` or `debug` for progress.

use clap::Parser;
use crime_export_cli::{Cli, resolve};
use crime_export_source::registry::all_presets;

/// Exit status when no usable record location was configured.
const EXIT_CONFIG_ERROR: i32 = 1;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if cli.list_sources {
        println!("{:<16} {:<36} API URL", "ID", "NAME");
        println!("{}", "-".repeat(100));
        for preset in all_presets() {
            println!("{:<16} {:<36} {}", preset.id, preset.name, preset.api_url);
        }
        return;
    }

    let config = match resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let source = config.record_source();
    log::info!("Reading records from {}", source.describe());
    let records = source.load().await;

    let output = crime_export_pipeline::export(records, &config.query);
    println!("{output}");
}
