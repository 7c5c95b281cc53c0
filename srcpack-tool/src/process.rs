use anyhow::Result;
use srcpack_lib::PackConfig;
use tracing::info;

use crate::{
    fs_utils::{matching_files, resolve_source_dir},
    packaging::create_zip_sync,
    sink::save_file::prepare_output_location,
};

/// Runs one packing pass: validate the source, prepare the output directory,
/// then walk the tree and write each matching file into the freshly opened archive.
///
/// Nothing is created on disk when the source is rejected. Once the source is
/// accepted the previous archive is truncated, whether or not the walk succeeds.
pub fn process_files(config: &PackConfig) -> Result<()> {
    let source = resolve_source_dir(&config.source)?;
    info!(source = %source.display(), "scanning");

    let out_dir = prepare_output_location(&config.output)?;
    info!(dir = %out_dir.display(), "output directory ready");

    let added = create_zip_sync(matching_files(&source, &config.extensions), &config.output)?;
    info!(added, "packed files");
    println!("\n✓ Created ZIP at: {}", config.output.display());

    Ok(())
}
