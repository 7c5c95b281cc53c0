use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// Creates the parent directory of `output`, including missing intermediate ones.
///
/// Returns the directory that now holds the archive. Calling it again when the
/// directory already exists is a no-op.
pub fn prepare_output_location(output: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(output)
        .with_context(|| format!("resolving output path {output:?}"))?;
    let parent = abs
        .parent()
        .with_context(|| format!("output path {abs:?} has no parent directory"))?
        .to_path_buf();

    std::fs::create_dir_all(&parent)
        .with_context(|| format!("creating output directory {parent:?}"))?;

    Ok(parent)
}

/// Opens `path` for writing, truncating any archive left by a previous run.
pub async fn create_file_writer<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    File::create(path)
        .await
        .with_context(|| format!("creating archive {path:?}"))
}
