use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::runtime::Builder;

use crate::packaging::zip::package_zip_async;
use crate::sink::save_file::create_file_writer;

pub mod zip;

/// Represents a file to include in the ZIP archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name_in_archive: String,
}

/// Truncates `output`, then writes `files` into it as a fresh ZIP, managing its own
/// async runtime. Returns the number of entries written.
///
/// This is the main entrypoint for synchronous callers. The archive is opened
/// before `files` is pulled, so a failing walk never leaves a previous archive
/// behind. The runtime is current-thread, so entries are written one after
/// another on the calling thread.
pub fn create_zip_sync<I>(files: I, output: &Path) -> Result<usize>
where
    I: IntoIterator<Item = Result<FileEntry>>,
{
    let rt = Builder::new_current_thread().enable_all().build()?;

    rt.block_on(async {
        let file = create_file_writer(output).await?;
        package_zip_async(files, file).await
    })
}
