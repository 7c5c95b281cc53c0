use anyhow::{Context, Result};
use async_zip::tokio::write::ZipFileWriter;
use async_zip::{Compression, ZipDateTime, ZipEntryBuilder};
use chrono::{DateTime, Datelike, Local};
use std::fs::Metadata;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, info};

use crate::packaging::FileEntry;

/// Streams every entry of `files` into a Deflate-compressed ZIP written to `out`.
///
/// `files` is consumed lazily, so a directory walk can feed it directly and each
/// file is added as soon as it is found. The central directory is written and
/// `out` flushed even when an item is an error or adding an entry fails; that
/// error is the one returned. Returns the number of entries written.
pub async fn package_zip_async<I>(files: I, out: File) -> Result<usize>
where
    I: IntoIterator<Item = Result<FileEntry>>,
{
    let mut writer = ZipFileWriter::with_tokio(out);

    let written = write_entries(&mut writer, files).await;
    let closed = finish_archive(writer).await;

    let count = written?;
    closed?;
    info!(entries = count, "archive finalized");
    Ok(count)
}

async fn write_entries<I>(writer: &mut ZipFileWriter<File>, files: I) -> Result<usize>
where
    I: IntoIterator<Item = Result<FileEntry>>,
{
    let mut count = 0;
    for fe in files {
        let fe = fe?;
        let source = File::open(&fe.path)
            .await
            .with_context(|| format!("opening {}", fe.path.display()))?;
        let metadata = source
            .metadata()
            .await
            .with_context(|| format!("reading metadata of {}", fe.path.display()))?;

        let mut builder =
            ZipEntryBuilder::new(fe.name_in_archive.clone().into(), Compression::Deflate);
        if let Some(date) = metadata.modified().ok().and_then(zip_date) {
            builder = builder.last_modification_date(date);
        }
        if let Some(mode) = unix_mode(&metadata) {
            builder = builder.unix_permissions(mode);
        }

        let mut entry_writer = writer
            .write_entry_stream(builder)
            .await
            .with_context(|| format!("starting entry {}", fe.name_in_archive))?;
        let copied = futures::io::copy(source.compat(), &mut entry_writer)
            .await
            .with_context(|| format!("compressing {}", fe.path.display()))?;
        entry_writer
            .close()
            .await
            .with_context(|| format!("finishing entry {}", fe.name_in_archive))?;

        debug!(entry = %fe.name_in_archive, bytes = copied, "entry written");
        println!("Added: {}", fe.name_in_archive);
        count += 1;
    }
    Ok(count)
}

async fn finish_archive(writer: ZipFileWriter<File>) -> Result<()> {
    let mut file = writer
        .close()
        .await
        .context("writing ZIP central directory")?
        .into_inner();
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}

/// DOS timestamps carry no zone, so the local wall-clock time is stored.
/// MS-DOS dates start in 1980; older mtimes are left at the format default.
fn zip_date(modified: std::time::SystemTime) -> Option<ZipDateTime> {
    let local: DateTime<Local> = modified.into();
    if local.year() < 1980 {
        return None;
    }
    let wall_clock = local.naive_local().and_utc();
    Some(ZipDateTime::from_chrono(&wall_clock))
}

/// Low 16 bits of `st_mode`: file type plus permission bits.
#[cfg(unix)]
fn unix_mode(metadata: &Metadata) -> Option<u16> {
    use std::os::unix::fs::PermissionsExt;
    Some((metadata.permissions().mode() & 0xFFFF) as u16)
}

#[cfg(not(unix))]
fn unix_mode(_metadata: &Metadata) -> Option<u16> {
    None
}
