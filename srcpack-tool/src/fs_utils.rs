use anyhow::{Context, Result};
use srcpack_lib::{ConfigurationError, ExtensionSet};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::packaging::FileEntry;

/// Makes `source` absolute (symlinks are left alone) and checks that it is a directory.
///
/// A bad source comes back as a [`ConfigurationError`] inside the `anyhow::Error`
/// so `main` can tell it apart from I/O failures.
pub fn resolve_source_dir(source: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(source)
        .with_context(|| format!("resolving source path {source:?}"))?;

    if !abs.exists() {
        return Err(ConfigurationError::SourceMissing(abs).into());
    }
    if !abs.is_dir() {
        return Err(ConfigurationError::SourceNotDirectory(abs).into());
    }

    Ok(abs)
}

/// Lazily walks `root`, yielding every file whose name matches `extensions`.
///
/// Items come out as the walk reaches them, so the caller can write each one
/// before the next directory is read. A directory that cannot be read yields an
/// error item. Symlinks to regular files are yielded like the files they point
/// at; dangling links are skipped.
pub fn matching_files<'a>(
    root: &'a Path,
    extensions: &'a ExtensionSet,
) -> impl Iterator<Item = Result<FileEntry>> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry.with_context(|| format!("walking {root:?}")) {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err)),
            };

            if entry.file_type().is_dir() || !entry.path().is_file() {
                return None;
            }

            if !extensions.matches(&entry.file_name().to_string_lossy()) {
                debug!(path = %entry.path().display(), "skipped");
                return None;
            }

            Some(archive_name(root, entry.path()).map(|name_in_archive| FileEntry {
                path: entry.path().to_path_buf(),
                name_in_archive,
            }))
        })
}

/// Path of `file` relative to `root`, joined with `/` whatever the host separator is.
pub fn archive_name(root: &Path, file: &Path) -> Result<String> {
    let rel = file
        .strip_prefix(root)
        .with_context(|| format!("{file:?} is not inside {root:?}"))?;

    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    anyhow::ensure!(!parts.is_empty(), "{file:?} has no name relative to {root:?}");
    Ok(parts.join("/"))
}
