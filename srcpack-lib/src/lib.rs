use std::path::{Path, PathBuf};

use thiserror::Error;

/// Directory scanned when `--source` is not given.
pub const DEFAULT_SOURCE: &str = ".";

/// Archive written when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "cs_files.zip";

/// Suffixes packed by default: C# sources and Unity assembly definitions.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".cs", ".asmdef"];

/// Everything a single packing run needs.
#[derive(Debug, Clone)]
pub struct PackConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    pub extensions: ExtensionSet,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            output: PathBuf::from(DEFAULT_OUTPUT),
            extensions: ExtensionSet::default(),
        }
    }
}

/// Case-insensitive set of file name suffixes deciding what goes into the archive.
///
/// Suffixes are plain string tails, not `Path::extension` values, so `.asmdef`
/// and multi-dot suffixes like `.cs.meta` both work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl ExtensionSet {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suffixes: Vec<String> = suffixes
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        suffixes.sort();
        suffixes.dedup();
        Self { suffixes }
    }

    /// Returns true when the lower-cased `file_name` ends with any suffix in the set.
    pub fn matches(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.suffixes.iter().any(|s| lower.ends_with(s.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

/// The only error a user is expected to fix: a bad `--source`.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("source directory '{}' does not exist.", .0.display())]
    SourceMissing(PathBuf),
    #[error("source directory '{}' is not a directory.", .0.display())]
    SourceNotDirectory(PathBuf),
}

impl ConfigurationError {
    pub fn path(&self) -> &Path {
        match self {
            Self::SourceMissing(p) | Self::SourceNotDirectory(p) => p,
        }
    }
}
