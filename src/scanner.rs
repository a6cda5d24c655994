//! Template tree traversal.
//! Lists every regular file under the template root, minus OS metadata files
//! and any user-supplied exclusion patterns.

use crate::constants::DEFAULT_EXCLUDED_NAMES;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Decides which scanned files are never project content.
#[derive(Debug, Clone)]
pub struct ScanFilter {
    names: BTreeSet<String>,
    patterns: GlobSet,
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self {
            names: DEFAULT_EXCLUDED_NAMES.iter().map(|n| n.to_string()).collect(),
            patterns: GlobSet::empty(),
        }
    }
}

impl ScanFilter {
    /// Filter excluding exactly the given file names.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            patterns: GlobSet::empty(),
        }
    }

    /// Adds glob patterns matched against the path relative to the template root.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if a pattern is not a valid glob
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern.as_ref()).map_err(|e| {
                Error::ConfigurationError(format!("Invalid exclude pattern: {}", e))
            })?);
        }
        self.patterns = builder
            .build()
            .map_err(|e| Error::ConfigurationError(format!("Invalid exclude pattern: {}", e)))?;
        Ok(self)
    }

    /// Whether a file should be skipped. `relative` is the path below the template root.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let name_excluded = relative
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.names.contains(name));
        name_excluded || self.patterns.is_match(relative)
    }
}

/// Recursively lists the regular files under `template_root`, sorted by path.
///
/// Symbolic links are followed.
///
/// # Errors
/// * `Error::ScanError` if the root or any entry below it cannot be read,
///   including broken symbolic links
pub fn scan<P: AsRef<Path>>(template_root: P, filter: &ScanFilter) -> Result<Vec<PathBuf>> {
    let template_root = template_root.as_ref();
    debug!("Scanning template root {}", template_root.display());
    if template_root.exists() && !template_root.is_dir() {
        return Err(Error::ConfigurationError(format!(
            "Template root is not a directory: {}",
            template_root.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(template_root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::ScanError {
            path: e
                .path()
                .unwrap_or(template_root)
                .display()
                .to_string(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(template_root).unwrap_or(path);
        if filter.is_excluded(relative) {
            debug!("Skipping excluded file {}", relative.display());
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
