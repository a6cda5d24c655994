//! Classification of template files by naming convention.
//!
//! A file name starting with the marker (`_app.ts`) is a template and is rendered.
//! A file name starting with the double marker (`__ionic.config.ts`) is written only
//! when its tag's predicate holds; the tag and the first dot are dropped from the name.
//! A top-level folder starting with the marker (`_mobile/`) makes every file below it
//! conditional, and the folder itself disappears from the output path.

use crate::constants::{FILENAME_CONDITION_PREFIX, MARKER};
use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// One file of the template tree with its routing flags and destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateFile {
    source: String,
    destination: String,
    is_template: bool,
    has_filename_condition: bool,
    has_folder_condition: bool,
}

impl TemplateFile {
    /// Path relative to the template root, `/`-separated.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Path relative to the output root, `/`-separated.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Whether the file is rendered rather than copied.
    pub fn is_template(&self) -> bool {
        self.is_template
    }

    pub fn has_filename_condition(&self) -> bool {
        self.has_filename_condition
    }

    pub fn has_folder_condition(&self) -> bool {
        self.has_folder_condition
    }

    /// Source base name.
    pub fn file_name(&self) -> &str {
        self.source.rsplit('/').next().unwrap_or(&self.source)
    }

    /// First directory segment of the source, if the file is not at the root.
    pub fn top_folder(&self) -> Option<&str> {
        self.source.split_once('/').map(|(top, _)| top)
    }

    /// Tag carried by the conditional top folder (`_mobile` -> `mobile`).
    pub fn folder_tag(&self) -> Option<&str> {
        if !self.has_folder_condition {
            return None;
        }
        self.top_folder().and_then(|top| top.strip_prefix(MARKER))
    }

    /// Tag carried by a conditional file name (`__ionic.config.ts` -> `ionic`).
    pub fn filename_tag(&self) -> Option<&str> {
        if !self.has_filename_condition {
            return None;
        }
        self.file_name()
            .strip_prefix(FILENAME_CONDITION_PREFIX)
            .and_then(|rest| rest.split_once('.'))
            .map(|(tag, _)| tag)
    }

    pub fn source_path(&self, template_root: &Path) -> PathBuf {
        join_segments(template_root, &self.source)
    }

    pub fn destination_path(&self, output_root: &Path) -> PathBuf {
        join_segments(output_root, &self.destination)
    }
}

fn join_segments(root: &Path, relative: &str) -> PathBuf {
    relative.split('/').fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// Collapses a conditional file name to its template form.
///
/// Everything from the double marker up to and including the first dot becomes a
/// single marker: `__mobile.component.ts` becomes `_component.ts`. Returns `None`
/// when the name is not conditional or has no dot after the tag.
pub fn collapse_filename_condition(file_name: &str) -> Option<String> {
    file_name
        .strip_prefix(FILENAME_CONDITION_PREFIX)
        .and_then(|rest| rest.split_once('.'))
        .map(|(_, remainder)| format!("{}{}", MARKER, remainder))
}

/// Classifies a file found under `template_root`.
///
/// # Errors
/// * `Error::ClassificationError` if `raw_path` is not below `template_root`,
///   is not valid UTF-8, or resolves to an unusable destination
pub fn classify<P: AsRef<Path>, Q: AsRef<Path>>(template_root: P, raw_path: Q) -> Result<TemplateFile> {
    let raw_path = raw_path.as_ref();
    let classification_error = |reason: &str| Error::ClassificationError {
        path: raw_path.display().to_string(),
        reason: reason.to_string(),
    };

    let relative = raw_path
        .strip_prefix(template_root.as_ref())
        .map_err(|_| classification_error("path is outside the template root"))?;

    let segments = relative
        .components()
        .map(|component| match component {
            Component::Normal(segment) => segment
                .to_str()
                .ok_or_else(|| classification_error("path is not valid UTF-8")),
            _ => Err(classification_error("path is not a plain relative path")),
        })
        .collect::<Result<Vec<&str>>>()?;

    classify_relative(&segments.join("/"))
}

/// Classifies a `/`-separated path relative to the template root.
pub fn classify_relative(source: &str) -> Result<TemplateFile> {
    let classification_error = |reason: String| Error::ClassificationError {
        path: source.to_string(),
        reason,
    };

    let segments: Vec<&str> = source.split('/').collect();
    if let Some(bad) = segments.iter().find(|s| s.is_empty() || **s == "." || **s == "..") {
        return Err(classification_error(format!("invalid path segment '{}'", bad)));
    }
    let (file_name, folders) = segments
        .split_last()
        .ok_or_else(|| classification_error("empty path".to_string()))?;

    let has_filename_condition = file_name.starts_with(FILENAME_CONDITION_PREFIX);
    let is_template = file_name.starts_with(MARKER);
    let has_folder_condition = folders.first().is_some_and(|top| top.starts_with(MARKER));

    // The conditional folder is elided and its children promoted one level up.
    let folders = if has_folder_condition { &folders[1..] } else { folders };

    let mut name = if has_filename_condition {
        collapse_filename_condition(file_name).ok_or_else(|| {
            classification_error(format!("conditional file name '{}' has no dot after its tag", file_name))
        })?
    } else {
        file_name.to_string()
    };
    if is_template {
        name = name.strip_prefix(MARKER).unwrap_or(&name).to_string();
    }
    if name.is_empty() {
        return Err(classification_error(format!("'{}' leaves an empty file name", file_name)));
    }

    let destination = folders
        .iter()
        .copied()
        .chain(std::iter::once(name.as_str()))
        .collect::<Vec<_>>()
        .join("/");

    Ok(TemplateFile {
        source: source.to_string(),
        destination,
        is_template,
        has_filename_condition,
        has_folder_condition,
    })
}
