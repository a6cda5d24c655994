//! Materialization of selected template files.
//! Turns each selected file into a file operation and applies it under the output root.

use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    classifier::TemplateFile,
    error::{Error, Result},
    renderer::TemplateRenderer,
};

/// What to do with one selected file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    /// Copy the source bytes unchanged.
    Copy { target: PathBuf },
    /// Write rendered template content.
    Write { target: PathBuf, content: String },
}

impl FileOperation {
    pub fn target(&self) -> &Path {
        match self {
            FileOperation::Copy { target } | FileOperation::Write { target, .. } => target,
        }
    }
}

#[derive(Debug)]
pub struct ProcessResult {
    pub source: PathBuf,
    pub operation: FileOperation,
}

impl ProcessResult {
    pub fn action(&self) -> &'static str {
        match self.operation {
            FileOperation::Copy { .. } => "Copying",
            FileOperation::Write { .. } => "Rendering",
        }
    }
}

/// Ensures the output directory is safe to write to.
///
/// # Arguments
/// * `output_dir` - Target directory path for generated output
/// * `force` - Whether to generate into a non-empty directory
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory has entries and force is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.is_dir() && !force && fs::read_dir(output_dir)?.next().is_some() {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    fs::create_dir_all(output_dir)?;
    Ok(output_dir.to_path_buf())
}

fn file_error(path: impl std::fmt::Display, source: std::io::Error) -> Error {
    Error::FileError { path: path.to_string(), source }
}

pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
    context: &'a serde_json::Value,
    written: HashMap<PathBuf, String>,
}

impl<'a> Processor<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
        context: &'a serde_json::Value,
    ) -> Self {
        Self {
            renderer,
            template_root,
            output_root,
            context,
            written: HashMap::new(),
        }
    }

    /// Resolves the operation for a selected file. Templates are rendered here.
    ///
    /// # Errors
    /// * `Error::FileError` if a template cannot be read as UTF-8 text
    /// * `Error::RenderError` if rendering fails
    pub fn process(&self, file: &TemplateFile) -> Result<ProcessResult> {
        let source = file.source_path(self.template_root);
        let target = file.destination_path(self.output_root);

        let operation = if file.is_template() {
            let template =
                fs::read_to_string(&source).map_err(|e| file_error(file.source(), e))?;
            let content = self.renderer.render(file.source(), &template, self.context)?;
            FileOperation::Write { target, content }
        } else {
            FileOperation::Copy { target }
        };

        Ok(ProcessResult { source, operation })
    }

    /// Executes a file operation, creating missing parent directories.
    ///
    /// # Errors
    /// * `Error::WriteConflict` if the target was already written in this run
    /// * `Error::FileError` naming the source or target on any filesystem failure
    pub fn apply(&mut self, result: &ProcessResult) -> Result<PathBuf> {
        let target = result.operation.target().to_path_buf();
        let source_label = result.source.display().to_string();
        if let Some(first) = self.written.get(&target) {
            return Err(Error::WriteConflict {
                destination: target.display().to_string(),
                first: first.clone(),
                second: source_label,
            });
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| file_error(parent.display(), e))?;
        }
        let target_label = target.display().to_string();
        match &result.operation {
            FileOperation::Copy { target } => {
                debug!("Copying file: {}", target.display());
                fs::copy(&result.source, target).map_err(|e| file_error(&source_label, e))?;
            }
            FileOperation::Write { target, content } => {
                debug!("Writing file: {}", target.display());
                fs::write(target, content).map_err(|e| file_error(&target_label, e))?;
                let permissions = fs::metadata(&result.source)
                    .map_err(|e| file_error(&source_label, e))?
                    .permissions();
                fs::set_permissions(target, permissions).map_err(|e| file_error(&target_label, e))?;
            }
        }

        self.written.insert(target.clone(), source_label);
        Ok(target)
    }
}
