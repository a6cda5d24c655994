//! Per-file write decisions.
//!
//! A file is written when both its folder gate and its filename gate pass. A gate
//! passes when every registered rule whose marker-prefixed tag starts the tagged
//! name evaluates to true.

use crate::answers::AnswerSet;
use crate::classifier::TemplateFile;
use crate::constants::{MARKER, STATE_FILE};
use crate::error::{Error, Result};
use crate::registry::{PredicateRegistry, PredicateRule};
use log::{debug, warn};
use std::collections::BTreeMap;

/// How a conditional name that matches no registered tag is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagPolicy {
    /// Unmatched tags are an `Error::UnknownTag`.
    #[default]
    Strict,
    /// Unmatched tags impose no constraint.
    Permissive,
}

/// Files chosen for writing, keyed by destination.
#[derive(Debug, Default)]
pub struct GenerationPlan {
    files: BTreeMap<String, TemplateFile>,
    skipped: Vec<TemplateFile>,
}

impl GenerationPlan {
    /// Selected files in destination order.
    pub fn files(&self) -> impl Iterator<Item = &TemplateFile> {
        self.files.values()
    }

    pub fn skipped(&self) -> &[TemplateFile] {
        &self.skipped
    }

    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

pub struct SelectionEngine<'a> {
    registry: &'a PredicateRegistry,
    policy: TagPolicy,
}

impl<'a> SelectionEngine<'a> {
    pub fn new(registry: &'a PredicateRegistry, policy: TagPolicy) -> Self {
        Self { registry, policy }
    }

    /// Decides whether `file` is emitted for `answers`.
    ///
    /// # Errors
    /// * `Error::UnknownTag` under `TagPolicy::Strict` when a conditional name matches no rule
    pub fn should_write(&self, file: &TemplateFile, answers: &AnswerSet) -> Result<bool> {
        let folder_gate = match file.top_folder() {
            Some(folder) if file.has_folder_condition() => {
                self.gate(folder, file.folder_tag(), file, answers)?
            }
            _ => true,
        };
        let filename_gate = if file.has_filename_condition() {
            // `__tag.` names match on the marker plus `_tag`.
            let name = file.file_name().strip_prefix(MARKER).unwrap_or(file.file_name());
            self.gate(name, file.filename_tag(), file, answers)?
        } else {
            true
        };
        Ok(folder_gate && filename_gate)
    }

    fn gate(
        &self,
        name: &str,
        tag: Option<&str>,
        file: &TemplateFile,
        answers: &AnswerSet,
    ) -> Result<bool> {
        let matching: Vec<&PredicateRule> = self
            .registry
            .rules()
            .filter(|rule| {
                name.strip_prefix(MARKER)
                    .is_some_and(|rest| rest.starts_with(rule.tag()))
            })
            .collect();

        if matching.is_empty() {
            let tag = tag.unwrap_or(name).to_string();
            return match self.policy {
                TagPolicy::Strict => Err(Error::UnknownTag {
                    tag,
                    path: file.source().to_string(),
                }),
                TagPolicy::Permissive => {
                    warn!("No rule for tag '{}' in '{}', writing it unconditionally", tag, file.source());
                    Ok(true)
                }
            };
        }
        Ok(matching.iter().all(|rule| rule.evaluate(answers)))
    }

    /// Runs selection over every file before anything is written.
    ///
    /// # Errors
    /// * `Error::WriteConflict` if two selected files share a destination, or a file
    ///   would overwrite the generator-state record
    /// * Any error from [`SelectionEngine::should_write`]
    pub fn plan<I>(&self, files: I, answers: &AnswerSet) -> Result<GenerationPlan>
    where
        I: IntoIterator<Item = TemplateFile>,
    {
        let mut plan = GenerationPlan::default();
        for file in files {
            if !self.should_write(&file, answers)? {
                debug!("Skipping {}", file.source());
                plan.skipped.push(file);
                continue;
            }
            if file.destination() == STATE_FILE {
                return Err(Error::WriteConflict {
                    destination: STATE_FILE.to_string(),
                    first: "generator state".to_string(),
                    second: file.source().to_string(),
                });
            }
            if let Some(existing) = plan.files.get(file.destination()) {
                return Err(Error::WriteConflict {
                    destination: file.destination().to_string(),
                    first: existing.source().to_string(),
                    second: file.source().to_string(),
                });
            }
            debug!("Selected {} -> {}", file.source(), file.destination());
            plan.files.insert(file.destination().to_string(), file);
        }
        Ok(plan)
    }
}
