//! The answer set driving file selection and template rendering.
//! Answers come either from the interactive prompter or from an answer file
//! given with `--automate`.

use crate::error::{Error, Result};
use cruet::Inflector;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Platform the generated application targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Web,
    Mobile,
    Both,
}

impl TargetPlatform {
    pub const ALL: [TargetPlatform; 3] =
        [TargetPlatform::Web, TargetPlatform::Mobile, TargetPlatform::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::Web => "web",
            TargetPlatform::Mobile => "mobile",
            TargetPlatform::Both => "both",
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI framework the generated application is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiFramework {
    Bootstrap,
    Material,
    Ionic,
}

impl UiFramework {
    pub const ALL: [UiFramework; 3] =
        [UiFramework::Bootstrap, UiFramework::Material, UiFramework::Ionic];

    pub fn as_str(&self) -> &'static str {
        match self {
            UiFramework::Bootstrap => "bootstrap",
            UiFramework::Material => "material",
            UiFramework::Ionic => "ionic",
        }
    }
}

impl fmt::Display for UiFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved user choices. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    app_name: String,
    project_name: String,
    target: TargetPlatform,
    ui: UiFramework,
}

impl AnswerSet {
    /// Builds an answer set, deriving the kebab-case project name from `app_name`.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if `app_name` has no characters usable in a project name
    pub fn new(app_name: impl Into<String>, target: TargetPlatform, ui: UiFramework) -> Result<Self> {
        let app_name = app_name.into();
        let project_name = app_name.to_kebab_case();
        if !is_kebab_slug(&project_name) {
            return Err(Error::ConfigurationError(format!(
                "application name '{}' does not yield a valid project name",
                app_name
            )));
        }
        Ok(Self { app_name, project_name, target, ui })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn target(&self) -> TargetPlatform {
        self.target
    }

    pub fn ui(&self) -> UiFramework {
        self.ui
    }
}

fn is_kebab_slug(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|segment| {
            !segment.is_empty()
                && segment.chars().all(|c| c.is_alphanumeric() && !c.is_uppercase())
        })
}

/// Shape of an answer file, after schema validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerFile {
    app_name: Option<String>,
    target: TargetPlatform,
    ui: UiFramework,
}

/// JSON Schema every answer file must satisfy.
///
/// `projectName` is accepted so state records can be fed back in, but it is always re-derived.
pub fn answer_file_schema() -> serde_json::Value {
    let targets: Vec<&str> = TargetPlatform::ALL.iter().map(TargetPlatform::as_str).collect();
    let uis: Vec<&str> = UiFramework::ALL.iter().map(UiFramework::as_str).collect();
    serde_json::json!({
        "type": "object",
        "required": ["target", "ui"],
        "properties": {
            "appName": { "type": "string", "minLength": 1 },
            "projectName": { "type": "string" },
            "target": { "enum": targets },
            "ui": { "enum": uis }
        },
        "additionalProperties": false
    })
}

/// Parses answer file content. JSON is tried first, then YAML.
pub fn parse_answers(content: &str, fallback_app_name: &str) -> Result<AnswerSet> {
    let raw: serde_json::Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigurationError(format!("Invalid answer file format: {}", e)))?,
    };

    let validator = jsonschema::validator_for(&answer_file_schema())
        .map_err(|e| Error::ConfigurationError(format!("Invalid answer schema: {}", e)))?;
    let violations: Vec<String> = validator.iter_errors(&raw).map(|e| e.to_string()).collect();
    if !violations.is_empty() {
        return Err(Error::ConfigurationError(format!(
            "Answer file does not match schema: {}",
            violations.join("; ")
        )));
    }

    let file: AnswerFile = serde_json::from_value(raw)
        .map_err(|e| Error::ConfigurationError(format!("Invalid answer file: {}", e)))?;
    let app_name = file.app_name.unwrap_or_else(|| fallback_app_name.to_string());
    AnswerSet::new(app_name, file.target, file.ui)
}

/// Loads an answer set from a JSON or YAML file.
///
/// # Arguments
/// * `path` - Answer file location
/// * `fallback_app_name` - Application name used when the file has no `appName`
///
/// # Errors
/// * `Error::ConfigurationError` if the file is missing, unparsable or violates the schema
pub fn load_answers_file<P: AsRef<Path>>(path: P, fallback_app_name: &str) -> Result<AnswerSet> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigurationError(format!(
            "Invalid answer file path: {}",
            path.display()
        )));
    }
    debug!("Loading answers from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_answers(&content, fallback_app_name)
}
