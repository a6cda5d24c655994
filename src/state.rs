//! Generator-state record kept in the generated project.
//! Re-running the generator in the same directory finds the previous answers here.

use crate::answers::{parse_answers, AnswerSet};
use crate::constants::{STATE_FILE, VERSION};
use crate::error::{Error, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct GeneratorState<'a> {
    pub version: &'a str,
    pub props: &'a AnswerSet,
}

impl<'a> GeneratorState<'a> {
    pub fn new(props: &'a AnswerSet) -> Self {
        Self { version: VERSION, props }
    }

    /// Writes the record into `output_root` as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, output_root: P) -> Result<()> {
        let path = output_root.as_ref().join(STATE_FILE);
        debug!("Saving generator state to {}", path.display());
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// A record read back from a previous run.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviousState {
    pub version: String,
    pub props: AnswerSet,
}

#[derive(Deserialize)]
struct StoredState {
    version: String,
    props: serde_json::Value,
}

/// Loads the record left by a previous run, if any.
///
/// A missing record is `Ok(None)`. A record that cannot be read back is
/// logged and ignored so a stale file never blocks generation.
pub fn load_state<P: AsRef<Path>>(output_root: P) -> Result<Option<PreviousState>> {
    let path = output_root.as_ref().join(STATE_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;

    let parsed = serde_json::from_str::<StoredState>(&content)
        .map_err(Error::JsonError)
        .and_then(|stored| {
            let app_name = stored.props.get("appName").and_then(|v| v.as_str()).unwrap_or_default();
            let props = parse_answers(&stored.props.to_string(), app_name)?;
            Ok(PreviousState { version: stored.version, props })
        });

    match parsed {
        Ok(state) => Ok(Some(state)),
        Err(e) => {
            warn!("Ignoring unreadable state file {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{TargetPlatform, UiFramework};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let answers = AnswerSet::new("My App", TargetPlatform::Both, UiFramework::Ionic).unwrap();
        GeneratorState::new(&answers).save(temp_dir.path()).unwrap();

        let stored: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(temp_dir.path().join(STATE_FILE)).unwrap())
                .unwrap();
        assert_eq!(stored["version"], VERSION);
        assert_eq!(stored["props"]["projectName"], "my-app");

        let previous = load_state(temp_dir.path()).unwrap().unwrap();
        assert_eq!(previous.version, VERSION);
        assert_eq!(previous.props, answers);
    }

    #[test]
    fn test_missing_state() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_state(temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_unreadable_state_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(STATE_FILE),
            r#"{"version": "0.1.0", "props": {"target": "desktop", "ui": "bootstrap"}}"#,
        )
        .unwrap();
        assert!(load_state(temp_dir.path()).unwrap().is_none());
    }
}
