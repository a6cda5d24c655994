//! Interactive answer collection.

use crate::answers::{AnswerSet, TargetPlatform, UiFramework};
use crate::error::Result;
use dialoguer::{Input, Select};

/// What the prompter needs to know before asking.
#[derive(Debug, Default)]
pub struct Questions {
    /// Name given on the command line. When set, the name question is skipped.
    pub app_name: Option<String>,
    /// Suggested name, usually the output directory's name.
    pub default_app_name: String,
    /// Answers from a previous run, used as defaults.
    pub previous: Option<AnswerSet>,
}

/// Collects an answer set from the user.
pub trait Prompter {
    fn ask(&self, questions: &Questions) -> Result<AnswerSet>;
}

#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, questions: &Questions) -> Result<AnswerSet> {
        let previous = questions.previous.as_ref();

        let app_name = match &questions.app_name {
            Some(name) => name.clone(),
            None => {
                let default = previous
                    .map(|p| p.app_name().to_string())
                    .unwrap_or_else(|| questions.default_app_name.clone());
                Input::<String>::new()
                    .with_prompt("What's the name of your app?")
                    .default(default)
                    .interact_text()?
            }
        };

        let target = TargetPlatform::ALL[select(
            "What kind of app do you want to create?",
            &["Web", "Mobile (Cordova)", "Both"],
            default_index(&TargetPlatform::ALL, previous.map(AnswerSet::target)),
        )?];

        let ui = UiFramework::ALL[select(
            "Which UI framework do you want?",
            &["Bootstrap", "Angular Material", "Ionic"],
            default_index(&UiFramework::ALL, previous.map(AnswerSet::ui)),
        )?];

        AnswerSet::new(app_name, target, ui)
    }
}

fn select(prompt: &str, items: &[&str], default: usize) -> Result<usize> {
    Ok(Select::new()
        .with_prompt(prompt)
        .default(default)
        .items(items)
        .interact()?)
}

/// Position of `previous` in `choices`, or the first choice.
pub fn default_index<T: PartialEq>(choices: &[T], previous: Option<T>) -> usize {
    previous
        .and_then(|p| choices.iter().position(|c| *c == p))
        .unwrap_or(0)
}
