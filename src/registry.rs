//! Predicate rules keyed by the tags used in conditional file and folder names.

use crate::answers::{AnswerSet, TargetPlatform, UiFramework};
use crate::error::{Error, Result};
use indexmap::IndexMap;

/// A predicate over the answer set, identified by its tag.
#[derive(Debug, Clone)]
pub enum PredicateRule {
    /// Holds when the chosen target covers this platform (`both` covers everything).
    Platform(TargetPlatform),
    /// Holds when this UI framework was chosen.
    Ui(UiFramework),
    /// Holds when `predicate` returns true.
    Custom {
        tag: String,
        predicate: fn(&AnswerSet) -> bool,
    },
}

impl PredicateRule {
    pub fn tag(&self) -> &str {
        match self {
            PredicateRule::Platform(platform) => platform.as_str(),
            PredicateRule::Ui(ui) => ui.as_str(),
            PredicateRule::Custom { tag, .. } => tag,
        }
    }

    pub fn evaluate(&self, answers: &AnswerSet) -> bool {
        match self {
            PredicateRule::Platform(platform) => {
                answers.target() == *platform || answers.target() == TargetPlatform::Both
            }
            PredicateRule::Ui(ui) => answers.ui() == *ui,
            PredicateRule::Custom { predicate, .. } => predicate(answers),
        }
    }
}

/// Ordered tag to rule mapping. Tags are unique.
#[derive(Debug, Clone, Default)]
pub struct PredicateRegistry {
    rules: IndexMap<String, PredicateRule>,
}

impl PredicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `mobile`, `web` and one rule per supported UI framework.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let rules = [
            PredicateRule::Platform(TargetPlatform::Mobile),
            PredicateRule::Platform(TargetPlatform::Web),
        ]
        .into_iter()
        .chain(UiFramework::ALL.into_iter().map(PredicateRule::Ui));

        for rule in rules {
            registry.rules.insert(rule.tag().to_string(), rule);
        }
        registry
    }

    /// Adds a rule.
    ///
    /// # Errors
    /// * `Error::DuplicateTag` if a rule with the same tag exists
    pub fn register(&mut self, rule: PredicateRule) -> Result<()> {
        let tag = rule.tag().to_string();
        if self.rules.contains_key(&tag) {
            return Err(Error::DuplicateTag(tag));
        }
        self.rules.insert(tag, rule);
        Ok(())
    }

    /// Evaluates the rule registered for `tag`.
    ///
    /// # Errors
    /// * `Error::UnknownTag` if no rule is registered for `tag`
    pub fn evaluate(&self, tag: &str, answers: &AnswerSet) -> Result<bool> {
        self.rules
            .get(tag)
            .map(|rule| rule.evaluate(answers))
            .ok_or_else(|| Error::UnknownTag {
                tag: tag.to_string(),
                path: String::new(),
            })
    }

    pub fn rules(&self) -> impl Iterator<Item = &PredicateRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
