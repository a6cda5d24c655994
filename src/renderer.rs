//! Template rendering for kitgen.
//! Template files are MiniJinja templates rendered with the answer set as context.
use crate::answers::AnswerSet;
use crate::constants::VERSION;
use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Source path of the template, used in error reports
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that rejects undefined placeholders and keeps trailing newlines.
    /// Output is never escaped, whatever the file extension.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::RenderError` if the template is malformed or uses an undefined value
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        let render_error = |source: minijinja::Error| Error::RenderError { path: name.to_string(), source };
        self.env.render_named_str(name, template, context).map_err(render_error)
    }
}

/// Builds the context templates are rendered with.
///
/// Answer fields are available both at the top level (`{{ projectName }}`) and under
/// `props` (`{{ props.projectName }}`), next to the generator `version`.
pub fn render_context(answers: &AnswerSet) -> Result<serde_json::Value> {
    let props = serde_json::to_value(answers)?;
    let mut context = match &props {
        serde_json::Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    context.insert("props".to_string(), props);
    context.insert("version".to_string(), serde_json::Value::String(VERSION.to_string()));
    Ok(serde_json::Value::Object(context))
}
