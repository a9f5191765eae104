//! Placeholder substitution for generated projects.
//! Configured files are rendered as MiniJinja templates against the project context.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use cruet::Inflector;
use log::debug;
use minijinja::syntax::SyntaxConfig;
use minijinja::Environment;

use crate::error::{Error, Result};

/// Only `{{ }}` is live. Block and comment tags are moved to markers that do not
/// occur in generated projects, so `{#anchor}` headings and `{% raw %}` snippets in
/// configured files pass through untouched.
static SYNTAX: LazyLock<SyntaxConfig> = LazyLock::new(|| {
    SyntaxConfig::builder()
        .block_delimiters("[[%", "%]]")
        .comment_delimiters("[[#", "#]]")
        .build()
        .expect("placeholder delimiters are distinct")
});

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer that keeps trailing newlines of rendered files.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_syntax(SYNTAX.clone());
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
    /// * `Error::MinijinjaError` if the template does not compile or fails to render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template("temp", template).map_err(Error::MinijinjaError)?;

        let tmpl = env.get_template("temp").map_err(Error::MinijinjaError)?;

        tmpl.render(context).map_err(Error::MinijinjaError)
    }
}

/// Builds the placeholder context for a project.
///
/// `projectName` is the sanitized name; the other keys are derived spellings of it.
pub fn project_context(project_name: &str) -> serde_json::Value {
    serde_json::json!({
        "projectName": project_name,
        "projectNameSnake": project_name.to_snake_case(),
        "projectTitle": project_name.to_title_case(),
    })
}

/// Renders each of `files` found directly under `project_root` in place.
///
/// Missing files are skipped. Running twice with the same context leaves the output
/// of the first pass unchanged.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Files that were rewritten
pub fn render_configured_files(
    renderer: &dyn TemplateRenderer,
    project_root: &Path,
    files: &[&str],
    context: &serde_json::Value,
) -> Result<Vec<PathBuf>> {
    let mut rendered = Vec::new();
    for file in files {
        let path = project_root.join(file);
        if !path.is_file() {
            debug!("Skipping {}: not present", path.display());
            continue;
        }

        let content = fs::read_to_string(&path)?;
        let output = renderer.render(&content, context)?;
        fs::write(&path, output)?;
        debug!("Rendered placeholders in {}", path.display());
        rendered.push(path);
    }
    Ok(rendered)
}
