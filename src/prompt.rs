//! Interactive collection of generator choices.
//! Values already supplied on the command line are not asked again.

use dialoguer::{Input, Select};

use crate::constants::{DEFAULT_PROJECT_NAME, NO_PROVIDER};
use crate::error::{Error, Result};
use crate::template::TemplateKind;

/// Source of operator answers.
pub trait Prompter {
    /// Asks the operator to pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize>;

    /// Asks for free text.
    fn input(&self, prompt: &str, default: &str) -> Result<String>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .default(default)
            .items(items)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Raw operator choices, before name validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    pub project_name: String,
    pub template: TemplateKind,
    /// `None` means no authentication.
    pub auth: Option<String>,
    /// `None` means no database.
    pub database: Option<String>,
}

/// Choices given up front; missing ones are prompted for.
#[derive(Debug, Clone, Default)]
pub struct Preset {
    pub template: Option<TemplateKind>,
    pub project_name: Option<String>,
    pub auth: Option<String>,
    pub database: Option<String>,
}

/// Maps a provider answer to a selection, treating `none` and blank as no provider.
pub fn provider_selection(value: &str) -> Option<String> {
    let value = value.trim().to_lowercase();
    if value.is_empty() || value == NO_PROVIDER {
        None
    } else {
        Some(value)
    }
}

/// (label, value) pairs offered for authentication.
pub fn auth_choices(template: TemplateKind) -> Vec<(&'static str, &'static str)> {
    let mut choices = vec![
        ("No", NO_PROVIDER),
        ("Yes - Supabase", "supabase"),
        ("Yes - Firebase", "firebase"),
    ];
    if template.is_framework_specific() {
        choices.push(("Yes - NextAuth.js", "nextauth"));
    }
    choices
}

/// (label, value) pairs offered for the database.
pub fn database_choices() -> Vec<(&'static str, &'static str)> {
    vec![
        ("No", NO_PROVIDER),
        ("Yes - SQLite", "sqlite"),
        ("Yes - PostgreSQL", "postgresql"),
        ("Yes - MongoDB", "mongodb"),
    ]
}

fn select_value(
    prompter: &dyn Prompter,
    prompt: &str,
    choices: &[(&'static str, &'static str)],
) -> Result<&'static str> {
    let labels: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();
    let index = prompter.select(prompt, &labels, 0)?;
    choices
        .get(index)
        .map(|(_, value)| *value)
        .ok_or_else(|| Error::PromptError(format!("no choice at index {index}")))
}

/// Collects the template, project name, auth and database choices.
pub fn collect_selections(prompter: &dyn Prompter, preset: Preset) -> Result<Selections> {
    let template = match preset.template {
        Some(template) => template,
        None => {
            let labels: Vec<&str> = TemplateKind::ALL.iter().map(|t| t.label()).collect();
            let index = prompter.select("Choose a template:", &labels, 0)?;
            *TemplateKind::ALL
                .get(index)
                .ok_or_else(|| Error::PromptError(format!("no template at index {index}")))?
        }
    };

    let project_name = match preset.project_name {
        Some(name) => name,
        None => prompter.input("Enter project name:", DEFAULT_PROJECT_NAME)?,
    };

    let auth = match preset.auth {
        Some(auth) => auth,
        None => select_value(prompter, "Include authentication?", &auth_choices(template))?
            .to_string(),
    };

    let database = match preset.database {
        Some(database) => database,
        None => select_value(prompter, "Include database?", &database_choices())?.to_string(),
    };

    Ok(Selections {
        project_name,
        template,
        auth: provider_selection(&auth),
        database: provider_selection(&database),
    })
}
