//! Error handling for the take-flight generator.
//! Defines the error taxonomy of the generation pipeline and the result alias used
//! throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::registry::ProviderKind;

/// Errors that can occur while generating a project.
///
/// Most variants are fatal: the orchestrator reports them and the process exits with a
/// non-zero status. [`Error::is_recoverable`] singles out the ones that only disable an
/// optional step.
#[derive(Error, Debug)]
pub enum Error {
    /// The project name does not match `^[a-z0-9-]+$`.
    #[error("Invalid project name '{name}': project name must be lowercase, with hyphens only, no spaces.")]
    InvalidName { name: String },

    /// The target directory exists before the run started.
    #[error("Directory '{}' already exists.", path.display())]
    DirectoryExists { path: PathBuf },

    /// The requested base template is unknown or missing from the templates root.
    #[error("Template '{template}' not found at '{}'.", path.display())]
    TemplateNotFound { template: String, path: PathBuf },

    /// A provider fragment lacks its required source directory.
    #[error("{kind} template for '{provider}' not found at '{}'.", path.display())]
    FeatureTemplateMissing {
        kind: ProviderKind,
        provider: String,
        path: PathBuf,
    },

    /// A child process could not be started or exited unsuccessfully.
    #[error("Command '{command}' failed: {reason}.")]
    ExternalProcess { command: String, reason: String },

    /// The environment file already exists and was left untouched.
    #[error("Environment file '{}' already exists.", path.display())]
    EnvFileConflict { path: PathBuf },

    /// The dependency manifest is missing, malformed or fails its schema.
    #[error("Manifest error: {0}.")]
    ManifestError(String),

    /// The generator configuration file is malformed or fails its schema.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Interactive input could not be collected.
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// A template ignore file contains an invalid glob.
    #[error("Ignore file error: {0}.")]
    IgnoreError(String),

    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Directory walk error: {0}.")]
    WalkDirError(#[from] walkdir::Error),
}

impl Error {
    /// Returns `true` for failures that disable an optional step without aborting the
    /// run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::FeatureTemplateMissing { .. } | Error::EnvFileConflict { .. }
        )
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
