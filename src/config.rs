//! Generator configuration.
//! Loads the optional take-flight.{json,yml,yaml} file, validates it against an
//! embedded schema and resolves defaults.

use crate::constants::{
    CONFIG_FILES, DEFAULT_INSTALL_COMMAND, DEFAULT_NEXT_COMMAND, DEFAULT_VCS_COMMAND,
};
use crate::error::{Error, Result};
use crate::name::NameValidation;
use crate::runner::CommandSpec;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of a generator configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub templates_dir: Option<PathBuf>,
    pub install_command: Option<String>,
    pub vcs_command: Option<String>,
    pub next_command: Option<String>,
    pub name_validation: Option<NameValidation>,
}

/// Resolved settings of one generator run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding base templates and provider fragments.
    pub templates_root: PathBuf,
    /// Directory the project directory is created in.
    pub output_root: PathBuf,
    pub install_command: CommandSpec,
    pub vcs_command: CommandSpec,
    /// Delegated scaffolding tool; arguments are rendered with the project context.
    pub next_command: CommandSpec,
    pub name_validation: NameValidation,
}

impl Settings {
    /// Settings with the built-in commands.
    pub fn new(templates_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            templates_root: templates_root.into(),
            output_root: output_root.into(),
            install_command: CommandSpec::parse(DEFAULT_INSTALL_COMMAND)?,
            vcs_command: CommandSpec::parse(DEFAULT_VCS_COMMAND)?,
            next_command: CommandSpec::parse(DEFAULT_NEXT_COMMAND)?,
            name_validation: NameValidation::default(),
        })
    }

    /// Overlays the values present in `file`.
    pub fn apply(mut self, file: ConfigFile) -> Result<Self> {
        if let Some(templates_dir) = file.templates_dir {
            self.templates_root = templates_dir;
        }
        if let Some(command) = file.install_command {
            self.install_command = CommandSpec::parse(&command)?;
        }
        if let Some(command) = file.vcs_command {
            self.vcs_command = CommandSpec::parse(&command)?;
        }
        if let Some(command) = file.next_command {
            self.next_command = CommandSpec::parse(&command)?;
        }
        if let Some(mode) = file.name_validation {
            self.name_validation = mode;
        }
        Ok(self)
    }
}

fn config_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "templates_dir": { "type": "string", "minLength": 1 },
            "install_command": { "type": "string", "minLength": 1 },
            "vcs_command": { "type": "string", "minLength": 1 },
            "next_command": { "type": "string", "minLength": 1 },
            "name_validation": { "enum": ["strict", "lenient"] }
        }
    })
}

/// Finds the first configuration file present in `dir`.
pub fn find_config_file<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|file| dir.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither format or violates the schema
pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let raw: serde_json::Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?,
    };
    // An empty YAML document parses as null.
    let raw = if raw.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        raw
    };

    let schema = config_schema();
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| Error::ConfigError(format!("Invalid configuration schema: {e}")))?;
    let errors: Vec<String> = validator.iter_errors(&raw).map(|e| e.to_string()).collect();
    if !errors.is_empty() {
        return Err(Error::ConfigError(errors.join("; ")));
    }

    serde_json::from_value(raw).map_err(|e| Error::ConfigError(format!("Invalid schema: {e}")))
}

/// Loads the configuration file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(Error::IoError)?;
    parse_config(&content)
}

/// Default templates root: `<exe dir>/../templates` when present, else `./templates`.
pub fn default_templates_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(|dir| dir.join("templates")))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from("templates"))
}
