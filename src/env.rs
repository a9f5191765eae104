//! Environment file generation for selected providers.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::registry::ProviderConfig;
use crate::template::TemplateKind;

/// Environment file name used by `template`.
pub fn env_file_name(template: TemplateKind) -> &'static str {
    match template {
        TemplateKind::Next => ".env.local",
        TemplateKind::Express | TemplateKind::React => ".env",
    }
}

/// Concatenates the variables of `providers` in order.
///
/// Pass auth before database. Duplicate names are kept so that a collision between
/// two providers stays visible in the output.
pub fn collect_env_vars<'a, I>(providers: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a ProviderConfig>,
{
    providers
        .into_iter()
        .flat_map(|provider| provider.env_vars.iter().copied())
        .collect()
}

/// Renders `NAME=your_name_here` lines.
pub fn render_env(vars: &[&str]) -> String {
    vars.iter()
        .map(|name| format!("{name}=your_{}_here\n", name.to_lowercase()))
        .collect()
}

/// Creates the environment file for `template` under `project_root`.
///
/// # Returns
/// * `Result<Option<PathBuf>>` - The written file, or `None` when `vars` is empty
///
/// # Errors
/// * `Error::EnvFileConflict` if the file already exists; it is left untouched
pub fn write_env_file(
    project_root: &Path,
    template: TemplateKind,
    vars: &[&str],
) -> Result<Option<PathBuf>> {
    if vars.is_empty() {
        debug!("No environment variables required");
        return Ok(None);
    }

    let path = project_root.join(env_file_name(template));
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(Error::EnvFileConflict { path });
        }
        Err(e) => return Err(Error::IoError(e)),
    };
    file.write_all(render_env(vars).as_bytes())?;
    Ok(Some(path))
}
