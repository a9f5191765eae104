//! File and directory ignore pattern handling for base templates.
//! Builds the copy filter from the built-in dependency-cache exclusion and the
//! template's optional .takeflightignore file.

use crate::constants::{DEPENDENCY_CACHE_DIR, IGNORE_FILE};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

fn glob(pattern: &str) -> Result<Glob> {
    Glob::new(pattern)
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}

/// Reads the template's ignore file and returns the compiled copy filter.
///
/// # Arguments
/// * `template_root` - Base template directory
///
/// # Returns
/// * `Result<GlobSet>` - Patterns matched against template-relative paths
///
/// # Notes
/// - The dependency cache directory and the ignore file itself are always excluded
/// - Blank lines and lines starting with `#` are skipped
/// - Invalid patterns result in an `IgnoreError`
/// - A pattern matching a directory prunes the whole directory; `dir/**` only
///   skips its contents and leaves the directory itself behind
///
/// # Example
/// ```ignore
/// # Contents of .takeflightignore:
/// *.log
/// coverage
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    builder.add(glob(&format!("**/{DEPENDENCY_CACHE_DIR}"))?);
    builder.add(glob(IGNORE_FILE)?);

    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
        {
            builder.add(glob(line)?);
        }
    } else {
        debug!("{} does not exist", ignore_path.display());
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}
