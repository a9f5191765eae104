//! Base template resolution and copying.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use globset::GlobSet;
use log::debug;
use walkdir::WalkDir;

use crate::constants::{VCS_IGNORE_ENTRIES, VCS_IGNORE_FILE};
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;

/// Supported base templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Express,
    React,
    /// Scaffolded by the framework's own generator instead of a copied template.
    Next,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [TemplateKind::Express, TemplateKind::React, TemplateKind::Next];

    /// Directory name under the templates root.
    pub fn dir_name(self) -> &'static str {
        match self {
            TemplateKind::Express => "express",
            TemplateKind::React => "react",
            TemplateKind::Next => "nextjs",
        }
    }

    /// Label shown by the template prompt.
    pub fn label(self) -> &'static str {
        match self {
            TemplateKind::Express => "ExpressJS",
            TemplateKind::React => "ReactJS",
            TemplateKind::Next => "NextJS",
        }
    }

    pub fn is_framework_specific(self) -> bool {
        matches!(self, TemplateKind::Next)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "express" | "expressjs" => Ok(TemplateKind::Express),
            "react" | "reactjs" => Ok(TemplateKind::React),
            "next" | "nextjs" => Ok(TemplateKind::Next),
            _ => Err(Error::TemplateNotFound {
                template: s.to_string(),
                path: PathBuf::from(s),
            }),
        }
    }
}

/// Resolves the source directory of `template` under `templates_root`.
///
/// # Errors
/// * `Error::TemplateNotFound` if the directory does not exist
pub fn resolve_template_dir(templates_root: &Path, template: TemplateKind) -> Result<PathBuf> {
    let template_dir = templates_root.join(template.dir_name());
    if !template_dir.is_dir() {
        return Err(Error::TemplateNotFound {
            template: template.to_string(),
            path: template_dir,
        });
    }
    debug!("Resolved template {} to {}", template, template_dir.display());
    Ok(template_dir)
}

/// Fails when `target` already exists.
///
/// # Errors
/// * `Error::DirectoryExists` if anything exists at `target`
pub fn ensure_target_absent(target: &Path) -> Result<()> {
    if target.exists() {
        return Err(Error::DirectoryExists {
            path: target.to_path_buf(),
        });
    }
    Ok(())
}

/// Recursively copies `source` into `target`, pruning every entry whose
/// source-relative path matches `ignored`. Existing files are overwritten.
///
/// Every directory and file that did not exist before is pushed onto `created`,
/// parents before children, so a caller can undo the copy without touching what was
/// already there.
///
/// # Returns
/// * `Result<usize>` - Number of files copied
pub fn copy_tree(
    source: &Path,
    target: &Path,
    ignored: &GlobSet,
    created: &mut Vec<PathBuf>,
) -> Result<usize> {
    create_dirs(target, created)?;

    let walker = WalkDir::new(source).min_depth(1).into_iter().filter_entry(|entry| {
        let skip = entry
            .path()
            .strip_prefix(source)
            .map(|relative| ignored.is_match(relative))
            .unwrap_or(false);
        if skip {
            debug!("Skipping {} from ignore patterns", entry.path().display());
        }
        !skip
    });

    let mut copied = 0;
    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::IoError(std::io::Error::other(e.to_string())))?;
        let dest = target.join(relative);

        if entry.file_type().is_dir() {
            create_dirs(&dest, created)?;
        } else {
            if let Some(parent) = dest.parent() {
                create_dirs(parent, created)?;
            }
            let existed = dest.exists();
            debug!("Copying file: {}", dest.display());
            fs::copy(entry.path(), &dest)?;
            if !existed {
                created.push(dest);
            }
            copied += 1;
        }
    }
    Ok(copied)
}

/// `create_dir_all` that records each directory it had to make.
fn create_dirs(dir: &Path, created: &mut Vec<PathBuf>) -> Result<()> {
    let missing: Vec<&Path> = dir.ancestors().take_while(|d| !d.exists()).collect();
    fs::create_dir_all(dir)?;
    created.extend(missing.into_iter().rev().map(Path::to_path_buf));
    Ok(())
}

/// Creates the project directory, failing if anything already exists at `target`.
///
/// The check and the creation are one filesystem call, so a directory created by
/// someone else between [`ensure_target_absent`] and this call is never claimed.
///
/// # Errors
/// * `Error::DirectoryExists` if `target` already exists
pub fn create_target(target: &Path) -> Result<()> {
    match fs::create_dir(target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(Error::DirectoryExists {
            path: target.to_path_buf(),
        }),
        Err(e) => Err(Error::IoError(e)),
    }
}

/// Duplicates a base template into `target`, a directory made by [`create_target`].
///
/// # Errors
/// * `Error::IgnoreError` if the template's ignore file is invalid
pub fn copy_template(template_dir: &Path, target: &Path) -> Result<usize> {
    let ignored = parse_ignore_file(template_dir)?;
    let mut created = Vec::new();
    copy_tree(template_dir, target, &ignored, &mut created)
}

/// Writes the conventional version control ignore file unless the template shipped
/// one.
///
/// # Returns
/// * `Result<bool>` - Whether a file was written
pub fn write_vcs_ignore_file(project_root: &Path) -> Result<bool> {
    let path = project_root.join(VCS_IGNORE_FILE);
    if path.exists() {
        debug!("Keeping {} shipped with the template", path.display());
        return Ok(false);
    }

    let mut content = VCS_IGNORE_ENTRIES.join("\n");
    content.push('\n');
    fs::write(&path, content)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_kind_from_str() {
        assert_eq!("express".parse::<TemplateKind>().unwrap(), TemplateKind::Express);
        assert_eq!("ReactJS".parse::<TemplateKind>().unwrap(), TemplateKind::React);
        assert_eq!("nextjs".parse::<TemplateKind>().unwrap(), TemplateKind::Next);
        assert_eq!("Next".parse::<TemplateKind>().unwrap(), TemplateKind::Next);
        assert!(matches!(
            "vue".parse::<TemplateKind>(),
            Err(Error::TemplateNotFound { .. })
        ));
    }
}
