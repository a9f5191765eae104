//! Optional feature injection.
//!
//! Auth and database providers go through the same routine, parameterized by the
//! [`ProviderConfig`] looked up in the registry. Failures never escape
//! [`FeatureInjector::inject`]: they remove exactly the files and directories the
//! injection created, leaving template files in a shared target untouched, and come
//! back as [`InjectionOutcome::RolledBack`] so the orchestrator decides whether the
//! run goes on.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, error, warn};
use regex::Regex;

use crate::constants::{FRAGMENT_GUIDE_FILE, FRAGMENT_SOURCE_DIR};
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;
use crate::manifest::add_dependencies;
use crate::registry::{ProviderConfig, ProviderKind, ProviderRegistry};
use crate::template::{copy_tree, TemplateKind};

static PARENT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"((?:\bfrom|\bimport|\bimport\(|\brequire\()\s*['"])\.\./"#)
        .expect("parent import pattern is a valid regex")
});

/// Result of injecting one optional feature.
#[derive(Debug)]
pub enum InjectionOutcome {
    /// The operator chose no provider.
    NotRequested { kind: ProviderKind },
    /// The provider is not offered for this base template.
    Unregistered { kind: ProviderKind, provider: String },
    /// The provider cannot be layered onto a next project.
    Incompatible { kind: ProviderKind, provider: String },
    Injected {
        kind: ProviderKind,
        provider: ProviderConfig,
        subtree: PathBuf,
        guide: Option<PathBuf>,
    },
    /// Injection failed and the injected subtree was removed.
    RolledBack {
        kind: ProviderKind,
        provider: String,
        subtree: PathBuf,
        error: Error,
    },
}

impl InjectionOutcome {
    pub fn kind(&self) -> ProviderKind {
        match self {
            InjectionOutcome::NotRequested { kind }
            | InjectionOutcome::Unregistered { kind, .. }
            | InjectionOutcome::Incompatible { kind, .. }
            | InjectionOutcome::Injected { kind, .. }
            | InjectionOutcome::RolledBack { kind, .. } => *kind,
        }
    }

    /// Provider configuration when the injection succeeded.
    pub fn injected(&self) -> Option<&ProviderConfig> {
        match self {
            InjectionOutcome::Injected { provider, .. } => Some(provider),
            _ => None,
        }
    }

    /// Operator-facing warning, if the outcome deserves one.
    pub fn warning(&self) -> Option<String> {
        match self {
            InjectionOutcome::Unregistered { kind, provider } => Some(format!(
                "{kind} provider '{provider}' is not available for this template, skipping"
            )),
            InjectionOutcome::Incompatible { kind, provider } => Some(format!(
                "{kind} provider '{provider}' cannot be added to a next project, skipping"
            )),
            InjectionOutcome::RolledBack { kind, provider, error, .. } => {
                Some(format!("{kind} setup for '{provider}' failed: {error}"))
            }
            InjectionOutcome::NotRequested { .. } | InjectionOutcome::Injected { .. } => None,
        }
    }
}

/// Rewrites import specifiers that climb to the parent directory so they still
/// resolve after the file moved one level deeper.
pub fn rewrite_parent_imports(content: &str) -> Cow<'_, str> {
    PARENT_IMPORT.replace_all(content, "${1}../../")
}

fn remove_path(path: &Path) {
    let removed = if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.exists() {
        fs::remove_file(path)
    } else {
        return;
    };
    match removed {
        Ok(()) => debug!("Removed {}", path.display()),
        Err(e) => error!("Failed to remove {}: {}", path.display(), e),
    }
}

/// Layers provider fragments into a generated project.
pub struct FeatureInjector<'a> {
    registry: &'a ProviderRegistry,
    templates_root: &'a Path,
    template: TemplateKind,
}

impl<'a> FeatureInjector<'a> {
    pub fn new(registry: &'a ProviderRegistry, templates_root: &'a Path, template: TemplateKind) -> Self {
        Self {
            registry,
            templates_root,
            template,
        }
    }

    /// Injects the provider selected for `kind`, if any.
    ///
    /// `selection` is `None` when the operator chose no provider.
    pub fn inject(&self, project_root: &Path, kind: ProviderKind, selection: Option<&str>) -> InjectionOutcome {
        let Some(id) = selection else {
            return InjectionOutcome::NotRequested { kind };
        };

        let Some(provider) = self.registry.get(kind, id) else {
            let outcome = InjectionOutcome::Unregistered {
                kind,
                provider: id.to_string(),
            };
            if let Some(message) = outcome.warning() {
                warn!("{message}");
            }
            return outcome;
        };

        if self.template.is_framework_specific() && !provider.next_js_compatible {
            let outcome = InjectionOutcome::Incompatible {
                kind,
                provider: id.to_string(),
            };
            if let Some(message) = outcome.warning() {
                warn!("{message}");
            }
            return outcome;
        }

        let subtree = project_root.join(kind.target_subpath(self.template));
        let mut created = Vec::new();
        match self.apply(project_root, kind, provider, &subtree, &mut created) {
            Ok(guide) => InjectionOutcome::Injected {
                kind,
                provider: provider.clone(),
                subtree,
                guide,
            },
            Err(error) => {
                // Children were pushed after their parents.
                for path in created.iter().rev() {
                    remove_path(path);
                }
                let outcome = InjectionOutcome::RolledBack {
                    kind,
                    provider: id.to_string(),
                    subtree,
                    error,
                };
                if let Some(message) = outcome.warning() {
                    warn!("{message}");
                }
                outcome
            }
        }
    }

    /// Copies the fragment, its guide, fixes imports and merges dependencies.
    /// Every path this injection creates is pushed onto `created`; files that were
    /// already present are overwritten but never recorded.
    fn apply(
        &self,
        project_root: &Path,
        kind: ProviderKind,
        provider: &ProviderConfig,
        subtree: &Path,
        created: &mut Vec<PathBuf>,
    ) -> Result<Option<PathBuf>> {
        let fragment_dir = self.templates_root.join(provider.template_fragment_path);
        let source_dir = fragment_dir.join(FRAGMENT_SOURCE_DIR);
        if !source_dir.is_dir() {
            return Err(Error::FeatureTemplateMissing {
                kind,
                provider: provider.id.to_string(),
                path: source_dir,
            });
        }

        let ignored = parse_ignore_file(&fragment_dir)?;
        let copied = copy_tree(&source_dir, subtree, &ignored, created)?;
        debug!("Copied {} files into {}", copied, subtree.display());

        let guide_source = fragment_dir.join(FRAGMENT_GUIDE_FILE);
        let guide = if guide_source.is_file() {
            let dest = project_root.join(kind.guide_file_name());
            let existed = dest.exists();
            fs::copy(&guide_source, &dest)?;
            if !existed {
                created.push(dest.clone());
            }
            Some(dest)
        } else {
            None
        };

        let entry_point = subtree.join(provider.entry_point);
        if entry_point.is_file() {
            let content = fs::read_to_string(&entry_point)?;
            if let Cow::Owned(rewritten) = rewrite_parent_imports(&content) {
                fs::write(&entry_point, rewritten)?;
                debug!("Rewrote parent imports in {}", entry_point.display());
            }
        } else {
            debug!("No entry point at {}", entry_point.display());
        }

        add_dependencies(project_root, &provider.dependency_specs())?;
        Ok(guide)
    }
}
