//! Generation pipeline orchestration.
//!
//! Generic base templates run
//! `Validating → Copying → Configuring → InstallingDeps → InitializingVcs →
//! InjectingFeatures → WritingEnv → Done`. The next template delegates to the
//! framework's own scaffolding tool and runs
//! `Validating → Delegating → InjectingFeatures → WritingEnv → Done`.
//!
//! Any fatal failure after the target directory was claimed removes the whole
//! directory. Feature injection failures in the generic flow only remove the injected
//! subtree and the run continues; in the delegated flow they are fatal.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::config::Settings;
use crate::constants::CONFIGURED_FILES;
use crate::env::{collect_env_vars, write_env_file};
use crate::error::{Error, Result};
use crate::injector::{FeatureInjector, InjectionOutcome};
use crate::name::{validate, NameValidation};
use crate::prompt::Selections;
use crate::registry::{ProviderKind, ProviderRegistry};
use crate::renderer::{project_context, render_configured_files, TemplateRenderer};
use crate::runner::CommandRunner;
use crate::template::{
    copy_template, create_target, ensure_target_absent, resolve_template_dir,
    write_vcs_ignore_file, TemplateKind,
};

/// Pipeline states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Copying,
    Configuring,
    InstallingDeps,
    InitializingVcs,
    /// Running the framework's scaffolding tool (next template only).
    Delegating,
    InjectingFeatures,
    WritingEnv,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::Copying => "copying",
            Stage::Configuring => "configuring",
            Stage::InstallingDeps => "installing dependencies",
            Stage::InitializingVcs => "initializing version control",
            Stage::Delegating => "delegating scaffolding",
            Stage::InjectingFeatures => "injecting features",
            Stage::WritingEnv => "writing environment file",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Validated input of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Name as entered by the operator.
    pub project_name: String,
    /// Directory name and placeholder value; always matches `^[a-z0-9-]+$`.
    pub sanitized_name: String,
    pub template: TemplateKind,
    pub auth: Option<String>,
    pub database: Option<String>,
}

impl GenerationRequest {
    /// # Errors
    /// * `Error::InvalidName` if the name fails validation under `mode`
    pub fn from_selections(selections: Selections, mode: NameValidation) -> Result<Self> {
        let sanitized_name = validate(&selections.project_name, mode)?;
        Ok(Self {
            project_name: selections.project_name,
            sanitized_name,
            template: selections.template,
            auth: selections.auth,
            database: selections.database,
        })
    }

    pub fn selection(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::Auth => self.auth.as_deref(),
            ProviderKind::Database => self.database.as_deref(),
        }
    }
}

/// Summary of a successful run.
#[derive(Debug)]
pub struct GenerationReport {
    pub project_name: String,
    pub target: PathBuf,
    /// Stages in the order they were entered, ending with `Done`.
    pub stages: Vec<Stage>,
    /// Auth outcome first, then database.
    pub features: Vec<InjectionOutcome>,
    pub env_file: Option<PathBuf>,
    /// Recoverable failures that were logged and skipped.
    pub warnings: Vec<String>,
}

impl GenerationReport {
    pub fn feature(&self, kind: ProviderKind) -> Option<&InjectionOutcome> {
        self.features.iter().find(|outcome| outcome.kind() == kind)
    }
}

#[derive(Debug)]
struct RunState {
    stage: Stage,
    stages: Vec<Stage>,
    features: Vec<InjectionOutcome>,
    env_file: Option<PathBuf>,
    warnings: Vec<String>,
    /// Set once this run created the target directory, or handed its creation to the
    /// scaffolding tool after verifying it was absent.
    owns_target: bool,
}

impl RunState {
    fn new() -> Self {
        Self {
            stage: Stage::Validating,
            stages: Vec::new(),
            features: Vec::new(),
            env_file: None,
            warnings: Vec::new(),
            owns_target: false,
        }
    }

    fn enter(&mut self, stage: Stage) {
        debug!("Entering stage: {stage}");
        self.stage = stage;
        self.stages.push(stage);
    }
}

/// Sequences the generation stages for one request.
pub struct Pipeline<'a> {
    settings: &'a Settings,
    renderer: &'a dyn TemplateRenderer,
    runner: &'a dyn CommandRunner,
    registry: Option<ProviderRegistry>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        settings: &'a Settings,
        renderer: &'a dyn TemplateRenderer,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            settings,
            renderer,
            runner,
            registry: None,
        }
    }

    /// Replaces the built-in provider tables.
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    /// Returns the first fatal error after rolling back the target directory when this
    /// run created it.
    pub fn run(&self, selections: Selections) -> Result<GenerationReport> {
        let mut state = RunState::new();
        state.enter(Stage::Validating);

        let request = match GenerationRequest::from_selections(selections, self.settings.name_validation) {
            Ok(request) => request,
            Err(error) => {
                error!("{} failed: {}", state.stage, error);
                return Err(error);
            }
        };
        let target = self.settings.output_root.join(&request.sanitized_name);

        let result = if request.template.is_framework_specific() {
            self.run_delegated(&request, &target, &mut state)
        } else {
            self.run_generic(&request, &target, &mut state)
        };

        match result {
            Ok(()) => {
                state.enter(Stage::Done);
                Ok(GenerationReport {
                    project_name: request.sanitized_name,
                    target,
                    stages: state.stages,
                    features: state.features,
                    env_file: state.env_file,
                    warnings: state.warnings,
                })
            }
            Err(error) => {
                error!("{} failed: {}", state.stage, error);
                state.enter(Stage::Failed);
                if state.owns_target {
                    rollback(&target);
                }
                Err(error)
            }
        }
    }

    fn run_generic(&self, request: &GenerationRequest, target: &Path, state: &mut RunState) -> Result<()> {
        state.enter(Stage::Copying);
        ensure_target_absent(target)?;
        let template_dir = resolve_template_dir(&self.settings.templates_root, request.template)?;
        println!("Copying {} template...", request.template.label());
        create_target(target)?;
        state.owns_target = true;
        let copied = copy_template(&template_dir, target)?;
        debug!("Copied {} files into {}", copied, target.display());

        state.enter(Stage::Configuring);
        let context = project_context(&request.sanitized_name);
        render_configured_files(self.renderer, target, &CONFIGURED_FILES, &context)?;
        write_vcs_ignore_file(target)?;

        state.enter(Stage::InstallingDeps);
        println!("Installing dependencies...");
        self.runner.run(&self.settings.install_command, target)?;

        state.enter(Stage::InitializingVcs);
        println!("Running {}...", self.settings.vcs_command);
        self.runner.run(&self.settings.vcs_command, target)?;

        state.enter(Stage::InjectingFeatures);
        for kind in [ProviderKind::Auth, ProviderKind::Database] {
            let outcome = self.inject(request, target, kind);
            if let Some(warning) = outcome.warning() {
                state.warnings.push(warning);
            }
            state.features.push(outcome);
        }

        self.write_env(request, target, state)
    }

    fn run_delegated(&self, request: &GenerationRequest, target: &Path, state: &mut RunState) -> Result<()> {
        state.enter(Stage::Delegating);
        ensure_target_absent(target)?;
        let context = project_context(&request.sanitized_name);
        let command = self.settings.next_command.render(self.renderer, &context)?;
        println!("Scaffolding with {command}...");
        state.owns_target = true;
        self.runner.run(&command, &self.settings.output_root)?;
        if !target.is_dir() {
            return Err(Error::ExternalProcess {
                command: command.to_string(),
                reason: format!("'{}' was not created", target.display()),
            });
        }

        state.enter(Stage::InjectingFeatures);
        for kind in [ProviderKind::Auth, ProviderKind::Database] {
            match self.inject(request, target, kind) {
                InjectionOutcome::RolledBack { error, .. } => return Err(error),
                outcome => {
                    if let Some(warning) = outcome.warning() {
                        state.warnings.push(warning);
                    }
                    state.features.push(outcome);
                }
            }
        }

        self.write_env(request, target, state)
    }

    fn inject(&self, request: &GenerationRequest, target: &Path, kind: ProviderKind) -> InjectionOutcome {
        let builtin;
        let registry = match &self.registry {
            Some(registry) => registry,
            None => {
                builtin = ProviderRegistry::for_template(request.template);
                &builtin
            }
        };

        let selection = request.selection(kind);
        if let Some(id) = selection {
            println!("Configuring {id} {}...", kind.to_string().to_lowercase());
        }
        let injector = FeatureInjector::new(registry, &self.settings.templates_root, request.template);
        let outcome = injector.inject(target, kind, selection);
        if let Some(provider) = outcome.injected() {
            println!("Added {} {} setup", provider.id, kind.to_string().to_lowercase());
        }
        outcome
    }

    fn write_env(&self, request: &GenerationRequest, target: &Path, state: &mut RunState) -> Result<()> {
        state.enter(Stage::WritingEnv);
        let vars = collect_env_vars(state.features.iter().filter_map(InjectionOutcome::injected));
        match write_env_file(target, request.template, &vars) {
            Ok(env_file) => {
                if let Some(path) = &env_file {
                    println!("Wrote {} placeholder variables to {}", vars.len(), path.display());
                }
                state.env_file = env_file;
                Ok(())
            }
            Err(error) if error.is_recoverable() => {
                warn!("{error} Skipping environment file.");
                state.warnings.push(error.to_string());
                Ok(())
            }
            Err(error) => Err(error),
        }
    }
}

/// Removes a partially generated project.
fn rollback(target: &Path) {
    if !target.exists() {
        return;
    }
    match fs::remove_dir_all(target) {
        Ok(()) => info!("Removed partially generated project at {}", target.display()),
        Err(e) => error!("Failed to remove {}: {}", target.display(), e),
    }
}
