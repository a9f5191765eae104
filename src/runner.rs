//! External process invocation for dependency installation, version control
//! initialization and delegated scaffolding.

use std::fmt;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a command line on whitespace. No shell quoting is interpreted.
    ///
    /// # Errors
    /// * `Error::ConfigError` if `line` is blank
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| Error::ConfigError("command must not be empty".to_string()))?;
        Ok(Self::new(program, parts))
    }

    /// Renders the command line as one template against `context`, then splits it
    /// again.
    ///
    /// Placeholders may contain whitespace (`{{ projectName }}`), so arguments are
    /// not rendered one by one. Values substituted into the line must not contain
    /// whitespace themselves; sanitized project names never do.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the line is not a valid template
    /// * `Error::ConfigError` if the line renders to nothing
    pub fn render(&self, renderer: &dyn TemplateRenderer, context: &serde_json::Value) -> Result<Self> {
        let line = renderer.render(&self.to_string(), context)?;
        Self::parse(&line)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs one command to completion inside a working directory.
pub trait CommandRunner {
    /// # Errors
    /// * `Error::ExternalProcess` if the command cannot start or exits unsuccessfully
    fn run(&self, command: &CommandSpec, cwd: &Path) -> Result<()>;
}

/// Owns a spawned child and reaps it on every exit path.
struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            warn!("Terminating unfinished process {}", self.child.id());
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Runs commands as blocking child processes that share the operator's terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> Result<()> {
        debug!("Running '{}' in {}", command, cwd.display());
        let child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::ExternalProcess {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        let mut guard = ChildGuard { child };
        let status = guard.child.wait().map_err(|e| Error::ExternalProcess {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        if !status.success() {
            return Err(Error::ExternalProcess {
                command: command.to_string(),
                reason: format!("exited with {status}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let command = CommandSpec::parse("  npm   install --no-audit ").unwrap();
        assert_eq!(command.program, "npm");
        assert_eq!(command.args, vec!["install", "--no-audit"]);
        assert_eq!(command.to_string(), "npm install --no-audit");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(CommandSpec::parse("   "), Err(Error::ConfigError(_))));
    }
}
