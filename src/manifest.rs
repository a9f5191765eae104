//! Dependency manifest (package.json) handling.
//! The manifest is read as structured JSON, checked against a minimal schema and
//! rewritten with two-space indentation, preserving key order.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use crate::constants::{LATEST_VERSION, MANIFEST_FILE};
use crate::error::{Error, Result};

/// One provider dependency with its installation qualifier resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    /// Installed as a development dependency.
    pub dev: bool,
}

impl Dependency {
    /// Parses `name [qualifier]`, e.g. `@types/pg --save-dev`.
    pub fn parse(spec: &str) -> Self {
        let mut parts = spec.split_whitespace();
        let name = parts.next().unwrap_or_default().to_string();
        let mut dev = false;
        for qualifier in parts {
            match qualifier {
                "--save-dev" | "-D" | "--dev" => dev = true,
                other => debug!("Ignoring qualifier '{other}' on dependency {name}"),
            }
        }
        Self { name, dev }
    }

    fn section(&self) -> &'static str {
        if self.dev {
            "devDependencies"
        } else {
            "dependencies"
        }
    }
}

fn manifest_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "dependencies": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            },
            "devDependencies": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            }
        }
    })
}

/// Checks `manifest` against the manifest schema.
///
/// # Errors
/// * `Error::ManifestError` listing every schema violation
pub fn validate_manifest(manifest: &Value) -> Result<()> {
    let schema = manifest_schema();
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| Error::ManifestError(format!("invalid manifest schema: {e}")))?;

    let errors: Vec<String> = validator
        .iter_errors(manifest)
        .map(|e| e.to_string())
        .collect();
    if !errors.is_empty() {
        return Err(Error::ManifestError(errors.join("; ")));
    }
    Ok(())
}

/// Reads and validates the manifest at `path`.
pub fn read_manifest(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::ManifestError(format!("cannot read '{}': {e}", path.display()))
    })?;
    let manifest: Value = serde_json::from_str(&content)?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Writes `manifest` with two-space indentation and a trailing newline.
pub fn write_manifest(path: &Path, manifest: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(manifest)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

/// Adds every dependency with the `latest` marker, overwriting existing entries of
/// the same name.
pub fn merge_dependencies(manifest: &mut Value, dependencies: &[Dependency]) -> Result<()> {
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| Error::ManifestError("manifest is not a JSON object".to_string()))?;

    for dependency in dependencies {
        let section = root
            .entry(dependency.section())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| {
                Error::ManifestError(format!("'{}' is not an object", dependency.section()))
            })?;
        section.insert(
            dependency.name.clone(),
            Value::String(LATEST_VERSION.to_string()),
        );
    }
    Ok(())
}

/// Read-modify-write of the project manifest.
pub fn add_dependencies(project_root: &Path, dependencies: &[Dependency]) -> Result<()> {
    let path = project_root.join(MANIFEST_FILE);
    let mut manifest = read_manifest(&path)?;
    merge_dependencies(&mut manifest, dependencies)?;
    write_manifest(&path, &manifest)?;
    debug!(
        "Added {} dependencies to {}",
        dependencies.len(),
        path.display()
    );
    Ok(())
}
