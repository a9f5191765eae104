//! Project name normalization and validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("name pattern is a valid regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("disallowed pattern is a valid regex"));

/// Which form of the name is checked against the name pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameValidation {
    /// Check the name exactly as typed. Names that sanitizing would repair, such as
    /// `My App`, are rejected.
    #[default]
    Strict,
    /// Check the sanitized name, so only names that sanitize to nothing fail.
    Lenient,
}

/// Trims, lowercases, turns whitespace runs into a single hyphen and drops anything
/// outside `[a-z0-9-]`.
pub fn sanitize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    DISALLOWED.replace_all(&hyphenated, "").into_owned()
}

pub fn is_valid(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Validates `raw` under `mode` and returns the sanitized name.
///
/// # Errors
/// * `Error::InvalidName` when the checked form does not match `^[a-z0-9-]+$`
pub fn validate(raw: &str, mode: NameValidation) -> Result<String> {
    let sanitized = sanitize(raw);
    let checked = match mode {
        NameValidation::Strict => raw,
        NameValidation::Lenient => sanitized.as_str(),
    };

    if !is_valid(checked) {
        return Err(Error::InvalidName {
            name: raw.to_string(),
        });
    }
    Ok(sanitized)
}
