//! take-flight generates project boilerplates.
//! It copies a base template, substitutes the project name, layers in optional
//! authentication and database providers, and hands off to the package manager and
//! version control.

/// Command-line interface module for the take-flight application
pub mod cli;

/// Generator configuration file handling
/// Supports JSON and YAML formats (take-flight.json, take-flight.yml, take-flight.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Environment file generation
pub mod env;

/// Error types and handling for the take-flight application
pub mod error;

/// Template ignore patterns
/// Processes .takeflightignore files to exclude specific paths from copying
pub mod ignore;

/// Auth and database fragment injection
pub mod injector;

/// Logger setup for the binary
pub mod logger;

/// package.json reading, validation and dependency merging
pub mod manifest;

/// Project name sanitizing and validation
pub mod name;

/// Generation pipeline orchestration
pub mod pipeline;

/// User input and interaction handling
pub mod prompt;

/// Provider tables
pub mod registry;

/// Placeholder rendering
pub mod renderer;

/// External process invocation
pub mod runner;

/// Base template resolution and copying
pub mod template;
