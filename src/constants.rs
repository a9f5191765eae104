//! Common constants used throughout the take-flight generator.

/// Supported generator configuration file names
pub const CONFIG_FILES: [&str; 3] = ["take-flight.json", "take-flight.yml", "take-flight.yaml"];

/// Per-template ignore file name
pub const IGNORE_FILE: &str = ".takeflightignore";

/// Dependency cache directory never copied out of a template
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Files receiving placeholder substitution after the copy
pub const CONFIGURED_FILES: [&str; 2] = ["package.json", "README.md"];

/// Dependency manifest of generated projects
pub const MANIFEST_FILE: &str = "package.json";

/// Directory inside a provider fragment holding the files to inject
pub const FRAGMENT_SOURCE_DIR: &str = "src";

/// Optional setup guide shipped with a provider fragment
pub const FRAGMENT_GUIDE_FILE: &str = "SETUP.md";

/// Generated version control ignore file
pub const VCS_IGNORE_FILE: &str = ".gitignore";

/// Entries of the generated version control ignore file
pub const VCS_IGNORE_ENTRIES: &[&str] = &[
    "node_modules/",
    "dist/",
    "build/",
    ".env",
    ".env.local",
    ".env*.local",
    "*.log",
    "npm-debug.log*",
];

/// Version marker used for every merged provider dependency
pub const LATEST_VERSION: &str = "latest";

/// Default project name offered by the prompt
pub const DEFAULT_PROJECT_NAME: &str = "my-app";

/// Selection value meaning the optional feature is not wanted
pub const NO_PROVIDER: &str = "none";

pub const DEFAULT_INSTALL_COMMAND: &str = "npm install";
pub const DEFAULT_VCS_COMMAND: &str = "git init";
pub const DEFAULT_NEXT_COMMAND: &str = "npx create-next-app@latest {{ projectName }} --yes";
