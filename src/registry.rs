//! Static provider tables for the optional auth and database features.
//!
//! Adding a provider is a pure data change: append a [`ProviderConfig`] to the
//! matching table. The injector treats every entry through the same routine.

use std::fmt;

use indexmap::IndexMap;

use crate::manifest::Dependency;
use crate::template::TemplateKind;

/// Optional capability a provider implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Auth,
    Database,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Auth => write!(f, "Auth"),
            ProviderKind::Database => write!(f, "Database"),
        }
    }
}

impl ProviderKind {
    /// Project-relative directory receiving the injected fragment.
    ///
    /// Auth follows the app-router convention for next projects; the database subtree
    /// is the same for every base template.
    pub fn target_subpath(self, template: TemplateKind) -> &'static str {
        match (self, template) {
            (ProviderKind::Auth, TemplateKind::Next) => "src/app/auth",
            (ProviderKind::Auth, _) => "src/auth",
            (ProviderKind::Database, _) => "src/db",
        }
    }

    /// Name the fragment's setup guide gets at the project root.
    pub fn guide_file_name(self) -> &'static str {
        match self {
            ProviderKind::Auth => "AUTH_SETUP.md",
            ProviderKind::Database => "DATABASE_SETUP.md",
        }
    }
}

/// Configuration of one provider variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub id: &'static str,
    /// Variable names written to the environment file, in order.
    pub env_vars: &'static [&'static str],
    /// Package specifiers, optionally followed by an installation qualifier such as
    /// `--save-dev`.
    pub dependencies: &'static [&'static str],
    /// Fragment directory relative to the templates root.
    pub template_fragment_path: &'static str,
    /// File inside the injected subtree whose parent-relative imports get rewritten.
    pub entry_point: &'static str,
    pub next_js_compatible: bool,
}

impl ProviderConfig {
    /// Parsed dependency specifiers.
    pub fn dependency_specs(&self) -> Vec<Dependency> {
        self.dependencies.iter().map(|spec| Dependency::parse(spec)).collect()
    }
}

const GENERIC_AUTH: &[ProviderConfig] = &[
    ProviderConfig {
        id: "supabase",
        env_vars: &["SUPABASE_URL", "SUPABASE_KEY"],
        dependencies: &["@supabase/supabase-js", "dotenv"],
        template_fragment_path: "auth/supabase",
        entry_point: "auth.js",
        next_js_compatible: true,
    },
    ProviderConfig {
        id: "firebase",
        env_vars: &["FIREBASE_API_KEY", "FIREBASE_AUTH_DOMAIN"],
        dependencies: &["firebase", "dotenv"],
        template_fragment_path: "auth/firebase",
        entry_point: "auth.js",
        next_js_compatible: true,
    },
];

const NEXT_AUTH: &[ProviderConfig] = &[
    ProviderConfig {
        id: "supabase",
        env_vars: &["NEXT_PUBLIC_SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_ANON_KEY"],
        dependencies: &["@supabase/supabase-js", "@supabase/ssr"],
        template_fragment_path: "nextjs-auth/supabase",
        entry_point: "auth.ts",
        next_js_compatible: true,
    },
    ProviderConfig {
        id: "firebase",
        env_vars: &["NEXT_PUBLIC_FIREBASE_API_KEY", "NEXT_PUBLIC_FIREBASE_AUTH_DOMAIN"],
        dependencies: &["firebase"],
        template_fragment_path: "nextjs-auth/firebase",
        entry_point: "login-page.jsx",
        next_js_compatible: true,
    },
    ProviderConfig {
        id: "nextauth",
        env_vars: &[
            "NEXTAUTH_SECRET",
            "NEXTAUTH_URL",
            "GITHUB_CLIENT_ID",
            "GITHUB_CLIENT_SECRET",
        ],
        dependencies: &["next-auth"],
        template_fragment_path: "nextjs-auth/nextauth",
        entry_point: "nextAuth-config.ts",
        next_js_compatible: true,
    },
];

const GENERIC_DATABASE: &[ProviderConfig] = &[
    ProviderConfig {
        id: "sqlite",
        env_vars: &["SQLITE_DB_PATH"],
        dependencies: &["better-sqlite3", "dotenv"],
        template_fragment_path: "db/sqlite",
        entry_point: "sqlite.js",
        next_js_compatible: true,
    },
    ProviderConfig {
        id: "postgresql",
        env_vars: &["DATABASE_URL"],
        dependencies: &["pg", "dotenv"],
        template_fragment_path: "db/postgresql",
        entry_point: "postgresql.js",
        next_js_compatible: true,
    },
    ProviderConfig {
        id: "mongodb",
        env_vars: &["MONGODB_URI"],
        dependencies: &["mongoose", "dotenv"],
        template_fragment_path: "db/mongodb",
        entry_point: "mongodb.js",
        next_js_compatible: true,
    },
];

const NEXT_DATABASE: &[ProviderConfig] = &[
    ProviderConfig {
        id: "sqlite",
        env_vars: &["SQLITE_DB_PATH"],
        dependencies: &["better-sqlite3", "@types/better-sqlite3 --save-dev"],
        template_fragment_path: "db/sqlite",
        entry_point: "sqlite.ts",
        next_js_compatible: true,
    },
    ProviderConfig {
        id: "postgresql",
        env_vars: &["DATABASE_URL"],
        dependencies: &["pg", "@types/pg --save-dev"],
        template_fragment_path: "db/postgresql",
        entry_point: "postgresql.ts",
        next_js_compatible: true,
    },
    ProviderConfig {
        id: "mongodb",
        env_vars: &["MONGODB_URI"],
        dependencies: &["mongoose"],
        template_fragment_path: "db/mongodb",
        entry_point: "mongodb.ts",
        next_js_compatible: true,
    },
];

/// Immutable provider lookup keyed by capability kind, then by provider id.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    auth: IndexMap<&'static str, ProviderConfig>,
    database: IndexMap<&'static str, ProviderConfig>,
}

impl ProviderRegistry {
    pub fn new<A, D>(auth: A, database: D) -> Self
    where
        A: IntoIterator<Item = ProviderConfig>,
        D: IntoIterator<Item = ProviderConfig>,
    {
        Self {
            auth: auth.into_iter().map(|p| (p.id, p)).collect(),
            database: database.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Providers offered for the express and react base templates.
    pub fn generic() -> Self {
        Self::new(GENERIC_AUTH.iter().cloned(), GENERIC_DATABASE.iter().cloned())
    }

    /// Providers offered for next projects.
    pub fn next() -> Self {
        Self::new(NEXT_AUTH.iter().cloned(), NEXT_DATABASE.iter().cloned())
    }

    pub fn for_template(template: TemplateKind) -> Self {
        match template {
            TemplateKind::Next => Self::next(),
            TemplateKind::Express | TemplateKind::React => Self::generic(),
        }
    }

    pub fn get(&self, kind: ProviderKind, id: &str) -> Option<&ProviderConfig> {
        self.table(kind).get(id)
    }

    /// Registered ids of `kind` in declaration order.
    pub fn ids(&self, kind: ProviderKind) -> Vec<&'static str> {
        self.table(kind).keys().copied().collect()
    }

    fn table(&self, kind: ProviderKind) -> &IndexMap<&'static str, ProviderConfig> {
        match kind {
            ProviderKind::Auth => &self.auth,
            ProviderKind::Database => &self.database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nextauth_only_in_next_table() {
        assert!(ProviderRegistry::generic().get(ProviderKind::Auth, "nextauth").is_none());
        assert!(ProviderRegistry::next().get(ProviderKind::Auth, "nextauth").is_some());
    }

    #[test]
    fn test_target_subpaths() {
        assert_eq!(ProviderKind::Auth.target_subpath(TemplateKind::Express), "src/auth");
        assert_eq!(ProviderKind::Auth.target_subpath(TemplateKind::Next), "src/app/auth");
        assert_eq!(ProviderKind::Database.target_subpath(TemplateKind::Next), "src/db");
    }
}
