mod common;

use common::{read, selections, settings, write, RecordingRunner};
use take_flight::env::{collect_env_vars, env_file_name, write_env_file};
use take_flight::error::Error;
use take_flight::pipeline::Pipeline;
use take_flight::registry::{ProviderKind, ProviderRegistry};
use take_flight::renderer::MiniJinjaRenderer;
use take_flight::template::TemplateKind;
use tempfile::TempDir;

#[test]
fn test_env_file_names() {
    assert_eq!(env_file_name(TemplateKind::Express), ".env");
    assert_eq!(env_file_name(TemplateKind::React), ".env");
    assert_eq!(env_file_name(TemplateKind::Next), ".env.local");
}

#[test]
fn test_no_variables_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    assert_eq!(write_env_file(temp_dir.path(), TemplateKind::React, &[]).unwrap(), None);
    assert!(!temp_dir.path().join(".env").exists());
}

#[test]
fn test_existing_file_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path().join(".env.local"), "SECRET=1\n");

    let result = write_env_file(temp_dir.path(), TemplateKind::Next, &["NEXTAUTH_SECRET"]);
    match result {
        Err(error @ Error::EnvFileConflict { .. }) => assert!(error.is_recoverable()),
        other => panic!("Expected EnvFileConflict, got {other:?}"),
    }
    assert_eq!(read(temp_dir.path().join(".env.local")), "SECRET=1\n");
}

#[test]
fn test_collect_keeps_auth_first() {
    let registry = ProviderRegistry::generic();
    let auth = registry.get(ProviderKind::Auth, "firebase").unwrap();
    let database = registry.get(ProviderKind::Database, "mongodb").unwrap();
    assert_eq!(
        collect_env_vars([auth, database]),
        vec!["FIREBASE_API_KEY", "FIREBASE_AUTH_DOMAIN", "MONGODB_URI"]
    );
}

#[test]
fn test_every_combination_writes_exact_union() {
    let registry = ProviderRegistry::generic();
    let mut auth_choices: Vec<Option<&str>> = vec![None];
    auth_choices.extend(registry.ids(ProviderKind::Auth).into_iter().map(Some));
    let mut database_choices: Vec<Option<&str>> = vec![None];
    database_choices.extend(registry.ids(ProviderKind::Database).into_iter().map(Some));

    for auth in &auth_choices {
        for database in &database_choices {
            let temp_dir = TempDir::new().unwrap();
            let settings = settings(temp_dir.path());
            let renderer = MiniJinjaRenderer::new();
            let runner = RecordingRunner::new();

            let report = Pipeline::new(&settings, &renderer, &runner)
                .run(selections("combo", TemplateKind::Express, *auth, *database))
                .unwrap();

            let mut expected: Vec<&str> = Vec::new();
            if let Some(id) = auth {
                expected.extend(registry.get(ProviderKind::Auth, id).unwrap().env_vars);
            }
            if let Some(id) = database {
                expected.extend(registry.get(ProviderKind::Database, id).unwrap().env_vars);
            }

            let env_path = report.target.join(".env");
            if expected.is_empty() {
                assert!(!env_path.exists(), "{auth:?}/{database:?}");
                continue;
            }
            let names: Vec<String> = read(&env_path)
                .lines()
                .map(|line| line.split('=').next().unwrap().to_string())
                .collect();
            assert_eq!(names, expected, "{auth:?}/{database:?}");
        }
    }
}
