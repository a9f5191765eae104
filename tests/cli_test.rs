use std::path::PathBuf;

use clap::Parser;
use take_flight::cli::{Args, Command};

#[test]
fn test_init_without_options() {
    let args = Args::try_parse_from(["take-flight", "init"]).unwrap();
    assert!(!args.verbose);
    let Command::Init(init) = args.command;
    assert!(init.template.is_none());
    assert!(init.name.is_none());
    assert!(!init.lenient_names);
}

#[test]
fn test_init_with_options() {
    let args = Args::try_parse_from([
        "take-flight",
        "init",
        "-t",
        "nextjs",
        "--name",
        "my-app",
        "--auth",
        "nextauth",
        "--db",
        "none",
        "--templates-dir",
        "/srv/templates",
        "-o",
        "/tmp/out",
        "--lenient-names",
        "-v",
    ])
    .unwrap();

    assert!(args.verbose);
    let Command::Init(init) = args.command;
    assert_eq!(init.template.as_deref(), Some("nextjs"));
    assert_eq!(init.name.as_deref(), Some("my-app"));
    assert_eq!(init.auth.as_deref(), Some("nextauth"));
    assert_eq!(init.db.as_deref(), Some("none"));
    assert_eq!(init.templates_dir, Some(PathBuf::from("/srv/templates")));
    assert_eq!(init.output_dir, Some(PathBuf::from("/tmp/out")));
    assert!(init.lenient_names);
}

#[test]
fn test_missing_subcommand() {
    let err = Args::try_parse_from(["take-flight"]).unwrap_err();
    assert!(matches!(
        err.kind(),
        clap::error::ErrorKind::MissingSubcommand
            | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ));
}

#[test]
fn test_config_flag() {
    let args = Args::try_parse_from(["take-flight", "--verbose", "init", "-c", "flight.yml"]).unwrap();
    assert!(args.verbose);
    let Command::Init(init) = args.command;
    assert_eq!(init.config, Some(PathBuf::from("flight.yml")));
}

#[test]
fn test_cli_definition() {
    use clap::CommandFactory;
    Args::command().debug_assert();
}
