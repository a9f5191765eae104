//! take-flight's main application entry point.
//! Parses arguments, resolves settings, collects the operator's choices and runs the
//! generation pipeline.

use std::path::PathBuf;

use take_flight::{
    cli::{get_args, Args, Command, InitArgs},
    config::{default_templates_root, find_config_file, load_config, Settings},
    error::{default_error_handler, Result},
    logger::init_logger,
    name::NameValidation,
    pipeline::Pipeline,
    prompt::{collect_selections, DialoguerPrompter, Preset},
    renderer::MiniJinjaRenderer,
    runner::SystemRunner,
    template::TemplateKind,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Init(init) => init_project(init),
    }
}

/// Resolves settings: built-in defaults, then the configuration file, then flags.
fn resolve_settings(args: &InitArgs) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::new(default_templates_root(), cwd.clone())?;

    let config_path = args.config.clone().or_else(|| find_config_file(&cwd));
    if let Some(path) = config_path {
        settings = settings.apply(load_config(path)?)?;
    }

    if let Some(templates_dir) = &args.templates_dir {
        settings.templates_root = templates_dir.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        settings.output_root = output_dir.clone();
    }
    if args.lenient_names {
        settings.name_validation = NameValidation::Lenient;
    }
    Ok(settings)
}

fn init_project(args: InitArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;

    let preset = Preset {
        template: args
            .template
            .as_deref()
            .map(str::parse::<TemplateKind>)
            .transpose()?,
        project_name: args.name,
        auth: args.auth,
        database: args.db,
    };
    let prompter = DialoguerPrompter::new();
    let selections = collect_selections(&prompter, preset)?;

    let renderer = MiniJinjaRenderer::new();
    let runner = SystemRunner;
    let report = Pipeline::new(&settings, &renderer, &runner).run(selections)?;

    for warning in &report.warnings {
        println!("Warning: {warning}");
    }
    let shown = match args.output_dir {
        Some(_) => report.target.clone(),
        None => PathBuf::from(".").join(&report.project_name),
    };
    println!("\nSuccess! Project generated at {}", shown.display());
    Ok(())
}
