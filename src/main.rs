use anyhow::{Context, Result, bail};
use clap::Parser;
use console::style;
use pitchgen_core::cli::{Cli, Commands, HistoryAction, InputArgs, TemplateOverrideArgs};
use pitchgen_core::components::{ComponentType, schema_for_tag, structure_for_tag};
use pitchgen_core::config::constants::paths;
use pitchgen_core::config::{ConfigManager, PitchgenConfig, load_dotenv};
use pitchgen_core::history::{RunArchive, SavedRun};
use pitchgen_core::llm::create_service;
use pitchgen_core::prompts::{
    Bindings, ClientContext, Placeholder, PromptEditor, expand_template, system_prompt_for_tag,
    user_prompt_for_tag,
};
use pitchgen_core::selection::resolve_selection;
use pitchgen_core::session::{DispatchSettings, PitchSession};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    load_dotenv();
    let cli = Cli::parse();

    if let Commands::Init { force } = &cli.command {
        return init_config(&cli, *force);
    }

    let manager = cli.load_config()?;
    match &cli.command {
        Commands::Types { all } => {
            list_types(*all);
            Ok(())
        }
        Commands::Structure { component } => {
            println!("{}", structure_for_tag(component));
            Ok(())
        }
        Commands::Schema { component } => {
            let schema = serde_json::to_string_pretty(&schema_for_tag(component))
                .context("Failed to serialize schema")?;
            println!("{schema}");
            Ok(())
        }
        Commands::Prompts { component, input } => show_prompts(component, input),
        Commands::Expand {
            component,
            input,
            templates,
        } => expand_prompts(&manager, component, input, templates),
        Commands::Run {
            component,
            input,
            templates,
            save,
            raw,
        } => run_component(&manager, component, input, templates, *save, *raw).await,
        Commands::History { action } => manage_history(&manager, action).await,
        Commands::Init { .. } => Ok(()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn init_config(cli: &Cli, force: bool) -> Result<()> {
    let path = cli
        .config_file()
        .unwrap_or_else(|| cli.get_workspace().join(paths::CONFIG_FILE_NAME));
    if PitchgenConfig::create_sample_config(&path, force)? {
        println!("{} Wrote {}", style("[INIT]").green().bold(), path.display());
    } else {
        println!(
            "{} {} already exists; use --force to overwrite",
            style("[SKIP]").yellow().bold(),
            path.display()
        );
    }
    Ok(())
}

fn list_types(all: bool) {
    let components: &[ComponentType] = if all {
        &ComponentType::ALL
    } else {
        &ComponentType::PRIMARY
    };
    for component in components {
        let marker = if component.is_primary() { "" } else { " (legacy)" };
        println!(
            "{:<14} {}{}",
            style(component.as_str()).cyan().bold(),
            component.display_name(),
            style(marker).dim()
        );
    }
}

fn print_section(title: &str, body: &str) {
    println!("{}", style(format!("=== {title} ===")).cyan().bold());
    println!("{body}");
    println!();
}

fn show_prompts(tag: &str, input: &InputArgs) -> Result<()> {
    let context = ClientContext::new(input.read_context()?);
    let raw_data = input.read_data()?;
    print_section("SYSTEM", &system_prompt_for_tag(tag, &context));
    print_section("USER", &user_prompt_for_tag(tag, &context, raw_data.as_deref()));
    Ok(())
}

fn parse_component(tag: &str) -> Result<ComponentType> {
    match ComponentType::from_tag(tag) {
        Some(component) => Ok(component),
        None => bail!("unknown component type '{tag}'; see `pitchgen types --all`"),
    }
}

fn open_archive(manager: &ConfigManager) -> Option<RunArchive> {
    match RunArchive::open_default(manager.config().history.dir.as_deref()) {
        Ok(archive) => Some(archive),
        Err(err) => {
            warn!(error = %err, "run archive unavailable; continuing without saved runs");
            None
        }
    }
}

/// Session for a known component type, with edited templates applied on top of the
/// generated ones
fn build_session(
    manager: &ConfigManager,
    component: ComponentType,
    input: &InputArgs,
    templates: &TemplateOverrideArgs,
) -> Result<PitchSession> {
    let context = ClientContext::new(input.read_context()?);
    let raw_data = match input.read_data()? {
        Some(raw) => raw,
        None => manager
            .config()
            .catalogs
            .starting_raw_data(component, manager.catalog_base_dir())?,
    };

    let mut editor = PromptEditor::new(component, context, raw_data);
    if let Some(system) = templates.read_system()? {
        editor.edit_system(system);
    }
    if let Some(user) = templates.read_user()? {
        editor.edit_user(user);
    }

    let session = PitchSession::new(editor);
    Ok(match open_archive(manager) {
        Some(archive) => session.with_archive(archive),
        None => session,
    })
}

fn expand_prompts(
    manager: &ConfigManager,
    tag: &str,
    input: &InputArgs,
    templates: &TemplateOverrideArgs,
) -> Result<()> {
    let Some(component) = ComponentType::from_tag(tag) else {
        // Unregistered tags only have the context token in scope.
        let context = input.read_context()?;
        let bindings = Bindings::new().with(Placeholder::Context, context.clone());
        let context = ClientContext::new(context);
        let system = match templates.read_system()? {
            Some(text) => text,
            None => system_prompt_for_tag(tag, &context),
        };
        let user = match templates.read_user()? {
            Some(text) => text,
            None => user_prompt_for_tag(tag, &context, None),
        };
        print_section("SYSTEM", &expand_template(&system, None, &bindings));
        print_section("USER", &expand_template(&user, None, &bindings));
        return Ok(());
    };

    let session = build_session(manager, component, input, templates)?;
    let request = session.prepare_request(&DispatchSettings::from(&manager.config().completion));
    print_section("SYSTEM", &request.system_text);
    print_section("USER", &request.user_text);
    Ok(())
}

async fn run_component(
    manager: &ConfigManager,
    tag: &str,
    input: &InputArgs,
    templates: &TemplateOverrideArgs,
    save: bool,
    raw: bool,
) -> Result<()> {
    let component = parse_component(tag)?;
    let completion = &manager.config().completion;
    let service = create_service(completion)?;
    let settings = DispatchSettings::from(completion);
    let mut session = build_session(manager, component, input, templates)?;

    eprintln!(
        "{} Generating {} with {}",
        style("[RUN]").cyan().bold(),
        component.display_name(),
        settings.model
    );
    let result = session
        .run(service.as_ref(), &settings)
        .await
        .with_context(|| format!("Generation failed for {component}"))?;

    if raw {
        println!("{}", result.content);
    } else {
        let report = resolve_selection(component, &result.content, session.editor().raw_data());
        print!("{report}");
        let missing = report.missing_count();
        if missing > 0 {
            eprintln!(
                "{} {missing} selected id(s) not found in the supplied data",
                style("[WARN]").yellow().bold()
            );
        }
    }

    if save {
        let saved = session.save_last_run()?;
        eprintln!("{} Saved run {}", style("[SAVED]").green().bold(), saved.id);
    }
    Ok(())
}

async fn manage_history(manager: &ConfigManager, action: &HistoryAction) -> Result<()> {
    let archive = RunArchive::open_default(manager.config().history.dir.as_deref())?;
    match action {
        HistoryAction::List { limit } => {
            let limit = limit.unwrap_or(manager.config().history.max_listed);
            let runs = archive.list_recent(limit)?;
            if runs.is_empty() {
                println!("{} No saved runs in {}", style("[EMPTY]").dim(), archive.dir().display());
            }
            for run in runs {
                println!(
                    "{}  {}  {}",
                    style(&run.id).cyan(),
                    run.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    run.component.display_name()
                );
            }
        }
        HistoryAction::Show { id } => show_run(&archive.load(id)?),
        HistoryAction::Delete { id } => {
            if archive.delete(id)? {
                println!("{} Deleted {id}", style("[DELETED]").green().bold());
            } else {
                bail!("no saved run with id '{id}'");
            }
        }
        HistoryAction::Load { id, rerun, save } => {
            let saved = archive.load(id)?;
            load_run(manager, archive, &saved, *rerun, *save).await?;
        }
    }
    Ok(())
}

/// Put a saved run back into a session and print the prompts as they would be
/// dispatched now
async fn load_run(
    manager: &ConfigManager,
    archive: RunArchive,
    saved: &SavedRun,
    rerun: bool,
    save: bool,
) -> Result<()> {
    let editor = PromptEditor::new(saved.component, saved.context.clone(), saved.raw_data.clone());
    let mut session = PitchSession::new(editor).with_archive(archive);
    session.restore(saved);

    let completion = &manager.config().completion;
    let settings = DispatchSettings::from(completion);
    let editor = session.editor();
    println!(
        "{} {} restored (system: {}, user: {})",
        style("[LOAD]").cyan().bold(),
        saved.component.display_name(),
        editor.system_state(),
        editor.user_state()
    );
    let request = session.prepare_request(&settings);
    print_section("SYSTEM", &request.system_text);
    print_section("USER", &request.user_text);

    if !rerun {
        return Ok(());
    }
    let service = create_service(completion)?;
    let result = session
        .run(service.as_ref(), &settings)
        .await
        .with_context(|| format!("Generation failed for {}", saved.component))?;
    print!(
        "{}",
        resolve_selection(saved.component, &result.content, session.editor().raw_data())
    );
    if save {
        let run = session.save_last_run()?;
        eprintln!("{} Saved run {}", style("[SAVED]").green().bold(), run.id);
    }
    Ok(())
}

fn show_run(run: &SavedRun) {
    println!(
        "{} {} ({})",
        style(&run.id).cyan().bold(),
        run.component.display_name(),
        run.timestamp.to_rfc3339()
    );
    println!();
    if !run.context.is_empty() {
        print_section("CONTEXT", run.context.as_str());
    }
    print_section("SYSTEM", &run.system_prompt);
    print_section("USER", &run.user_prompt);
    print_section("RESPONSE", &run.response.content);
    print!(
        "{}",
        resolve_selection(run.component, &run.response.content, &run.raw_data)
    );
}
