mod clipboard;
mod config;
mod controller;
mod labels;
mod view;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{DeskApi, DeskClient};
use shared::{
    domain::{GenerationService, PromptId},
    protocol::PdfUpload,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    clipboard::terminal_clipboard,
    controller::{
        dashboard::DashboardController,
        generator::{CopyTarget, GeneratorController},
        interaction::TerminalInteraction,
        orchestration::{
            dispatch_dashboard_action, dispatch_generator_action, DashboardAction,
            GeneratorAction,
        },
    },
    labels::Labels,
    view::render,
};

#[derive(Parser, Debug)]
#[command(name = "console", about = "Terminal front end for the document generation server")]
struct Cli {
    /// Config file; `console.toml` in the working directory is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    /// Answer every confirmation with yes.
    #[arg(long, short = 'y', global = true)]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Loads the dashboard and prints it as HTML.
    Dashboard,
    Collections {
        #[command(subcommand)]
        command: CollectionsCommand,
    },
    Prompts {
        #[command(subcommand)]
        command: PromptsCommand,
    },
    Maintenance {
        #[command(subcommand)]
        command: MaintenanceCommand,
    },
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
    Generate(GenerateArgs),
}

#[derive(Subcommand, Debug)]
enum CollectionsCommand {
    List,
    Show { name: String },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long = "file", required = true)]
        files: Vec<PathBuf>,
    },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum PromptsCommand {
    List,
    Show { id: i64 },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        content: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum MaintenanceCommand {
    Status,
    Toggle,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    Clear,
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    prompt: String,
    #[arg(long)]
    collection: String,
    #[arg(long, default_value = shared::protocol::DEFAULT_LENGTH)]
    length: String,
    #[arg(long, default_value = shared::protocol::DEFAULT_TONE)]
    tone: String,
    #[arg(long, default_value = "azure")]
    service: GenerationService,
    #[arg(long)]
    system_prompt_id: Option<i64>,
    /// JSON array of earlier conversations to seed the history with.
    #[arg(long)]
    history_file: Option<PathBuf>,
    /// Shows the conversation at this history index after generating.
    #[arg(long)]
    open_conversation: Option<usize>,
    /// Prints the rendered page instead of the plain output.
    #[arg(long)]
    html: bool,
    /// Renders the sources panel expanded.
    #[arg(long, requires = "html")]
    show_sources: bool,
    /// Copies the generated text to the clipboard.
    #[arg(long)]
    copy: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = config::load_settings(cli.config.clone())?;
    if let Some(server_url) = cli.server_url.clone() {
        settings.server_url = server_url;
    }
    config::validate_server_url(&settings.server_url)?;
    let labels = Labels::load(settings.labels_path.as_deref())?;
    let api: Arc<dyn DeskApi> = Arc::new(
        DeskClient::with_timeout(&settings.server_url, settings.request_timeout())
            .with_context(|| format!("failed to build client for '{}'", settings.server_url))?,
    );
    info!(server_url = %settings.server_url, "console started");

    match cli.command {
        Command::Generate(args) => run_generator(api, labels, args).await,
        command => {
            let host = TerminalInteraction::new(cli.yes);
            let mut dashboard = DashboardController::new(api, host, labels.clone());
            run_dashboard(&mut dashboard, &labels, command).await
        }
    }
}

async fn run_dashboard(
    dashboard: &mut DashboardController<TerminalInteraction>,
    labels: &Labels,
    command: Command,
) -> Result<()> {
    match command {
        Command::Dashboard => {
            dispatch_dashboard_action(dashboard, DashboardAction::LoadPage).await;
            println!("{}", dashboard.render()?);
        }
        Command::Collections { command } => match command {
            CollectionsCommand::List => {
                dashboard.load_collections().await;
                println!("{}", render::collection_list(&dashboard.state().collections)?);
            }
            CollectionsCommand::Show { name } => {
                dispatch_dashboard_action(dashboard, DashboardAction::OpenCollection { name })
                    .await;
                match dashboard.state().collection_modal.content() {
                    Some(collection) => println!("{}", render::collection_modal(collection, labels)?),
                    None => anyhow::bail!("collection not found"),
                }
            }
            CollectionsCommand::Create { title, files } => {
                let pdfs = files
                    .iter()
                    .map(|path| read_pdf(path))
                    .collect::<Result<Vec<_>>>()?;
                dispatch_dashboard_action(dashboard, DashboardAction::CreateCollection { title, pdfs })
                    .await;
                println!("{}", dashboard.state().message);
            }
            CollectionsCommand::Delete { name } => {
                dispatch_dashboard_action(dashboard, DashboardAction::DeleteCollection { name })
                    .await;
            }
        },
        Command::Prompts { command } => match command {
            PromptsCommand::List => {
                dashboard.load_system_prompts().await;
                println!("{}", render::prompt_list(&dashboard.state().prompts)?);
            }
            PromptsCommand::Show { id } => {
                dashboard.edit_prompt(PromptId(id)).await;
                match dashboard.state().prompt_editor.content() {
                    Some(editor) => println!("{}\n\n{}", editor.name, editor.content),
                    None => anyhow::bail!("system prompt {id} could not be loaded"),
                }
            }
            PromptsCommand::Add { name, content } => {
                dispatch_dashboard_action(dashboard, DashboardAction::AddPrompt { name, content })
                    .await;
                println!("{}", render::prompt_list(&dashboard.state().prompts)?);
            }
            PromptsCommand::Edit { id, name, content } => {
                dispatch_dashboard_action(
                    dashboard,
                    DashboardAction::EditPrompt {
                        id: PromptId(id),
                        name,
                        content,
                    },
                )
                .await;
                println!("{}", render::prompt_list(&dashboard.state().prompts)?);
            }
            PromptsCommand::Delete { id } => {
                dispatch_dashboard_action(dashboard, DashboardAction::DeletePrompt { id: PromptId(id) })
                    .await;
            }
        },
        Command::Maintenance { command } => {
            match command {
                MaintenanceCommand::Status => dashboard.load_maintenance_status().await,
                MaintenanceCommand::Toggle => {
                    dispatch_dashboard_action(dashboard, DashboardAction::ToggleMaintenance).await;
                    if dashboard.host_mut().take_reload_request() {
                        dispatch_dashboard_action(dashboard, DashboardAction::LoadPage).await;
                    }
                }
            }
            println!("{}", dashboard.state().maintenance_button.label());
            while let Some(deadline) = dashboard.next_deadline() {
                tokio::time::sleep_until(deadline).await;
                if dashboard.tick() {
                    println!("{}", dashboard.state().maintenance_button.label());
                }
            }
        }
        Command::History {
            command: HistoryCommand::Clear,
        } => {
            dispatch_dashboard_action(dashboard, DashboardAction::ClearHistory).await;
        }
        Command::Generate(_) => anyhow::bail!("generate does not run on the dashboard"),
    }
    Ok(())
}

async fn run_generator(api: Arc<dyn DeskApi>, labels: Labels, args: GenerateArgs) -> Result<()> {
    let mut generator = GeneratorController::new(api, labels);
    if let Some(path) = &args.history_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read history file '{}'", path.display()))?;
        generator.load_initial_conversations(Some(&raw));
    }

    let form = generator.form_mut();
    form.prompt = args.prompt;
    form.collection_name = args.collection;
    form.length = args.length;
    form.tone = args.tone;
    form.service = args.service;
    form.system_prompt_id = args.system_prompt_id.map(PromptId);

    dispatch_generator_action(&mut generator, GeneratorAction::Generate).await;
    if let Some(index) = args.open_conversation {
        dispatch_generator_action(&mut generator, GeneratorAction::OpenConversation { index })
            .await;
    }

    if args.show_sources {
        dispatch_generator_action(&mut generator, GeneratorAction::ToggleSources).await;
    }

    if args.html {
        println!("{}", generator.render()?);
    } else {
        println!("{}", generator.state().output);
        for citation in &generator.state().citations {
            println!("- {citation}");
        }
        if let Some(text) = generator.conversation_text() {
            println!("\n{text}");
        }
    }

    if args.copy {
        let mut clipboard = terminal_clipboard();
        generator.copy(CopyTarget::Output, &mut clipboard);
        eprintln!("{}", generator.state().output_copy.label());
        while let Some(deadline) = generator.next_deadline() {
            tokio::time::sleep_until(deadline).await;
            generator.tick();
        }
    }
    Ok(())
}

fn read_pdf(path: &Path) -> Result<PdfUpload> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("'{}' has no file name", path.display()))?;
    Ok(PdfUpload { file_name, bytes })
}
