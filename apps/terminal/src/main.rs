use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpBackend, WorkflowController};
use shared::domain::{ContentInputs, Control};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{mpsc, Mutex},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod surface;

use commands::{parse_command, UiCommand, HELP};
use surface::{LineSource, TerminalSurface};

type Surface = TerminalSurface<std::io::Stdout>;

#[derive(Parser, Debug)]
#[command(about = "Find companies, investigate one, and generate outreach content")]
struct Args {
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    /// Per-request timeout; unset or 0 waits indefinitely.
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(&args.config)?;
    if let Some(v) = args.server_url {
        settings.server_url = v;
    }
    if let Some(v) = args.request_timeout_secs {
        settings.request_timeout_secs = Some(v);
    }
    let server_url = config::validate_server_url(&settings.server_url)?;

    let backend = HttpBackend::with_timeout(&server_url, settings.request_timeout())
        .context("failed to set up backend client")?;
    info!(server_url = %backend.base_url(), "using backend");

    let (line_tx, line_rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(line_tx);
    let lines: LineSource = Arc::new(Mutex::new(line_rx));
    let surface = Arc::new(TerminalSurface::new(std::io::stdout(), lines.clone()));
    let controller = Arc::new(WorkflowController::new(
        Arc::new(backend),
        surface.clone(),
    ));

    run(controller, surface, lines).await;
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::UnboundedSender<String>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::error!(error = %err, "failed to read stdin");
                    break;
                }
            }
        }
    });
}

async fn run(controller: Arc<WorkflowController>, surface: Arc<Surface>, lines: LineSource) {
    println!("{HELP}");
    let mut inputs = ContentInputs::default();

    loop {
        let Some(line) = lines.lock().await.recv().await else {
            debug!("input closed");
            break;
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(_) if line.trim().is_empty() => continue,
            Err(message) => {
                println!("? {message}");
                continue;
            }
        };
        debug!(command = command.name(), "dispatching command");

        match command {
            UiCommand::FindCompanies => {
                if !surface.is_enabled(Control::FindCompanies) {
                    println!("! a search is already running");
                    continue;
                }
                let controller = controller.clone();
                tokio::spawn(async move { controller.find_companies().await });
            }
            UiCommand::Select(selection) => {
                let controller = controller.clone();
                tokio::spawn(async move { controller.on_company_selected(selection).await });
            }
            UiCommand::SetResearch(text) => inputs.research = text,
            UiCommand::SetMarket(text) => inputs.market = text,
            UiCommand::SetLanguage(text) => inputs.language = text,
            UiCommand::GenerateContent => {
                if !surface.is_enabled(Control::GenerateContent) {
                    println!("! content is already being generated");
                    continue;
                }
                let controller = controller.clone();
                let inputs = inputs.clone();
                tokio::spawn(async move { controller.generate_content(&inputs).await });
            }
            // Inline: the confirmation prompt consumes the next input line.
            UiCommand::ResetMemory => controller.reset_memory().await,
            UiCommand::Status => {
                println!("{}", surface.render_status());
                if let Some((index, record)) = controller.selected_company().await {
                    println!("selected: [{}] {}", index.0, record.name);
                }
                println!("research: {}", or_dash(&inputs.research));
                println!("market:   {}", or_dash(&inputs.market));
                println!("language: {}", or_dash(&inputs.language));
            }
            UiCommand::Help => println!("{HELP}"),
            UiCommand::Quit => break,
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
