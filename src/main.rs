//! Styleview CLI - HTML styled-tree viewer

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

use styleview::tui::widgets::{inspect, TreeViewState};
use styleview::{create_client, ClientConfig, FixSuggestion, ViewerError};

#[derive(Parser)]
#[command(name = "styleview")]
#[command(about = "Styleview - browse an HTML document's DOM and computed styles")]
#[command(version)]
struct Cli {
    /// Parse backend base URL [env: STYLEVIEW_API_BASE]
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Request timeout in seconds [env: STYLEVIEW_TIMEOUT_SECS]
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Write logs to this file (the viewer discards them otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Serve a built-in sample document instead of calling the backend
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive viewer (default)
    View {
        /// File path to load right away
        path: Option<String>,
    },

    /// Load a file once and print its styled tree
    Dump {
        /// File path, resolved by the backend
        path: String,

        /// Also print each node's computed styles
        #[arg(long)]
        styles: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::View { path: None });

    let is_dump = matches!(command, Commands::Dump { .. });
    if let Err(e) = init_tracing(cli.log_file.as_deref(), is_dump) {
        fail(&e.into());
    }

    let result = match ClientConfig::resolve(cli.api_base.as_deref(), cli.timeout) {
        Err(e) => Err(e.into()),
        Ok(config) => match command {
            Commands::View { path } => view(&config, cli.demo, path).await,
            Commands::Dump { path, styles } => dump(&config, cli.demo, &path, styles)
                .await
                .map_err(anyhow::Error::from),
        },
    };

    if let Err(e) = result {
        fail(&e);
    }
}

fn fail(e: &anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    let suggestion = e
        .downcast_ref::<ViewerError>()
        .and_then(|err| err.fix_suggestion());
    if let Some(suggestion) = suggestion {
        eprintln!("  {} {}", "Fix:".yellow(), suggestion);
    }
    std::process::exit(1);
}

/// The viewer owns the terminal, so logs go to a file or nowhere
fn init_tracing(log_file: Option<&Path>, to_stderr: bool) -> Result<(), ViewerError> {
    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if to_stderr => (BoxMakeWriter::new(std::io::stderr), true),
        None => (BoxMakeWriter::new(std::io::sink), false),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(ansi)
        .init();
    Ok(())
}

async fn view(config: &ClientConfig, demo: bool, path: Option<String>) -> anyhow::Result<()> {
    let client = create_client(config, demo).map_err(ViewerError::from)?;
    let autoload = path.is_some();
    let initial = path.as_deref().unwrap_or(styleview::tui::DEFAULT_PATH);
    styleview::tui::run(client, initial, autoload).await
}

async fn dump(
    config: &ClientConfig,
    demo: bool,
    path: &str,
    styles: bool,
) -> Result<(), ViewerError> {
    let client = create_client(config, demo)?;
    let snapshot = client.load_document(path).await?;

    // A fresh view state has every node expanded
    let rows = TreeViewState::new().visible_rows(&snapshot.root);
    for row in &rows {
        let indent = "  ".repeat(row.depth());
        println!("{}{}", indent, row.label());
        if styles {
            for line in inspect(Some(row.node)).lines() {
                println!("{}    {}", indent, line);
            }
        }
    }

    eprintln!(
        "{} {} nodes from {}",
        "✓".green(),
        rows.len(),
        path.cyan()
    );
    Ok(())
}
