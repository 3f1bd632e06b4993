use anyhow::Context;
use clap::{Parser, Subcommand};
use druglist::{commands, server};
use druglist_core::{config::Config, Store};
use std::path::PathBuf;
use std::sync::Arc;

const DEBUG_LOG: &str = "/tmp/druglist-debug.log";

#[derive(Parser)]
#[command(name = "druglist", about = "Drug reference listing — ingest, serve and browse")]
struct Cli {
    /// Log at debug level. The browser always logs to /tmp/druglist-debug.log.
    #[arg(long, global = true)]
    debug: bool,

    /// Config file layered over ~/.config/druglist/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the REST API.
    Serve,
    /// Replace the drug table with the contents of a JSON file.
    Ingest {
        /// Drug data file. Defaults to `ingest.source` from the config.
        file: Option<PathBuf>,
        /// Validate and report without touching the database.
        #[arg(long)]
        dry_run: bool,
    },
    /// Normalise a JSON file and write the valid records as canonical JSON.
    Convert {
        input: PathBuf,
        #[arg(default_value = "converted-drug-data.json")]
        output: PathBuf,
    },
    /// Browse the listing in the terminal.
    Browse {
        /// API base URL. Defaults to `client.base_url` from the config.
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let browsing = matches!(cli.command, Command::Browse { .. });
    init_tracing(cli.debug, browsing)?;

    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Command::Serve => {
            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(serve(&config))
        }
        Command::Ingest { file, dry_run } => {
            let source = file.unwrap_or_else(|| config.ingest.source.clone());
            let store = Store::open(&config.database.path)
                .with_context(|| format!("failed to open {}", config.database.path.display()))?;
            commands::run_ingest(&store, &source, config.ingest.seed_sample_when_missing, dry_run)?;
            store.close()?;
            Ok(())
        }
        Command::Convert { input, output } => {
            commands::run_convert(&input, &output)?;
            Ok(())
        }
        Command::Browse { url } => druglist_tui::run(config, url),
    }
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let store = Store::open(&config.database.path)
        .with_context(|| format!("failed to open {}", config.database.path.display()))?;
    tracing::info!(path = %config.database.path.display(), rows = store.count()?, "connected to drug database");

    let store = Arc::new(store);
    server::serve(
        Arc::clone(&store),
        &config.server.bind_addr(),
        config.server.max_body_bytes,
    )
    .await?;

    match Arc::try_unwrap(store) {
        Ok(store) => {
            store.close()?;
            tracing::info!("database connection closed");
        }
        Err(_) => tracing::warn!("database still in use at shutdown"),
    }
    Ok(())
}

/// Logs go to stderr for the batch commands and the server. The browser owns
/// the terminal, so it logs to a file instead.
fn init_tracing(debug: bool, to_file: bool) -> anyhow::Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    if to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter)
            .init();
        tracing::info!("druglist browser log started — tail -f {DEBUG_LOG}");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }
    Ok(())
}
