use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use muster::app::{EventsApp, UiOptions};
use muster::catalog::ActivityCatalog;
use muster::store::{HttpStore, StoreConfig};

#[derive(Debug, Parser)]
#[command(
    name = "muster",
    version,
    about = "Plan and browse group events from the terminal"
)]
struct Cli {
    /// Collection API endpoint, e.g. https://cloud.example.com/v1
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Project identifier sent with every request
    #[arg(long, value_name = "ID")]
    project: Option<String>,

    /// Database holding the event collection
    #[arg(long, value_name = "ID")]
    database: Option<String>,

    /// Collection the events live in
    #[arg(long, value_name = "NAME", default_value = "events")]
    collection: String,

    /// JSON file with the activity catalog ([{"label": …, "value": …}])
    #[arg(long, value_name = "PATH")]
    activities: Option<PathBuf>,

    /// Append structured logs to this file (the TUI owns the screen)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let catalog = match &cli.activities {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            ActivityCatalog::from_json(&contents)?
        }
        None => ActivityCatalog::builtin(),
    };

    let config = StoreConfig {
        endpoint: resolve(cli.endpoint, "MUSTER_ENDPOINT", "--endpoint")?,
        project_id: resolve(cli.project, "MUSTER_PROJECT_ID", "--project")?,
        database_id: resolve(cli.database, "MUSTER_DATABASE_ID", "--database")?,
    };
    let store = Arc::new(HttpStore::new(config)?);

    let mut app = EventsApp::new(store, cli.collection, catalog, UiOptions::default())?;
    app.run()
}

fn resolve(flag: Option<String>, env_key: &str, flag_name: &str) -> Result<String> {
    flag.or_else(|| std::env::var(env_key).ok())
        .with_context(|| format!("{flag_name} not provided and {env_key} not set"))
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_env("MUSTER_LOG").unwrap_or_else(|_| EnvFilter::new("muster=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
