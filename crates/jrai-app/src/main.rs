use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod command;
mod controller;
mod events;
mod profile;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use controller::AppController;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "jrai", about = "Jrai-Vietnamese dictionary and flashcards")]
struct Cli {
    /// JSON config file; fields it omits keep their environment defaults
    #[arg(long, env = "JRAI_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the persisted dictionary
    #[arg(long)]
    data_dir: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = profile::load_config(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    config.log_json |= cli.log_json;

    init_tracing(config.log_json);

    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::warn!("Task exited with error during shutdown: {e:#}");
        }
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with shell output
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
