use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lingua_config::Config;
use lingua_core::languages::{self, LanguageGroup};
use lingua_io::Bridge;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod export;
mod session;
mod settings;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(
    name = "lingua-app",
    version,
    about = "LinguaBridge page host: definitions, simplification and translation for French learners"
)]
struct Cli {
    #[arg(short, long, help = "JSON config file (defaults to environment variables)")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the browser bridge (default)
    Serve,
    /// Export the vocabulary notebook as an Anki-compatible CSV file
    Export {
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print the number of saved words
    Count,
    /// Show or set the target language
    Language { code: Option<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::new(),
    };

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Export { dir } => {
            let state = AppState::new(config);
            let path = export::write_export(&state.vocab, &dir)?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Count => {
            let state = AppState::new(config);
            println!("{}", state.vocab.count());
            Ok(())
        }
        Command::Language { code } => {
            let state = AppState::new(config);
            match code {
                Some(code) => state.settings.set_language(&code)?,
                None => print_languages(&state.settings.language()),
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let result = if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let bridge_addr = config.client.bridge_addr.clone();
    let state = Arc::new(AppState::new(config));

    let bridge = Bridge::bind(&bridge_addr)
        .await
        .with_context(|| format!("Failed to bind bridge on {bridge_addr}"))?;

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(bridge);

    tokio::select! {
        result = signal::ctrl_c() => {
            result.context("Failed to listen for ctrl+c")?;
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("Task exited"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while tasks.join_next().await.is_some() {}

    Ok(())
}

fn print_languages(current: &str) {
    for group in [
        LanguageGroup::European,
        LanguageGroup::Arabic,
        LanguageGroup::African,
    ] {
        println!("{}", group.label());
        for lang in languages::in_group(group) {
            let marker = if lang.code == current { "*" } else { " " };
            println!(" {} {:<6} {} ({})", marker, lang.code, lang.native, lang.french);
        }
    }
}
