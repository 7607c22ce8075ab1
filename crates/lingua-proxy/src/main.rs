use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lingua_config::Config;
use lingua_translator::AnthropicClient;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod server;
mod validate;

use self::server::ProxyState;

#[derive(Parser)]
#[command(
    name = "lingua-proxy",
    version,
    about = "Holds the model API key and forwards LinguaBridge prompts"
)]
struct Cli {
    #[arg(short, long, help = "Listen address, overrides LB_PROXY_ADDR")]
    addr: Option<String>,

    #[arg(short, long, help = "JSON config file (defaults to environment variables)")]
    config: Option<PathBuf>,
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
    let proxy = config.proxy;

    if proxy.api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY is not set, every request will fail");
    }

    let addr = cli.addr.unwrap_or_else(|| proxy.listen_addr.clone());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind proxy on {addr}"))?;

    let model = Arc::new(AnthropicClient::from_config(&proxy));
    server::serve(listener, ProxyState::new(model, &proxy)).await
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
