//! standards-web binary.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use standards_web::{ApiClient, WebConfig, WebState};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Standards catalog HTML frontend")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "web.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let web_cfg = WebConfig::load(&cli.config).context("failed to load configuration")?;

  let client = ApiClient::new(&web_cfg.backend_url).context("failed to build api client")?;
  let templates = match web_cfg.templates_dir.clone() {
    Some(dir) => {
      tracing::info!(dir = %dir.display(), "loading templates from disk");
      standards_web::templates_from(dir)
    }
    None => standards_web::templates().context("failed to compile templates")?,
  };

  let app = standards_web::router(WebState::new(client, templates));
  let address = web_cfg.address();

  tracing::info!(backend = %web_cfg.backend_url, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
