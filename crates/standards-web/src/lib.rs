//! Server-rendered HTML frontend for the standards catalog.
//!
//! Every page is built from data fetched over HTTP from the JSON API; this
//! crate never touches the database.

pub mod client;
pub mod error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::{Path, State},
  response::Html,
  routing::get,
};
use config::{
  Config, ConfigError, Environment, File,
  builder::{ConfigBuilder, DefaultState},
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

pub use crate::{
  client::ApiClient,
  error::{BuildError, Error},
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime frontend configuration.
///
/// Layered lowest to highest: built-in defaults, the optional TOML file,
/// `STANDARDS_WEB_*` environment variables, then `BACKEND_URL`.
#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
  pub host:          String,
  pub port:          u16,
  /// Base URL of the JSON API.
  pub backend_url:   String,
  /// Load templates from this directory instead of the compiled-in set.
  pub templates_dir: Option<PathBuf>,
}

impl WebConfig {
  pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
    Self::layered(
      Config::builder().add_source(File::from(path).required(false)),
      std::env::var("BACKEND_URL").ok(),
    )
  }

  fn layered(
    builder:     ConfigBuilder<DefaultState>,
    backend_url: Option<String>,
  ) -> Result<Self, ConfigError> {
    builder
      .set_default("host", "0.0.0.0")?
      .set_default("port", 5001)?
      .set_default("backend_url", "http://127.0.0.1:5000")?
      .add_source(Environment::with_prefix("STANDARDS_WEB"))
      .set_override_option("backend_url", backend_url)?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Templates ────────────────────────────────────────────────────────────────

const INDEX: &str = "index.html";
const COIN_DUTIES: &str = "partials/coin_duties.html";

/// Template environment with the pages compiled into the binary.
pub fn templates() -> Result<minijinja::Environment<'static>, Error> {
  let mut env = minijinja::Environment::new();
  env.add_template(INDEX, include_str!("../templates/index.html"))?;
  env.add_template(COIN_DUTIES, include_str!("../templates/partials/coin_duties.html"))?;
  Ok(env)
}

/// Template environment reading from `dir` on each lookup.
pub fn templates_from(dir: PathBuf) -> minijinja::Environment<'static> {
  let mut env = minijinja::Environment::new();
  env.set_loader(minijinja::path_loader(dir));
  env
}

// ─── State & router ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct WebState {
  pub client:    ApiClient,
  pub templates: Arc<minijinja::Environment<'static>>,
}

impl WebState {
  pub fn new(client: ApiClient, templates: minijinja::Environment<'static>) -> Self {
    Self { client, templates: Arc::new(templates) }
  }

  fn render<C: Serialize>(&self, name: &str, ctx: C) -> Result<Html<String>, Error> {
    let html = self.templates.get_template(name)?.render(ctx)?;
    Ok(Html(html))
  }
}

pub fn router(state: WebState) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/coins/{id}/duties", get(coin_duties))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /`: every coin with its duties.
async fn index(State(state): State<WebState>) -> Result<Html<String>, Error> {
  let coins = state.client.list_coins().await?;
  state.render(INDEX, context! { coins => coins })
}

/// `GET /coins/{id}/duties`: the duty fragment for one coin.
async fn coin_duties(
  State(state): State<WebState>,
  Path(id): Path<String>,
) -> Result<Html<String>, Error> {
  let coin = state.client.get_coin(&id).await?;
  state.render(COIN_DUTIES, context! { coin => coin })
}
