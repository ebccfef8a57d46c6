//! HTTP server wiring for the standards catalog API.
//!
//! Holds the runtime configuration and the top-level router; `main.rs` only
//! parses flags, opens the store and binds the listener.

use std::{path::Path, sync::Arc};

use axum::Router;
use config::{
  Config, ConfigError, Environment, File,
  builder::{ConfigBuilder, DefaultState},
};
use serde::Deserialize;
use standards_core::store::CatalogStore;
use standards_store_sqlite::StoreLocation;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered lowest to highest: built-in defaults, the optional TOML file,
/// `STANDARDS_*` environment variables, then `DB_URL`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:   String,
  pub port:   u16,
  /// Database connection string, e.g. `sqlite:///standards.db`.
  pub db_url: String,
}

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::layered(
      Config::builder().add_source(File::from(path).required(false)),
      std::env::var("DB_URL").ok(),
    )
  }

  fn layered(
    builder: ConfigBuilder<DefaultState>,
    db_url:  Option<String>,
  ) -> Result<Self, ConfigError> {
    builder
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5000)?
      .set_default("db_url", "sqlite:///standards.db")?
      .add_source(Environment::with_prefix("STANDARDS"))
      .set_override_option("db_url", db_url)?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn store_location(&self) -> StoreLocation { StoreLocation::from_url(&self.db_url) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with request tracing applied.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: CatalogStore + 'static,
{
  standards_api::api_router(store).layer(TraceLayer::new_for_http())
}
