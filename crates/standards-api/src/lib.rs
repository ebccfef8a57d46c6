//! JSON REST API for the standards catalog.
//!
//! Exposes an axum [`Router`] backed by any [`standards_core::store::CatalogStore`].
//! Transport concerns (listening, tracing layers) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = standards_api::api_router(Arc::new(store));
//! ```

pub mod coins;
pub mod duties;
pub mod error;
pub mod ksbs;
pub mod payload;
pub mod render;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use serde::Serialize;
use standards_core::{EntityKind, store::CatalogStore};
use uuid::Uuid;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    // Coins
    .route("/coins", get(coins::list::<S>).post(coins::create::<S>))
    .route(
      "/coins/{id}",
      get(coins::get_one::<S>)
        .put(coins::update::<S>)
        .delete(coins::delete::<S>),
    )
    // Duties
    .route("/duties", get(duties::list::<S>).post(duties::create::<S>))
    .route(
      "/duties/{id}",
      get(duties::get_one::<S>)
        .put(duties::update::<S>)
        .delete(duties::delete::<S>),
    )
    // KSBs
    .route("/ksbs", get(ksbs::list::<S>).post(ksbs::create::<S>))
    .route(
      "/ksbs/{id}",
      get(ksbs::get_one::<S>)
        .put(ksbs::update::<S>)
        .delete(ksbs::delete::<S>),
    )
    .with_state(store)
}

/// Body returned by every successful `DELETE`.
#[derive(Debug, Serialize)]
pub struct Deleted {
  pub message: &'static str,
}

/// A path id that is not a UUID names no row, so it is reported as missing.
pub(crate) fn parse_path_id(kind: EntityKind, raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(kind))
}

pub(crate) async fn delete_entity<S: CatalogStore>(
  store: &S,
  kind:  EntityKind,
  raw:   &str,
) -> Result<Json<Deleted>, ApiError> {
  let id = parse_path_id(kind, raw)?;
  if store.delete(kind, id).await.map_err(ApiError::store)? {
    tracing::debug!(%kind, %id, "deleted");
    Ok(Json(Deleted { message: "deleted" }))
  } else {
    Err(ApiError::NotFound(kind))
  }
}
