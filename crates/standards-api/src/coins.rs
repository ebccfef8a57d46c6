//! Handlers for `/coins` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/coins`      | Each coin with its duties (duties without KSBs) |
//! | `GET`    | `/coins/{id}` | 404 if not found |
//! | `POST`   | `/coins`      | Body: [`CreateBody`]; returns 201 + flat coin |
//! | `PUT`    | `/coins/{id}` | Body: [`UpdateBody`]; `duty_ids` replaces the set |
//! | `DELETE` | `/coins/{id}` | `{"message":"deleted"}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Deserialize;
use standards_core::{
  EntityKind,
  entity::{CoinPatch, NewCoin},
  store::CatalogStore,
};

use crate::{
  Deleted,
  error::ApiError,
  parse_path_id,
  payload::{Payload, parse_ids},
  render::CoinView,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /coins`
pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Response, ApiError> {
  let coins = store.list_coins().await.map_err(ApiError::store)?;
  let views: Vec<_> = coins.iter().map(CoinView::nested).collect();
  Ok(Json(views).into_response())
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /coins/{id}`
pub async fn get_one<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Response, ApiError> {
  let id = parse_path_id(EntityKind::Coin, &id)?;
  let coin = store
    .get_coin(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound(EntityKind::Coin))?;
  Ok(Json(CoinView::nested(&coin)).into_response())
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub coin_name: String,
  pub duty_ids:  Option<Vec<String>>,
}

/// `POST /coins`: returns 201 + the coin without its duties.
pub async fn create<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Payload(body): Payload<CreateBody>,
) -> Result<Response, ApiError> {
  let input = NewCoin {
    coin_name: body.coin_name,
    duty_ids:  body.duty_ids.as_deref().map(parse_ids).unwrap_or_default(),
  };
  let coin = store.create_coin(input).await.map_err(ApiError::store)?;
  tracing::debug!(id = %coin.id, "coin created");
  Ok((StatusCode::CREATED, Json(CoinView::flat(&coin))).into_response())
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub coin_name: Option<String>,
  pub duty_ids:  Option<Vec<String>>,
}

/// `PUT /coins/{id}`: partial update; returns the coin with its duties.
pub async fn update<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Payload(body): Payload<UpdateBody>,
) -> Result<Response, ApiError> {
  let id = parse_path_id(EntityKind::Coin, &id)?;
  let patch = CoinPatch {
    coin_name: body.coin_name,
    duty_ids:  body.duty_ids.as_deref().map(parse_ids),
  };
  let coin = store.update_coin(id, patch).await.map_err(ApiError::store)?;
  Ok(Json(CoinView::nested(&coin)).into_response())
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /coins/{id}`
pub async fn delete<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
  crate::delete_entity(&*store, EntityKind::Coin, &id).await
}
