//! Handlers for `/ksbs` endpoints. KSBs are leaves and always render flat.

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
  entity::{KsbPatch, NewKsb},
  store::CatalogStore,
};

use crate::{
  Deleted,
  error::ApiError,
  parse_path_id,
  payload::Payload,
  render::KsbView,
};

/// `GET /ksbs`
pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Response, ApiError> {
  let ksbs = store.list_ksbs().await.map_err(ApiError::store)?;
  let views: Vec<_> = ksbs.iter().map(KsbView).collect();
  Ok(Json(views).into_response())
}

/// `GET /ksbs/{id}`
pub async fn get_one<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Response, ApiError> {
  let id = parse_path_id(EntityKind::Ksb, &id)?;
  let ksb = store
    .get_ksb(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound(EntityKind::Ksb))?;
  Ok(Json(KsbView(&ksb)).into_response())
}

/// Body of both `POST /ksbs` and `PUT /ksbs/{id}`; the name is required.
#[derive(Debug, Deserialize)]
pub struct NameBody {
  pub ksb_name: String,
}

/// `POST /ksbs`: returns 201 + the stored KSB.
pub async fn create<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Payload(body): Payload<NameBody>,
) -> Result<Response, ApiError> {
  let ksb = store
    .create_ksb(NewKsb { ksb_name: body.ksb_name })
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(id = %ksb.id, "ksb created");
  Ok((StatusCode::CREATED, Json(KsbView(&ksb))).into_response())
}

/// `PUT /ksbs/{id}`: rename.
pub async fn update<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Payload(body): Payload<NameBody>,
) -> Result<Response, ApiError> {
  let id = parse_path_id(EntityKind::Ksb, &id)?;
  let ksb = store
    .update_ksb(id, KsbPatch { ksb_name: Some(body.ksb_name) })
    .await
    .map_err(ApiError::store)?;
  Ok(Json(KsbView(&ksb)).into_response())
}

/// `DELETE /ksbs/{id}`
pub async fn delete<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
  crate::delete_entity(&*store, EntityKind::Ksb, &id).await
}
