//! Handlers for `/duties` endpoints.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/duties`      | Each duty with its KSBs |
//! | `GET`    | `/duties/{id}` | 404 if not found |
//! | `POST`   | `/duties`      | Body: [`CreateBody`]; returns 201 + flat duty |
//! | `PUT`    | `/duties/{id}` | Body: [`UpdateBody`]; `ksb_ids` replaces the set |
//! | `DELETE` | `/duties/{id}` | `{"message":"deleted"}` |

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
  entity::{DutyPatch, NewDuty},
  store::CatalogStore,
};

use crate::{
  Deleted,
  error::ApiError,
  parse_path_id,
  payload::{Payload, parse_ids, present},
  render::DutyView,
};

/// `GET /duties`
pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Response, ApiError> {
  let duties = store.list_duties().await.map_err(ApiError::store)?;
  let views: Vec<_> = duties.iter().map(DutyView::nested).collect();
  Ok(Json(views).into_response())
}

/// `GET /duties/{id}`
pub async fn get_one<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Response, ApiError> {
  let id = parse_path_id(EntityKind::Duty, &id)?;
  let duty = store
    .get_duty(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound(EntityKind::Duty))?;
  Ok(Json(DutyView::nested(&duty)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub duty_name:   String,
  pub description: Option<String>,
  pub ksb_ids:     Option<Vec<String>>,
}

/// `POST /duties`: returns 201 + the duty without its KSBs.
pub async fn create<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Payload(body): Payload<CreateBody>,
) -> Result<Response, ApiError> {
  let input = NewDuty {
    duty_name:        body.duty_name,
    duty_description: body.description,
    ksb_ids:          body.ksb_ids.as_deref().map(parse_ids).unwrap_or_default(),
  };
  let duty = store.create_duty(input).await.map_err(ApiError::store)?;
  tracing::debug!(id = %duty.id, "duty created");
  Ok((StatusCode::CREATED, Json(DutyView::flat(&duty))).into_response())
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub duty_name:   Option<String>,
  /// Absent leaves the description alone; `null` clears it.
  #[serde(default, deserialize_with = "present")]
  pub description: Option<Option<String>>,
  pub ksb_ids:     Option<Vec<String>>,
}

/// `PUT /duties/{id}`: partial update; returns the duty with its KSBs.
pub async fn update<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Payload(body): Payload<UpdateBody>,
) -> Result<Response, ApiError> {
  let id = parse_path_id(EntityKind::Duty, &id)?;
  let patch = DutyPatch {
    duty_name:        body.duty_name,
    duty_description: body.description,
    ksb_ids:          body.ksb_ids.as_deref().map(parse_ids),
  };
  let duty = store.update_duty(id, patch).await.map_err(ApiError::store)?;
  Ok(Json(DutyView::nested(&duty)).into_response())
}

/// `DELETE /duties/{id}`
pub async fn delete<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
  crate::delete_entity(&*store, EntityKind::Duty, &id).await
}
