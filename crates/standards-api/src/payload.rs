//! Request-side helpers: the JSON body extractor and id parsing.

use axum::extract::FromRequest;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::error::ApiError;

/// `Json<T>` whose rejection is a JSON `400` instead of axum's plain-text
/// `415`/`422`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Payload<T>(pub T);

/// Parse client-supplied ids, dropping any that are not UUIDs. Such ids can
/// never match a row, so they are treated like any other unknown id.
pub fn parse_ids(raw: &[String]) -> Vec<Uuid> {
  raw.iter().filter_map(|s| Uuid::parse_str(s).ok()).collect()
}

/// Distinguish a field that is absent (`None`) from one that is `null`
/// (`Some(None)`). Use with `#[serde(default)]`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(deserializer).map(Some)
}
