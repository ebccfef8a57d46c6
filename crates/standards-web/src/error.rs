//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The API answered with a non-success status; it is passed through.
  #[error("api responded {0}")]
  Upstream(StatusCode),
  #[error("api request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("template error: {0}")]
  Render(#[from] minijinja::Error),
}

/// Failure to build an [`ApiClient`](crate::ApiClient) at startup.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("invalid backend url {0:?}")]
  BaseUrl(String),
  #[error("http client setup failed: {0}")]
  Client(#[from] reqwest::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Upstream(status) => {
        (status, status.canonical_reason().unwrap_or("Upstream Error")).into_response()
      }
      Error::Transport(e) => {
        tracing::warn!(error = %e, "api unreachable");
        (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
      }
      Error::Render(e) => {
        tracing::error!(error = %e, "template rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
    }
  }
}
