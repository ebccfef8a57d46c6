//! Error type for `standards-store-sqlite`.

use standards_core::{EntityKind, store::StoreError};
use thiserror::Error;

use crate::encode::wire_field;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] standards_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),
}

impl Error {
  /// Classify a failed write against `kind`, turning UNIQUE constraint
  /// failures into [`standards_core::Error::Duplicate`].
  pub(crate) fn on_write(kind: EntityKind, err: tokio_rusqlite::Error) -> Self {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
      ffi_err,
      message,
    )) = &err
      && ffi_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    {
      // SQLite reports "UNIQUE constraint failed: <table>.<column>".
      let column = message
        .as_deref()
        .and_then(|m| m.rsplit('.').next())
        .unwrap_or("name");
      let field = wire_field(column).to_owned();
      return Self::Core(standards_core::Error::Duplicate { kind, field });
    }
    Self::Database(err)
  }
}

impl StoreError for Error {
  fn as_domain(&self) -> Option<&standards_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
