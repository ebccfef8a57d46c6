//! Error types for `standards-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::kind::EntityKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0} not found: {1}")]
  NotFound(EntityKind, Uuid),

  /// A uniqueness constraint on `field` rejected the write.
  #[error("{kind} with this {field} already exists")]
  Duplicate { kind: EntityKind, field: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
