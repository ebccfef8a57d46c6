//! Core types and trait definitions for the standards catalog.
//!
//! No HTTP or database code lives here; the store, API and frontend crates
//! all build on these types.

pub mod entity;
pub mod error;
pub mod kind;
pub mod store;

pub use error::{Error, Result};
pub use kind::{EntityKind, Link};
