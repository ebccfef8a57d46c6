//! The `CatalogStore` trait and the error contract of its backends.
//!
//! The trait is implemented by storage backends (e.g. `standards-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  entity::{
    Coin, CoinPatch, CoinWithDuties, Duty, DutyPatch, DutyWithKsbs, Ksb,
    KsbPatch, NewCoin, NewDuty, NewKsb,
  },
  error::Error,
  kind::{EntityKind, Link},
};

// ─── Error contract ──────────────────────────────────────────────────────────

/// Implemented by backend error types so that callers can tell domain
/// failures (missing rows, uniqueness conflicts) apart from storage faults
/// without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain error carried by this failure, if any.
  fn as_domain(&self) -> Option<&Error>;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a catalog store backend.
///
/// Every mutation is atomic on its own; nothing spans several calls.
/// Relationship replacement is last-writer-wins.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: StoreError;

  // ── Coins ─────────────────────────────────────────────────────────────

  /// Persist a new coin with a fresh id and attach the resolvable duties.
  fn create_coin(
    &self,
    input: NewCoin,
  ) -> impl Future<Output = Result<Coin, Self::Error>> + Send + '_;

  fn list_coins(
    &self,
  ) -> impl Future<Output = Result<Vec<CoinWithDuties>, Self::Error>> + Send + '_;

  /// Retrieve a coin and its duties. Returns `None` if not found.
  fn get_coin(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CoinWithDuties>, Self::Error>> + Send + '_;

  /// Apply `patch` and return the coin as it now reads.
  ///
  /// Fails with [`Error::NotFound`] if the coin does not exist.
  fn update_coin(
    &self,
    id: Uuid,
    patch: CoinPatch,
  ) -> impl Future<Output = Result<CoinWithDuties, Self::Error>> + Send + '_;

  // ── Duties ────────────────────────────────────────────────────────────

  fn create_duty(
    &self,
    input: NewDuty,
  ) -> impl Future<Output = Result<Duty, Self::Error>> + Send + '_;

  fn list_duties(
    &self,
  ) -> impl Future<Output = Result<Vec<DutyWithKsbs>, Self::Error>> + Send + '_;

  fn get_duty(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<DutyWithKsbs>, Self::Error>> + Send + '_;

  fn update_duty(
    &self,
    id: Uuid,
    patch: DutyPatch,
  ) -> impl Future<Output = Result<DutyWithKsbs, Self::Error>> + Send + '_;

  // ── KSBs ──────────────────────────────────────────────────────────────

  fn create_ksb(
    &self,
    input: NewKsb,
  ) -> impl Future<Output = Result<Ksb, Self::Error>> + Send + '_;

  fn list_ksbs(
    &self,
  ) -> impl Future<Output = Result<Vec<Ksb>, Self::Error>> + Send + '_;

  fn get_ksb(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Ksb>, Self::Error>> + Send + '_;

  fn update_ksb(
    &self,
    id: Uuid,
    patch: KsbPatch,
  ) -> impl Future<Output = Result<Ksb, Self::Error>> + Send + '_;

  // ── Any kind ──────────────────────────────────────────────────────────

  /// Delete a row of `kind` together with every link row that references
  /// it. Returns whether the row existed.
  fn delete(
    &self,
    kind: EntityKind,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Replace the full child set of `parent_id` under `link` with exactly the
  /// children in `child_ids` that exist. Unknown ids are dropped silently.
  ///
  /// Returns the number of children now linked. Fails with
  /// [`Error::NotFound`] if the parent does not exist.
  fn set_links<'a>(
    &'a self,
    link: Link,
    parent_id: Uuid,
    child_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}
