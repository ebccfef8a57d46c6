//! Catalog entities and the inputs used to create and patch them.
//!
//! The serde derives describe the wire shape so that API consumers (the
//! frontend) can decode responses into these types. The API itself renders
//! with an explicit key order and does not rely on these derives.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Rows ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
  pub id:        Uuid,
  pub coin_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duty {
  pub id:               Uuid,
  pub duty_name:        String,
  /// Optional, but unique among duties that have one.
  #[serde(rename = "description", default)]
  pub duty_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ksb {
  pub id:       Uuid,
  pub ksb_name: String,
}

// ─── Nested read models ──────────────────────────────────────────────────────

/// A coin together with its current duty set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinWithDuties {
  #[serde(flatten)]
  pub coin:   Coin,
  #[serde(default)]
  pub duties: Vec<Duty>,
}

/// A duty together with its current KSB set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyWithKsbs {
  #[serde(flatten)]
  pub duty: Duty,
  #[serde(default)]
  pub ksbs: Vec<Ksb>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`CatalogStore::create_coin`](crate::store::CatalogStore::create_coin).
#[derive(Debug, Clone, Default)]
pub struct NewCoin {
  pub coin_name: String,
  /// Duties to attach. Ids that match no duty are dropped.
  pub duty_ids:  Vec<Uuid>,
}

impl NewCoin {
  pub fn named(coin_name: impl Into<String>) -> Self {
    Self { coin_name: coin_name.into(), duty_ids: Vec::new() }
  }
}

#[derive(Debug, Clone, Default)]
pub struct NewDuty {
  pub duty_name:        String,
  pub duty_description: Option<String>,
  pub ksb_ids:          Vec<Uuid>,
}

impl NewDuty {
  pub fn named(duty_name: impl Into<String>) -> Self {
    Self { duty_name: duty_name.into(), ..Self::default() }
  }
}

#[derive(Debug, Clone, Default)]
pub struct NewKsb {
  pub ksb_name: String,
}

impl NewKsb {
  pub fn named(ksb_name: impl Into<String>) -> Self {
    Self { ksb_name: ksb_name.into() }
  }
}

// ─── Patches ─────────────────────────────────────────────────────────────────
//
// `None` means "leave untouched". A present id list replaces the whole set.

#[derive(Debug, Clone, Default)]
pub struct CoinPatch {
  pub coin_name: Option<String>,
  pub duty_ids:  Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Default)]
pub struct DutyPatch {
  pub duty_name:        Option<String>,
  /// `Some(None)` clears the description.
  pub duty_description: Option<Option<String>>,
  pub ksb_ids:          Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Default)]
pub struct KsbPatch {
  pub ksb_name: Option<String>,
}
