//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns, plus the table names each kind
//! and link map onto.
//!
//! UUIDs are stored as hyphenated lowercase strings.

use standards_core::{
  EntityKind, Link,
  entity::{Coin, CoinWithDuties, Duty, DutyWithKsbs, Ksb},
};
use uuid::Uuid;

use crate::Result;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_uuids(ids: &[Uuid]) -> Vec<String> {
  ids.iter().copied().map(encode_uuid).collect()
}

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Tables ──────────────────────────────────────────────────────────────────

pub fn entity_table(kind: EntityKind) -> &'static str {
  match kind {
    EntityKind::Coin => "coins",
    EntityKind::Duty => "duties",
    EntityKind::Ksb => "ksbs",
  }
}

/// The JSON field name a column is exposed under.
pub fn wire_field(column: &str) -> &str {
  match column {
    "duty_description" => "description",
    other => other,
  }
}

/// Physical layout of a junction table.
pub struct LinkTable {
  pub table:      &'static str,
  pub parent_col: &'static str,
  pub child_col:  &'static str,
}

impl LinkTable {
  /// The column holding ids of `kind`.
  pub fn column_for(&self, link: Link, kind: EntityKind) -> &'static str {
    if link.parent() == kind { self.parent_col } else { self.child_col }
  }
}

pub fn link_table(link: Link) -> LinkTable {
  match link {
    Link::CoinDuties => LinkTable {
      table:      "coins_duties",
      parent_col: "coin_id",
      child_col:  "duty_id",
    },
    Link::DutyKsbs => LinkTable {
      table:      "duties_ksbs",
      parent_col: "duty_id",
      child_col:  "ksb_id",
    },
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `coins` row.
pub struct RawCoin {
  pub id:        String,
  pub coin_name: String,
}

impl RawCoin {
  pub fn into_coin(self) -> Result<Coin> {
    Ok(Coin { id: decode_uuid(&self.id)?, coin_name: self.coin_name })
  }
}

/// Raw strings read directly from a `duties` row.
pub struct RawDuty {
  pub id:               String,
  pub duty_name:        String,
  pub duty_description: Option<String>,
}

impl RawDuty {
  pub fn into_duty(self) -> Result<Duty> {
    Ok(Duty {
      id:               decode_uuid(&self.id)?,
      duty_name:        self.duty_name,
      duty_description: self.duty_description,
    })
  }
}

/// Raw strings read directly from a `ksbs` row.
pub struct RawKsb {
  pub id:       String,
  pub ksb_name: String,
}

impl RawKsb {
  pub fn into_ksb(self) -> Result<Ksb> {
    Ok(Ksb { id: decode_uuid(&self.id)?, ksb_name: self.ksb_name })
  }
}

/// A coin row together with the duty rows linked to it.
pub struct RawCoinWithDuties {
  pub coin:   RawCoin,
  pub duties: Vec<RawDuty>,
}

impl RawCoinWithDuties {
  pub fn into_nested(self) -> Result<CoinWithDuties> {
    Ok(CoinWithDuties {
      coin:   self.coin.into_coin()?,
      duties: self
        .duties
        .into_iter()
        .map(RawDuty::into_duty)
        .collect::<Result<_>>()?,
    })
  }
}

/// A duty row together with the KSB rows linked to it.
pub struct RawDutyWithKsbs {
  pub duty: RawDuty,
  pub ksbs: Vec<RawKsb>,
}

impl RawDutyWithKsbs {
  pub fn into_nested(self) -> Result<DutyWithKsbs> {
    Ok(DutyWithKsbs {
      duty: self.duty.into_duty()?,
      ksbs: self
        .ksbs
        .into_iter()
        .map(RawKsb::into_ksb)
        .collect::<Result<_>>()?,
    })
  }
}
