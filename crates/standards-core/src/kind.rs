//! Entity kinds and the many-to-many links between them.

use std::fmt;

/// The three entity tables of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
  Coin,
  Duty,
  Ksb,
}

impl EntityKind {
  /// Human-facing name used in error messages, e.g. `"Coin not found"`.
  pub fn label(self) -> &'static str {
    match self {
      Self::Coin => "Coin",
      Self::Duty => "Duty",
      Self::Ksb => "Ksb",
    }
  }
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

/// A many-to-many relationship, named parent-first.
///
/// Membership is a set: a link row carries nothing but the two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
  /// `coins_duties`: a coin owns many duties, a duty belongs to many coins.
  CoinDuties,
  /// `duties_ksbs`: a duty has many KSBs, a KSB is attached to many duties.
  DutyKsbs,
}

impl Link {
  pub fn parent(self) -> EntityKind {
    match self {
      Self::CoinDuties => EntityKind::Coin,
      Self::DutyKsbs => EntityKind::Duty,
    }
  }

  pub fn child(self) -> EntityKind {
    match self {
      Self::CoinDuties => EntityKind::Duty,
      Self::DutyKsbs => EntityKind::Ksb,
    }
  }

  /// Every link in which `kind` takes part, on either side.
  pub fn touching(kind: EntityKind) -> &'static [Link] {
    match kind {
      EntityKind::Coin => &[Link::CoinDuties],
      EntityKind::Duty => &[Link::CoinDuties, Link::DutyKsbs],
      EntityKind::Ksb => &[Link::DutyKsbs],
    }
  }
}
