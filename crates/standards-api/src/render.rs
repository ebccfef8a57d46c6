//! Wire rendering with a fixed key order.
//!
//! Every object is written as `{id, <name-field>, ...}` by listing its
//! entries one by one, so the order holds whatever the map backend or derive
//! order would otherwise produce.

use serde::{Serialize, Serializer, ser::SerializeMap};
use standards_core::entity::{Coin, CoinWithDuties, Duty, DutyWithKsbs, Ksb};

/// `{id, coin_name[, duties]}`; nested duties are rendered flat.
pub struct CoinView<'a> {
  coin:   &'a Coin,
  duties: Option<&'a [Duty]>,
}

impl<'a> CoinView<'a> {
  pub fn flat(coin: &'a Coin) -> Self { Self { coin, duties: None } }

  pub fn nested(c: &'a CoinWithDuties) -> Self {
    Self { coin: &c.coin, duties: Some(&c.duties) }
  }
}

impl Serialize for CoinView<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let len = if self.duties.is_some() { 3 } else { 2 };
    let mut map = serializer.serialize_map(Some(len))?;
    map.serialize_entry("id", &self.coin.id)?;
    map.serialize_entry("coin_name", &self.coin.coin_name)?;
    if let Some(duties) = self.duties {
      let duties: Vec<_> = duties.iter().map(DutyView::flat).collect();
      map.serialize_entry("duties", &duties)?;
    }
    map.end()
  }
}

/// `{id, duty_name, description[, ksbs]}`.
pub struct DutyView<'a> {
  duty: &'a Duty,
  ksbs: Option<&'a [Ksb]>,
}

impl<'a> DutyView<'a> {
  pub fn flat(duty: &'a Duty) -> Self { Self { duty, ksbs: None } }

  pub fn nested(d: &'a DutyWithKsbs) -> Self {
    Self { duty: &d.duty, ksbs: Some(&d.ksbs) }
  }
}

impl Serialize for DutyView<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let len = if self.ksbs.is_some() { 4 } else { 3 };
    let mut map = serializer.serialize_map(Some(len))?;
    map.serialize_entry("id", &self.duty.id)?;
    map.serialize_entry("duty_name", &self.duty.duty_name)?;
    map.serialize_entry("description", &self.duty.duty_description)?;
    if let Some(ksbs) = self.ksbs {
      let ksbs: Vec<_> = ksbs.iter().map(KsbView).collect();
      map.serialize_entry("ksbs", &ksbs)?;
    }
    map.end()
  }
}

/// `{id, ksb_name}`.
pub struct KsbView<'a>(pub &'a Ksb);

impl Serialize for KsbView<'_> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(2))?;
    map.serialize_entry("id", &self.0.id)?;
    map.serialize_entry("ksb_name", &self.0.ksb_name)?;
    map.end()
  }
}
