//! The SQLite implementation of [`CatalogStore`].

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use rusqlite::{Connection, OptionalExtension as _, params};
use uuid::Uuid;

use standards_core::{
  EntityKind, Link,
  entity::{
    Coin, CoinPatch, CoinWithDuties, Duty, DutyPatch, DutyWithKsbs, Ksb,
    KsbPatch, NewCoin, NewDuty, NewKsb,
  },
  store::CatalogStore,
};

use crate::{
  Error, Result,
  encode::{
    RawCoin, RawCoinWithDuties, RawDuty, RawDutyWithKsbs, RawKsb, encode_uuid,
    encode_uuids, entity_table, link_table,
  },
  schema::SCHEMA,
};

// ─── Location ────────────────────────────────────────────────────────────────

/// Where the store lives, as parsed from a database URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
  Memory,
  File(PathBuf),
}

impl StoreLocation {
  /// Interpret a database URL.
  ///
  /// Accepts `sqlite:///relative.db`, `sqlite:////abs/path.db`,
  /// `sqlite:///:memory:`, `sqlite::memory:` and bare file paths.
  pub fn from_url(url: &str) -> Self {
    let path = if let Some(rest) = url.strip_prefix("sqlite://") {
      rest.strip_prefix('/').unwrap_or(rest)
    } else {
      url.strip_prefix("sqlite:").unwrap_or(url)
    };
    match path {
      "" | ":memory:" => Self::Memory,
      p => Self::File(PathBuf::from(p)),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A catalog store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  pub async fn connect(location: &StoreLocation) -> Result<Self> {
    match location {
      StoreLocation::Memory => Self::open_in_memory().await,
      StoreLocation::File(path) => Self::open(path).await,
    }
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Blocking helpers (run inside `Connection::call`) ────────────────────────

fn exists(conn: &Connection, kind: EntityKind, id: &str) -> rusqlite::Result<bool> {
  let sql = format!("SELECT 1 FROM {} WHERE id = ?1", entity_table(kind));
  Ok(
    conn
      .query_row(&sql, params![id], |_| Ok(true))
      .optional()?
      .unwrap_or(false),
  )
}

/// Replace every link row of `parent_id` with rows for the children that
/// exist. Returns how many children ended up linked.
fn replace_links(
  conn: &Connection,
  link: Link,
  parent_id: &str,
  child_ids: &[String],
) -> rusqlite::Result<usize> {
  let t = link_table(link);
  conn.execute(
    &format!("DELETE FROM {} WHERE {} = ?1", t.table, t.parent_col),
    params![parent_id],
  )?;

  // Unknown ids select nothing; repeated ids hit the primary key and are
  // ignored, so each resolved child counts once.
  let mut stmt = conn.prepare(&format!(
    "INSERT OR IGNORE INTO {} ({}, {})
     SELECT ?1, id FROM {} WHERE id = ?2",
    t.table,
    t.parent_col,
    t.child_col,
    entity_table(link.child()),
  ))?;

  let mut linked = 0;
  for child_id in child_ids {
    linked += stmt.execute(params![parent_id, child_id])?;
  }
  Ok(linked)
}

/// Coins (all, or the one matching `only`) with their duties.
fn load_coins(
  conn: &Connection,
  only: Option<&str>,
) -> rusqlite::Result<Vec<RawCoinWithDuties>> {
  let mut stmt = conn.prepare(
    "SELECT id, coin_name FROM coins
     WHERE ?1 IS NULL OR id = ?1
     ORDER BY rowid",
  )?;
  let coins = stmt
    .query_map(params![only], |row| {
      Ok(RawCoin { id: row.get(0)?, coin_name: row.get(1)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut stmt = conn.prepare(
    "SELECT cd.coin_id, d.id, d.duty_name, d.duty_description
     FROM coins_duties cd
     JOIN duties d ON d.id = cd.duty_id
     WHERE ?1 IS NULL OR cd.coin_id = ?1
     ORDER BY d.rowid",
  )?;
  let mut duties: HashMap<String, Vec<RawDuty>> = HashMap::new();
  let rows = stmt.query_map(params![only], |row| {
    Ok((
      row.get::<_, String>(0)?,
      RawDuty {
        id:               row.get(1)?,
        duty_name:        row.get(2)?,
        duty_description: row.get(3)?,
      },
    ))
  })?;
  for row in rows {
    let (coin_id, duty) = row?;
    duties.entry(coin_id).or_default().push(duty);
  }

  Ok(
    coins
      .into_iter()
      .map(|coin| RawCoinWithDuties {
        duties: duties.remove(&coin.id).unwrap_or_default(),
        coin,
      })
      .collect(),
  )
}

/// Duties (all, or the one matching `only`) with their KSBs.
fn load_duties(
  conn: &Connection,
  only: Option<&str>,
) -> rusqlite::Result<Vec<RawDutyWithKsbs>> {
  let mut stmt = conn.prepare(
    "SELECT id, duty_name, duty_description FROM duties
     WHERE ?1 IS NULL OR id = ?1
     ORDER BY rowid",
  )?;
  let duties = stmt
    .query_map(params![only], |row| {
      Ok(RawDuty {
        id:               row.get(0)?,
        duty_name:        row.get(1)?,
        duty_description: row.get(2)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut stmt = conn.prepare(
    "SELECT dk.duty_id, k.id, k.ksb_name
     FROM duties_ksbs dk
     JOIN ksbs k ON k.id = dk.ksb_id
     WHERE ?1 IS NULL OR dk.duty_id = ?1
     ORDER BY k.rowid",
  )?;
  let mut ksbs: HashMap<String, Vec<RawKsb>> = HashMap::new();
  let rows = stmt.query_map(params![only], |row| {
    Ok((
      row.get::<_, String>(0)?,
      RawKsb { id: row.get(1)?, ksb_name: row.get(2)? },
    ))
  })?;
  for row in rows {
    let (duty_id, ksb) = row?;
    ksbs.entry(duty_id).or_default().push(ksb);
  }

  Ok(
    duties
      .into_iter()
      .map(|duty| RawDutyWithKsbs {
        ksbs: ksbs.remove(&duty.id).unwrap_or_default(),
        duty,
      })
      .collect(),
  )
}

fn load_ksbs(conn: &Connection, only: Option<&str>) -> rusqlite::Result<Vec<RawKsb>> {
  let mut stmt = conn.prepare(
    "SELECT id, ksb_name FROM ksbs
     WHERE ?1 IS NULL OR id = ?1
     ORDER BY rowid",
  )?;
  let ksbs = stmt
    .query_map(params![only], |row| {
      Ok(RawKsb { id: row.get(0)?, ksb_name: row.get(1)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(ksbs)
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Coins ─────────────────────────────────────────────────────────────────

  async fn create_coin(&self, input: NewCoin) -> Result<Coin> {
    let coin = Coin { id: Uuid::new_v4(), coin_name: input.coin_name };

    let id_str   = encode_uuid(coin.id);
    let name     = coin.coin_name.clone();
    let duty_ids = encode_uuids(&input.duty_ids);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO coins (id, coin_name) VALUES (?1, ?2)",
          params![id_str, name],
        )?;
        replace_links(&tx, Link::CoinDuties, &id_str, &duty_ids)?;
        tx.commit()?;
        Ok(())
      })
      .await
      .map_err(|e| Error::on_write(EntityKind::Coin, e))?;

    Ok(coin)
  }

  async fn list_coins(&self) -> Result<Vec<CoinWithDuties>> {
    let raws = self
      .conn
      .call(|conn| Ok(load_coins(conn, None)?))
      .await?;

    raws.into_iter().map(RawCoinWithDuties::into_nested).collect()
  }

  async fn get_coin(&self, id: Uuid) -> Result<Option<CoinWithDuties>> {
    let id_str = encode_uuid(id);

    let raw = self
      .conn
      .call(move |conn| Ok(load_coins(conn, Some(id_str.as_str()))?.pop()))
      .await?;

    raw.map(RawCoinWithDuties::into_nested).transpose()
  }

  async fn update_coin(&self, id: Uuid, patch: CoinPatch) -> Result<CoinWithDuties> {
    let id_str   = encode_uuid(id);
    let duty_ids = patch.duty_ids.as_deref().map(encode_uuids);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !exists(&tx, EntityKind::Coin, &id_str)? {
          return Ok(None);
        }
        if let Some(name) = patch.coin_name {
          tx.execute(
            "UPDATE coins SET coin_name = ?1 WHERE id = ?2",
            params![name, id_str],
          )?;
        }
        if let Some(duty_ids) = duty_ids {
          replace_links(&tx, Link::CoinDuties, &id_str, &duty_ids)?;
        }
        let coin = load_coins(&tx, Some(id_str.as_str()))?.pop();
        tx.commit()?;
        Ok(coin)
      })
      .await
      .map_err(|e| Error::on_write(EntityKind::Coin, e))?;

    raw
      .ok_or(standards_core::Error::NotFound(EntityKind::Coin, id))?
      .into_nested()
  }

  // ── Duties ────────────────────────────────────────────────────────────────

  async fn create_duty(&self, input: NewDuty) -> Result<Duty> {
    let duty = Duty {
      id:               Uuid::new_v4(),
      duty_name:        input.duty_name,
      duty_description: input.duty_description,
    };

    let id_str      = encode_uuid(duty.id);
    let name        = duty.duty_name.clone();
    let description = duty.duty_description.clone();
    let ksb_ids     = encode_uuids(&input.ksb_ids);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO duties (id, duty_name, duty_description) VALUES (?1, ?2, ?3)",
          params![id_str, name, description],
        )?;
        replace_links(&tx, Link::DutyKsbs, &id_str, &ksb_ids)?;
        tx.commit()?;
        Ok(())
      })
      .await
      .map_err(|e| Error::on_write(EntityKind::Duty, e))?;

    Ok(duty)
  }

  async fn list_duties(&self) -> Result<Vec<DutyWithKsbs>> {
    let raws = self
      .conn
      .call(|conn| Ok(load_duties(conn, None)?))
      .await?;

    raws.into_iter().map(RawDutyWithKsbs::into_nested).collect()
  }

  async fn get_duty(&self, id: Uuid) -> Result<Option<DutyWithKsbs>> {
    let id_str = encode_uuid(id);

    let raw = self
      .conn
      .call(move |conn| Ok(load_duties(conn, Some(id_str.as_str()))?.pop()))
      .await?;

    raw.map(RawDutyWithKsbs::into_nested).transpose()
  }

  async fn update_duty(&self, id: Uuid, patch: DutyPatch) -> Result<DutyWithKsbs> {
    let id_str  = encode_uuid(id);
    let ksb_ids = patch.ksb_ids.as_deref().map(encode_uuids);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !exists(&tx, EntityKind::Duty, &id_str)? {
          return Ok(None);
        }
        if let Some(name) = patch.duty_name {
          tx.execute(
            "UPDATE duties SET duty_name = ?1 WHERE id = ?2",
            params![name, id_str],
          )?;
        }
        if let Some(description) = patch.duty_description {
          tx.execute(
            "UPDATE duties SET duty_description = ?1 WHERE id = ?2",
            params![description, id_str],
          )?;
        }
        if let Some(ksb_ids) = ksb_ids {
          replace_links(&tx, Link::DutyKsbs, &id_str, &ksb_ids)?;
        }
        let duty = load_duties(&tx, Some(id_str.as_str()))?.pop();
        tx.commit()?;
        Ok(duty)
      })
      .await
      .map_err(|e| Error::on_write(EntityKind::Duty, e))?;

    raw
      .ok_or(standards_core::Error::NotFound(EntityKind::Duty, id))?
      .into_nested()
  }

  // ── KSBs ──────────────────────────────────────────────────────────────────

  async fn create_ksb(&self, input: NewKsb) -> Result<Ksb> {
    let ksb = Ksb { id: Uuid::new_v4(), ksb_name: input.ksb_name };

    let id_str = encode_uuid(ksb.id);
    let name   = ksb.ksb_name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ksbs (id, ksb_name) VALUES (?1, ?2)",
          params![id_str, name],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| Error::on_write(EntityKind::Ksb, e))?;

    Ok(ksb)
  }

  async fn list_ksbs(&self) -> Result<Vec<Ksb>> {
    let raws = self
      .conn
      .call(|conn| Ok(load_ksbs(conn, None)?))
      .await?;

    raws.into_iter().map(RawKsb::into_ksb).collect()
  }

  async fn get_ksb(&self, id: Uuid) -> Result<Option<Ksb>> {
    let id_str = encode_uuid(id);

    let raw = self
      .conn
      .call(move |conn| Ok(load_ksbs(conn, Some(id_str.as_str()))?.pop()))
      .await?;

    raw.map(RawKsb::into_ksb).transpose()
  }

  async fn update_ksb(&self, id: Uuid, patch: KsbPatch) -> Result<Ksb> {
    let id_str = encode_uuid(id);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !exists(&tx, EntityKind::Ksb, &id_str)? {
          return Ok(None);
        }
        if let Some(name) = patch.ksb_name {
          tx.execute(
            "UPDATE ksbs SET ksb_name = ?1 WHERE id = ?2",
            params![name, id_str],
          )?;
        }
        let ksb = load_ksbs(&tx, Some(id_str.as_str()))?.pop();
        tx.commit()?;
        Ok(ksb)
      })
      .await
      .map_err(|e| Error::on_write(EntityKind::Ksb, e))?;

    raw
      .ok_or(standards_core::Error::NotFound(EntityKind::Ksb, id))?
      .into_ksb()
  }

  // ── Any kind ──────────────────────────────────────────────────────────────

  async fn delete(&self, kind: EntityKind, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for &link in Link::touching(kind) {
          let t = link_table(link);
          tx.execute(
            &format!("DELETE FROM {} WHERE {} = ?1", t.table, t.column_for(link, kind)),
            params![id_str],
          )?;
        }
        let removed = tx.execute(
          &format!("DELETE FROM {} WHERE id = ?1", entity_table(kind)),
          params![id_str],
        )?;
        tx.commit()?;
        Ok(removed > 0)
      })
      .await?;

    Ok(deleted)
  }

  async fn set_links<'a>(
    &'a self,
    link:      Link,
    parent_id: Uuid,
    child_ids: &'a [Uuid],
  ) -> Result<usize> {
    let parent_str = encode_uuid(parent_id);
    let child_strs = encode_uuids(child_ids);

    let linked = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !exists(&tx, link.parent(), &parent_str)? {
          return Ok(None);
        }
        let linked = replace_links(&tx, link, &parent_str, &child_strs)?;
        tx.commit()?;
        Ok(Some(linked))
      })
      .await?;

    Ok(linked.ok_or(standards_core::Error::NotFound(link.parent(), parent_id))?)
  }
}
