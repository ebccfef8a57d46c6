//! Integration tests for `SqliteStore` against an in-memory database.

use std::path::PathBuf;

use standards_core::{
  EntityKind, Link,
  entity::{CoinPatch, DutyPatch, KsbPatch, NewCoin, NewDuty, NewKsb},
  store::{CatalogStore, StoreError},
};
use uuid::Uuid;

use crate::{SqliteStore, StoreLocation};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Location parsing ────────────────────────────────────────────────────────

#[test]
fn location_from_url() {
  assert_eq!(StoreLocation::from_url("sqlite:///:memory:"), StoreLocation::Memory);
  assert_eq!(StoreLocation::from_url("sqlite::memory:"), StoreLocation::Memory);
  assert_eq!(StoreLocation::from_url("sqlite://"), StoreLocation::Memory);
  assert_eq!(
    StoreLocation::from_url("sqlite:///standards.db"),
    StoreLocation::File(PathBuf::from("standards.db"))
  );
  assert_eq!(
    StoreLocation::from_url("sqlite:////var/lib/standards.db"),
    StoreLocation::File(PathBuf::from("/var/lib/standards.db"))
  );
  assert_eq!(
    StoreLocation::from_url("data/standards.db"),
    StoreLocation::File(PathBuf::from("data/standards.db"))
  );
}

// ─── Coins ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_coin() {
  let s = store().await;

  let coin = s.create_coin(NewCoin::named("automate")).await.unwrap();
  assert_eq!(coin.coin_name, "automate");

  let fetched = s.get_coin(coin.id).await.unwrap().unwrap();
  assert_eq!(fetched.coin, coin);
  assert!(fetched.duties.is_empty());
}

#[tokio::test]
async fn created_ids_are_distinct() {
  let s = store().await;
  let a = s.create_coin(NewCoin::named("a")).await.unwrap();
  let b = s.create_coin(NewCoin::named("b")).await.unwrap();
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn get_coin_missing_returns_none() {
  let s = store().await;
  assert!(s.get_coin(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_coins_in_insertion_order() {
  let s = store().await;
  s.create_coin(NewCoin::named("first")).await.unwrap();
  s.create_coin(NewCoin::named("second")).await.unwrap();

  let coins = s.list_coins().await.unwrap();
  let names: Vec<_> = coins.iter().map(|c| c.coin.coin_name.as_str()).collect();
  assert_eq!(names, ["first", "second"]);
}

#[tokio::test]
async fn duplicate_coin_name_is_a_domain_conflict() {
  let s = store().await;
  s.create_coin(NewCoin::named("automate")).await.unwrap();

  let err = s.create_coin(NewCoin::named("automate")).await.unwrap_err();
  match err.as_domain() {
    Some(standards_core::Error::Duplicate { kind, field }) => {
      assert_eq!(*kind, EntityKind::Coin);
      assert_eq!(field, "coin_name");
    }
    other => panic!("expected Duplicate, got {other:?}"),
  }
}

#[tokio::test]
async fn create_coin_attaches_only_existing_duties() {
  let s = store().await;
  let d1 = s.create_duty(NewDuty::named("duty_1")).await.unwrap();
  let d2 = s.create_duty(NewDuty::named("duty_2")).await.unwrap();

  let coin = s
    .create_coin(NewCoin {
      coin_name: "automate".into(),
      duty_ids:  vec![d1.id, Uuid::new_v4(), d2.id, d1.id],
    })
    .await
    .unwrap();

  let fetched = s.get_coin(coin.id).await.unwrap().unwrap();
  let names: Vec<_> = fetched.duties.iter().map(|d| d.duty_name.as_str()).collect();
  assert_eq!(names, ["duty_1", "duty_2"]);
}

#[tokio::test]
async fn update_coin_renames_and_keeps_duties() {
  let s = store().await;
  let duty = s.create_duty(NewDuty::named("duty_1")).await.unwrap();
  let coin = s
    .create_coin(NewCoin { coin_name: "automate".into(), duty_ids: vec![duty.id] })
    .await
    .unwrap();

  let updated = s
    .update_coin(coin.id, CoinPatch { coin_name: Some("houston".into()), duty_ids: None })
    .await
    .unwrap();
  assert_eq!(updated.coin.coin_name, "houston");
  assert_eq!(updated.duties.len(), 1);
}

#[tokio::test]
async fn update_coin_replaces_duty_set() {
  let s = store().await;
  let d1 = s.create_duty(NewDuty::named("duty_1")).await.unwrap();
  let d2 = s.create_duty(NewDuty::named("duty_2")).await.unwrap();
  let d3 = s.create_duty(NewDuty::named("duty_3")).await.unwrap();
  let coin = s
    .create_coin(NewCoin { coin_name: "automate".into(), duty_ids: vec![d1.id, d2.id] })
    .await
    .unwrap();

  let updated = s
    .update_coin(coin.id, CoinPatch { coin_name: None, duty_ids: Some(vec![d2.id, d3.id]) })
    .await
    .unwrap();

  let ids: Vec<_> = updated.duties.iter().map(|d| d.id).collect();
  assert_eq!(ids, [d2.id, d3.id]);
  assert_eq!(updated.coin.coin_name, "automate");
}

#[tokio::test]
async fn update_missing_coin_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  let err = s.update_coin(id, CoinPatch::default()).await.unwrap_err();
  assert!(matches!(
    err.as_domain(),
    Some(standards_core::Error::NotFound(EntityKind::Coin, missing)) if *missing == id
  ));
}

#[tokio::test]
async fn rename_into_existing_name_conflicts() {
  let s = store().await;
  s.create_coin(NewCoin::named("taken")).await.unwrap();
  let coin = s.create_coin(NewCoin::named("free")).await.unwrap();

  let err = s
    .update_coin(coin.id, CoinPatch { coin_name: Some("taken".into()), duty_ids: None })
    .await
    .unwrap_err();
  assert!(matches!(err.as_domain(), Some(standards_core::Error::Duplicate { .. })));

  // The failed transaction leaves the row untouched.
  let fetched = s.get_coin(coin.id).await.unwrap().unwrap();
  assert_eq!(fetched.coin.coin_name, "free");
}

// ─── Duties ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn duty_description_is_optional() {
  let s = store().await;
  let duty = s.create_duty(NewDuty::named("duty_1")).await.unwrap();
  assert_eq!(duty.duty_description, None);

  let described = s
    .create_duty(NewDuty {
      duty_name:        "duty_2".into(),
      duty_description: Some("this is a description".into()),
      ksb_ids:          vec![],
    })
    .await
    .unwrap();
  let fetched = s.get_duty(described.id).await.unwrap().unwrap();
  assert_eq!(fetched.duty.duty_description.as_deref(), Some("this is a description"));
}

#[tokio::test]
async fn missing_descriptions_do_not_collide() {
  let s = store().await;
  s.create_duty(NewDuty::named("duty_1")).await.unwrap();
  s.create_duty(NewDuty::named("duty_2")).await.unwrap();
  assert_eq!(s.list_duties().await.unwrap().len(), 2);
}

#[tokio::test]
async fn repeated_description_is_a_conflict_on_the_wire_field() {
  let s = store().await;
  s.create_duty(NewDuty {
    duty_name:        "duty_1".into(),
    duty_description: Some("same".into()),
    ksb_ids:          vec![],
  })
  .await
  .unwrap();
  let second = s.create_duty(NewDuty::named("duty_2")).await.unwrap();

  let err = s
    .update_duty(second.id, DutyPatch {
      duty_name:        Some("renamed".into()),
      duty_description: Some(Some("same".into())),
      ksb_ids:          None,
    })
    .await
    .unwrap_err();
  match err.as_domain() {
    Some(standards_core::Error::Duplicate { kind, field }) => {
      assert_eq!(*kind, EntityKind::Duty);
      assert_eq!(field, "description");
    }
    other => panic!("expected Duplicate, got {other:?}"),
  }

  // Rolled back as a whole: the rename did not stick either.
  let fetched = s.get_duty(second.id).await.unwrap().unwrap();
  assert_eq!(fetched.duty.duty_name, "duty_2");
  assert_eq!(fetched.duty.duty_description, None);
}

#[tokio::test]
async fn update_duty_sets_and_clears_description() {
  let s = store().await;
  let duty = s.create_duty(NewDuty::named("duty_1")).await.unwrap();

  let set = s
    .update_duty(duty.id, DutyPatch {
      duty_description: Some(Some("described".into())),
      ..DutyPatch::default()
    })
    .await
    .unwrap();
  assert_eq!(set.duty.duty_description.as_deref(), Some("described"));

  let cleared = s
    .update_duty(duty.id, DutyPatch {
      duty_description: Some(None),
      ..DutyPatch::default()
    })
    .await
    .unwrap();
  assert_eq!(cleared.duty.duty_description, None);
  assert_eq!(cleared.duty.duty_name, "duty_1");
}

#[tokio::test]
async fn update_duty_replaces_ksb_set() {
  let s = store().await;
  let k1 = s.create_ksb(NewKsb::named("K1")).await.unwrap();
  let k2 = s.create_ksb(NewKsb::named("K2")).await.unwrap();
  let k3 = s.create_ksb(NewKsb::named("K3")).await.unwrap();
  let duty = s
    .create_duty(NewDuty {
      duty_name:        "duty_1".into(),
      duty_description: None,
      ksb_ids:          vec![k1.id, k2.id],
    })
    .await
    .unwrap();

  let updated = s
    .update_duty(duty.id, DutyPatch { ksb_ids: Some(vec![k2.id, k3.id]), ..DutyPatch::default() })
    .await
    .unwrap();

  let ids: Vec<_> = updated.ksbs.iter().map(|k| k.id).collect();
  assert_eq!(ids, [k2.id, k3.id]);
}

// ─── KSBs ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ksb_create_rename_roundtrip() {
  let s = store().await;
  let ksb = s.create_ksb(NewKsb::named("K1")).await.unwrap();

  let renamed = s
    .update_ksb(ksb.id, KsbPatch { ksb_name: Some("K2".into()) })
    .await
    .unwrap();
  assert_eq!(renamed.id, ksb.id);
  assert_eq!(renamed.ksb_name, "K2");

  let all = s.list_ksbs().await.unwrap();
  assert_eq!(all, vec![renamed]);
}

// ─── Links ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn set_links_counts_resolved_children() {
  let s = store().await;
  let d1 = s.create_duty(NewDuty::named("duty_1")).await.unwrap();
  let coin = s.create_coin(NewCoin::named("automate")).await.unwrap();

  let linked = s
    .set_links(Link::CoinDuties, coin.id, &[d1.id, Uuid::new_v4()])
    .await
    .unwrap();
  assert_eq!(linked, 1);

  let cleared = s.set_links(Link::CoinDuties, coin.id, &[]).await.unwrap();
  assert_eq!(cleared, 0);
  assert!(s.get_coin(coin.id).await.unwrap().unwrap().duties.is_empty());
}

#[tokio::test]
async fn set_links_on_missing_parent_is_not_found() {
  let s = store().await;
  let err = s
    .set_links(Link::DutyKsbs, Uuid::new_v4(), &[])
    .await
    .unwrap_err();
  assert!(matches!(
    err.as_domain(),
    Some(standards_core::Error::NotFound(EntityKind::Duty, _))
  ));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_reports_existence() {
  let s = store().await;
  let ksb = s.create_ksb(NewKsb::named("K1")).await.unwrap();

  assert!(s.delete(EntityKind::Ksb, ksb.id).await.unwrap());
  assert!(!s.delete(EntityKind::Ksb, ksb.id).await.unwrap());
  assert!(s.get_ksb(ksb.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_duty_removes_it_from_coins_and_drops_ksb_links() {
  let s = store().await;
  let ksb = s.create_ksb(NewKsb::named("K1")).await.unwrap();
  let keep = s.create_duty(NewDuty::named("keep")).await.unwrap();
  let gone = s
    .create_duty(NewDuty {
      duty_name:        "gone".into(),
      duty_description: None,
      ksb_ids:          vec![ksb.id],
    })
    .await
    .unwrap();
  let coin = s
    .create_coin(NewCoin { coin_name: "automate".into(), duty_ids: vec![keep.id, gone.id] })
    .await
    .unwrap();

  assert!(s.delete(EntityKind::Duty, gone.id).await.unwrap());

  let fetched = s.get_coin(coin.id).await.unwrap().unwrap();
  assert_eq!(fetched.duties, vec![keep]);

  // The KSB itself survives; only the association is gone.
  assert!(s.get_ksb(ksb.id).await.unwrap().is_some());
  assert!(s.delete(EntityKind::Ksb, ksb.id).await.unwrap());
}

#[tokio::test]
async fn deleting_linked_ksb_detaches_it_from_live_duty() {
  let s = store().await;
  let k1 = s.create_ksb(NewKsb::named("K1")).await.unwrap();
  let k2 = s.create_ksb(NewKsb::named("K2")).await.unwrap();
  let duty = s
    .create_duty(NewDuty {
      duty_name:        "duty_1".into(),
      duty_description: None,
      ksb_ids:          vec![k1.id, k2.id],
    })
    .await
    .unwrap();

  assert!(s.delete(EntityKind::Ksb, k1.id).await.unwrap());

  let fetched = s.get_duty(duty.id).await.unwrap().unwrap();
  assert_eq!(fetched.ksbs, vec![k2]);
}

#[tokio::test]
async fn deleting_coin_leaves_duties_intact() {
  let s = store().await;
  let duty = s.create_duty(NewDuty::named("duty_1")).await.unwrap();
  let coin = s
    .create_coin(NewCoin { coin_name: "automate".into(), duty_ids: vec![duty.id] })
    .await
    .unwrap();

  assert!(s.delete(EntityKind::Coin, coin.id).await.unwrap());
  assert!(s.get_duty(duty.id).await.unwrap().is_some());
  assert!(s.list_coins().await.unwrap().is_empty());
}
