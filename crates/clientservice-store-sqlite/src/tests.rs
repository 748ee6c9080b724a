//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use clientservice_core::{
  Address, Client, ObjectId,
  enums::{ClientType, Gender, MaritalStatus, PhoneType},
  store::ClientStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ken() -> Client {
  Client::of_type(ClientType::Person)
    .unwrap()
    .with_first_name("Ken")
    .with_last_name("Masters")
    .with_gender(Gender::Male)
    .with_birth_date(NaiveDate::from_ymd_opt(1990, 3, 16).unwrap())
    .with_marital_status(MaritalStatus::Single)
    .with_address(
      Address::of_country(Some("Shadaloo"))
        .unwrap()
        .with_street_number(110)
        .with_city("Shadaloo City")
        .build(),
    )
    .with_phone(PhoneType::Home, "111111111")
    .with_email("kmasters@streetf.com")
    .build()
}

fn acme() -> Client {
  Client::of_type(ClientType::Company)
    .unwrap()
    .with_last_name("Acme Corp.")
    .build()
}

// ─── save ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_assigns_an_id() {
  let s = store().await;

  let saved = s.save(ken()).await.unwrap();
  let id = saved.id().expect("id assigned on save");
  assert_eq!(saved.first_name(), Some("Ken"));

  let fetched = s.find_by_id(id).await.unwrap().unwrap();
  assert_eq!(fetched, saved);
}

#[tokio::test]
async fn save_keeps_a_caller_supplied_id() {
  let s = store().await;
  let id = ObjectId::parse_str("58e94dffebbd721e30c97d3d").unwrap();

  let saved = s
    .save(Client::from_existing(&acme()).with_id(id).build())
    .await
    .unwrap();
  assert_eq!(saved.id(), Some(id));
  assert!(s.exists_by_id(id).await.unwrap());
}

#[tokio::test]
async fn save_with_existing_id_replaces_document() {
  let s = store().await;
  let saved = s.save(ken()).await.unwrap();
  let id = saved.id().unwrap();

  let renamed = Client::from_existing(&saved).with_first_name("Bison").build();
  s.save(renamed).await.unwrap();

  let all = s.find_all().await.unwrap();
  assert_eq!(all.len(), 1);
  let fetched = s.find_by_id(id).await.unwrap().unwrap();
  assert_eq!(fetched.first_name(), Some("Bison"));
  assert_eq!(fetched.last_name(), Some("Masters"));
  assert_eq!(fetched.phone(PhoneType::Home), Some("111111111"));
}

#[tokio::test]
async fn stored_document_keeps_every_field() {
  let s = store().await;
  let saved = s.save(ken()).await.unwrap();

  let fetched = s.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();
  assert_eq!(fetched.birth_date(), NaiveDate::from_ymd_opt(1990, 3, 16));
  assert_eq!(fetched.address().map(Address::country), Some("Shadaloo"));
  assert_eq!(fetched.address().and_then(Address::street_number), Some(110));
  assert_eq!(fetched.marital_status(), Some(MaritalStatus::Single));
}

// ─── reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_by_id_missing_returns_none() {
  let s = store().await;
  assert!(s.find_by_id(ObjectId::new()).await.unwrap().is_none());
  assert!(!s.exists_by_id(ObjectId::new()).await.unwrap());
}

#[tokio::test]
async fn find_all_on_empty_store() {
  let s = store().await;
  assert!(s.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_all_is_ordered_by_id() {
  let s = store().await;
  let late = ObjectId::parse_str("ffffffffffffffffffffffff").unwrap();
  let early = ObjectId::parse_str("000000000000000000000001").unwrap();

  s.save(Client::from_existing(&acme()).with_id(late).build())
    .await
    .unwrap();
  s.save(Client::from_existing(&ken()).with_id(early).build())
    .await
    .unwrap();
  s.save(ken()).await.unwrap();

  let ids: Vec<_> = s
    .find_all()
    .await
    .unwrap()
    .iter()
    .filter_map(Client::id)
    .collect();
  assert_eq!(ids.len(), 3);
  assert_eq!(ids.first(), Some(&early));
  assert_eq!(ids.last(), Some(&late));
}

// ─── delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_the_document() {
  let s = store().await;
  let id = s.save(ken()).await.unwrap().id().unwrap();

  assert!(s.delete_by_id(id).await.unwrap());
  assert!(s.find_by_id(id).await.unwrap().is_none());
  assert!(s.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_unknown_id_is_not_an_error() {
  let s = store().await;
  assert!(!s.delete_by_id(ObjectId::new()).await.unwrap());
}
