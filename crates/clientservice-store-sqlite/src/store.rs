//! [`SqliteStore`], the SQLite implementation of [`ClientStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};

use clientservice_core::{Client, ObjectId, store::ClientStore};

use crate::{
  Result,
  encode::{RawClient, encode_client_type, encode_document, encode_dt, encode_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A client document store backed by a single SQLite file.
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

  /// Open an in-memory store, used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
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

// ─── ClientStore impl ────────────────────────────────────────────────────────

impl ClientStore for SqliteStore {
  type Error = crate::Error;

  async fn save(&self, client: Client) -> Result<Client> {
    let (id, client) = match client.id() {
      Some(id) => (id, client),
      None => {
        let id = ObjectId::new();
        (id, Client::from_existing(&client).with_id(id).build())
      }
    };

    let id_str       = encode_id(id);
    let type_str     = encode_client_type(client.client_type());
    let document_str = encode_document(&client)?;
    let now_str      = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO clients (id, client_type, document, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)
           ON CONFLICT(id) DO UPDATE SET
             client_type = excluded.client_type,
             document    = excluded.document,
             updated_at  = excluded.updated_at",
          rusqlite::params![id_str, type_str, document_str, now_str],
        )?;
        Ok(())
      })
      .await?;

    info!(%id, client_type = %client.client_type(), "client saved");
    Ok(client)
  }

  async fn find_by_id(&self, id: ObjectId) -> Result<Option<Client>> {
    let id_str = encode_id(id);

    let raw: Option<RawClient> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, document FROM clients WHERE id = ?1",
            rusqlite::params![id_str],
            RawClient::from_row,
          )
          .optional()?)
      })
      .await?;

    debug!(%id, found = raw.is_some(), "client lookup");
    raw.map(RawClient::into_client).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Client>> {
    let raws: Vec<RawClient> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, document FROM clients ORDER BY id")?;
        let rows = stmt
          .query_map([], RawClient::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    debug!(count = raws.len(), "clients listed");
    raws.into_iter().map(RawClient::into_client).collect()
  }

  async fn exists_by_id(&self, id: ObjectId) -> Result<bool> {
    let id_str = encode_id(id);

    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM clients WHERE id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(exists)
  }

  async fn delete_by_id(&self, id: ObjectId) -> Result<bool> {
    let id_str = encode_id(id);

    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute("DELETE FROM clients WHERE id = ?1", rusqlite::params![id_str])?;
        Ok(n > 0)
      })
      .await?;

    info!(%id, removed, "client deleted");
    Ok(removed)
  }
}
