//! Encoding and decoding helpers between client documents and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Ids are stored in their
//! canonical 24-hex-digit form, which sorts in creation order.

use chrono::{DateTime, Utc};
use clientservice_core::{Client, ObjectId, enums::ClientType, wire};

use crate::{Error, Result};

pub fn encode_id(id: ObjectId) -> String { id.to_hex() }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn encode_client_type(t: ClientType) -> String { t.as_ref().to_owned() }

pub fn encode_document(client: &Client) -> Result<String> {
  Ok(wire::to_compact_string(client)?)
}

// ─── Raw row type ────────────────────────────────────────────────────────────

/// Raw row read from the `clients` table before decoding.
pub struct RawClient {
  pub id:       String,
  pub document: String,
}

impl RawClient {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:       row.get(0)?,
      document: row.get(1)?,
    })
  }

  /// Rebuild the client through the tree deserializer, so a stored document
  /// is held to the same rules as one arriving over HTTP.
  pub fn into_client(self) -> Result<Client> {
    let client = wire::from_str(&self.document)?;
    match client.id() {
      Some(id) if id.to_hex() == self.id => Ok(client),
      _ => Err(Error::IdMismatch(self.id)),
    }
  }
}
