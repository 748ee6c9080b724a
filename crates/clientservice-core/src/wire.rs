//! Wire encoding of clients.
//!
//! Outbound JSON uses snake_case keys, omits absent values, renders
//! identifiers as strings and dates as `YYYY-MM-DD`; all of this is carried
//! by the `Serialize` impls on the model types. This module only fixes the
//! output layout (indented for HTTP, compact for storage) and offers the
//! inbound entry points.

use serde::Serialize;
use serde_json::Value;

use crate::{Client, Result};

/// Decode a client from raw JSON bytes.
pub fn from_slice(bytes: &[u8]) -> Result<Client> {
  let tree: Value = serde_json::from_slice(bytes)?;
  Client::from_tree(&tree)
}

pub fn from_str(text: &str) -> Result<Client> { from_slice(text.as_bytes()) }

/// Indented JSON, used for HTTP response bodies.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
  Ok(serde_json::to_vec_pretty(value)?)
}

/// Single-line JSON, used for stored documents.
pub fn to_compact_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}
