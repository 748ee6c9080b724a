//! Error types for `clientservice-core`.

use thiserror::Error;

/// Every way building or decoding a client can fail.
///
/// None of these are recovered locally; the whole operation is rejected.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Client type can not be null.")]
  ClientTypeRequired,

  #[error("Country can not be null.")]
  CountryRequired,

  #[error("Address type can not be null.")]
  AddressTypeRequired,

  #[error("unknown enum value: {value}")]
  UnknownEnumValue { kind: &'static str, value: String },

  #[error("invalid value for {field}: expected {expected}")]
  InvalidField {
    field:    &'static str,
    expected: &'static str,
  },

  #[error("invalid date: {0}")]
  InvalidDate(#[from] chrono::ParseError),

  #[error("invalid object id: {0:?}")]
  InvalidObjectId(String),

  #[error("expected a JSON object")]
  NotAnObject,

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
