//! Route handlers and the shared response helpers they use.

pub mod clients;
pub mod token;

use axum::{
  http::{HeaderValue, header},
  response::{IntoResponse, Response},
};
use clientservice_core::{ObjectId, wire};
use serde::Serialize;

use crate::error::ApiError;

/// A JSON response body rendered through the wire encoding (indented, absent
/// values omitted).
pub struct Pretty<T>(pub T);

impl<T: Serialize> IntoResponse for Pretty<T> {
  fn into_response(self) -> Response {
    match wire::to_vec(&self.0) {
      Ok(body) => (
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
      )
        .into_response(),
      Err(e) => ApiError::Internal(e.to_string()).into_response(),
    }
  }
}

/// Parse a client id taken from the request path.
pub fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
  raw
    .parse()
    .map_err(|_| ApiError::BadRequest(format!("invalid client id: {raw}")))
}
